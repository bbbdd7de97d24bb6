use super::*;
use crate::domain::MatchStatus;
use crate::testing::{assert_slice_f64_relative, complete, form_matches, team, with_status, DAY};

fn four_teams() -> Vec<TeamRecord> {
    vec![
        team(1, "Albion"),
        team(2, "Borough"),
        team(3, "City"),
        team(4, "Rovers"),
    ]
}

#[test]
fn statistics_of_four_matches() {
    let matches = vec![
        complete(1, 1, 2, 2, 1),
        complete(2, 3, 4, 0, 0),
        complete(3, 1, 3, 3, 3),
        complete(4, 2, 4, 1, 2),
        with_status(complete(5, 1, 4, 7, 0), MatchStatus::Canceled),
    ];
    let stats = calculate_league_statistics(&matches);
    assert_eq!(4, stats.total_matches);
    assert_eq!(12, stats.total_goals);
    assert_eq!(3.0, stats.average_goals_per_match);
    assert_eq!(25.0, stats.home_win_percentage);
    assert_eq!(50.0, stats.draw_percentage);
    assert_eq!(25.0, stats.away_win_percentage);
    // 2-1, 3-3 and 1-2 have both sides scoring
    assert_eq!(75.0, stats.btts_percentage);
    assert_eq!(75.0, stats.over_25_percentage);
    assert_eq!(25.0, stats.over_35_percentage);
    assert_eq!(25.0, stats.clean_sheet_percentage);
    assert_eq!(1, stats.high_scoring_matches);
    assert_eq!(1, stats.low_scoring_matches);
}

#[test]
fn statistics_of_empty_input_are_zero() {
    assert_eq!(LeagueStatistics::default(), calculate_league_statistics(&[]));
    let pending = vec![with_status(complete(1, 1, 2, 0, 0), MatchStatus::Incomplete)];
    assert_eq!(LeagueStatistics::default(), calculate_league_statistics(&pending));
}

fn small_season() -> Vec<MatchRecord> {
    vec![
        complete(1, 1, 2, 2, 0),
        complete(2, 3, 4, 1, 1),
        complete(3, 2, 3, 3, 1),
        complete(4, 4, 1, 0, 0),
        complete(5, 1, 3, 1, 2),
        with_status(complete(6, 2, 4, 5, 0), MatchStatus::Incomplete),
    ]
}

#[test]
fn table_orders_by_points_then_goal_difference() {
    let table = generate_league_table(&small_season(), &four_teams());
    assert_eq!(
        vec![1, 3, 2, 4],
        table.iter().map(|row| row.team_id).collect::<Vec<_>>()
    );
    assert_eq!(
        vec![1, 2, 3, 4],
        table.iter().map(|row| row.position).collect::<Vec<_>>()
    );

    let albion = &table[0];
    assert_eq!("Albion", albion.team_name);
    assert_eq!((3, 1, 1, 1), (albion.played, albion.won, albion.drawn, albion.lost));
    assert_eq!((3, 2, 1), (albion.goals_for, albion.goals_against, albion.goal_difference));
    assert_eq!(4, albion.points);
    assert_eq!("WDL", albion.form);
    assert_eq!(VenueRecord { won: 1, drawn: 0, lost: 1 }, albion.home);
    assert_eq!(VenueRecord { won: 0, drawn: 1, lost: 0 }, albion.away);

    let city = &table[1];
    assert_eq!(4, city.points);
    assert_eq!(-1, city.goal_difference);
}

#[test]
fn table_points_sum_matches_results() {
    let matches = small_season();
    let table = generate_league_table(&matches, &four_teams());
    let complete: Vec<_> = matches.iter().filter(|record| record.is_complete()).collect();
    let draws = complete
        .iter()
        .filter(|record| record.home_goals == record.away_goals)
        .count() as u32;
    let decisive = complete.len() as u32 - draws;
    assert_eq!(3 * decisive + 2 * draws, table.iter().map(|row| row.points).sum::<u32>());
}

#[test]
fn table_breaks_ties_on_goals_scored() {
    let matches = vec![complete(1, 1, 3, 1, 0), complete(2, 2, 4, 3, 2)];
    let table = generate_league_table(&matches, &four_teams());
    assert_eq!(
        vec![2, 1, 4, 3],
        table.iter().map(|row| row.team_id).collect::<Vec<_>>()
    );
}

#[test]
fn table_keeps_supplied_order_for_full_ties() {
    let table = generate_league_table(&[], &four_teams());
    assert_eq!(
        vec![1, 2, 3, 4],
        table.iter().map(|row| row.team_id).collect::<Vec<_>>()
    );
    assert!(table.iter().all(|row| row.played == 0 && row.form.is_empty()));
}

#[test]
fn table_ignores_unlisted_opponents() {
    let matches = vec![complete(1, 1, 99, 4, 0)];
    let table = generate_league_table(&matches, &four_teams());
    assert_eq!(1, table[0].team_id);
    assert_eq!(3, table[0].points);
    assert_eq!(4, table.len());
}

#[test]
fn table_form_shows_last_five() {
    let matches = form_matches(1, 100, "LLWWDWW");
    let table = generate_league_table(&matches, &[team(1, "Albion")]);
    assert_eq!("WWDWW", table[0].form);
    assert_eq!(7, table[0].played);
}

#[test]
fn table_is_sorted_for_a_round_robin() {
    let teams: Vec<_> = (1..=6).map(|id| team(id, &format!("Team {id}"))).collect();
    let mut matches = vec![];
    let mut id = 0;
    for home in 1..=6u32 {
        for away in 1..=6u32 {
            if home != away {
                id += 1;
                let home_goals = ((home * 7 + away * 3) % 4) as u8;
                let away_goals = ((home + away * 5) % 3) as u8;
                matches.push(complete(id, home, away, home_goals, away_goals));
            }
        }
    }
    let table = generate_league_table(&matches, &teams);
    for pair in table.windows(2) {
        let (upper, lower) = (&pair[0], &pair[1]);
        assert!(upper.position < lower.position);
        assert!(upper.points >= lower.points);
        if upper.points == lower.points {
            assert!(upper.goal_difference >= lower.goal_difference);
            if upper.goal_difference == lower.goal_difference {
                assert!(upper.goals_for >= lower.goals_for);
            }
        }
    }
    let draws = matches
        .iter()
        .filter(|record| record.home_goals == record.away_goals)
        .count() as u32;
    let decisive = matches.len() as u32 - draws;
    assert_eq!(3 * decisive + 2 * draws, table.iter().map(|row| row.points).sum::<u32>());
    assert_eq!(generate_league_table(&matches, &teams), table);
}

fn at(mut record: MatchRecord, kickoff: i64) -> MatchRecord {
    record.kickoff = kickoff;
    record
}

#[test]
fn season_trends() {
    let teams = vec![team(1, "Albion"), team(2, "Borough"), team(3, "City")];
    let matches = vec![
        at(complete(1, 1, 2, 1, 0), 0),
        at(complete(2, 2, 3, 0, 1), DAY),
        at(complete(3, 3, 1, 2, 1), 8 * DAY),
        at(complete(4, 1, 2, 3, 2), 15 * DAY),
    ];
    let analysis = analyze_season_trends(&matches, &teams, "2024/25");
    assert_eq!("2024/25", analysis.season);
    assert_eq!(4, analysis.statistics.total_matches);
    assert_slice_f64_relative(&[1.0, 3.0, 5.0], &analysis.trends.weekly_goal_averages, 1e-9);
    assert_eq!(Trend::Increasing, analysis.trends.goal_trend);
    assert_eq!(75.0, analysis.trends.predictability);
    // spread of 6 points over a possible 9
    assert_eq!(33.33, analysis.trends.competitiveness);

    assert_eq!(
        vec![3, 1, 2],
        analysis.table.iter().map(|row| row.team_id).collect::<Vec<_>>()
    );
    assert_eq!(
        vec![(1, 5), (3, 3), (2, 2)],
        analysis
            .top_scorers
            .iter()
            .map(|entry| (entry.team_id, entry.goals))
            .collect::<Vec<_>>()
    );
    assert_eq!(
        vec![(3, 1), (1, 4), (2, 5)],
        analysis
            .best_defenses
            .iter()
            .map(|entry| (entry.team_id, entry.goals))
            .collect::<Vec<_>>()
    );
}

#[test]
fn season_trends_of_empty_season() {
    let analysis = analyze_season_trends(&[], &four_teams(), "empty");
    assert_eq!(LeagueStatistics::default(), analysis.statistics);
    assert!(analysis.trends.weekly_goal_averages.is_empty());
    assert_eq!(Trend::Stable, analysis.trends.goal_trend);
    assert_eq!(0.0, analysis.trends.competitiveness);
    assert_eq!(4, analysis.top_scorers.len());
}

#[test]
fn competitiveness_degenerate_tables() {
    assert_eq!(0.0, calculate_competitiveness(&[]));
    let table = generate_league_table(&[], &four_teams());
    assert_eq!(0.0, calculate_competitiveness(&table));
}

#[test]
fn compare_nothing() {
    assert_eq!(Err(LeagueError::NoCompetitions), compare_competitions(&[]));
}

fn alpha() -> Competition {
    Competition {
        name: "Alpha".to_string(),
        matches: vec![complete(1, 1, 2, 3, 2), complete(2, 2, 1, 2, 2)],
        teams: vec![team(1, "One"), team(2, "Two")],
    }
}

fn beta() -> Competition {
    Competition {
        name: "Beta".to_string(),
        matches: vec![complete(1, 3, 4, 1, 0), complete(2, 4, 3, 0, 0)],
        teams: vec![team(3, "Three"), team(4, "Four")],
    }
}

#[test]
fn compare_two_competitions() {
    let comparison = compare_competitions(&[alpha(), beta()]).unwrap();
    assert_eq!(2, comparison.competitions.len());

    let alpha = &comparison.competitions[0];
    assert_eq!(4.5, alpha.statistics.average_goals_per_match);
    assert_eq!(50.0, alpha.competitiveness);
    assert_eq!(100.0, alpha.quality);

    let beta = &comparison.competitions[1];
    assert_eq!(0.5, beta.statistics.average_goals_per_match);
    assert_eq!(50.0, beta.competitiveness);
    assert_eq!(6.0, beta.quality);

    assert_eq!("Alpha", comparison.highest_scoring);
    assert_eq!("Beta", comparison.most_defensive);
    // level on both, so the first listed wins
    assert_eq!("Alpha", comparison.most_competitive);
    assert_eq!("Alpha", comparison.most_predictable);
}

#[test]
fn compare_ties_favour_first_listed() {
    let mut twin = alpha();
    twin.name = "Twin".to_string();
    let comparison = compare_competitions(&[twin, alpha()]).unwrap();
    assert_eq!("Twin", comparison.most_competitive);
    assert_eq!("Twin", comparison.highest_scoring);
    assert_eq!("Twin", comparison.most_defensive);
    assert_eq!("Twin", comparison.most_predictable);
}
