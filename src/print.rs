//! Console tables for the CLI.

use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};

use crate::league::{CompetitionComparison, LeagueStatistics, LeagueTableRow, TeamGoals};
use crate::player::PlayerMetrics;
use crate::predict::PredictionResult;
use crate::rating::TeamRating;
use crate::referee::RefereeImpact;

fn left(min_width: usize) -> Col {
    Col::new(Styles::default().with(MinWidth(min_width)).with(Left))
}

fn right(min_width: usize) -> Col {
    Col::new(Styles::default().with(MinWidth(min_width)).with(HAlign::Right))
}

fn header(cells: &[&str]) -> Row {
    Row::new(
        Styles::default().with(Header(true)),
        cells.iter().map(|&cell| cell.into()).collect(),
    )
}

pub fn tabulate_league_table(rows: &[LeagueTableRow]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            right(3),
            left(20),
            right(3),
            right(3),
            right(3),
            right(3),
            right(4),
            right(4),
            right(4),
            right(4),
            Col::new(Styles::default().with(Separator(true)).with(MinWidth(6)).with(Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Centred)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Centred)),
        ])
        .with_row(header(&[
            "Pos", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts", "Form", "Home", "Away",
        ]));
    for row in rows {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                row.position.to_string().into(),
                row.team_name.clone().into(),
                row.played.to_string().into(),
                row.won.to_string().into(),
                row.drawn.to_string().into(),
                row.lost.to_string().into(),
                row.goals_for.to_string().into(),
                row.goals_against.to_string().into(),
                format!("{:+}", row.goal_difference).into(),
                row.points.to_string().into(),
                row.form.clone().into(),
                format!("{}-{}-{}", row.home.won, row.home.drawn, row.home.lost).into(),
                format!("{}-{}-{}", row.away.won, row.away.drawn, row.away.lost).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_statistics(stats: &LeagueStatistics) -> Table {
    let mut table = Table::default().with_cols(vec![left(20), right(8)]);
    for (label, value) in [
        ("Matches", stats.total_matches.to_string()),
        ("Goals", stats.total_goals.to_string()),
        ("Goals per match", format!("{:.2}", stats.average_goals_per_match)),
        ("Home win %", format!("{:.2}", stats.home_win_percentage)),
        ("Draw %", format!("{:.2}", stats.draw_percentage)),
        ("Away win %", format!("{:.2}", stats.away_win_percentage)),
        ("BTTS %", format!("{:.2}", stats.btts_percentage)),
        ("Over 2.5 %", format!("{:.2}", stats.over_25_percentage)),
        ("Over 3.5 %", format!("{:.2}", stats.over_35_percentage)),
        ("Clean sheet %", format!("{:.2}", stats.clean_sheet_percentage)),
        ("High scoring", stats.high_scoring_matches.to_string()),
        ("Low scoring", stats.low_scoring_matches.to_string()),
    ] {
        table.push_row(Row::new(Styles::default(), vec![label.into(), value.into()]));
    }
    table
}

/// Teams with a goal tally under the given column heading.
pub fn tabulate_team_goals(entries: &[TeamGoals], heading: &str) -> Table {
    let mut table = Table::default()
        .with_cols(vec![left(20), right(5)])
        .with_row(header(&["Team", heading]));
    for entry in entries {
        table.push_row(Row::new(
            Styles::default(),
            vec![entry.team_name.clone().into(), entry.goals.to_string().into()],
        ));
    }
    table
}

pub fn tabulate_prediction(prediction: &PredictionResult) -> Table {
    let fixture = format!("{} v {}", prediction.home_team, prediction.away_team);
    let mut table = Table::default()
        .with_cols(vec![left(20), right(10)])
        .with_row(header(&[fixture.as_str(), ""]));
    let mut rows = vec![
        (
            "Expectancy",
            format!("{:.2}-{:.2}", prediction.home_expectancy, prediction.away_expectancy),
        ),
        ("Home win %", format!("{:.2}", prediction.outcome.home_win)),
        ("Draw %", format!("{:.2}", prediction.outcome.draw)),
        ("Away win %", format!("{:.2}", prediction.outcome.away_win)),
        ("BTTS %", format!("{:.2}", prediction.btts_probability)),
        ("Over 2.5 %", format!("{:.2}", prediction.over_25_probability)),
        (
            "Likeliest score",
            format!("{}-{}", prediction.most_likely_score.home, prediction.most_likely_score.away),
        ),
        ("Corners", format!("{:.1}", prediction.expected_corners)),
    ];
    if let Some(h2h) = &prediction.head_to_head {
        rows.push((
            "Head to head",
            format!("{}-{}-{}", h2h.home_wins, h2h.draws, h2h.away_wins),
        ));
    }
    rows.push(("Confidence", format!("{:.0}", prediction.confidence)));
    for (label, value) in rows {
        table.push_row(Row::new(Styles::default(), vec![label.into(), value.into()]));
    }
    table
}

pub fn tabulate_competitions(comparison: &CompetitionComparison) -> Table {
    let mut table = Table::default()
        .with_cols(vec![left(16), right(8), right(8), right(8), right(8), right(8)])
        .with_row(header(&["Competition", "Goals", "BTTS %", "Home %", "Compet.", "Quality"]));
    for summary in &comparison.competitions {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                summary.name.clone().into(),
                format!("{:.2}", summary.statistics.average_goals_per_match).into(),
                format!("{:.2}", summary.statistics.btts_percentage).into(),
                format!("{:.2}", summary.statistics.home_win_percentage).into(),
                format!("{:.2}", summary.competitiveness).into(),
                format!("{:.2}", summary.quality).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_ratings(ratings: &[TeamRating], team_name: impl Fn(u32) -> String) -> Table {
    let mut table = Table::default()
        .with_cols(vec![left(20), right(8), right(5)])
        .with_row(header(&["Team", "Elo", "P"]));
    for rating in ratings {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                team_name(rating.team_id).into(),
                format!("{:.0}", rating.rating).into(),
                rating.matches.to_string().into(),
            ],
        ));
    }
    table
}

pub fn tabulate_players(players: &[PlayerMetrics]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![left(20), right(4), right(6), right(6), right(7), right(7), right(7)])
        .with_row(header(&["Player", "Apps", "G/G", "A/G", "Rating", "Consist.", "Impact"]));
    for player in players {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                player.name.clone().into(),
                player.appearances.to_string().into(),
                format!("{:.2}", player.goals_per_game).into(),
                format!("{:.2}", player.assists_per_game).into(),
                format!("{:.2}", player.average_rating).into(),
                format!("{:.2}", player.consistency).into(),
                format!("{:.2}", player.impact_rating).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_referees(impacts: &[RefereeImpact]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![left(20), right(4), right(6), right(6), right(8), left(8), left(12)])
        .with_row(header(&["Referee", "P", "Cards", "Goals", "Home +/-", "Cards", "Goals"]));
    for impact in impacts {
        let metrics = &impact.metrics;
        table.push_row(Row::new(
            Styles::default(),
            vec![
                metrics.name.clone().into(),
                metrics.matches_officiated.to_string().into(),
                format!("{:.2}", metrics.average_cards_per_game).into(),
                format!("{:.2}", metrics.average_goals_per_game).into(),
                format!("{:+.2}", impact.home_advantage_effect).into(),
                impact.card_tendency.to_string().into(),
                impact.goal_tendency.to_string().into(),
            ],
        ));
    }
    table
}
