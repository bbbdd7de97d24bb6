use super::*;
use crate::domain::{MatchStats, MatchStatus};
use crate::testing::{complete, form_matches, with_status};
use assert_float_eq::*;

#[test]
fn metrics_of_empty_input_are_zero() {
    assert_eq!(PerformanceMetrics::default(), calculate_performance_metrics(&[], 1));
    let unrelated = vec![complete(1, 5, 6, 3, 0)];
    assert_eq!(PerformanceMetrics::default(), calculate_performance_metrics(&unrelated, 1));
}

#[test]
fn metrics_read_goals_from_the_correct_side() {
    let matches = vec![
        complete(1, 1, 2, 3, 1),
        complete(2, 3, 1, 2, 2),
        complete(3, 4, 1, 1, 0),
        complete(4, 1, 5, 0, 0),
        with_status(complete(5, 1, 6, 9, 0), MatchStatus::Suspended),
    ];
    let metrics = calculate_performance_metrics(&matches, 1);
    assert_eq!(4, metrics.matches_played);
    assert_eq!((1, 2, 1), (metrics.wins, metrics.draws, metrics.losses));
    assert_eq!(5, metrics.goals_for);
    assert_eq!(4, metrics.goals_against);
    assert_eq!(1, metrics.goal_difference);
    assert_eq!(5, metrics.points);
    assert_eq!(25.0, metrics.win_percentage);
    assert_eq!(50.0, metrics.draw_percentage);
    assert_eq!(25.0, metrics.loss_percentage);
    assert_eq!(1, metrics.clean_sheets);
    assert_eq!(25.0, metrics.clean_sheet_percentage);
    assert_eq!(2, metrics.failed_to_score);
    assert_eq!(50.0, metrics.btts_percentage);
    assert_eq!(50.0, metrics.over_25_percentage);
    assert_eq!(1.25, metrics.average_goals_for);
    assert_eq!(1.0, metrics.average_goals_against);
    assert_eq!(1.25, metrics.points_per_game);
}

#[test]
fn form_of_three_straight_wins() {
    let matches = form_matches(1, 100, "WWW");
    let form = analyze_team_form(&matches, 1, DEFAULT_FORM_WINDOW);
    assert_eq!("WWW", form.form);
    assert_eq!(9, form.form_points);
    assert_eq!(55.0, form.consistency);
    assert_eq!(Momentum::High, form.momentum);
    assert_eq!(FormTrend::Stable, form.trend);
    assert_eq!(6, form.goals_for);
    assert_eq!(0, form.goals_against);
}

#[test]
fn form_uses_trailing_window_only() {
    let matches = form_matches(1, 100, "LLLLWWDW");
    let form = analyze_team_form(&matches, 1, 5);
    assert_eq!("LWWDW", form.form);
    assert_eq!(10, form.form_points);
    assert_eq!(
        vec![
            MatchResult::Loss,
            MatchResult::Win,
            MatchResult::Win,
            MatchResult::Draw,
            MatchResult::Win
        ],
        form.results
    );
    // points [0, 3 | 3, 1, 3]: second half well above the first
    assert_eq!(FormTrend::Improving, form.trend);
    // longest run is the two wins
    assert_eq!(70.0, form.consistency);
}

#[test]
fn form_momentum_low_after_poor_run() {
    let matches = form_matches(1, 100, "WWLLL");
    let form = analyze_team_form(&matches, 1, 5);
    assert_eq!(Momentum::Low, form.momentum);
    assert_eq!(FormTrend::Declining, form.trend);
    assert_eq!(55.0, form.consistency);
}

#[test]
fn form_consistency_floors_at_zero() {
    let matches = form_matches(1, 100, "LLLLLLLL");
    let form = analyze_team_form(&matches, 1, 8);
    assert_eq!(0.0, form.consistency);
}

#[test]
fn form_of_empty_input() {
    let form = analyze_team_form(&[], 1, 5);
    assert_eq!("", form.form);
    assert_eq!(0, form.form_points);
    assert_eq!(100.0, form.consistency);
    assert_eq!(FormTrend::Stable, form.trend);
}

#[test]
fn home_away_split_partitions_matches() {
    let matches = form_matches(1, 100, "WWDLW");
    let split = calculate_home_away_performance(&matches, 1);
    let total = calculate_performance_metrics(&matches, 1);
    assert_eq!(3, split.home.matches_played);
    assert_eq!(2, split.away.matches_played);
    assert_eq!(total.matches_played, split.home.matches_played + split.away.matches_played);
    assert_eq!((2, 1, 0), (split.home.wins, split.home.draws, split.home.losses));
    assert_eq!((1, 0, 1), (split.away.wins, split.away.draws, split.away.losses));
    assert_eq!(total.goals_for, split.home.goals_for + split.away.goals_for);
}

#[test]
fn head_to_head_counts_both_orientations() {
    let matches = vec![
        complete(1, 1, 2, 2, 1),
        complete(2, 2, 1, 1, 1),
        complete(3, 2, 1, 3, 0),
        complete(4, 1, 3, 4, 0),
        with_status(complete(5, 1, 2, 0, 0), MatchStatus::Incomplete),
    ];
    let h2h = analyze_head_to_head(&matches, 1, 2);
    assert_eq!(3, h2h.total_meetings);
    assert_eq!(1, h2h.home_wins);
    assert_eq!(1, h2h.away_wins);
    assert_eq!(1, h2h.draws);
    assert_eq!(h2h.total_meetings, h2h.home_wins + h2h.away_wins + h2h.draws);
    assert_eq!(8, h2h.total_goals);
    assert_eq!(2.67, h2h.average_goals);
    assert_eq!(66.67, h2h.btts_percentage);
    assert_eq!(33.33, h2h.home_advantage);
}

#[test]
fn compare_teams_favours_team_in_form() {
    let mut matches = form_matches(1, 100, "WWDLW");
    matches.extend(form_matches(2, 200, "LLDWL"));
    let comparison = compare_teams(&matches, 1, 2, None, DEFAULT_FORM_WINDOW);

    assert_eq!(10, comparison.home.form.form_points);
    assert_eq!(4, comparison.away.form.form_points);
    assert!(matches!(
        comparison.home.form.momentum,
        Momentum::High | Momentum::Medium
    ));
    assert!(comparison.prediction.home_win > comparison.prediction.away_win);

    // home: 60% + 2×5 + 10 = 80; away: 20% + 2×(−1) = 18; denominator 128
    assert_eq!(62.5, comparison.prediction.home_win);
    assert_eq!(14.06, comparison.prediction.away_win);
    assert_eq!(23.44, comparison.prediction.draw);
    assert_float_absolute_eq!(100.0, comparison.prediction.sum(), 0.011);

    assert_eq!(0, comparison.head_to_head.total_meetings);
    assert_eq!(60.0, comparison.confidence);
}

#[test]
fn compare_teams_confidence_rises_with_meetings() {
    let h2h: Vec<_> = (0..6).map(|index| complete(index, 1, 2, 1, 0)).collect();
    let comparison = compare_teams(&h2h, 1, 2, None, DEFAULT_FORM_WINDOW);
    assert_eq!(6, comparison.head_to_head.total_meetings);
    assert_eq!(75.0, comparison.confidence);

    let comparison = compare_teams(&[], 1, 2, Some(h2h.as_slice()), DEFAULT_FORM_WINDOW);
    assert_eq!(6, comparison.head_to_head.total_meetings);
    assert_eq!(75.0, comparison.confidence);
    assert_eq!(0, comparison.home.metrics.matches_played);
}

#[test]
fn compare_teams_honours_form_window() {
    let mut matches = form_matches(1, 100, "WWDLW");
    matches.extend(form_matches(2, 200, "LLDWL"));
    let comparison = compare_teams(&matches, 1, 2, None, 3);
    // D-L-W for both sides
    assert_eq!(4, comparison.home.form.form_points);
    assert_eq!(4, comparison.away.form.form_points);
    assert_eq!("DLW", comparison.home.form.form);
}

#[test]
fn compare_teams_is_idempotent() {
    let mut matches = form_matches(1, 100, "WDLWW");
    matches.extend(form_matches(2, 200, "DDWLW"));
    assert_eq!(
        compare_teams(&matches, 1, 2, None, DEFAULT_FORM_WINDOW),
        compare_teams(&matches, 1, 2, None, DEFAULT_FORM_WINDOW)
    );
}

#[test]
fn predict_outcome_from_empty_metrics() {
    let probs = predict_outcome(&PerformanceMetrics::default(), &PerformanceMetrics::default());
    assert_eq!(25.0, probs.home_win);
    assert_eq!(0.0, probs.away_win);
    assert_eq!(75.0, probs.draw);
}

#[test]
fn strength_of_unbeaten_team() {
    let matches = form_matches(1, 100, "WWW");
    let metrics = calculate_performance_metrics(&matches, 1);
    let form = analyze_team_form(&matches, 1, DEFAULT_FORM_WINDOW);
    // performance 71.8, form 58, high momentum, stable trend
    assert_float_absolute_eq!(76.28, calculate_team_strength(&metrics, &form), 1e-9);
}

#[test]
fn strength_stays_within_bounds() {
    for pattern in ["", "L", "LLLLL", "WWWWW", "WDWDW", "LWLWL"] {
        let matches = form_matches(1, 100, pattern);
        let profile = TeamProfile::new(&matches, 1, DEFAULT_FORM_WINDOW);
        let strength = profile.strength();
        assert!((0.0..=100.0).contains(&strength), "{pattern}: {strength}");
    }
}

#[test]
fn extended_averages_skip_unknown_values() {
    let mut first = complete(1, 1, 2, 1, 0);
    first.stats = MatchStats {
        home_corners: Some(6),
        away_corners: Some(3),
        home_yellow_cards: Some(2),
        away_yellow_cards: Some(1),
        ..MatchStats::default()
    };
    let mut second = complete(2, 3, 1, 0, 0);
    second.stats = MatchStats {
        home_corners: Some(-1),
        away_corners: Some(-2),
        ..MatchStats::default()
    };
    let averages = calculate_extended_averages(&[first, second], 1);
    assert_eq!(Some(6.0), averages.corners_for);
    assert_eq!(Some(3.0), averages.corners_against);
    assert_eq!(Some(2.0), averages.cards);
    assert_eq!(None, averages.shots_for);
    assert_eq!(None, averages.possession);
}
