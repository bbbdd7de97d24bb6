//! Match prediction from recent form.
//!
//! Each side's goal expectancy starts from a league-wide baseline (scaled up for the home side)
//! and is blended evenly with its recent scoring rate. The expectancies drive an independent
//! Poisson [ScoreGrid] from which outcome, BTTS and Over-2.5 probabilities are read.

use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::domain::{MatchRecord, Score, Side, TeamRecord};
use crate::scoregrid::{Outcome, ScoreGrid};
use crate::stats::{self, round2, OutcomeProbabilities};
use crate::team::{self, HeadToHead, PerformanceMetrics};

const BASE_CONFIDENCE: f64 = 50.0;
const MAX_CONFIDENCE: f64 = 95.0;
/// Form matches a side needs before its form adds confidence.
const DEEP_FORM: usize = 5;
const FORM_CONFIDENCE: f64 = 10.0;
const HEAD_TO_HEAD_CONFIDENCE: f64 = 15.0;
const VENUE_CONFIDENCE: f64 = 10.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct PredictionOptions<'a> {
    /// Previous meetings of the two sides.
    pub head_to_head: Option<&'a [MatchRecord]>,
    /// Judge the home side on its home matches and the away side on its away matches.
    pub venue_effects: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub home_team: String,
    pub away_team: String,
    pub home_expectancy: f64,
    pub away_expectancy: f64,
    pub outcome: OutcomeProbabilities,
    pub btts_probability: f64,
    pub over_25_probability: f64,
    pub most_likely_score: Score,
    /// Combined corners for both sides.
    pub expected_corners: f64,
    pub head_to_head: Option<HeadToHead>,
    pub confidence: f64,
}

/// Predicts `home` against `away` from each side's recent matches.
///
/// Only complete matches in the form slices count. With `venue_effects`, a side without a match
/// at the relevant venue is judged on all its form instead.
pub fn predict_match(
    config: &Config,
    home: &TeamRecord,
    away: &TeamRecord,
    home_form: &[MatchRecord],
    away_form: &[MatchRecord],
    options: PredictionOptions,
) -> PredictionResult {
    let home_metrics = team::calculate_performance_metrics(home_form, home.id);
    let away_metrics = team::calculate_performance_metrics(away_form, away.id);
    let (home_scoring, away_scoring) = if options.venue_effects {
        (
            venue_metrics(home_form, home, Side::Home, &home_metrics),
            venue_metrics(away_form, away, Side::Away, &away_metrics),
        )
    } else {
        (home_metrics.clone(), away_metrics.clone())
    };

    let home_expectancy = expectancy(
        config.league_average_goals * config.home_advantage,
        &home_scoring,
        config.min_expectancy,
    );
    let away_expectancy = expectancy(config.league_average_goals, &away_scoring, config.min_expectancy);

    let grid = ScoreGrid::univariate_poisson(home_expectancy, away_expectancy);
    let outcome = stats::match_outcome_probabilities(home_expectancy, away_expectancy);
    let btts_probability = (1.0 - stats::poisson_probability(home_expectancy, 0))
        * (1.0 - stats::poisson_probability(away_expectancy, 0))
        * 100.0;
    let over_25_probability = Outcome::GoalsOver(2).gather(&grid) * 100.0;
    let (most_likely_score, _) = grid.most_likely_score();

    let expected_corners = [(home_form, home), (away_form, away)]
        .into_iter()
        .map(|(form, record)| {
            team::calculate_extended_averages(form, record.id)
                .corners_for
                .unwrap_or(config.default_team_corners)
        })
        .sum::<f64>();

    let head_to_head = options
        .head_to_head
        .filter(|meetings| !meetings.is_empty())
        .map(|meetings| team::analyze_head_to_head(meetings, home.id, away.id));

    let mut confidence = BASE_CONFIDENCE;
    if home_metrics.matches_played >= DEEP_FORM {
        confidence += FORM_CONFIDENCE;
    }
    if away_metrics.matches_played >= DEEP_FORM {
        confidence += FORM_CONFIDENCE;
    }
    if head_to_head.is_some() {
        confidence += HEAD_TO_HEAD_CONFIDENCE;
    }
    if options.venue_effects {
        confidence += VENUE_CONFIDENCE;
    }
    let confidence = f64::min(MAX_CONFIDENCE, confidence);

    debug!(
        "{} v {}: expectancy {home_expectancy:.3}-{away_expectancy:.3}, outcome {outcome:?}, confidence {confidence}",
        home.name, away.name
    );
    PredictionResult {
        home_team: home.name.clone(),
        away_team: away.name.clone(),
        home_expectancy: round2(home_expectancy),
        away_expectancy: round2(away_expectancy),
        outcome,
        btts_probability: round2(btts_probability),
        over_25_probability: round2(over_25_probability),
        most_likely_score,
        expected_corners: round2(expected_corners),
        head_to_head,
        confidence,
    }
}

fn venue_metrics(form: &[MatchRecord], team: &TeamRecord, side: Side, all: &PerformanceMetrics) -> PerformanceMetrics {
    let split = team::calculate_home_away_performance(form, team.id);
    let at_venue = match side {
        Side::Home => split.home,
        Side::Away => split.away,
    };
    if at_venue.matches_played == 0 {
        all.clone()
    } else {
        at_venue
    }
}

fn expectancy(baseline: f64, form: &PerformanceMetrics, min_expectancy: f64) -> f64 {
    let blended = if form.matches_played == 0 {
        baseline
    } else {
        (baseline + form.average_goals_for) / 2.0
    };
    f64::max(min_expectancy, blended)
}
