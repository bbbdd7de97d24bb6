//! Numeric primitives shared by the engines.
//!
//! All functions are total: empty input yields 0 (or an empty result) and every division is
//! guarded so that `NaN` and infinities never escape.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::domain::{MatchResult, Side};
use crate::scoregrid::{Outcome, ScoreGrid};

/// K-factor used by [elo_update] unless the caller overrides it.
pub const DEFAULT_K_FACTOR: f64 = 32.0;

/// Relative change between half-averages needed before [trend] reports a direction.
const TREND_THRESHOLD: f64 = 0.05;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

/// Home-win, draw and away-win percentages.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProbabilities {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
}
impl OutcomeProbabilities {
    pub fn sum(&self) -> f64 {
        self.home_win + self.draw + self.away_win
    }
}

/// Rounds to 2 decimal places.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `numerator / denominator`, or 0 when the denominator is zero.
#[inline]
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// `part` as a percentage of `whole`, rounded to 2 decimal places; 0 when `whole` is zero.
#[inline]
pub fn percentage(part: usize, whole: usize) -> f64 {
    round2(ratio(part as f64, whole as f64) * 100.0)
}

fn mean(values: &[f64]) -> f64 {
    ratio(values.iter().sum(), values.len() as f64)
}

/// Arithmetic mean, rounded to 2 decimal places.
pub fn average(values: &[f64]) -> f64 {
    round2(mean(values))
}

/// Population standard deviation (divides by _N_).
pub fn standard_deviation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean(values);
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sorted = sorted(values);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Linearly-interpolated percentile over the ascending-sorted values. `p` is clamped to `[0, 100]`.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sorted = sorted(values);
    let index = p.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;
    let weight = index - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}

/// Compares the average of the second half of `values` with that of the first half (split at
/// `len / 2`). A move of more than 5% of the first-half average counts as a direction.
pub fn trend(values: &[f64]) -> Trend {
    if values.len() < 2 {
        return Trend::Stable;
    }
    let (first, second) = values.split_at(values.len() / 2);
    let (first, second) = (mean(first), mean(second));
    let threshold = first.abs() * TREND_THRESHOLD;
    if second - first > threshold {
        Trend::Increasing
    } else if first - second > threshold {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

/// Mean of every full window of `window` consecutive values, rounded to 2 decimal places.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || window > values.len() {
        return vec![];
    }
    values.windows(window).map(average).collect()
}

/// Poisson probability of exactly `k` goals given expectancy `lambda`.
///
/// `λ^k / k!` is accumulated as a running product, so any `k` is accepted.
pub fn poisson_probability(lambda: f64, k: u8) -> f64 {
    (1..=k).fold(f64::exp(-lambda), |prob, i| prob * lambda / i as f64)
}

/// Win/draw/loss percentages from independent Poisson goal counts, truncated at 5 goals a side.
/// The three buckets are expressed relative to the mass retained by the truncated grid, so they
/// sum to 100 up to rounding.
pub fn match_outcome_probabilities(home_expectancy: f64, away_expectancy: f64) -> OutcomeProbabilities {
    let grid = ScoreGrid::univariate_poisson(home_expectancy, away_expectancy);
    let mass = grid.total();
    let share = |outcome: Outcome| round2(ratio(outcome.gather(&grid), mass) * 100.0);
    OutcomeProbabilities {
        home_win: share(Outcome::Win(Side::Home)),
        draw: share(Outcome::Draw),
        away_win: share(Outcome::Win(Side::Away)),
    }
}

/// Expected score of a player rated `rating` against one rated `opponent`.
#[inline]
pub fn elo_expectation(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) / 400.0))
}

/// New rating after `result` against `opponent_rating`, rounded to the nearest integer.
pub fn elo_update(current_rating: f64, opponent_rating: f64, result: MatchResult, k_factor: f64) -> f64 {
    let expected = elo_expectation(current_rating, opponent_rating);
    (current_rating + k_factor * (result.elo_score() - expected)).round()
}
