//! Team performance: aggregate metrics, form, home/away splits, head-to-head, comparison and
//! composite strength.
//!
//! Only `complete` matches contribute; goals recorded against other statuses are not final.
//! Empty inputs produce zero-valued structures rather than errors.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::domain::{MatchRecord, MatchResult, Side, TeamId};
use crate::stats::{self, percentage, ratio, round2, OutcomeProbabilities, Trend};

pub const DEFAULT_FORM_WINDOW: usize = 5;
const MOMENTUM_WINDOW: usize = 3;
const STREAK_PENALTY: f64 = 15.0;
const HOME_STRENGTH_BONUS: f64 = 10.0;
/// Baseline allowance for the draw when turning side strengths into probabilities.
const DRAW_ALLOWANCE: f64 = 30.0;
const MAX_GOAL_DIFFERENCE_BONUS: f64 = 40.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    pub matches_played: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub clean_sheets: usize,
    pub failed_to_score: usize,
    pub btts_matches: usize,
    pub over_25_matches: usize,
    pub win_percentage: f64,
    pub draw_percentage: f64,
    pub loss_percentage: f64,
    pub clean_sheet_percentage: f64,
    pub btts_percentage: f64,
    pub over_25_percentage: f64,
    pub average_goals_for: f64,
    pub average_goals_against: f64,
    pub points_per_game: f64,
}
impl PerformanceMetrics {
    fn tally<'a>(played: impl IntoIterator<Item = (&'a MatchRecord, Side)>) -> Self {
        let mut metrics = Self::default();
        for (record, side) in played {
            let (goals_for, goals_against) = (record.goals_for(side), record.goals_against(side));
            metrics.matches_played += 1;
            metrics.goals_for += goals_for as u32;
            metrics.goals_against += goals_against as u32;
            let result = record.result_for(side);
            metrics.points += result.points();
            match result {
                MatchResult::Win => metrics.wins += 1,
                MatchResult::Draw => metrics.draws += 1,
                MatchResult::Loss => metrics.losses += 1,
            }
            if goals_against == 0 {
                metrics.clean_sheets += 1;
            }
            if goals_for == 0 {
                metrics.failed_to_score += 1;
            }
            if record.both_teams_scored() {
                metrics.btts_matches += 1;
            }
            if record.total_goals() > 2 {
                metrics.over_25_matches += 1;
            }
        }

        let played = metrics.matches_played;
        metrics.goal_difference = metrics.goals_for as i32 - metrics.goals_against as i32;
        metrics.win_percentage = percentage(metrics.wins, played);
        metrics.draw_percentage = percentage(metrics.draws, played);
        metrics.loss_percentage = percentage(metrics.losses, played);
        metrics.clean_sheet_percentage = percentage(metrics.clean_sheets, played);
        metrics.btts_percentage = percentage(metrics.btts_matches, played);
        metrics.over_25_percentage = percentage(metrics.over_25_matches, played);
        metrics.average_goals_for = round2(ratio(metrics.goals_for as f64, played as f64));
        metrics.average_goals_against = round2(ratio(metrics.goals_against as f64, played as f64));
        metrics.points_per_game = round2(ratio(metrics.points as f64, played as f64));
        metrics
    }
}

/// Complete matches involving `team_id`, paired with the side it played on, in input order.
pub fn team_matches(matches: &[MatchRecord], team_id: TeamId) -> impl Iterator<Item = (&MatchRecord, Side)> {
    matches
        .iter()
        .filter(|record| record.is_complete())
        .filter_map(move |record| record.side_of(team_id).map(|side| (record, side)))
}

pub fn calculate_performance_metrics(matches: &[MatchRecord], team_id: TeamId) -> PerformanceMetrics {
    PerformanceMetrics::tally(team_matches(matches, team_id))
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FormTrend {
    Improving,
    Declining,
    Stable,
}

impl From<Trend> for FormTrend {
    fn from(trend: Trend) -> Self {
        match trend {
            Trend::Increasing => FormTrend::Improving,
            Trend::Decreasing => FormTrend::Declining,
            Trend::Stable => FormTrend::Stable,
        }
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Momentum {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormAnalysis {
    pub team_id: TeamId,
    /// Oldest first.
    pub results: Vec<MatchResult>,
    pub form: String,
    pub form_points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub trend: FormTrend,
    pub momentum: Momentum,
    pub consistency: f64,
}

/// Form over the trailing `window_size` complete matches of `team_id`.
///
/// `matches` must already be in ascending kickoff order; they are not re-sorted here.
pub fn analyze_team_form(matches: &[MatchRecord], team_id: TeamId, window_size: usize) -> FormAnalysis {
    let played: Vec<_> = team_matches(matches, team_id).collect();
    let recent = &played[played.len().saturating_sub(window_size)..];
    let results: Vec<_> = recent
        .iter()
        .map(|(record, side)| record.result_for(*side))
        .collect();
    let points: Vec<_> = results.iter().map(|result| result.points() as f64).collect();

    FormAnalysis {
        team_id,
        form: results.iter().map(MatchResult::symbol).collect(),
        form_points: results.iter().map(MatchResult::points).sum(),
        goals_for: recent
            .iter()
            .map(|(record, side)| record.goals_for(*side) as u32)
            .sum(),
        goals_against: recent
            .iter()
            .map(|(record, side)| record.goals_against(*side) as u32)
            .sum(),
        trend: stats::trend(&points).into(),
        momentum: momentum(&recent[recent.len().saturating_sub(MOMENTUM_WINDOW)..]),
        consistency: f64::max(0.0, 100.0 - STREAK_PENALTY * longest_streak(&results) as f64),
        results,
    }
}

fn momentum(recent: &[(&MatchRecord, Side)]) -> Momentum {
    let points: u32 = recent
        .iter()
        .map(|(record, side)| record.result_for(*side).points())
        .sum();
    let goal_difference: i32 = recent
        .iter()
        .map(|(record, side)| record.goals_for(*side) as i32 - record.goals_against(*side) as i32)
        .sum();
    if points >= 7 && goal_difference > 0 {
        Momentum::High
    } else if points >= 4 || goal_difference >= 0 {
        Momentum::Medium
    } else {
        Momentum::Low
    }
}

/// Length of the longest unbroken run of wins or of losses.
fn longest_streak(results: &[MatchResult]) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous = None;
    for &result in results {
        if result == MatchResult::Draw {
            current = 0;
        } else if previous == Some(result) {
            current += 1;
        } else {
            current = 1;
        }
        previous = Some(result);
        longest = usize::max(longest, current);
    }
    longest
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomeAwayPerformance {
    pub home: PerformanceMetrics,
    pub away: PerformanceMetrics,
}

pub fn calculate_home_away_performance(matches: &[MatchRecord], team_id: TeamId) -> HomeAwayPerformance {
    let of_side = |wanted: Side| {
        PerformanceMetrics::tally(team_matches(matches, team_id).filter(move |(_, side)| *side == wanted))
    };
    HomeAwayPerformance {
        home: of_side(Side::Home),
        away: of_side(Side::Away),
    }
}

/// Record between two teams. "Home" denotes the first-named team of the pairing, irrespective of
/// where each past meeting was played.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeadToHead {
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
    pub total_meetings: usize,
    pub home_wins: usize,
    pub away_wins: usize,
    pub draws: usize,
    pub total_goals: u32,
    pub average_goals: f64,
    pub btts_percentage: f64,
    /// Share of meetings won by the home team, as a percentage.
    pub home_advantage: f64,
}

pub fn analyze_head_to_head(matches: &[MatchRecord], home_team_id: TeamId, away_team_id: TeamId) -> HeadToHead {
    let mut h2h = HeadToHead {
        home_team_id,
        away_team_id,
        ..HeadToHead::default()
    };
    let mut btts = 0;
    for (record, side) in team_matches(matches, home_team_id)
        .filter(|(record, _)| record.is_between(home_team_id, away_team_id))
    {
        h2h.total_meetings += 1;
        h2h.total_goals += record.total_goals() as u32;
        match record.result_for(side) {
            MatchResult::Win => h2h.home_wins += 1,
            MatchResult::Draw => h2h.draws += 1,
            MatchResult::Loss => h2h.away_wins += 1,
        }
        if record.both_teams_scored() {
            btts += 1;
        }
    }
    h2h.average_goals = round2(ratio(h2h.total_goals as f64, h2h.total_meetings as f64));
    h2h.btts_percentage = percentage(btts, h2h.total_meetings);
    h2h.home_advantage = percentage(h2h.home_wins, h2h.total_meetings);
    h2h
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamProfile {
    pub team_id: TeamId,
    pub metrics: PerformanceMetrics,
    pub form: FormAnalysis,
}
impl TeamProfile {
    pub fn new(matches: &[MatchRecord], team_id: TeamId, window_size: usize) -> Self {
        Self {
            team_id,
            metrics: calculate_performance_metrics(matches, team_id),
            form: analyze_team_form(matches, team_id, window_size),
        }
    }

    pub fn strength(&self) -> f64 {
        calculate_team_strength(&self.metrics, &self.form)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamComparison {
    pub home: TeamProfile,
    pub away: TeamProfile,
    pub head_to_head: HeadToHead,
    pub prediction: OutcomeProbabilities,
    pub confidence: f64,
}

/// Compares two teams over the full match pool, judging form on the last `window_size` matches of
/// each. Head-to-head meetings come from `h2h_matches` when supplied, or are otherwise drawn from
/// `all_matches`.
pub fn compare_teams(
    all_matches: &[MatchRecord],
    home_team_id: TeamId,
    away_team_id: TeamId,
    h2h_matches: Option<&[MatchRecord]>,
    window_size: usize,
) -> TeamComparison {
    let home = TeamProfile::new(all_matches, home_team_id, window_size);
    let away = TeamProfile::new(all_matches, away_team_id, window_size);
    let head_to_head = analyze_head_to_head(
        h2h_matches.unwrap_or(all_matches),
        home_team_id,
        away_team_id,
    );
    let prediction = predict_outcome(&home.metrics, &away.metrics);
    let confidence = if head_to_head.total_meetings > 5 { 75.0 } else { 60.0 };
    TeamComparison {
        home,
        away,
        head_to_head,
        prediction,
        confidence,
    }
}

/// Strength-share outcome estimate: `win% + 2 × goal difference` per side (floored at 0), a flat
/// home bonus, and a fixed draw allowance in the denominator. The draw takes the remainder.
pub fn predict_outcome(home: &PerformanceMetrics, away: &PerformanceMetrics) -> OutcomeProbabilities {
    fn strength(metrics: &PerformanceMetrics) -> f64 {
        f64::max(0.0, metrics.win_percentage + 2.0 * metrics.goal_difference as f64)
    }

    let home_strength = strength(home) + HOME_STRENGTH_BONUS;
    let away_strength = strength(away);
    let total = home_strength + away_strength + DRAW_ALLOWANCE;
    let home_win = round2(home_strength / total * 100.0);
    let away_win = round2(away_strength / total * 100.0);
    OutcomeProbabilities {
        home_win,
        draw: round2(100.0 - home_win - away_win),
        away_win,
    }
}

/// Composite 0–100 rating: 60% season performance, 40% recent form, plus flat momentum and trend
/// adjustments.
pub fn calculate_team_strength(metrics: &PerformanceMetrics, form: &FormAnalysis) -> f64 {
    let goal_difference_bonus = (metrics.goal_difference as f64).clamp(0.0, MAX_GOAL_DIFFERENCE_BONUS);
    let performance = metrics.win_percentage * 0.4
        + goal_difference_bonus * 0.3
        + metrics.clean_sheet_percentage * 0.2
        + (100.0 - metrics.loss_percentage) * 0.1;
    let form_score = form.form_points as f64 * 4.0 + form.consistency * 0.4;
    let momentum_bonus = match form.momentum {
        Momentum::High => 10.0,
        Momentum::Medium => 5.0,
        Momentum::Low => 0.0,
    };
    let trend_bonus = match form.trend {
        FormTrend::Improving => 5.0,
        FormTrend::Declining => -5.0,
        FormTrend::Stable => 0.0,
    };
    let strength = performance * 0.6 + form_score * 0.4 + momentum_bonus + trend_bonus;
    round2(strength.clamp(0.0, 100.0))
}

/// Per-match averages of extended statistics. A field is `None` when no match carried a known
/// value for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtendedAverages {
    pub corners_for: Option<f64>,
    pub corners_against: Option<f64>,
    pub shots_for: Option<f64>,
    pub shots_against: Option<f64>,
    pub possession: Option<f64>,
    pub fouls: Option<f64>,
    pub offsides: Option<f64>,
    pub cards: Option<f64>,
}

pub fn calculate_extended_averages(matches: &[MatchRecord], team_id: TeamId) -> ExtendedAverages {
    let played: Vec<_> = team_matches(matches, team_id).collect();
    ExtendedAverages {
        corners_for: known_average(&played, |record, side| record.stats.corners(side)),
        corners_against: known_average(&played, |record, side| record.stats.corners(side.opposite())),
        shots_for: known_average(&played, |record, side| record.stats.shots(side)),
        shots_against: known_average(&played, |record, side| record.stats.shots(side.opposite())),
        possession: known_average(&played, |record, side| record.stats.possession(side)),
        fouls: known_average(&played, |record, side| record.stats.fouls(side)),
        offsides: known_average(&played, |record, side| record.stats.offsides(side)),
        cards: known_average(&played, |record, side| {
            record.stats.has_cards().then(|| record.stats.cards(side))
        }),
    }
}

fn known_average(
    played: &[(&MatchRecord, Side)],
    value: impl Fn(&MatchRecord, Side) -> Option<u16>,
) -> Option<f64> {
    let known: Vec<_> = played
        .iter()
        .filter_map(|(record, side)| value(*record, *side))
        .map(f64::from)
        .collect();
    if known.is_empty() {
        None
    } else {
        Some(stats::average(&known))
    }
}

#[cfg(test)]
mod tests;
