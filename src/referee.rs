//! Referee tendencies: card and goal rates, outcome splits, and per-team effects.

use rustc_hash::FxHashMap;
use serde::Serialize;
use strum_macros::Display;
use tracing::debug;

use crate::domain::{MatchRecord, MatchResult, RefereeId, RefereeRecord, Side, TeamId};
use crate::stats::{self, percentage, ratio, round2};

/// Cards per match treated as the top of the strictness scale.
const STRICTNESS_CEILING: f64 = 6.0;
const CONTROVERSIAL_CARDS: u16 = 4;
const CONTROVERSIAL_MARGIN: u8 = 3;
const BASELINE_HOME_WIN_PERCENTAGE: f64 = 47.5;
const BASELINE_GOALS_PER_GAME: f64 = 2.75;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefereeMetrics {
    pub referee_id: RefereeId,
    pub name: String,
    pub matches_officiated: usize,
    pub total_cards: u32,
    pub total_goals: u32,
    pub average_cards_per_game: f64,
    pub average_goals_per_game: f64,
    pub home_win_percentage: f64,
    pub draw_percentage: f64,
    pub away_win_percentage: f64,
    /// Average cards against a 0–6 scale, as 0–100.
    pub strictness: f64,
    pub consistency: f64,
    pub controversy: f64,
}
impl RefereeMetrics {
    /// Metrics for a referee with no officiated matches.
    pub fn empty(referee: &RefereeRecord) -> Self {
        Self {
            referee_id: referee.id,
            name: referee.name.clone(),
            matches_officiated: 0,
            total_cards: 0,
            total_goals: 0,
            average_cards_per_game: 0.0,
            average_goals_per_game: 0.0,
            home_win_percentage: 0.0,
            draw_percentage: 0.0,
            away_win_percentage: 0.0,
            strictness: 0.0,
            consistency: 0.0,
            controversy: 0.0,
        }
    }
}

fn officiated<'a>(matches: &'a [MatchRecord], referee_id: RefereeId) -> impl Iterator<Item = &'a MatchRecord> {
    matches
        .iter()
        .filter(move |record| record.is_complete() && record.referee_id == Some(referee_id))
}

/// Aggregates the complete matches that `referee` officiated. Unknown card counts count as none.
pub fn calculate_referee_performance(referee: &RefereeRecord, matches: &[MatchRecord]) -> RefereeMetrics {
    let officiated: Vec<_> = officiated(matches, referee.id).collect();
    if officiated.is_empty() {
        return RefereeMetrics::empty(referee);
    }

    let mut metrics = RefereeMetrics::empty(referee);
    let (mut home_wins, mut draws, mut away_wins) = (0, 0, 0);
    let mut cards_per_match = Vec::with_capacity(officiated.len());
    let mut controversy = 0.0;
    for record in &officiated {
        let cards = record.stats.total_cards();
        metrics.total_cards += cards as u32;
        metrics.total_goals += record.total_goals() as u32;
        cards_per_match.push(cards as f64);
        match record.result_for(Side::Home) {
            MatchResult::Win => home_wins += 1,
            MatchResult::Draw => draws += 1,
            MatchResult::Loss => away_wins += 1,
        }
        if cards > CONTROVERSIAL_CARDS {
            controversy += 10.0;
        }
        if record.home_goals.abs_diff(record.away_goals) > CONTROVERSIAL_MARGIN {
            controversy += 5.0;
        }
    }

    let games = officiated.len();
    metrics.matches_officiated = games;
    let average_cards = ratio(metrics.total_cards as f64, games as f64);
    metrics.average_cards_per_game = round2(average_cards);
    metrics.average_goals_per_game = round2(ratio(metrics.total_goals as f64, games as f64));
    metrics.home_win_percentage = percentage(home_wins, games);
    metrics.draw_percentage = percentage(draws, games);
    metrics.away_win_percentage = percentage(away_wins, games);
    metrics.strictness = round2(f64::min(100.0, average_cards / STRICTNESS_CEILING * 100.0));
    metrics.consistency = card_consistency(&cards_per_match, average_cards);
    metrics.controversy = f64::min(100.0, controversy);
    metrics
}

fn card_consistency(cards_per_match: &[f64], mean: f64) -> f64 {
    if mean == 0.0 {
        return 100.0;
    }
    let variation = stats::standard_deviation(cards_per_match) / mean;
    round2(f64::max(0.0, 100.0 - variation * 50.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CardTendency {
    Lenient,
    Average,
    Strict,
}
impl CardTendency {
    fn classify(average_cards: f64) -> Self {
        if average_cards < 3.0 {
            CardTendency::Lenient
        } else if average_cards > 5.0 {
            CardTendency::Strict
        } else {
            CardTendency::Average
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum GoalTendency {
    LowScoring,
    Average,
    HighScoring,
}
impl GoalTendency {
    fn classify(average_goals: f64) -> Self {
        if average_goals < 2.2 {
            GoalTendency::LowScoring
        } else if average_goals > 3.0 {
            GoalTendency::HighScoring
        } else {
            GoalTendency::Average
        }
    }
}

/// How a team fares in matches run by a given referee.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRefereeEffect {
    pub team_id: TeamId,
    pub matches: usize,
    pub win_rate: f64,
    /// Goals scored by the team.
    pub average_goals: f64,
    /// Cards shown to the team.
    pub average_cards: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefereeImpact {
    pub metrics: RefereeMetrics,
    /// Home-win percentage relative to a 47.5% baseline.
    pub home_advantage_effect: f64,
    /// Goals per game relative to a 2.75 baseline.
    pub game_flow_effect: f64,
    pub card_tendency: CardTendency,
    pub goal_tendency: GoalTendency,
    /// Highest win rate first; equal rates by team id.
    pub team_effects: Vec<TeamRefereeEffect>,
}

#[derive(Default)]
struct TeamTally {
    matches: usize,
    wins: usize,
    goals: u32,
    cards: u32,
}

/// Tendencies of `referee` against fixed baselines. A referee with no complete matches has zero
/// effects and average tendencies.
pub fn analyze_referee_impact(referee: &RefereeRecord, matches: &[MatchRecord]) -> RefereeImpact {
    let metrics = calculate_referee_performance(referee, matches);
    if metrics.matches_officiated == 0 {
        return RefereeImpact {
            metrics,
            home_advantage_effect: 0.0,
            game_flow_effect: 0.0,
            card_tendency: CardTendency::Average,
            goal_tendency: GoalTendency::Average,
            team_effects: vec![],
        };
    }

    let mut tallies: FxHashMap<TeamId, TeamTally> = FxHashMap::default();
    for record in officiated(matches, referee.id) {
        for side in [Side::Home, Side::Away] {
            let tally = tallies.entry(record.team_id(side)).or_default();
            tally.matches += 1;
            tally.goals += record.goals_for(side) as u32;
            tally.cards += record.stats.cards(side) as u32;
            if record.result_for(side) == MatchResult::Win {
                tally.wins += 1;
            }
        }
    }
    let mut team_effects: Vec<_> = tallies
        .into_iter()
        .map(|(team_id, tally)| TeamRefereeEffect {
            team_id,
            matches: tally.matches,
            win_rate: percentage(tally.wins, tally.matches),
            average_goals: round2(ratio(tally.goals as f64, tally.matches as f64)),
            average_cards: round2(ratio(tally.cards as f64, tally.matches as f64)),
        })
        .collect();
    team_effects.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate).then(a.team_id.cmp(&b.team_id)));
    debug!(
        "referee {} officiated {} matches involving {} teams",
        referee.id,
        metrics.matches_officiated,
        team_effects.len()
    );

    RefereeImpact {
        home_advantage_effect: round2(metrics.home_win_percentage - BASELINE_HOME_WIN_PERCENTAGE),
        game_flow_effect: round2(metrics.average_goals_per_game - BASELINE_GOALS_PER_GAME),
        card_tendency: CardTendency::classify(metrics.average_cards_per_game),
        goal_tendency: GoalTendency::classify(metrics.average_goals_per_game),
        team_effects,
        metrics,
    }
}
