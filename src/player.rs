//! Player performance scoring, pairwise comparison and top-performer selection.

use ordinalizer::Ordinal;
use serde::Serialize;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount, EnumIter};

use crate::domain::{PlayerAppearance, PlayerId, PlayerRecord, PlayerSeasonStats};
use crate::stats::{self, ratio, round2};

/// Consistency reported when no per-match ratings are known.
const NEUTRAL_CONSISTENCY: f64 = 50.0;
const RISING_STAR_MAX_APPEARANCES: u32 = 20;
const RISING_STAR_MIN_IMPACT: f64 = 70.0;
const VETERAN_MIN_APPEARANCES: u32 = 30;
const VETERAN_MIN_CONSISTENCY: f64 = 70.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerMetrics {
    pub player_id: PlayerId,
    pub name: String,
    pub appearances: u32,
    pub minutes_played: u32,
    pub goals: u32,
    pub assists: u32,
    pub goals_per_game: f64,
    pub assists_per_game: f64,
    pub minutes_per_game: f64,
    pub goals_per_90: f64,
    pub average_rating: f64,
    pub consistency: f64,
    pub impact_rating: f64,
}

/// Scores a player from season `totals` and, where available, their per-match `appearances`.
///
/// Per-game rates come from the totals. The average rating is taken from the totals, or else from
/// the rated appearances. Consistency measures the spread of per-match ratings relative to their
/// mean and is 50 when no ratings are known.
pub fn calculate_player_performance(
    player: &PlayerRecord,
    appearances: &[PlayerAppearance],
    totals: &PlayerSeasonStats,
) -> PlayerMetrics {
    let games = totals.appearances as f64;
    let ratings: Vec<_> = appearances.iter().filter_map(|appearance| appearance.rating).collect();
    let average_rating = totals
        .average_rating
        .unwrap_or_else(|| ratio(ratings.iter().sum(), ratings.len() as f64));
    let goals_per_game = ratio(totals.goals as f64, games);
    let assists_per_game = ratio(totals.assists as f64, games);
    let impact = goals_per_game * 30.0 + assists_per_game * 20.0 + average_rating / 10.0 * 50.0;

    PlayerMetrics {
        player_id: player.id,
        name: player.name.clone(),
        appearances: totals.appearances,
        minutes_played: totals.minutes_played,
        goals: totals.goals,
        assists: totals.assists,
        goals_per_game: round2(goals_per_game),
        assists_per_game: round2(assists_per_game),
        minutes_per_game: round2(ratio(totals.minutes_played as f64, games)),
        goals_per_90: round2(ratio(totals.goals as f64 * 90.0, totals.minutes_played as f64)),
        average_rating: round2(average_rating),
        consistency: rating_consistency(&ratings),
        impact_rating: round2(impact.clamp(0.0, 100.0)),
    }
}

fn rating_consistency(ratings: &[f64]) -> f64 {
    if ratings.is_empty() {
        return NEUTRAL_CONSISTENCY;
    }
    let mean = ratio(ratings.iter().sum(), ratings.len() as f64);
    let variation = ratio(stats::standard_deviation(ratings), mean);
    round2(f64::max(0.0, 100.0 - variation * 100.0))
}

/// An entity that can be compared dimension by dimension.
pub trait Rated {
    fn goal_rate(&self) -> f64;
    fn assist_rate(&self) -> f64;
    fn consistency(&self) -> f64;
    fn impact(&self) -> f64;
}

impl Rated for PlayerMetrics {
    fn goal_rate(&self) -> f64 {
        self.goals_per_game
    }

    fn assist_rate(&self) -> f64 {
        self.assists_per_game
    }

    fn consistency(&self) -> f64 {
        self.consistency
    }

    fn impact(&self) -> f64 {
        self.impact_rating
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ordinal, EnumCount, EnumIter, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
pub enum Dimension {
    GoalRate,
    AssistRate,
    Consistency,
    Impact,
}
impl Dimension {
    pub fn value(&self, entity: &impl Rated) -> f64 {
        match self {
            Dimension::GoalRate => entity.goal_rate(),
            Dimension::AssistRate => entity.assist_rate(),
            Dimension::Consistency => entity.consistency(),
            Dimension::Impact => entity.impact(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum Choice {
    First,
    Second,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionOutcome {
    pub dimension: Dimension,
    pub first: f64,
    pub second: f64,
    pub winner: Choice,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityComparison {
    /// One entry per [Dimension], in declaration order.
    pub dimensions: Vec<DimensionOutcome>,
    /// Dimensions won by the first entity.
    pub score: usize,
    pub overall: Choice,
    pub confidence: f64,
}
impl EntityComparison {
    pub fn winner(&self, dimension: Dimension) -> Choice {
        self.dimensions[dimension.ordinal()].winner
    }
}

/// Head-to-head across every [Dimension]. A level dimension goes to `first`, as does the overall
/// verdict when the dimensions are split evenly.
pub fn compare_entities<E: Rated>(first: &E, second: &E) -> EntityComparison {
    let dimensions: Vec<_> = Dimension::iter()
        .map(|dimension| {
            let (first, second) = (dimension.value(first), dimension.value(second));
            DimensionOutcome {
                dimension,
                first,
                second,
                winner: if first >= second { Choice::First } else { Choice::Second },
            }
        })
        .collect();
    let score = dimensions
        .iter()
        .filter(|outcome| outcome.winner == Choice::First)
        .count();
    let half = Dimension::COUNT / 2;
    let margin = score.abs_diff(half) as f64;
    EntityComparison {
        dimensions,
        score,
        overall: if score >= half { Choice::First } else { Choice::Second },
        confidence: f64::min(95.0, 60.0 + 15.0 * margin),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopPerformers {
    pub top_scorers: Vec<PlayerMetrics>,
    pub top_assisters: Vec<PlayerMetrics>,
    pub most_consistent: Vec<PlayerMetrics>,
    pub highest_impact: Vec<PlayerMetrics>,
    /// Fewer than 20 appearances with an impact above 70, by impact.
    pub rising_stars: Vec<PlayerMetrics>,
    /// More than 30 appearances with a consistency above 70, by consistency.
    pub veterans: Vec<PlayerMetrics>,
}

/// Leaders of `pool` in each ranked category, at most `max_per_category` apiece. Rising stars and
/// veterans are every qualifying player, sorted but not truncated. Players level on a category
/// keep their order in `pool`.
pub fn analyze_top_performers(pool: &[PlayerMetrics], max_per_category: usize) -> TopPerformers {
    let leaders = |key: fn(&PlayerMetrics) -> f64| {
        let mut ranked = ranked_by(pool.iter(), key);
        ranked.truncate(max_per_category);
        ranked
    };

    TopPerformers {
        top_scorers: leaders(|player| player.goals_per_game),
        top_assisters: leaders(|player| player.assists_per_game),
        most_consistent: leaders(|player| player.consistency),
        highest_impact: leaders(|player| player.impact_rating),
        rising_stars: ranked_by(
            pool.iter().filter(|player| {
                player.appearances < RISING_STAR_MAX_APPEARANCES && player.impact_rating > RISING_STAR_MIN_IMPACT
            }),
            |player| player.impact_rating,
        ),
        veterans: ranked_by(
            pool.iter().filter(|player| {
                player.appearances > VETERAN_MIN_APPEARANCES && player.consistency > VETERAN_MIN_CONSISTENCY
            }),
            |player| player.consistency,
        ),
    }
}

/// Stable descending sort of `candidates` by `key`.
fn ranked_by<'a>(
    candidates: impl Iterator<Item = &'a PlayerMetrics>,
    key: fn(&PlayerMetrics) -> f64,
) -> Vec<PlayerMetrics> {
    let mut candidates: Vec<_> = candidates.collect();
    candidates.sort_by(|a, b| key(b).total_cmp(&key(a)));
    candidates.into_iter().cloned().collect()
}
