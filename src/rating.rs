//! Elo ratings accumulated over a sequence of results.

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::trace;

use crate::domain::{MatchRecord, Side, TeamId};
use crate::stats::elo_update;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamRating {
    pub team_id: TeamId,
    pub rating: f64,
    pub matches: usize,
}

/// Replays complete matches in the order given, updating both sides from their pre-match ratings.
/// Teams start at `initial_rating`. The result is sorted by rating (highest first), then by team id.
///
/// `matches` must already be in ascending kickoff order.
pub fn calculate_elo_ratings(matches: &[MatchRecord], initial_rating: f64, k_factor: f64) -> Vec<TeamRating> {
    let mut ratings: FxHashMap<TeamId, TeamRating> = FxHashMap::default();
    for record in matches.iter().filter(|record| record.is_complete()) {
        let home = current(&ratings, record.home_id, initial_rating);
        let away = current(&ratings, record.away_id, initial_rating);
        let updated_home = elo_update(home, away, record.result_for(Side::Home), k_factor);
        let updated_away = elo_update(away, home, record.result_for(Side::Away), k_factor);
        trace!(
            "match {}: {} {home} -> {updated_home}, {} {away} -> {updated_away}",
            record.id,
            record.home_id,
            record.away_id
        );
        for (team_id, rating) in [(record.home_id, updated_home), (record.away_id, updated_away)] {
            let entry = ratings.entry(team_id).or_insert(TeamRating {
                team_id,
                rating: initial_rating,
                matches: 0,
            });
            entry.rating = rating;
            entry.matches += 1;
        }
    }

    let mut ratings: Vec<_> = ratings.into_values().collect();
    ratings.sort_by(|a, b| b.rating.total_cmp(&a.rating).then(a.team_id.cmp(&b.team_id)));
    ratings
}

fn current(ratings: &FxHashMap<TeamId, TeamRating>, team_id: TeamId, initial_rating: f64) -> f64 {
    ratings
        .get(&team_id)
        .map(|rating| rating.rating)
        .unwrap_or(initial_rating)
}
