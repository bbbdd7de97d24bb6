//! Testing helpers.

use assert_float_eq::*;

use crate::domain::{MatchRecord, MatchStats, MatchStatus, TeamId, TeamRecord};

pub const DAY: i64 = 86_400;

/// A completed match kicking off `id` days after the epoch.
pub fn complete(id: u64, home_id: TeamId, away_id: TeamId, home_goals: u8, away_goals: u8) -> MatchRecord {
    MatchRecord {
        id,
        home_id,
        away_id,
        kickoff: id as i64 * DAY,
        status: MatchStatus::Complete,
        home_goals,
        away_goals,
        referee_id: None,
        stats: MatchStats::default(),
    }
}

pub fn with_status(mut record: MatchRecord, status: MatchStatus) -> MatchRecord {
    record.status = status;
    record
}

pub fn team(id: TeamId, name: &str) -> TeamRecord {
    TeamRecord::new(id, name)
}

/// Chronological matches for `team_id` following a `W`/`D`/`L` pattern. Wins are 2-0, draws 1-1
/// and losses 0-1. Venues alternate starting at home; opponents are numbered from `opponent`.
pub fn form_matches(team_id: TeamId, opponent: TeamId, pattern: &str) -> Vec<MatchRecord> {
    pattern
        .chars()
        .enumerate()
        .map(|(index, symbol)| {
            let (for_goals, against_goals) = match symbol {
                'W' => (2, 0),
                'D' => (1, 1),
                'L' => (0, 1),
                _ => panic!("unsupported result symbol {symbol}"),
            };
            let id = team_id as u64 * 1_000 + index as u64;
            let opponent = opponent + index as TeamId;
            if index % 2 == 0 {
                complete(id, team_id, opponent, for_goals, against_goals)
            } else {
                complete(id, opponent, team_id, against_goals, for_goals)
            }
        })
        .collect()
}

/// Element-wise relative comparison of two float series, such as weekly averages.
pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(expected.len(), actual.len(), "series lengths differ: {expected:?} vs {actual:?}");
    for (&expected, &actual) in expected.iter().zip(actual) {
        if expected != actual {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}
