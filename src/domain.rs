//! Records supplied by the upstream data source, and the small value types shared by the engines.
//!
//! Records are never mutated by the engines; every derived structure is built fresh per call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

pub type TeamId = u32;
pub type PlayerId = u32;
pub type RefereeId = u32;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MatchStatus {
    Complete,
    Suspended,
    Canceled,
    Incomplete,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Display, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}
impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}
impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Self { home, away }
    }

    pub fn nil_all() -> Self {
        Self { home: 0, away: 0 }
    }

    pub fn total(&self) -> u16 {
        self.home as u16 + self.away as u16
    }
}

/// The result of a match from one team's perspective.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum MatchResult {
    #[strum(serialize = "W")]
    Win,
    #[strum(serialize = "D")]
    Draw,
    #[strum(serialize = "L")]
    Loss,
}
impl MatchResult {
    pub fn from_goals(goals_for: u8, goals_against: u8) -> Self {
        match goals_for.cmp(&goals_against) {
            std::cmp::Ordering::Greater => MatchResult::Win,
            std::cmp::Ordering::Equal => MatchResult::Draw,
            std::cmp::Ordering::Less => MatchResult::Loss,
        }
    }

    /// League points: 3 for a win, 1 for a draw.
    pub fn points(&self) -> u32 {
        match self {
            MatchResult::Win => 3,
            MatchResult::Draw => 1,
            MatchResult::Loss => 0,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            MatchResult::Win => 'W',
            MatchResult::Draw => 'D',
            MatchResult::Loss => 'L',
        }
    }

    /// Actual score used by the Elo expectation: 1 for a win, ½ for a draw.
    pub fn elo_score(&self) -> f64 {
        match self {
            MatchResult::Win => 1.0,
            MatchResult::Draw => 0.5,
            MatchResult::Loss => 0.0,
        }
    }
}

/// Optional extended statistics. Upstream encodes "unknown" as absent or as a negative sentinel
/// (e.g. `-1`, `-2`); neither is ever read as a real value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchStats {
    pub home_corners: Option<i16>,
    pub away_corners: Option<i16>,
    pub home_yellow_cards: Option<i16>,
    pub away_yellow_cards: Option<i16>,
    pub home_red_cards: Option<i16>,
    pub away_red_cards: Option<i16>,
    pub home_shots: Option<i16>,
    pub away_shots: Option<i16>,
    pub home_possession: Option<i16>,
    pub away_possession: Option<i16>,
    pub home_fouls: Option<i16>,
    pub away_fouls: Option<i16>,
    pub home_offsides: Option<i16>,
    pub away_offsides: Option<i16>,
}

/// Filters out absent values and negative upstream sentinels.
#[inline]
pub fn known(value: Option<i16>) -> Option<u16> {
    match value {
        Some(value) if value >= 0 => Some(value as u16),
        _ => None,
    }
}

impl MatchStats {
    pub fn corners(&self, side: Side) -> Option<u16> {
        known(self.pick(side, self.home_corners, self.away_corners))
    }

    pub fn shots(&self, side: Side) -> Option<u16> {
        known(self.pick(side, self.home_shots, self.away_shots))
    }

    pub fn possession(&self, side: Side) -> Option<u16> {
        known(self.pick(side, self.home_possession, self.away_possession))
    }

    pub fn fouls(&self, side: Side) -> Option<u16> {
        known(self.pick(side, self.home_fouls, self.away_fouls))
    }

    pub fn offsides(&self, side: Side) -> Option<u16> {
        known(self.pick(side, self.home_offsides, self.away_offsides))
    }

    /// Yellow plus red cards shown to one side; unknown counts coalesce to 0.
    pub fn cards(&self, side: Side) -> u16 {
        let yellow = known(self.pick(side, self.home_yellow_cards, self.away_yellow_cards));
        let red = known(self.pick(side, self.home_red_cards, self.away_red_cards));
        yellow.unwrap_or(0) + red.unwrap_or(0)
    }

    pub fn total_cards(&self) -> u16 {
        self.cards(Side::Home) + self.cards(Side::Away)
    }

    /// Whether either side's card count is known at all.
    pub fn has_cards(&self) -> bool {
        [
            self.home_yellow_cards,
            self.away_yellow_cards,
            self.home_red_cards,
            self.away_red_cards,
        ]
        .into_iter()
        .any(|value| known(value).is_some())
    }

    #[inline]
    fn pick(&self, side: Side, home: Option<i16>, away: Option<i16>) -> Option<i16> {
        match side {
            Side::Home => home,
            Side::Away => away,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: u64,
    pub home_id: TeamId,
    pub away_id: TeamId,
    /// Kickoff as Unix seconds.
    pub kickoff: i64,
    pub status: MatchStatus,
    #[serde(default)]
    pub home_goals: u8,
    #[serde(default)]
    pub away_goals: u8,
    #[serde(default)]
    pub referee_id: Option<RefereeId>,
    #[serde(default)]
    pub stats: MatchStats,
}
impl MatchRecord {
    pub fn is_complete(&self) -> bool {
        self.status == MatchStatus::Complete
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.home_id == team_id || self.away_id == team_id
    }

    pub fn is_between(&self, first: TeamId, second: TeamId) -> bool {
        self.home_id == first && self.away_id == second
            || self.home_id == second && self.away_id == first
    }

    /// The side `team_id` played on, if it played at all. A team facing itself is treated as home.
    pub fn side_of(&self, team_id: TeamId) -> Option<Side> {
        if self.home_id == team_id {
            Some(Side::Home)
        } else if self.away_id == team_id {
            Some(Side::Away)
        } else {
            None
        }
    }

    pub fn team_id(&self, side: Side) -> TeamId {
        match side {
            Side::Home => self.home_id,
            Side::Away => self.away_id,
        }
    }

    pub fn goals_for(&self, side: Side) -> u8 {
        match side {
            Side::Home => self.home_goals,
            Side::Away => self.away_goals,
        }
    }

    pub fn goals_against(&self, side: Side) -> u8 {
        self.goals_for(side.opposite())
    }

    pub fn total_goals(&self) -> u16 {
        self.score().total()
    }

    pub fn score(&self) -> Score {
        Score::new(self.home_goals, self.away_goals)
    }

    pub fn result_for(&self, side: Side) -> MatchResult {
        MatchResult::from_goals(self.goals_for(side), self.goals_against(side))
    }

    pub fn both_teams_scored(&self) -> bool {
        self.home_goals > 0 && self.away_goals > 0
    }

    pub fn kickoff_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.kickoff, 0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub stadium: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub table_position: Option<u32>,
}
impl TeamRecord {
    pub fn new(id: TeamId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            stadium: None,
            country: None,
            table_position: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default)]
    pub position: Option<String>,
}

/// Season totals for a player.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSeasonStats {
    pub appearances: u32,
    pub minutes_played: u32,
    pub goals: u32,
    pub assists: u32,
    pub average_rating: Option<f64>,
}

/// One match in a player's history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerAppearance {
    pub match_id: u64,
    pub minutes: u32,
    pub goals: u32,
    pub assists: u32,
    pub rating: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RefereeRecord {
    pub id: RefereeId,
    pub name: String,
    #[serde(default)]
    pub nationality: Option<String>,
}
