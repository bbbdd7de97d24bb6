//! Loading of datasets and configuration from JSON files.

use std::ffi::OsStr;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::from_reader;

use crate::domain::{MatchRecord, PlayerAppearance, PlayerRecord, PlayerSeasonStats, RefereeRecord, TeamId, TeamRecord};
use crate::league::Competition;

/// Reads a JSON-encoded type from a given file `path`.
pub fn read_json<D: DeserializeOwned>(path: impl AsRef<Path>) -> Result<D, io::Error> {
    let file = File::open(path)?;
    Ok(from_reader(file)?)
}

pub trait FromJsonFile<D> {
    fn from_json_file(path: impl AsRef<Path>) -> Result<D, io::Error>;
}

impl<D: DeserializeOwned> FromJsonFile<D> for D {
    fn from_json_file(path: impl AsRef<Path>) -> Result<D, io::Error> {
        read_json(path)
    }
}

/// Recursively locates all files in a given directory matching the supplied `extension_filter`. The
/// located files are written into `files`. If `path` is itself a matching file, it is added.
pub fn recurse_dir(
    path: PathBuf,
    files: &mut Vec<PathBuf>,
    extension_filter: &mut impl FnMut(&OsStr) -> bool,
) -> Result<(), io::Error> {
    let md = fs::metadata(&path)?;
    if md.is_dir() {
        let mut entries = fs::read_dir(path)?.collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|entry| entry.path());
        for entry in entries {
            recurse_dir(entry.path(), files, extension_filter)?;
        }
    } else if extension_filter(path.extension().unwrap_or_default()) {
        files.push(path);
    }
    Ok(())
}

/// A player with their season totals and per-match history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerEntry {
    #[serde(flatten)]
    pub player: PlayerRecord,
    #[serde(default)]
    pub totals: PlayerSeasonStats,
    #[serde(default)]
    pub appearances: Vec<PlayerAppearance>,
}

/// Records for one competition, as supplied by the upstream source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub name: Option<String>,
    pub season: Option<String>,
    pub teams: Vec<TeamRecord>,
    pub matches: Vec<MatchRecord>,
    pub players: Vec<PlayerEntry>,
    pub referees: Vec<RefereeRecord>,
}
impl Dataset {
    pub fn team(&self, team_id: TeamId) -> Option<&TeamRecord> {
        self.teams.iter().find(|team| team.id == team_id)
    }

    pub fn team_by_name(&self, name: &str) -> Option<&TeamRecord> {
        self.teams.iter().find(|team| team.name.eq_ignore_ascii_case(name))
    }

    /// Orders matches by kickoff, keeping the supplied order among simultaneous kickoffs.
    pub fn into_chronological(mut self) -> Self {
        self.matches.sort_by_key(|record| record.kickoff);
        self
    }

    /// The dataset as a named competition, falling back to `default_name` when it carries none.
    pub fn into_competition(self, default_name: &str) -> Competition {
        Competition {
            name: self.name.unwrap_or_else(|| default_name.to_string()),
            matches: self.matches,
            teams: self.teams,
        }
    }
}
