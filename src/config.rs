//! Tunable constants for the engines, loadable from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stats::DEFAULT_K_FACTOR;
use crate::team::DEFAULT_FORM_WINDOW;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Trailing matches considered by form analysis.
    pub form_window: usize,
    pub elo_initial_rating: f64,
    pub elo_k_factor: f64,
    /// Goals per team per match assumed before any form is known.
    pub league_average_goals: f64,
    /// Multiplier applied to the home side's baseline expectancy.
    pub home_advantage: f64,
    pub min_expectancy: f64,
    /// Corners per team per match assumed when no corner data is known.
    pub default_team_corners: f64,
    pub top_performers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            form_window: DEFAULT_FORM_WINDOW,
            elo_initial_rating: 1500.0,
            elo_k_factor: DEFAULT_K_FACTOR,
            league_average_goals: 1.5,
            home_advantage: 1.1,
            min_expectancy: 0.1,
            default_team_corners: 5.5,
            top_performers: 5,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum InvalidConfig {
    #[error("form window must be at least 1")]
    EmptyFormWindow,

    #[error("{name} must be a positive finite number, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("at least one top performer per category must be requested")]
    NoTopPerformers,
}

impl Config {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.form_window == 0 {
            return Err(InvalidConfig::EmptyFormWindow);
        }
        for (name, value) in [
            ("elo_initial_rating", self.elo_initial_rating),
            ("elo_k_factor", self.elo_k_factor),
            ("league_average_goals", self.league_average_goals),
            ("home_advantage", self.home_advantage),
            ("min_expectancy", self.min_expectancy),
            ("default_team_corners", self.default_team_corners),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(InvalidConfig::NonPositive { name, value });
            }
        }
        if self.top_performers == 0 {
            return Err(InvalidConfig::NoTopPerformers);
        }
        Ok(())
    }
}
