//! Football statistics analytics: team form and strength, league tables and season trends,
//! player and referee ratings, and Poisson-based match predictions.
//!
//! Every engine is a set of pure functions over in-memory records. Empty inputs yield zero-valued
//! structures rather than errors.

#![allow(clippy::too_many_arguments)]

pub mod config;
pub mod domain;
pub mod factorial;
pub mod file;
pub mod league;
pub mod player;
pub mod poisson;
pub mod predict;
pub mod print;
pub mod rating;
pub mod referee;
pub mod scoregrid;
pub mod stats;
pub mod team;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
