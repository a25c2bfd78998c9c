//! Rust implementation of the Guildford challenge team search.
//!
//! This crate finds the fastest fixed-size teams for a set of events, where the events are
//! divided among the members so that the busiest member finishes as early as possible.
//! Downloading and parsing the results export, and printing the teams, stay on the Python side;
//! with the `python` feature the search is exposed as the `rust` extension module.

pub mod config;
pub mod dataset;
pub mod logging;
mod models;
pub mod ordering;
pub mod search;

#[cfg(feature = "python")]
mod python;

pub use config::{default_events, SearchConfig, DEFAULT_EVENTS};
pub use dataset::{Dataset, DatasetError, Person, PersonalRecord, PoolSelector, WILDCARD_POOL};
pub use models::{Candidate, Centis, FrontierEntry, PoolRanking, SearchStats, TeamSearchResult};
pub use ordering::{RankKey, ScoreVector};
pub use search::{rank_pools, search_pool, search_teams, SearchError};
