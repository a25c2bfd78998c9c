//! Configuration types for the team search.

use crate::search::SearchError;

/// Events of the full Guildford challenge, in the order the assignment search explores them.
///
/// Slow events come first so the frontier bound starts pruning as early as possible.
pub const DEFAULT_EVENTS: [&str; 13] = [
    "777", "666", "555", "minx", "333ft", "444", "sq1", "222", "333", "333oh", "clock", "pyram",
    "skewb",
];

/// Owned copy of [`DEFAULT_EVENTS`].
pub fn default_events() -> Vec<String> {
    DEFAULT_EVENTS.iter().map(|e| e.to_string()).collect()
}

/// Configuration for one team search query.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all, set_all))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Number of members per team.
    pub team_size: usize,
    /// Capacity of the result frontier (how many teams to report).
    pub top_teams: usize,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    pub verbosity: u8,
    /// Whether dominated candidates are removed before enumeration.
    pub dominance_filter: bool,
    /// Whether the assignment search prunes against the frontier bound.
    pub pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            team_size: 3,
            top_teams: 10,
            verbosity: 0,
            dominance_filter: true,
            pruning: true,
        }
    }
}

impl SearchConfig {
    /// Reject parameters the search has no meaningful answer for.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.team_size == 0 {
            return Err(SearchError::InvalidTeamSize);
        }
        if self.top_teams == 0 {
            return Err(SearchError::InvalidTopTeams);
        }
        Ok(())
    }

    /// Copy of this configuration with a different frontier capacity.
    pub fn with_top_teams(&self, top_teams: usize) -> Self {
        Self {
            top_teams,
            ..self.clone()
        }
    }

    /// Number of dominators that excludes a candidate from the pool.
    ///
    /// Saturates, so a huge `top_teams` simply disables the filter.
    pub fn dominance_threshold(&self) -> usize {
        self.top_teams.saturating_sub(1).saturating_add(self.team_size)
    }
}
