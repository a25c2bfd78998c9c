//! Core data types for the team search.

use std::collections::HashMap;

use crate::ordering::RankKey;

// Note: We use std HashMap here for PyO3 interface compatibility

/// A time in centiseconds (hundredths of a second).
pub type Centis = u64;

/// A person who may be picked for a team, with their best time per event.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all, set_all))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    pub pool: String,
    /// Event id -> best recorded time. Only these events can be assigned to the candidate.
    pub best_times: HashMap<String, Centis>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, pool: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            pool: pool.into(),
            best_times: HashMap::new(),
        }
    }

    /// Builder-style helper for recording a best time.
    pub fn with_time(mut self, event_id: impl Into<String>, time: Centis) -> Self {
        self.best_times.insert(event_id.into(), time);
        self
    }

    #[inline]
    pub fn time_for(&self, event_id: &str) -> Option<Centis> {
        self.best_times.get(event_id).copied()
    }
}

/// One accepted team: who is on it, how long each member is busy, and with what.
///
/// `members`, `totals` and `events` are parallel vectors indexed by member.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrontierEntry {
    pub members: Vec<String>,
    pub totals: Vec<Centis>,
    pub events: Vec<Vec<String>>,
}

impl FrontierEntry {
    pub fn rank_key(&self) -> RankKey {
        RankKey::from_totals(&self.totals)
    }

    /// Workload of the busiest member, i.e. the team's finishing time.
    pub fn slowest(&self) -> Centis {
        self.totals.iter().copied().max().unwrap_or(0)
    }
}

/// The best team of one pool in a pool ranking.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolRanking {
    pub pool: String,
    pub entry: FrontierEntry,
}

/// Counters collected while answering one query.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Candidates handed to the query.
    pub pool_size: usize,
    /// Candidates with a time in at least one requested event.
    pub eligible: usize,
    /// Candidates left after the dominance filter.
    pub filtered_pool_size: usize,
    pub teams_enumerated: u64,
    /// Assignment search nodes entered (one per explored partial assignment).
    pub nodes_visited: u64,
    pub branches_pruned: u64,
    /// Complete assignments handed to the frontier.
    pub submissions: u64,
    /// Submissions that entered the frontier (new team or improvement).
    pub accepted: u64,
}

/// Frontier contents (best first) plus the query's counters.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeamSearchResult {
    pub teams: Vec<FrontierEntry>,
    pub stats: SearchStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_builder() {
        let c = Candidate::new("2010ABCD01", "Finland")
            .with_time("333", 950)
            .with_time("222", 310);
        assert_eq!(c.time_for("333"), Some(950));
        assert_eq!(c.time_for("444"), None);
        assert_eq!(c.best_times.len(), 2);
    }

    #[test]
    fn test_entry_slowest_and_key() {
        let entry = FrontierEntry {
            members: vec!["a".to_string(), "b".to_string()],
            totals: vec![150, 200],
            events: vec![vec!["e1".to_string()], vec!["e2".to_string()]],
        };
        assert_eq!(entry.slowest(), 200);
        assert_eq!(entry.rank_key().as_slice(), &[200, 150]);
    }
}
