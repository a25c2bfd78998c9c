//! Team score ordering.
//!
//! A team is scored by the per-member workload left after the events are divided.
//! Teams are compared by their busiest member first, then the second busiest, and so on:
//! both workload vectors are sorted descending and compared lexicographically.

use std::cmp::Ordering;

use crate::models::Centis;

/// Per-member accumulated time, indexed by member position in the team.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScoreVector(Vec<Centis>);

impl ScoreVector {
    /// All-zero workloads for a team of `team_size` members.
    pub fn zeros(team_size: usize) -> Self {
        Self(vec![0; team_size])
    }

    #[inline]
    pub fn totals(&self) -> &[Centis] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Add `time` to the workload of `member`.
    #[inline]
    pub fn add(&mut self, member: usize, time: Centis) {
        self.0[member] += time;
    }

    /// Undo a previous [`ScoreVector::add`].
    #[inline]
    pub fn sub(&mut self, member: usize, time: Centis) {
        self.0[member] -= time;
    }

    pub fn slowest(&self) -> Centis {
        self.0.iter().copied().max().unwrap_or(0)
    }

    pub fn rank_key(&self) -> RankKey {
        RankKey::from_totals(&self.0)
    }

    /// Whether this vector ranks strictly ahead of `other`.
    pub fn faster_than(&self, other: &ScoreVector) -> bool {
        compare_totals(&self.0, &other.0) == Ordering::Less
    }
}

impl From<Vec<Centis>> for ScoreVector {
    fn from(totals: Vec<Centis>) -> Self {
        Self(totals)
    }
}

/// Workloads sorted descending; the derived `Ord` is the team ranking (lower = faster).
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RankKey(Vec<Centis>);

impl RankKey {
    pub fn from_totals(totals: &[Centis]) -> Self {
        let mut sorted = totals.to_vec();
        sort_descending(&mut sorted);
        Self(sorted)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Centis] {
        &self.0
    }
}

/// Sort workloads busiest-first in place.
#[inline]
pub fn sort_descending(totals: &mut [Centis]) {
    totals.sort_unstable_by(|a, b| b.cmp(a));
}

/// Compare two workload vectors by the team ranking.
pub fn compare_totals(a: &[Centis], b: &[Centis]) -> Ordering {
    RankKey::from_totals(a).cmp(&RankKey::from_totals(b))
}
