//! Bounded best-of-m result frontier.

use crate::models::Centis;
use crate::ordering::{RankKey, ScoreVector};

use super::state::AssignmentState;
use super::table::EventIdx;

/// A frontier entry: a snapshot of one team and its best known division.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamRecord {
    /// Row indices of the members, ascending.
    pub members: Vec<usize>,
    pub score: ScoreVector,
    pub division: Vec<Vec<EventIdx>>,
    key: RankKey,
}

impl TeamRecord {
    fn snapshot(members: &[usize], state: &AssignmentState, key: RankKey) -> Self {
        Self {
            members: members.to_vec(),
            score: state.score.clone(),
            division: state.division.clone(),
            key,
        }
    }

    pub fn key(&self) -> &RankKey {
        &self.key
    }
}

/// Pruning bound published by the frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound<'a> {
    /// Frontier not full yet: every branch is worth exploring.
    Unbounded,
    /// Frontier full: only divisions strictly faster than its last entry can enter.
    Worst(&'a RankKey),
}

impl Bound<'_> {
    /// Whether a (partial) division with these busiest-first workloads may still enter.
    #[inline]
    pub fn admits(&self, ranked: &[Centis]) -> bool {
        match self {
            Bound::Unbounded => true,
            Bound::Worst(worst) => ranked < worst.as_slice(),
        }
    }
}

/// Outcome of [`ResultFrontier::submit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// A new team entered the frontier.
    Added,
    /// The team was already present and its division got faster.
    Improved,
    /// Not kept: no faster than the team's known division, or evicted at once.
    Rejected,
}

/// The best `capacity` teams seen so far, fastest first, one entry per member set.
#[derive(Clone, Debug)]
pub struct ResultFrontier {
    capacity: usize,
    entries: Vec<TeamRecord>,
}

impl ResultFrontier {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::new(),
        }
    }

    /// Offer a complete division of `members`.
    ///
    /// Among equally ranked entries the earlier submission stays ahead.
    pub fn submit(&mut self, members: &[usize], state: &AssignmentState) -> Submission {
        let key = state.score.rank_key();

        if let Some(pos) = self.entries.iter().position(|e| e.members == members) {
            if key >= self.entries[pos].key {
                return Submission::Rejected;
            }
            self.entries.remove(pos);
            let at = self.entries.partition_point(|e| e.key <= key);
            self.entries
                .insert(at, TeamRecord::snapshot(members, state, key));
            return Submission::Improved;
        }

        let at = self.entries.partition_point(|e| e.key <= key);
        if at >= self.capacity {
            return Submission::Rejected;
        }
        self.entries
            .insert(at, TeamRecord::snapshot(members, state, key));
        self.entries.truncate(self.capacity);
        Submission::Added
    }

    /// Current pruning bound; [`Bound::Unbounded`] until the frontier is full.
    #[inline]
    pub fn bound(&self) -> Bound<'_> {
        match self.entries.last() {
            Some(last) if self.is_full() => Bound::Worst(&last.key),
            _ => Bound::Unbounded,
        }
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TeamRecord] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TeamRecord> {
        self.entries
    }
}
