//! In-flight state of one team's event division.

use crate::models::Centis;
use crate::ordering::{sort_descending, ScoreVector};

use super::table::EventIdx;

/// Partial division of the events among a team's members.
///
/// The assignment search mutates a single state with [`assign`](Self::assign) and
/// [`unassign`](Self::unassign) while walking the search tree; the frontier clones it
/// only when a complete division is accepted.
#[derive(Clone, Debug)]
pub struct AssignmentState {
    /// Accumulated time per member.
    pub score: ScoreVector,
    /// Events carried by each member, in assignment order.
    pub division: Vec<Vec<EventIdx>>,
}

impl AssignmentState {
    pub fn new(team_size: usize) -> Self {
        Self {
            score: ScoreVector::zeros(team_size),
            division: vec![Vec::new(); team_size],
        }
    }

    #[inline]
    pub fn assign(&mut self, member: usize, event: EventIdx, time: Centis) {
        self.score.add(member, time);
        self.division[member].push(event);
    }

    /// Revert the most recent [`assign`](Self::assign) for `member`.
    #[inline]
    pub fn unassign(&mut self, member: usize, time: Centis) {
        self.score.sub(member, time);
        self.division[member].pop();
    }

    /// Write the workloads, busiest first, into `buf` (reused across calls).
    #[inline]
    pub fn rank_into(&self, buf: &mut Vec<Centis>) {
        buf.clear();
        buf.extend_from_slice(self.score.totals());
        sort_descending(buf);
    }
}
