//! Branch-and-bound division of the events among one team's members.

use crate::models::{Centis, SearchStats};
use crate::{log_changes, log_checks, log_debug};

use super::frontier::{ResultFrontier, Submission};
use super::state::AssignmentState;
use super::table::{EventIdx, EventMask, QueryTable};

/// Per-query search context threaded through the recursion.
pub struct EventAssigner<'q, 'a> {
    table: &'q QueryTable<'a>,
    frontier: &'q mut ResultFrontier,
    stats: &'q mut SearchStats,
    pruning: bool,
    verbosity: u8,
    /// Scratch buffer for busiest-first workloads.
    ranked: Vec<Centis>,
}

impl<'q, 'a> EventAssigner<'q, 'a> {
    pub fn new(
        table: &'q QueryTable<'a>,
        frontier: &'q mut ResultFrontier,
        stats: &'q mut SearchStats,
        pruning: bool,
        verbosity: u8,
    ) -> Self {
        Self {
            table,
            frontier,
            stats,
            pruning,
            verbosity,
            ranked: Vec::new(),
        }
    }

    /// Explore every division of the events among `team` (row indices, ascending),
    /// submitting complete divisions to the frontier.
    pub fn assign_team(&mut self, team: &[usize]) {
        if !self.covers_all_events(team) {
            log_checks!(
                self.verbosity,
                "  Skipping team {:?}: some event has no bearer",
                self.member_ids(team)
            );
            return;
        }
        let mut state = AssignmentState::new(team.len());
        self.divide(team, 0, &mut state);
    }

    /// True if every event has at least one member with a time for it.
    fn covers_all_events(&self, team: &[usize]) -> bool {
        let mut covered = EventMask::with_len(self.table.num_events());
        for &m in team {
            covered.union_with(&self.table.row(m).mask);
        }
        covered.count() == self.table.num_events()
    }

    fn divide(&mut self, team: &[usize], next: usize, state: &mut AssignmentState) {
        self.stats.nodes_visited += 1;

        if next == self.table.num_events() {
            self.submit(team, state);
            return;
        }

        let event = next as EventIdx;
        for (member, &row) in team.iter().enumerate() {
            let Some(time) = self.table.row(row).time(event) else {
                continue;
            };
            state.assign(member, event, time);
            if self.pruning && !self.admits(state) {
                self.stats.branches_pruned += 1;
                log_debug!(
                    self.verbosity,
                    "    Pruned {} -> {} at {:?}",
                    self.table.event_id(event),
                    self.table.candidate(row).id,
                    state.score.totals()
                );
            } else {
                self.divide(team, next + 1, state);
            }
            state.unassign(member, time);
        }
    }

    /// Whether the partial division can still beat the frontier's worst entry.
    #[inline]
    fn admits(&mut self, state: &AssignmentState) -> bool {
        state.rank_into(&mut self.ranked);
        self.frontier.bound().admits(&self.ranked)
    }

    fn submit(&mut self, team: &[usize], state: &AssignmentState) {
        self.stats.submissions += 1;
        match self.frontier.submit(team, state) {
            Submission::Added | Submission::Improved => {
                self.stats.accepted += 1;
                log_changes!(
                    self.verbosity,
                    "  Accepted {:?} with workloads {:?}",
                    self.member_ids(team),
                    state.score.totals()
                );
            }
            Submission::Rejected => {}
        }
    }

    fn member_ids(&self, team: &[usize]) -> Vec<&'a str> {
        team.iter()
            .map(|&m| self.table.candidate(m).id.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Candidate;

    fn events(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn make_candidate(id: &str, times: &[(&str, Centis)]) -> Candidate {
        times
            .iter()
            .fold(Candidate::new(id, "X"), |c, &(e, t)| c.with_time(e, t))
    }

    fn run_team(
        candidates: &[Candidate],
        event_ids: &[&str],
        team: &[usize],
        pruning: bool,
    ) -> (ResultFrontier, SearchStats) {
        let table = QueryTable::build(candidates, &events(event_ids)).unwrap();
        let mut frontier = ResultFrontier::new(1);
        let mut stats = SearchStats::default();
        EventAssigner::new(&table, &mut frontier, &mut stats, pruning, 0).assign_team(team);
        (frontier, stats)
    }

    #[test]
    fn test_finds_best_division() {
        let candidates = vec![
            make_candidate("a", &[("e1", 100), ("e2", 200)]),
            make_candidate("b", &[("e1", 150), ("e2", 50)]),
        ];
        let (frontier, _) = run_team(&candidates, &["e1", "e2"], &[0, 1], true);

        let best = &frontier.entries()[0];
        assert_eq!(best.members, vec![0, 1]);
        assert_eq!(best.score.totals(), &[100, 50]);
        assert_eq!(best.division, vec![vec![0], vec![1]]);
    }

    #[test]
    fn test_balances_load_across_members() {
        // One member is faster at everything, but splitting still wins
        let candidates = vec![
            make_candidate("fast", &[("e1", 100), ("e2", 100), ("e3", 100)]),
            make_candidate("slow", &[("e1", 150), ("e2", 150), ("e3", 150)]),
        ];
        let (frontier, _) = run_team(&candidates, &["e1", "e2", "e3"], &[0, 1], true);

        let best = &frontier.entries()[0];
        assert_eq!(best.score.totals(), &[200, 150]);
        assert_eq!(best.division, vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn test_uncoverable_event_yields_nothing() {
        let candidates = vec![
            make_candidate("a", &[("e1", 100)]),
            make_candidate("b", &[("e1", 120)]),
        ];
        let (frontier, stats) = run_team(&candidates, &["e1", "e2"], &[0, 1], true);
        assert!(frontier.is_empty());
        assert_eq!(stats.submissions, 0);
    }

    #[test]
    fn test_pruning_skips_branches_without_changing_result() {
        let candidates = vec![
            make_candidate("a", &[("e1", 100), ("e2", 200), ("e3", 300)]),
            make_candidate("b", &[("e1", 150), ("e2", 50), ("e3", 250)]),
            make_candidate("c", &[("e1", 90), ("e2", 400), ("e3", 100)]),
        ];
        let (pruned, pruned_stats) = run_team(&candidates, &["e1", "e2", "e3"], &[0, 1, 2], true);
        let (full, full_stats) = run_team(&candidates, &["e1", "e2", "e3"], &[0, 1, 2], false);

        assert_eq!(pruned.entries(), full.entries());
        assert_eq!(full_stats.branches_pruned, 0);
        // 3^3 complete divisions without pruning
        assert_eq!(full_stats.submissions, 27);
        assert!(pruned_stats.branches_pruned > 0);
        assert!(pruned_stats.nodes_visited < full_stats.nodes_visited);
    }

    #[test]
    fn test_partition_invariant() {
        let candidates = vec![
            make_candidate("a", &[("e1", 100), ("e2", 200), ("e3", 300)]),
            make_candidate("b", &[("e2", 50), ("e3", 250)]),
        ];
        let (frontier, _) = run_team(&candidates, &["e1", "e2", "e3"], &[0, 1], true);
        let best = &frontier.entries()[0];

        let table_events = ["e1", "e2", "e3"];
        let mut seen: Vec<EventIdx> = best.division.iter().flatten().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2]);

        for (member, carried) in best.division.iter().enumerate() {
            let sum: Centis = carried
                .iter()
                .map(|&e| candidates[member].time_for(table_events[e as usize]).unwrap())
                .sum();
            assert_eq!(sum, best.score.totals()[member]);
        }
    }
}
