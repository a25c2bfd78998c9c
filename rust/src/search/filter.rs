//! Dominance pre-filter for the candidate pool.
//!
//! Candidate `q` dominates `p` when `q` has a time in every event `p` has, and is at least as
//! fast in each of them. A candidate with `team_size + top_teams - 1` dominators can be swapped
//! out of any top team for an as-good substitute, so it is dropped before enumeration.
//!
//! Candidates with identical times on identical events dominate each other. Among such twins
//! only the earlier row counts as a dominator of the later one, so a group of twins always
//! keeps its first members.

use crate::log_checks;

use super::table::{CandidateRow, QueryTable};

/// True if `q` can stand in for `p` on every event `p` can do, without being slower.
#[inline]
pub fn dominates(q: &CandidateRow, p: &CandidateRow) -> bool {
    p.mask.is_subset_of(&q.mask)
        && p
            .events()
            .all(|(event, p_time)| q.time(event).is_some_and(|q_time| q_time <= p_time))
}

/// True if row `q` counts against row `p` in the filter: it dominates `p`, and if the two are
/// twins, `q` comes first.
fn outranks(table: &QueryTable<'_>, q: usize, p: usize) -> bool {
    let (q_row, p_row) = (table.row(q), table.row(p));
    q != p && dominates(q_row, p_row) && (q < p || !dominates(p_row, q_row))
}

/// Count dominators of row `p`, stopping once `limit` is reached.
fn count_dominators(table: &QueryTable<'_>, p: usize, limit: usize) -> usize {
    let mut count = 0;
    for q in 0..table.len() {
        if outranks(table, q, p) {
            count += 1;
            if count == limit {
                break;
            }
        }
    }
    count
}

/// Row indices (ascending) of candidates with fewer than `threshold` dominators.
///
/// Dominators are counted over the whole table, including candidates that are
/// themselves filtered out.
pub fn filter_dominated(table: &QueryTable<'_>, threshold: usize, verbosity: u8) -> Vec<usize> {
    (0..table.len())
        .filter(|&p| {
            let dominators = count_dominators(table, p, threshold);
            if dominators < threshold {
                return true;
            }
            log_checks!(
                verbosity,
                "  Excluding {}: at least {} dominating candidates",
                table.candidate(p).id,
                dominators
            );
            false
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Candidate;

    fn events(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn make_candidate(id: &str, times: &[(&str, u64)]) -> Candidate {
        times
            .iter()
            .fold(Candidate::new(id, "X"), |c, &(e, t)| c.with_time(e, t))
    }

    #[test]
    fn test_dominates_requires_superset_and_speed() {
        let candidates = vec![
            make_candidate("p", &[("e1", 100)]),
            make_candidate("faster", &[("e1", 90), ("e2", 500)]),
            make_candidate("slower", &[("e1", 110), ("e2", 400)]),
            make_candidate("narrow", &[("e2", 10)]),
            make_candidate("equal", &[("e1", 100)]),
        ];
        let table = QueryTable::build(&candidates, &events(&["e1", "e2"])).unwrap();

        assert!(dominates(table.row(1), table.row(0)));
        assert!(!dominates(table.row(2), table.row(0)));
        assert!(!dominates(table.row(3), table.row(0)));
        assert!(!dominates(table.row(0), table.row(1)));
        // Equal times dominate both ways
        assert!(dominates(table.row(4), table.row(0)));
        assert!(dominates(table.row(0), table.row(4)));
        // Everyone dominates themselves
        assert!(dominates(table.row(0), table.row(0)));
    }

    #[test]
    fn test_filter_excludes_at_threshold() {
        // "slow" is dominated by three others; everyone else by at most one
        let candidates = vec![
            make_candidate("a", &[("e1", 100), ("e2", 100)]),
            make_candidate("b", &[("e1", 90), ("e2", 120)]),
            make_candidate("c", &[("e1", 120), ("e2", 90)]),
            make_candidate("slow", &[("e1", 200)]),
        ];
        let table = QueryTable::build(&candidates, &events(&["e1", "e2"])).unwrap();

        assert_eq!(filter_dominated(&table, 3, 0), vec![0, 1, 2]);
        assert_eq!(filter_dominated(&table, 4, 0), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_filtered_dominators_still_count() {
        // d0 > d1 > d2 > d3 (each dominates the next); with threshold 2, d2 and d3 are
        // dropped, and d3's count includes the dropped d2.
        let candidates: Vec<Candidate> = (0..4)
            .map(|i| make_candidate(&format!("d{i}"), &[("e1", 100 + i * 10)]))
            .collect();
        let table = QueryTable::build(&candidates, &events(&["e1"])).unwrap();

        assert_eq!(filter_dominated(&table, 2, 0), vec![0, 1]);
        assert_eq!(count_dominators(&table, 3, usize::MAX), 3);
        assert_eq!(count_dominators(&table, 3, 2), 2);
    }

    #[test]
    fn test_twins_keep_the_earliest() {
        let candidates = vec![
            make_candidate("a", &[("333", 980)]),
            make_candidate("b", &[("333", 980)]),
            make_candidate("c", &[("333", 1200)]),
        ];
        let table = QueryTable::build(&candidates, &events(&["333"])).unwrap();

        assert!(outranks(&table, 0, 1));
        assert!(!outranks(&table, 1, 0));
        assert!(!outranks(&table, 0, 0));
        assert_eq!(count_dominators(&table, 0, usize::MAX), 0);
        assert_eq!(count_dominators(&table, 2, usize::MAX), 2);
        assert_eq!(filter_dominated(&table, 1, 0), vec![0]);
        assert_eq!(filter_dominated(&table, 2, 0), vec![0, 1]);
    }

    #[test]
    fn test_identical_trio_keeps_a_full_team() {
        let candidates: Vec<Candidate> = ["t0", "t1", "t2"]
            .iter()
            .map(|id| make_candidate(id, &[("e1", 100), ("e2", 100)]))
            .collect();
        let table = QueryTable::build(&candidates, &events(&["e1", "e2"])).unwrap();

        // Team of two, one top team: threshold 2
        assert_eq!(filter_dominated(&table, 2, 0), vec![0, 1]);
    }
}
