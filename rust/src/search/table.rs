//! Dense per-query view of the candidate pool.

use rustc_hash::FxHashSet;

use crate::models::{Candidate, Centis};

use super::engine::SearchError;

/// Position of an event in the query's event list.
pub type EventIdx = u32;

/// Bitset over the query's events.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventMask {
    words: Vec<u64>,
}

impl EventMask {
    /// Empty mask able to hold `num_events` events.
    pub fn with_len(num_events: usize) -> Self {
        Self {
            words: vec![0; num_events.div_ceil(64)],
        }
    }

    #[inline]
    pub fn set(&mut self, idx: EventIdx) {
        let idx = idx as usize;
        self.words[idx / 64] |= 1u64 << (idx % 64);
    }

    /// Add every event of `other`.
    pub fn union_with(&mut self, other: &EventMask) {
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a |= b;
        }
    }

    /// True if every event in `self` is also in `other`.
    #[inline]
    pub fn is_subset_of(&self, other: &EventMask) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(a, b)| a & !b == 0)
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}

/// One candidate restricted to the query's events.
#[derive(Clone, Debug)]
pub struct CandidateRow {
    /// Position of the candidate in the caller's slice.
    pub source: usize,
    /// Best time per query event (`None` = cannot do the event).
    pub times: Vec<Option<Centis>>,
    pub mask: EventMask,
}

impl CandidateRow {
    #[inline]
    pub fn time(&self, event: EventIdx) -> Option<Centis> {
        self.times[event as usize]
    }

    /// Query events this candidate has a time for, in event order.
    pub fn events(&self) -> impl Iterator<Item = (EventIdx, Centis)> + '_ {
        self.times
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.map(|t| (i as EventIdx, t)))
    }
}

/// Candidate pool of one query, indexed by query event.
///
/// Rows keep the caller's candidate order. Candidates without a time in any requested
/// event are left out: they can never carry an event and are dominated by everyone.
pub struct QueryTable<'a> {
    candidates: &'a [Candidate],
    events: Vec<String>,
    rows: Vec<CandidateRow>,
}

impl<'a> QueryTable<'a> {
    pub fn build(candidates: &'a [Candidate], events: &[String]) -> Result<Self, SearchError> {
        let mut seen: FxHashSet<&str> =
            FxHashSet::with_capacity_and_hasher(events.len(), Default::default());
        if let Some(dup) = events.iter().find(|e| !seen.insert(e.as_str())) {
            return Err(SearchError::DuplicateEvent(dup.clone()));
        }

        let num_events = events.len();
        let rows = candidates
            .iter()
            .enumerate()
            .filter_map(|(source, candidate)| {
                let mut times = vec![None; num_events];
                let mut mask = EventMask::with_len(num_events);
                for (idx, event) in events.iter().enumerate() {
                    if let Some(t) = candidate.time_for(event) {
                        times[idx] = Some(t);
                        mask.set(idx as EventIdx);
                    }
                }
                (!mask.is_empty()).then_some(CandidateRow {
                    source,
                    times,
                    mask,
                })
            })
            .collect();

        Ok(Self {
            candidates,
            events: events.to_vec(),
            rows,
        })
    }

    #[inline]
    pub fn rows(&self) -> &[CandidateRow] {
        &self.rows
    }

    #[inline]
    pub fn row(&self, index: usize) -> &CandidateRow {
        &self.rows[index]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn num_events(&self) -> usize {
        self.events.len()
    }

    /// The caller's candidate behind a row.
    pub fn candidate(&self, index: usize) -> &'a Candidate {
        &self.candidates[self.rows[index].source]
    }

    pub fn event_id(&self, event: EventIdx) -> &str {
        &self.events[event as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_mask_subset() {
        let mut small = EventMask::with_len(70);
        let mut large = EventMask::with_len(70);
        small.set(3);
        small.set(65);
        large.set(3);
        large.set(65);
        large.set(10);

        assert!(small.is_subset_of(&large));
        assert!(!large.is_subset_of(&small));
        assert_eq!(large.count(), 3);
        assert!(EventMask::with_len(70).is_subset_of(&small));

        let mut other = EventMask::with_len(70);
        other.set(64);
        other.union_with(&small);
        assert_eq!(other.count(), 3);
        assert!(small.is_subset_of(&other));
        assert!(!other.is_subset_of(&large));
    }

    #[test]
    fn test_build_restricts_to_requested_events() {
        let candidates = vec![
            Candidate::new("a", "X").with_time("333", 900).with_time("777", 9000),
            Candidate::new("b", "X").with_time("777", 8000),
            Candidate::new("c", "X").with_time("sq1", 1500).with_time("333", 1000),
        ];
        let table = QueryTable::build(&candidates, &events(&["333", "sq1"])).unwrap();

        // "b" has nothing in the requested events
        assert_eq!(table.len(), 2);
        assert_eq!(table.candidate(0).id, "a");
        assert_eq!(table.candidate(1).id, "c");
        assert_eq!(table.row(0).times, vec![Some(900), None]);
        assert_eq!(table.row(1).times, vec![Some(1000), Some(1500)]);
        assert_eq!(table.row(1).events().collect::<Vec<_>>(), vec![(0, 1000), (1, 1500)]);
        assert_eq!(table.event_id(1), "sq1");
    }

    #[test]
    fn test_build_rejects_duplicate_events() {
        let candidates = vec![Candidate::new("a", "X").with_time("333", 900)];
        let result = QueryTable::build(&candidates, &events(&["333", "222", "333"]));
        assert!(matches!(result, Err(SearchError::DuplicateEvent(e)) if e == "333"));
    }
}
