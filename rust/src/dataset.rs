//! In-memory view of the results export.
//!
//! The Python side downloads and parses the export; this module turns the parsed rows into
//! candidate pools for the search and answers display-name lookups.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::models::{Candidate, Centis};

/// Pool selector matching every candidate regardless of pool.
pub const WILDCARD_POOL: &str = "world";

/// Errors that can occur while selecting candidates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    #[error("Unknown pool: {0}")]
    UnknownPool(String),
}

/// A person row from the export. Only `subid == 1` rows describe the current identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Person {
    pub id: String,
    pub subid: u32,
    pub name: String,
    pub pool: String,
}

/// A personal best (average) of one person in one event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonalRecord {
    pub person_id: String,
    pub event_id: String,
    pub best: Centis,
}

/// Which candidates a query runs over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolSelector {
    All,
    Pool(String),
}

impl PoolSelector {
    /// Parse a selector, treating [`WILDCARD_POOL`] as [`PoolSelector::All`].
    pub fn parse(selector: &str) -> Self {
        if selector == WILDCARD_POOL {
            PoolSelector::All
        } else {
            PoolSelector::Pool(selector.to_string())
        }
    }

    #[inline]
    fn matches(&self, pool: &str) -> bool {
        match self {
            PoolSelector::All => true,
            PoolSelector::Pool(p) => p == pool,
        }
    }
}

/// Persons, event names, personal records and pools of one export.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    persons: Vec<Person>,
    person_index: FxHashMap<String, usize>,
    event_names: FxHashMap<String, String>,
    /// Records grouped by person index.
    records: Vec<Vec<(String, Centis)>>,
    pools: Vec<String>,
}

impl Dataset {
    /// Build a dataset from parsed rows.
    ///
    /// Persons with `subid != 1` are dropped, as are records of persons not in the
    /// remaining list. A repeated person id keeps its first row.
    pub fn new(
        persons: Vec<Person>,
        event_names: Vec<(String, String)>,
        records: Vec<PersonalRecord>,
        pools: Vec<String>,
    ) -> Self {
        let mut kept: Vec<Person> = Vec::with_capacity(persons.len());
        let mut person_index: FxHashMap<String, usize> =
            FxHashMap::with_capacity_and_hasher(persons.len(), Default::default());
        for person in persons.into_iter().filter(|p| p.subid == 1) {
            if person_index.contains_key(&person.id) {
                continue;
            }
            person_index.insert(person.id.clone(), kept.len());
            kept.push(person);
        }

        let mut grouped: Vec<Vec<(String, Centis)>> = vec![Vec::new(); kept.len()];
        for record in records {
            if let Some(&idx) = person_index.get(&record.person_id) {
                grouped[idx].push((record.event_id, record.best));
            }
        }

        Self {
            persons: kept,
            person_index,
            event_names: event_names.into_iter().collect(),
            records: grouped,
            pools,
        }
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn pools(&self) -> &[String] {
        &self.pools
    }

    pub fn contains_pool(&self, pool: &str) -> bool {
        self.pools.iter().any(|p| p == pool)
    }

    /// Display name of an event, if the export has one.
    pub fn event_name(&self, event_id: &str) -> Option<&str> {
        self.event_names.get(event_id).map(|s| s.as_str())
    }

    /// Display name of a person, if known.
    pub fn person_name(&self, person_id: &str) -> Option<&str> {
        self.person_index
            .get(person_id)
            .map(|&i| self.persons[i].name.as_str())
    }

    /// Candidates of the selected pool with their times in `events`, in person order.
    ///
    /// Persons without a record in any of the events are omitted. If a person has several
    /// records for one event, the fastest counts.
    pub fn candidates(
        &self,
        selector: &PoolSelector,
        events: &[String],
    ) -> Result<Vec<Candidate>, DatasetError> {
        if let PoolSelector::Pool(pool) = selector {
            if !self.contains_pool(pool) {
                return Err(DatasetError::UnknownPool(pool.clone()));
            }
        }

        let candidates = self
            .persons
            .iter()
            .zip(self.records.iter())
            .filter(|(person, _)| selector.matches(&person.pool))
            .filter_map(|(person, records)| {
                let mut candidate = Candidate::new(person.id.clone(), person.pool.clone());
                for (event_id, best) in records {
                    if !events.contains(event_id) {
                        continue;
                    }
                    candidate
                        .best_times
                        .entry(event_id.clone())
                        .and_modify(|t| *t = (*t).min(*best))
                        .or_insert(*best);
                }
                (!candidate.best_times.is_empty()).then_some(candidate)
            })
            .collect();

        Ok(candidates)
    }
}
