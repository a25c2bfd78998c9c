//! PyO3 bindings: the `rust` extension module used by the Python front end.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::collections::HashMap;

use crate::config::{default_events, SearchConfig};
use crate::dataset::{Dataset, Person, PersonalRecord, PoolSelector};
use crate::models::{Candidate, Centis, FrontierEntry, PoolRanking, SearchStats, TeamSearchResult};
use crate::search::{rank_pools, search_pool, search_teams};

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

#[pymethods]
impl Candidate {
    #[new]
    #[pyo3(signature = (id, pool, best_times=None))]
    fn py_new(id: String, pool: String, best_times: Option<HashMap<String, Centis>>) -> Self {
        Self {
            id,
            pool,
            best_times: best_times.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Candidate(id={:?}, pool={:?}, events={})",
            self.id,
            self.pool,
            self.best_times.len()
        )
    }
}

#[pymethods]
impl SearchConfig {
    #[new]
    #[pyo3(signature = (
        team_size=3,
        top_teams=10,
        verbosity=0,
        dominance_filter=true,
        pruning=true
    ))]
    fn py_new(
        team_size: usize,
        top_teams: usize,
        verbosity: u8,
        dominance_filter: bool,
        pruning: bool,
    ) -> Self {
        Self {
            team_size,
            top_teams,
            verbosity,
            dominance_filter,
            pruning,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SearchConfig(team_size={}, top_teams={}, verbosity={}, dominance_filter={}, pruning={})",
            self.team_size, self.top_teams, self.verbosity, self.dominance_filter, self.pruning
        )
    }
}

#[pymethods]
impl FrontierEntry {
    /// Workload of the busiest member in centiseconds.
    #[pyo3(name = "slowest")]
    fn py_slowest(&self) -> Centis {
        self.slowest()
    }

    fn __repr__(&self) -> String {
        format!(
            "FrontierEntry(members={:?}, totals={:?})",
            self.members, self.totals
        )
    }
}

#[pymethods]
impl PoolRanking {
    fn __repr__(&self) -> String {
        format!(
            "PoolRanking(pool={:?}, slowest={})",
            self.pool,
            self.entry.slowest()
        )
    }
}

#[pymethods]
impl SearchStats {
    fn __repr__(&self) -> String {
        format!(
            "SearchStats(pool_size={}, filtered_pool_size={}, teams_enumerated={}, nodes_visited={}, branches_pruned={})",
            self.pool_size,
            self.filtered_pool_size,
            self.teams_enumerated,
            self.nodes_visited,
            self.branches_pruned
        )
    }
}

#[pymethods]
impl TeamSearchResult {
    fn __len__(&self) -> usize {
        self.teams.len()
    }

    fn __repr__(&self) -> String {
        format!("TeamSearchResult(teams={})", self.teams.len())
    }
}

/// Parsed export rows (PyO3 wrapper).
#[pyclass(name = "Dataset")]
pub struct PyDataset {
    inner: Dataset,
}

#[pymethods]
impl PyDataset {
    /// Build from parsed rows.
    ///
    /// # Arguments
    /// * `persons` - (id, subid, name, pool) rows
    /// * `event_names` - (event id, display name) rows
    /// * `records` - (person id, event id, best time in centiseconds) rows
    /// * `pools` - Valid pool ids, in ranking tie-break order
    #[new]
    fn new(
        persons: Vec<(String, u32, String, String)>,
        event_names: Vec<(String, String)>,
        records: Vec<(String, String, Centis)>,
        pools: Vec<String>,
    ) -> Self {
        let persons = persons
            .into_iter()
            .map(|(id, subid, name, pool)| Person {
                id,
                subid,
                name,
                pool,
            })
            .collect();
        let records = records
            .into_iter()
            .map(|(person_id, event_id, best)| PersonalRecord {
                person_id,
                event_id,
                best,
            })
            .collect();
        Self {
            inner: Dataset::new(persons, event_names, records, pools),
        }
    }

    fn pools(&self) -> Vec<String> {
        self.inner.pools().to_vec()
    }

    fn event_name(&self, event_id: &str) -> Option<String> {
        self.inner.event_name(event_id).map(str::to_string)
    }

    fn person_name(&self, person_id: &str) -> Option<String> {
        self.inner.person_name(person_id).map(str::to_string)
    }

    /// Candidates of a pool ("world" for everyone) with their times in `events`.
    fn candidates(&self, pool: &str, events: Vec<String>) -> PyResult<Vec<Candidate>> {
        self.inner
            .candidates(&PoolSelector::parse(pool), &events)
            .map_err(value_error)
    }

    fn __repr__(&self) -> String {
        format!(
            "Dataset(persons={}, pools={})",
            self.inner.persons().len(),
            self.inner.pools().len()
        )
    }
}

/// Find the fastest teams among `candidates`.
///
/// # Raises
/// * ValueError on a zero team size or top-team count, or a repeated event
#[pyfunction]
#[pyo3(name = "search_teams", signature = (candidates, events, config=None))]
fn py_search_teams(
    candidates: Vec<Candidate>,
    events: Vec<String>,
    config: Option<SearchConfig>,
) -> PyResult<TeamSearchResult> {
    let config = config.unwrap_or_default();
    search_teams(&candidates, &events, &config).map_err(value_error)
}

/// Find the fastest teams of one pool ("world" for everyone) of `dataset`.
///
/// # Raises
/// * ValueError on an unknown pool or invalid parameters
#[pyfunction]
#[pyo3(name = "search_pool", signature = (dataset, pool, events, config=None))]
fn py_search_pool(
    dataset: &PyDataset,
    pool: &str,
    events: Vec<String>,
    config: Option<SearchConfig>,
) -> PyResult<TeamSearchResult> {
    let config = config.unwrap_or_default();
    search_pool(&dataset.inner, &PoolSelector::parse(pool), &events, &config).map_err(value_error)
}

/// Rank every pool of `dataset` by its best team, fastest first.
#[pyfunction]
#[pyo3(name = "rank_pools", signature = (dataset, events, config=None))]
fn py_rank_pools(
    dataset: &PyDataset,
    events: Vec<String>,
    config: Option<SearchConfig>,
) -> PyResult<Vec<PoolRanking>> {
    let config = config.unwrap_or_default();
    rank_pools(&dataset.inner, &events, &config).map_err(value_error)
}

/// The full Guildford event list.
#[pyfunction]
#[pyo3(name = "default_events")]
fn py_default_events() -> Vec<String> {
    default_events()
}

/// The guildford.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Data types
    m.add_class::<Candidate>()?;
    m.add_class::<FrontierEntry>()?;
    m.add_class::<PoolRanking>()?;
    m.add_class::<SearchStats>()?;
    m.add_class::<TeamSearchResult>()?;
    m.add_class::<PyDataset>()?;

    // Config types
    m.add_class::<SearchConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_search_teams, m)?)?;
    m.add_function(wrap_pyfunction!(py_search_pool, m)?)?;
    m.add_function(wrap_pyfunction!(py_rank_pools, m)?)?;
    m.add_function(wrap_pyfunction!(py_default_events, m)?)?;

    Ok(())
}
