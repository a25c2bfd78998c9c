//! Query orchestration: one pool's top teams, and the ranking of pools by their best team.

use thiserror::Error;

use crate::config::SearchConfig;
use crate::dataset::{Dataset, DatasetError, PoolSelector};
use crate::log_changes;
use crate::logging::VERBOSITY_CHANGES;
use crate::models::{Candidate, FrontierEntry, PoolRanking, SearchStats, TeamSearchResult};

use super::assign::EventAssigner;
use super::enumerate::TeamEnumerator;
use super::filter::filter_dominated;
use super::frontier::{ResultFrontier, TeamRecord};
use super::table::QueryTable;

/// Errors that can occur during a team search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Team size must be at least 1")]
    InvalidTeamSize,
    #[error("Number of top teams must be at least 1")]
    InvalidTopTeams,
    #[error("Event listed more than once: {0}")]
    DuplicateEvent(String),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Find the `config.top_teams` fastest teams of `config.team_size` members from `candidates`.
///
/// Teams are returned fastest first. A team appears only if its members can cover every
/// event; each team appears once, with its fastest division of the events.
pub fn search_teams(
    candidates: &[Candidate],
    events: &[String],
    config: &SearchConfig,
) -> Result<TeamSearchResult, SearchError> {
    config.validate()?;
    let table = QueryTable::build(candidates, events)?;
    let verbosity = config.verbosity;

    let mut stats = SearchStats {
        pool_size: candidates.len(),
        eligible: table.len(),
        ..SearchStats::default()
    };

    let pool: Vec<usize> = if config.dominance_filter {
        filter_dominated(&table, config.dominance_threshold(), verbosity)
    } else {
        (0..table.len()).collect()
    };
    stats.filtered_pool_size = pool.len();
    log_changes!(
        verbosity,
        "Searching {}-person teams over {} events: {} candidates, {} eligible, {} after filter",
        config.team_size,
        table.num_events(),
        stats.pool_size,
        stats.eligible,
        stats.filtered_pool_size
    );

    let mut frontier = ResultFrontier::new(config.top_teams);
    let mut enumerated = 0u64;
    let mut assigner =
        EventAssigner::new(&table, &mut frontier, &mut stats, config.pruning, verbosity);
    for team in TeamEnumerator::new(&pool, config.team_size) {
        enumerated += 1;
        assigner.assign_team(&team);
    }
    stats.teams_enumerated = enumerated;

    log_changes!(
        verbosity,
        "Done: {} teams, {} nodes, {} pruned, {} accepted",
        stats.teams_enumerated,
        stats.nodes_visited,
        stats.branches_pruned,
        stats.accepted
    );

    let teams = frontier
        .into_entries()
        .into_iter()
        .map(|record| materialize(&table, &record))
        .collect();

    Ok(TeamSearchResult { teams, stats })
}

/// Run [`search_teams`] over the candidates selected from `dataset`.
pub fn search_pool(
    dataset: &Dataset,
    selector: &PoolSelector,
    events: &[String],
    config: &SearchConfig,
) -> Result<TeamSearchResult, SearchError> {
    let candidates = dataset.candidates(selector, events)?;
    search_teams(&candidates, events, config)
}

/// Rank the dataset's pools by their single best team.
///
/// Pools without any team covering the events are left out. Equally fast pools keep the
/// dataset's pool order.
pub fn rank_pools(
    dataset: &Dataset,
    events: &[String],
    config: &SearchConfig,
) -> Result<Vec<PoolRanking>, SearchError> {
    config.validate()?;
    let mut pool_config = config.with_top_teams(1);
    pool_config.verbosity = config.verbosity.saturating_sub(VERBOSITY_CHANGES);

    let mut rankings: Vec<PoolRanking> = Vec::new();
    for pool in dataset.pools() {
        let selector = PoolSelector::Pool(pool.clone());
        let result = search_pool(dataset, &selector, events, &pool_config)?;
        if let Some(entry) = result.teams.into_iter().next() {
            log_changes!(
                config.verbosity,
                "{}: best team finishes in {}",
                pool,
                entry.slowest()
            );
            rankings.push(PoolRanking {
                pool: pool.clone(),
                entry,
            });
        }
    }

    rankings.sort_by_cached_key(|r| r.entry.rank_key());
    Ok(rankings)
}

/// Resolve row and event indices of a frontier record to ids.
fn materialize(table: &QueryTable<'_>, record: &TeamRecord) -> FrontierEntry {
    FrontierEntry {
        members: record
            .members
            .iter()
            .map(|&m| table.candidate(m).id.clone())
            .collect(),
        totals: record.score.totals().to_vec(),
        events: record
            .division
            .iter()
            .map(|carried| {
                carried
                    .iter()
                    .map(|&e| table.event_id(e).to_string())
                    .collect()
            })
            .collect(),
    }
}
