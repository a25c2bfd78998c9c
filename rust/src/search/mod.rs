//! Team search: dominance filter, team enumeration, branch-and-bound event division and the
//! bounded result frontier.
//!
//! A query restricts the candidate pool to the requested events, drops candidates that enough
//! others beat everywhere, then divides the events among the members of every remaining team,
//! keeping the fastest teams in a frontier whose worst entry bounds the search.

mod assign;
mod engine;
mod enumerate;
mod filter;
mod frontier;
mod state;
mod table;

pub use assign::EventAssigner;
pub use engine::{rank_pools, search_pool, search_teams, SearchError};
pub use enumerate::TeamEnumerator;
pub use filter::{dominates, filter_dominated};
pub use frontier::{Bound, ResultFrontier, Submission, TeamRecord};
pub use state::AssignmentState;
pub use table::{CandidateRow, EventIdx, EventMask, QueryTable};
