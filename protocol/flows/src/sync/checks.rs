//! Pure admission predicates evaluated against the partial DAG before each
//! received summary is appended. All walks use the sync state's own index,
//! never the persistent DAG.

use super::state::SyncState;
use braid_consensus_core::{
    errors::sync::{SyncError, SyncResult},
    summary::BlockSummary,
    BlockHashSet,
};
use itertools::Itertools;

/// Bounds how deep below the original sync targets the received DAG extends.
/// The first upward hop is level 1; hitting an empty level within the budget
/// accepts, a non-empty level at the budget is one level too many.
pub fn not_too_deep(state: &SyncState, original_targets: &BlockHashSet, max_possible_depth: u64) -> SyncResult<()> {
    let mut frontier = original_targets.clone();
    for _ in 0..max_possible_depth {
        frontier = state.frontier_parents(&frontier);
        if frontier.is_empty() {
            return Ok(());
        }
    }
    Err(SyncError::TooDeep(frontier, max_possible_depth))
}

/// Bounds per-rank branching: adjacent rank populations, taken in ascending
/// rank order (skipped ranks still form a pair), may not grow by more than
/// `max_branching_factor`. The first offending ratio is reported.
pub fn not_too_wide(state: &SyncState, max_branching_factor: f64) -> SyncResult<()> {
    let rank_counts = state.summaries().counts_by(|summary| summary.rank);
    for ((_, lower), (_, upper)) in rank_counts.into_iter().sorted_unstable_by_key(|(rank, _)| *rank).tuple_windows() {
        let ratio = upper as f64 / lower as f64;
        if ratio > max_branching_factor {
            return Err(SyncError::TooWide(ratio, max_branching_factor));
        }
    }
    Ok(())
}

/// Ensures the incoming summary is an ancestor of the targets of the current
/// stream invocation, within the hop budget. Runs before the summary is
/// appended, so the summary cannot satisfy the walk by being present already.
pub fn reachable(
    state: &SyncState,
    summary: &BlockSummary,
    request_targets: &BlockHashSet,
    max_depth_ancestors_request: u64,
) -> SyncResult<()> {
    let mut frontier = request_targets.clone();
    if frontier.contains(&summary.hash) {
        return Ok(());
    }
    for _ in 0..max_depth_ancestors_request {
        frontier = state.frontier_parents(&frontier);
        if frontier.contains(&summary.hash) {
            return Ok(());
        }
        if frontier.is_empty() {
            break;
        }
    }
    Err(SyncError::Unreachable(Box::new(summary.clone()), max_depth_ancestors_request))
}
