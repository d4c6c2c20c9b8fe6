use crate::{errors::block::RuleError, summary::BlockSummary, BlockHashSet};
use thiserror::Error;

/// The closed taxonomy of per-sync failures. Every variant describes either
/// peer misbehavior detected by an admission check or a peer that could not
/// close the dependency gap; abnormal transport and backend failures travel
/// through the protocol error of the flow layer instead.
#[derive(Error, Debug, Clone)]
pub enum SyncError {
    #[error("the received DAG still holds {} blocks {} levels below the requested targets", .0.len(), .1)]
    TooDeep(BlockHashSet, u64),

    #[error("per-rank population grows by a factor of {0} which is above the allowed branching factor {1}")]
    TooWide(f64, f64),

    #[error("summary {} is not an ancestor of the requested targets within {} hops", .0.hash, .1)]
    Unreachable(Box<BlockSummary>, u64),

    #[error("summary {} failed validation: {}", .0.hash, .1)]
    Validation(Box<BlockSummary>, RuleError),

    #[error("the peer was exhausted while {} dependencies are still missing", .0.len())]
    MissingDependencies(BlockHashSet),
}

pub type SyncResult<T> = std::result::Result<T, SyncError>;
