use braid_consensus_core::errors::{consensus::ConsensusError, sync::SyncError};
use std::time::Duration;
use thiserror::Error;

/// The error envelope of a p2p flow: protocol-level misbehavior detected by a
/// flow, wrapped consensus failures, and transport-level interruptions.
#[derive(Error, Debug, Clone)]
pub enum ProtocolError {
    #[error("timeout expired after {0:?}")]
    Timeout(Duration),

    #[error("peer connection is closed")]
    ConnectionClosed,

    #[error(transparent)]
    SyncError(#[from] SyncError),

    #[error(transparent)]
    ConsensusError(#[from] ConsensusError),

    #[error("{0}")]
    Other(&'static str),

    #[error("{0}")]
    OtherOwned(String),
}
