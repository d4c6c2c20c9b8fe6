use crate::{
    errors::{block::BlockProcessResult, consensus::ConsensusResult},
    summary::BlockSummary,
};
use async_trait::async_trait;
use braid_hashes::Hash;

/// Abstracts the consensus external API as seen by the p2p layer.
///
/// All calls may suspend: implementations are expected to reach consensus
/// sessions or stores. The trait object is shared behind an `Arc` and must be
/// internally thread-safe.
#[async_trait]
pub trait ConsensusApi: Send + Sync {
    /// Current DAG tips (leaf blocks) known locally.
    async fn get_tips(&self) -> ConsensusResult<Vec<Hash>>;

    /// Additional locally known justification hashes a peer may treat as
    /// "already have, do not send ancestors of".
    async fn get_justifications(&self) -> ConsensusResult<Vec<Hash>>;

    /// Validates a single summary in isolation (signature and structural rules).
    async fn validate_summary(&self, summary: &BlockSummary) -> BlockProcessResult<()>;

    /// Whether the block is present in the local persistent DAG.
    async fn block_exists(&self, hash: Hash) -> ConsensusResult<bool>;
}
