use crate::common::ProtocolError;
use async_trait::async_trait;
use braid_consensus_core::summary::BlockSummary;
use braid_hashes::Hash;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// The identity of a connected peer, assigned at handshake time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PeerId(Uuid);

impl PeerId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<Uuid> for PeerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl Display for PeerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Wire request asking a peer for the ancestry of `target_block_hashes`.
///
/// The peer is expected to walk at most `max_depth` hops below the targets and
/// to prune its reply at the `known_block_hashes` frontier. Neither ordering
/// nor completeness of the reply is trusted; the requesting side re-checks
/// every received summary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AncestorsRequest {
    pub target_block_hashes: Vec<Hash>,
    pub known_block_hashes: Vec<Hash>,
    pub max_depth: u64,
}

impl AncestorsRequest {
    pub fn new(target_block_hashes: Vec<Hash>, known_block_hashes: Vec<Hash>, max_depth: u64) -> Self {
        Self { target_block_hashes, known_block_hashes, max_depth }
    }
}

/// A lazy, finite stream of block summaries produced by a peer. Dropping the
/// stream releases the underlying transport resources.
pub type SummaryStream = BoxStream<'static, Result<BlockSummary, ProtocolError>>;

/// The summary-serving surface of a connected peer.
#[async_trait]
pub trait PeerService: Send + Sync {
    /// The remote peer identity, for logging and ban accounting.
    fn identity(&self) -> PeerId;

    /// Opens the ancestor stream for the given request.
    async fn stream_ancestor_block_summaries(&self, request: AncestorsRequest) -> Result<SummaryStream, ProtocolError>;
}
