//! DAG synchronization flow.
//!
//! Given a source peer and a set of target block hashes, pulls enough block
//! summaries from the peer to connect the targets to the locally known DAG,
//! defending against peers that try to feed an overly deep, overly branched
//! or disconnected history. On success the received summaries are returned in
//! dependency order, ready for insertion.

use std::sync::Arc;

use braid_consensus_core::{
    api::ConsensusApi, config::SyncParams, errors::sync::SyncError, summary::BlockSummary, BlockHashSet, HashMapCustomHasher,
};
use braid_hashes::Hash;
use braid_p2p_lib::{AncestorsRequest, PeerService, ProtocolError};
use futures::StreamExt;
use log::{debug, warn};

pub mod checks;
pub mod state;

use state::SyncState;

pub struct DagSyncFlow {
    consensus: Arc<dyn ConsensusApi>,
    params: SyncParams,
}

impl DagSyncFlow {
    pub fn new(consensus: Arc<dyn ConsensusApi>, params: SyncParams) -> Self {
        Self { consensus, params }
    }

    /// Synchronizes the ancestry of `target_hashes` from `peer`.
    ///
    /// Returns the newly received summaries in dependency order (every
    /// summary preceded by its received dependencies), or the first admission,
    /// validation, transport or backend failure. No partial result is ever
    /// returned. The local DAG is not touched; inserting the result is the
    /// caller's decision.
    pub async fn sync_dag(
        &self,
        peer: &dyn PeerService,
        target_hashes: BlockHashSet,
    ) -> Result<Vec<BlockSummary>, ProtocolError> {
        match self.sync_dag_inner(peer, target_hashes).await {
            Err(err) if !matches!(err, ProtocolError::SyncError(_)) => {
                warn!("Syncing the DAG from peer {} failed unexpectedly: {}", peer.identity(), err);
                Err(err)
            }
            // Plain sync errors are part of the flow contract; logging them is
            // up to the caller.
            result => result,
        }
    }

    async fn sync_dag_inner(
        &self,
        peer: &dyn PeerService,
        target_hashes: BlockHashSet,
    ) -> Result<Vec<BlockSummary>, ProtocolError> {
        // One frontier snapshot per sync call, reused verbatim by every
        // re-request below.
        let known_block_hashes = {
            let mut known = self.consensus.get_tips().await?;
            known.extend(self.consensus.get_justifications().await?);
            known
        };
        debug!("Syncing the DAG from peer {} for {} target(s)", peer.identity(), target_hashes.len());

        let mut state = SyncState::new();
        let mut request_targets = target_hashes.clone();
        loop {
            let received_before = state.summary_count();
            self.stream_targets(peer, &request_targets, &known_block_hashes, &target_hashes, &mut state).await?;

            let missing = self.missing_dependencies(&state).await?;
            if missing.is_empty() {
                break;
            }
            if state.summary_count() == received_before {
                // The peer stopped advancing us; leave the verdict on the
                // remaining gap to the final completeness pass.
                break;
            }
            debug!("Re-requesting {} missing ancestor(s) from peer {}", missing.len(), peer.identity());
            request_targets = missing;
        }

        // Another flow may have imported blocks meanwhile, so judge
        // completeness against the backend once more before failing the sync.
        let missing = self.missing_dependencies(&state).await?;
        if !missing.is_empty() {
            return Err(SyncError::MissingDependencies(missing).into());
        }
        Ok(state.topological_sort())
    }

    /// Folds one peer stream into the state, admission-checking every summary
    /// in arrival order. Returning early drops the stream, which releases the
    /// transfer upstream.
    async fn stream_targets(
        &self,
        peer: &dyn PeerService,
        request_targets: &BlockHashSet,
        known_block_hashes: &[Hash],
        original_targets: &BlockHashSet,
        state: &mut SyncState,
    ) -> Result<(), ProtocolError> {
        let request = AncestorsRequest::new(
            request_targets.iter().copied().collect(),
            known_block_hashes.to_vec(),
            self.params.max_depth_ancestors_request,
        );
        let mut stream = peer.stream_ancestor_block_summaries(request).await?;
        while let Some(summary) = stream.next().await {
            let summary = summary?;
            checks::not_too_deep(state, original_targets, self.params.max_possible_depth)?;
            checks::not_too_wide(state, self.params.max_branching_factor)?;
            checks::reachable(state, &summary, request_targets, self.params.max_depth_ancestors_request)?;
            if let Err(cause) = self.consensus.validate_summary(&summary).await {
                return Err(SyncError::Validation(Box::new(summary), cause).into());
            }
            state.append(summary);
        }
        Ok(())
    }

    /// Dangling parents that the local DAG cannot account for. Queried per
    /// candidate; hashes we already store are pruned from re-requests.
    async fn missing_dependencies(&self, state: &SyncState) -> Result<BlockHashSet, ProtocolError> {
        let mut missing = BlockHashSet::new();
        for hash in state.dangling_parents() {
            if !self.consensus.block_exists(hash).await? {
                missing.insert(hash);
            }
        }
        Ok(missing)
    }
}
