use crate::{blockhash, hashing};
use braid_hashes::Hash;
use serde::{Deserialize, Serialize};

/// A consensus-level reference to the latest block a validator has vouched for,
/// carried by summaries in addition to the parent links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Justification {
    pub validator: Hash,
    pub latest_block_hash: Hash,
}

impl Justification {
    pub fn new(validator: Hash, latest_block_hash: Hash) -> Self {
        Self { validator, latest_block_hash }
    }
}

/// Header-level block metadata: the content hash, the DAG links and the
/// producer-asserted rank. Carries no transactions or state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSummary {
    pub hash: Hash, // cached hash
    pub version: u16,
    pub parents: Vec<Hash>,
    pub justifications: Vec<Justification>,
    pub rank: u64,
    pub timestamp: u64, // timestamp is in millis
}

impl BlockSummary {
    pub fn new(version: u16, parents: Vec<Hash>, justifications: Vec<Justification>, rank: u64, timestamp: u64) -> Self {
        let mut summary = Self { hash: blockhash::NONE, version, parents, justifications, rank, timestamp };
        summary.hash = hashing::summary::hash(&summary);
        summary
    }

    /// Rebuilds a summary from wire parts, trusting the sender-asserted hash.
    /// Hash consistency is a validation rule, not a construction invariant.
    pub fn from_parts(
        hash: Hash,
        version: u16,
        parents: Vec<Hash>,
        justifications: Vec<Justification>,
        rank: u64,
        timestamp: u64,
    ) -> Self {
        Self { hash, version, parents, justifications, rank, timestamp }
    }

    pub fn direct_parents(&self) -> &[Hash] {
        &self.parents
    }

    /// The dependency set of this summary: every hash that must eventually be
    /// present in the DAG for it to be integrated. May yield duplicates when a
    /// parent is also justified.
    pub fn dependencies(&self) -> impl Iterator<Item = Hash> + '_ {
        self.parents.iter().copied().chain(self.justifications.iter().map(|justification| justification.latest_block_hash))
    }
}
