use braid_hashes::Hash;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("wrong summary hash: got {0} but the content hashes to {1}")]
    WrongSummaryHash(Hash, Hash),

    #[error("block {0} has no parents and is not the genesis block")]
    NoParents(Hash),

    #[error("block {0} has an invalid producer signature")]
    InvalidSignature(Hash),

    #[error("block {0} asserts rank {1} which is not above the rank of its parents")]
    RankTooLow(Hash, u64),
}

pub type BlockProcessResult<T> = std::result::Result<T, RuleError>;
