use super::HasherExtensions;
use crate::summary::BlockSummary;
use braid_hashes::{Hash, HasherBase, SummaryHash};

/// Returns the summary hash.
pub fn hash(summary: &BlockSummary) -> Hash {
    let mut hasher = SummaryHash::new();
    hasher.update(summary.version.to_le_bytes()).write_var_array(&summary.parents);

    hasher.write_len(summary.justifications.len());
    for justification in summary.justifications.iter() {
        hasher.update(justification.validator).update(justification.latest_block_hash);
    }

    hasher.update(summary.rank.to_le_bytes()).update(summary.timestamp.to_le_bytes());

    hasher.finalize()
}
