use braid_hashes::{Hash, HASH_SIZE};
use std::sync::atomic::{AtomicU64, Ordering};

/// The all-zero hash, used in the rare spots where a hash slot must exist
/// before the real content hash is known.
pub const NONE: Hash = Hash::from_bytes([0u8; HASH_SIZE]);

/// Hands out a fresh block hash, distinct from every other one produced by
/// this process. Test helper only; real block hashes are content-addressed.
pub fn new_unique() -> Hash {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    Hash::from_u64_word(NEXT.fetch_add(1, Ordering::Relaxed))
}
