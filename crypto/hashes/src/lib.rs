mod hashers;

pub use hashers::{Hasher, HasherBase, PeerMessageHash, SummaryHash};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const HASH_SIZE: usize = 32;

#[derive(PartialEq, Eq, Clone, Copy, Default, Debug, Serialize, Deserialize)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    #[inline(always)]
    pub const fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    #[inline(always)]
    pub const fn as_bytes(self) -> [u8; HASH_SIZE] {
        self.0
    }

    #[inline(always)]
    pub fn from_le_u64(words: [u64; 4]) -> Self {
        let mut bytes = [0u8; HASH_SIZE];
        for (chunk, word) in bytes.chunks_exact_mut(8).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        Hash(bytes)
    }

    #[inline(always)]
    pub fn to_le_u64(self) -> [u64; 4] {
        let mut words = [0u64; 4];
        for (word, chunk) in words.iter_mut().zip(self.0.chunks_exact(8)) {
            *word = u64::from_le_bytes(chunk.try_into().expect("the chunk is exactly 8 bytes"));
        }
        words
    }

    /// Builds a hash with `word` as its last little-endian u64 word and zeros elsewhere
    #[inline(always)]
    pub fn from_u64_word(word: u64) -> Self {
        Self::from_le_u64([0, 0, 0, word])
    }
}

// Feed the four little-endian words rather than the raw bytes, so keyed collections
// can consume the hash through `write_u64` alone.
impl std::hash::Hash for Hash {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for chunk in self.0.chunks_exact(8) {
            state.write_u64(u64::from_le_bytes(chunk.try_into().expect("the chunk is exactly 8 bytes")));
        }
    }
}

impl From<u64> for Hash {
    #[inline(always)]
    fn from(word: u64) -> Self {
        Self::from_u64_word(word)
    }
}

impl AsRef<[u8]> for Hash {
    #[inline(always)]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Lowercase hex, the form block hashes take in logs and wire requests.
impl Display for Hash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for Hash {
    type Err = hex::FromHexError;

    fn from_str(hex_str: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; HASH_SIZE];
        hex::decode_to_slice(hex_str, &mut bytes).map(|()| Hash(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::{Hash, Hasher, SummaryHash, HASH_SIZE};
    use std::str::FromStr;

    #[test]
    fn test_hex_roundtrip() {
        // Fixtures come from the summary hasher, the digests this type carries
        // in practice.
        let hash = SummaryHash::hash(b"braid summary fixture");
        let encoded = hash.to_string();
        assert_eq!(encoded.len(), HASH_SIZE * 2);
        assert_eq!(Hash::from_str(&encoded).unwrap(), hash);

        let other = SummaryHash::hash(b"another summary fixture");
        assert_ne!(hash, other);
        assert_ne!(encoded, other.to_string());
        assert_eq!(Hash::from_str(&other.to_string()).unwrap(), other);
    }

    #[test]
    fn test_from_str_rejects_malformed_input() {
        let valid = SummaryHash::hash(b"braid summary fixture").to_string();
        assert!(Hash::from_str(&valid[..valid.len() - 1]).is_err(), "odd length");
        assert!(Hash::from_str(&valid[..valid.len() - 2]).is_err(), "too short");
        let mut corrupted = valid;
        corrupted.replace_range(0..1, "x");
        assert!(Hash::from_str(&corrupted).is_err(), "not a hex digit");
    }

    #[test]
    fn test_word_roundtrip() {
        let words = [u64::MAX, 0, 0x0123_4567_89ab_cdef, 42];
        let hash = Hash::from_le_u64(words);
        assert_eq!(hash.to_le_u64(), words);
        assert_eq!(Hash::from_u64_word(42).to_le_u64(), [0, 0, 0, 42]);
    }
}
