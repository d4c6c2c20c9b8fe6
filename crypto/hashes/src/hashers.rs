pub trait HasherBase {
    fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self;
}

pub trait Hasher: HasherBase + Clone + Default {
    fn finalize(self) -> crate::Hash;
    fn reset(&mut self);
    #[inline(always)]
    fn hash<A: AsRef<[u8]>>(data: A) -> crate::Hash {
        let mut hasher = Self::default();
        hasher.update(data);
        hasher.finalize()
    }
}

blake2b_hasher! {
    struct SummaryHash => b"BlockSummaryHash",
    struct PeerMessageHash => b"PeerMessageHash",
}

macro_rules! blake2b_hasher {
    ($(struct $name:ident => $domain_sep:literal),+ $(,)? ) => {$(
        #[derive(Clone)]
        pub struct $name(blake2b_simd::State);

        impl $name {
            #[inline(always)]
            pub fn new() -> Self {
                Self(
                    blake2b_simd::Params::new()
                        .hash_length(32)
                        .key($domain_sep)
                        .to_state(),
                )
            }

            pub fn write<A: AsRef<[u8]>>(&mut self, data: A) {
                self.0.update(data.as_ref());
            }

            #[inline(always)]
            pub fn finalize(self) -> crate::Hash {
                let mut out = [0u8; 32];
                out.copy_from_slice(self.0.finalize().as_bytes());
                crate::Hash(out)
            }
        }
    impl_hasher! { struct $name }
    )*};
}

macro_rules! impl_hasher {
    (struct $name:ident) => {
        impl HasherBase for $name {
            #[inline(always)]
            fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self {
                self.write(data);
                self
            }
        }
        impl Hasher for $name {
            #[inline(always)]
            fn finalize(self) -> crate::Hash {
                // Call the method
                $name::finalize(self)
            }
            #[inline(always)]
            fn reset(&mut self) {
                *self = Self::new();
            }
        }
        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

use {blake2b_hasher, impl_hasher};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incremental_hashing() {
        let mut incremental = SummaryHash::new();
        incremental.update(b"block").update(b"summary");
        assert_eq!(incremental.finalize(), SummaryHash::hash(b"blocksummary"));
    }

    #[test]
    fn test_domain_separation() {
        assert_ne!(SummaryHash::hash(b"payload"), PeerMessageHash::hash(b"payload"));
    }

    #[test]
    fn test_reset() {
        let mut hasher = SummaryHash::new();
        hasher.update(b"stale input");
        hasher.reset();
        assert_eq!(hasher.finalize(), SummaryHash::new().finalize());
    }
}
