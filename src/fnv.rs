//! 64-bit FNV-1a, for turning arbitrary bytes into table keys.
//!
//! The table itself treats keys as opaque integers and buckets them with
//! `key % bucket_count`, so callers should spread their data through a hash
//! like this one before inserting.

use core::hash::{BuildHasherDefault, Hash, Hasher};

pub const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
pub const PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over `bytes`: XOR each octet in, then multiply by the prime.
#[inline]
pub fn hash_bytes(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(OFFSET_BASIS, |h, &b| (h ^ u64::from(b)).wrapping_mul(PRIME))
}

/// Streaming FNV-1a as a `Hasher`, so any `T: Hash` can produce a key.
#[derive(Clone, Copy, Debug)]
pub struct FnvHasher(u64);

impl Default for FnvHasher {
    fn default() -> Self {
        FnvHasher(OFFSET_BASIS)
    }
}

impl Hasher for FnvHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.0 = bytes
            .iter()
            .fold(self.0, |h, &b| (h ^ u64::from(b)).wrapping_mul(PRIME));
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }
}

pub type FnvBuildHasher = BuildHasherDefault<FnvHasher>;

/// Key for any hashable value. Note that `Hash` for `str` appends a
/// terminator byte, so this differs from `hash_bytes(s.as_bytes())`.
pub fn hash_one<T: ?Sized + Hash>(value: &T) -> u64 {
    let mut h = FnvHasher::default();
    value.hash(&mut h);
    h.finish()
}
