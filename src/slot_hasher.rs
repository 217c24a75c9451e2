//! Maps string keys onto slot indices for [`HashTable`](crate::HashTable). The
//! table only ever stores the slot, never the key, so whatever lives here
//! decides which keys collide.

/// Turns a key into a slot index. The table reduces whatever comes back modulo
/// its capacity, so an implementation may return any `usize`.
pub trait SlotHasher {
    /// `capacity` is never zero.
    fn slot(&self, key: &str, capacity: usize) -> usize;
}

/// Sums every character code of the key times a multiplier, then reduces the
/// sum modulo the capacity. Character codes are UTF-16 code units, so a
/// character outside the basic plane counts as its two surrogates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdditiveHasher {
    multiplier: u64,
}

impl AdditiveHasher {
    pub const DEFAULT_MULTIPLIER: u64 = 3;

    pub fn with_multiplier(multiplier: u64) -> Self {
        Self { multiplier }
    }

    /// The unreduced sum for a key.
    pub fn sum(&self, key: &str) -> u64 {
        key.encode_utf16().fold(0u64, |sum, unit| {
            sum.wrapping_add(u64::from(unit).wrapping_mul(self.multiplier))
        })
    }
}

impl Default for AdditiveHasher {
    fn default() -> Self {
        Self::with_multiplier(Self::DEFAULT_MULTIPLIER)
    }
}

impl SlotHasher for AdditiveHasher {
    fn slot(&self, key: &str, capacity: usize) -> usize {
        (self.sum(key) % capacity as u64) as usize
    }
}
