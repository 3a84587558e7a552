//! Key-to-slot hashing.
//!
//! Every backend maps a product id to a home index with plain modular
//! hashing:
//!
//! ```text
//! index(key, capacity) = key mod capacity
//! ```
//!
//! The remainder is Euclidean, so negative ids still land in `[0, capacity)`:
//! `-1` maps to `capacity - 1`, `-capacity` maps to `0`.

/// Map `key` to an index in `[0, capacity)`.
///
/// # Panics
///
/// Panics if `capacity` is zero.
pub fn slot_index(key: i64, capacity: usize) -> usize {
    assert!(capacity > 0, "Capacity should be positive");
    // `i128` keeps `i64::MIN` and capacities above `i64::MAX` well-defined.
    (key as i128).rem_euclid(capacity as i128) as usize
}

/// Hashing policy used by the table backends.
pub trait HashPolicy {
    /// Home index of `key` in a table of the given capacity.
    fn index(&self, key: i64, capacity: usize) -> usize;
}

/// The default `key mod capacity` policy.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct ModuloHash;

impl HashPolicy for ModuloHash {
    fn index(&self, key: i64, capacity: usize) -> usize {
        slot_index(key, capacity)
    }
}
