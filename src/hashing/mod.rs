//! Key Hashing Service
//!
//! Every node in the cluster must compute the identical hash for the
//! identical key, otherwise the master and the children would disagree about
//! ownership. The standard library's `DefaultHasher` makes no such stability
//! promise, so the cluster uses the Jenkins one-at-a-time hash: a well-known,
//! fast, non-cryptographic word hash with a fixed definition.

pub mod prime;

/// Hashes a logical key to its 32-bit routing code.
///
/// Jenkins one-at-a-time. Deterministic across calls, processes and builds;
/// collision resistance is not a goal.
pub fn hash_key(key: &str) -> u32 {
    let mut h: u32 = 0;

    for byte in key.bytes() {
        h = h.wrapping_add(u32::from(byte));
        h = h.wrapping_add(h << 10);
        h ^= h >> 6;
    }

    h = h.wrapping_add(h << 3);
    h ^= h >> 11;
    h.wrapping_add(h << 15)
}
