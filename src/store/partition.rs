use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;

use crate::hashing::prime;

use super::error::StoreError;

/// One stored record. Immutable once inserted; there is no in-place update,
/// an overwrite attempt is rejected as a duplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub hash: u32,
    pub key: String,
    pub value: String,
}

type Bucket = RwLock<Vec<Entry>>;

/// A fixed-capacity, concurrently accessible bucketed store.
///
/// The bucket array is sized to `next_prime(target_capacity)` and never
/// resized. Each slot starts unallocated; the first writer installs the chain
/// through the slot's `OnceLock`, so two racing first-writers cannot create
/// two chains. All chain mutation happens under that bucket's own lock, and
/// readers take only the read half, so a reader never observes a torn entry.
pub struct PartitionStore {
    buckets: Box<[OnceLock<Bucket>]>,
    capacity: usize,
    count: AtomicUsize,
}

impl PartitionStore {
    pub fn new(target_capacity: usize) -> Self {
        let capacity = prime::next_prime(target_capacity);
        let buckets = (0..capacity)
            .map(|_| OnceLock::new())
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            buckets,
            capacity,
            count: AtomicUsize::new(0),
        }
    }

    /// Actual bucket count, the smallest prime >= the configured target.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total entries across all buckets. Relaxed; see [`PartitionStore::add`].
    pub fn len(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bucket_index(&self, hash: u32) -> usize {
        hash as usize % self.capacity
    }

    /// Inserts a new entry.
    ///
    /// The overflow check reads the shared counter without a store-wide lock,
    /// so under heavy cross-bucket concurrency a few inserts past capacity
    /// can race through. The ceiling is best-effort, not a hard bound.
    ///
    /// The duplicate check covers only the target bucket's chain: an equal
    /// key that hashed into a different bucket is not detected. That scoping
    /// is part of the observable contract and is kept as-is.
    pub fn add(&self, key: &str, hash: u32, value: String) -> Result<(), StoreError> {
        if self.count.load(Ordering::Relaxed) >= self.capacity {
            return Err(StoreError::Overflow);
        }

        let bucket = self.buckets[self.bucket_index(hash)].get_or_init(|| RwLock::new(Vec::new()));

        let mut chain = bucket.write();
        if chain.iter().any(|entry| entry.key == key) {
            return Err(StoreError::DuplicateKey(key.to_string()));
        }
        chain.push(Entry {
            hash,
            key: key.to_string(),
            value,
        });
        self.count.fetch_add(1, Ordering::Relaxed);

        Ok(())
    }

    /// Looks up a key in its bucket.
    ///
    /// `Ok(None)` means the bucket was never allocated; a miss in an
    /// allocated bucket is `NotFound`. Callers that care only about absence
    /// treat both the same, but the outcomes stay distinguishable.
    pub fn get(&self, key: &str, hash: u32) -> Result<Option<String>, StoreError> {
        let Some(bucket) = self.buckets[self.bucket_index(hash)].get() else {
            return Ok(None);
        };

        let chain = bucket.read();
        chain
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| Some(entry.value.clone()))
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }

    /// Snapshot of all non-empty buckets for inspection/resync.
    ///
    /// Each bucket is reported under the canonical index of its current
    /// occupants, derived from the first entry's hash code mod capacity.
    pub fn entries(&self) -> Vec<(u32, Vec<Entry>)> {
        self.buckets
            .iter()
            .filter_map(|slot| {
                let chain = slot.get()?.read();
                let first = chain.first()?;
                Some((first.hash % self.capacity as u32, chain.clone()))
            })
            .collect()
    }
}
