//! Storage Engine Tests
//!
//! Validates the bucketed store's contract: capacity sizing, the duplicate
//! and overflow refusals, the allocated-vs-absent bucket distinction, and
//! behavior under concurrent writers.
//!
//! *Note: the overflow ceiling is best-effort under cross-bucket concurrency
//! (the counter is read outside any bucket lock), so the overflow tests drive
//! the store single-threaded where an exact bound is asserted.*

#[cfg(test)]
mod tests {
    use crate::hashing;
    use crate::store::{PartitionStore, StoreError};

    #[test]
    fn test_capacity_is_next_prime_of_target() {
        let store = PartitionStore::new(25000);
        assert_eq!(store.capacity(), hashing::prime::next_prime(25000));

        // A prime target is kept as-is.
        let store = PartitionStore::new(25229);
        assert_eq!(store.capacity(), 25229);
    }

    #[test]
    fn test_add_and_get_roundtrip() {
        let store = PartitionStore::new(100);
        let hash = hashing::hash_key("book-001");

        store.add("book-001", hash, "\"Rust Programming\"".to_string()).unwrap();

        let value = store.get("book-001", hash).unwrap();
        assert_eq!(value.as_deref(), Some("\"Rust Programming\""));
    }

    #[test]
    fn test_get_from_unallocated_bucket_is_empty() {
        let store = PartitionStore::new(100);

        // No insert ever touched this bucket: an empty result, not an error.
        let result = store.get("ghost", hashing::hash_key("ghost"));
        assert_eq!(result, Ok(None));
    }

    #[test]
    fn test_get_miss_in_allocated_bucket_is_not_found() {
        let store = PartitionStore::new(100);
        let capacity = store.capacity() as u32;

        // Force both keys into the same bucket, then miss on the second.
        store.add("present", 7, "1".to_string()).unwrap();
        let result = store.get("absent", 7 + capacity);

        assert_eq!(result, Err(StoreError::NotFound("absent".to_string())));
    }

    #[test]
    fn test_duplicate_key_is_rejected_and_first_value_kept() {
        let store = PartitionStore::new(100);
        let hash = hashing::hash_key("book-001");

        store.add("book-001", hash, "original".to_string()).unwrap();
        let result = store.add("book-001", hash, "updated".to_string());

        assert_eq!(result, Err(StoreError::DuplicateKey("book-001".to_string())));
        assert_eq!(store.get("book-001", hash).unwrap().as_deref(), Some("original"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_overflow_refused_even_into_empty_bucket() {
        let store = PartitionStore::new(5);
        assert_eq!(store.capacity(), 5);

        // Fill to capacity, all chained into bucket 0.
        for i in 0..5u32 {
            store.add(&format!("key_{}", i), 0, i.to_string()).unwrap();
        }

        // Bucket 1 is still unallocated, but the store is full.
        let result = store.add("one_more", 1, "x".to_string());
        assert_eq!(result, Err(StoreError::Overflow));
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_keys_congruent_mod_capacity_coexist() {
        let store = PartitionStore::new(100);
        let capacity = store.capacity() as u32;

        // Different hash codes, same bucket index.
        store.add("6357089", 6357089 % capacity, "6357089".to_string()).unwrap();
        store.add("a", 6357089 % capacity + capacity, "\"a\"".to_string()).unwrap();

        assert_eq!(
            store.get("6357089", 6357089 % capacity).unwrap().as_deref(),
            Some("6357089")
        );
        assert_eq!(
            store.get("a", 6357089 % capacity + capacity).unwrap().as_deref(),
            Some("\"a\"")
        );
    }

    #[test]
    fn test_same_hash_different_keys_coexist() {
        let store = PartitionStore::new(100);

        store.add("left", 42, "1".to_string()).unwrap();
        store.add("right", 42, "2".to_string()).unwrap();

        assert_eq!(store.get("left", 42).unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("right", 42).unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_entries_reports_buckets_by_canonical_index() {
        let store = PartitionStore::new(10);
        let capacity = store.capacity() as u32;

        store.add("a", 3, "1".to_string()).unwrap();
        store.add("b", 3 + capacity, "2".to_string()).unwrap();
        store.add("c", 4, "3".to_string()).unwrap();

        let mut dump = store.entries();
        dump.sort_by_key(|(bucket, _)| *bucket);

        assert_eq!(dump.len(), 2);
        assert_eq!(dump[0].0, 3);
        assert_eq!(dump[0].1.len(), 2);
        assert_eq!(dump[1].0, 4);
        assert_eq!(dump[1].1.len(), 1);
    }

    #[test]
    fn test_concurrent_disjoint_writers_lose_nothing() {
        let store = std::sync::Arc::new(PartitionStore::new(25229));

        let first = {
            let store = store.clone();
            std::thread::spawn(move || {
                for i in 0..10000u32 {
                    let key = i.to_string();
                    store.add(&key, hashing::hash_key(&key), key.clone()).unwrap();
                }
            })
        };

        let second = {
            let store = store.clone();
            std::thread::spawn(move || {
                for i in 10001..20000u32 {
                    let key = i.to_string();
                    store.add(&key, hashing::hash_key(&key), key.clone()).unwrap();
                }
            })
        };

        first.join().unwrap();
        second.join().unwrap();

        assert_eq!(store.len(), 19999);
        for i in (0..10000u32).chain(10001..20000) {
            let key = i.to_string();
            let value = store.get(&key, hashing::hash_key(&key)).unwrap();
            assert_eq!(value.as_deref(), Some(key.as_str()), "lost key {}", key);
        }
    }
}
