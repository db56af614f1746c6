use thiserror::Error;

/// Failure modes of the local partition store.
///
/// These cross the node boundary unchanged in kind: a child reports them to
/// the master over HTTP and the master surfaces them to the client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store already holds `capacity` entries; the write is refused even
    /// when the target bucket is empty.
    #[error("partition store is at capacity")]
    Overflow,

    /// An entry with the same key already sits in the target bucket.
    #[error("key {0:?} already exists")]
    DuplicateKey(String),

    /// The target bucket is allocated but holds no entry for the key.
    #[error("no entry found for key {0:?}")]
    NotFound(String),
}
