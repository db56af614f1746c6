//! Partition Storage Engine
//!
//! One child node's local shard: a fixed-capacity bucket array of
//! hash-chained entries with per-bucket locking.
//!
//! ## Core Concepts
//! - **Sizing**: capacity is the smallest prime >= the configured target.
//! - **Lazy buckets**: a bucket slot is allocated on its first insert, exactly
//!   once, and then only grows.
//! - **Locking**: writers hold only the target bucket's lock; writers to
//!   different buckets never contend. The global entry counter is advisory.

pub mod error;
pub mod partition;

#[cfg(test)]
mod tests;

pub use error::StoreError;
pub use partition::{Entry, PartitionStore};
