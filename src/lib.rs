//! Distributed In-Memory Key-Value Store
//!
//! This library crate defines the core modules of a master/child key-value
//! cluster. It serves as the foundation for the binary executable
//! (`main.rs`), which runs either as the coordinating master or as one
//! storage child.
//!
//! ## Architecture Modules
//! The system is composed of six loosely coupled subsystems:
//!
//! - **`hashing`**: Leaf services. A deterministic Jenkins word hash shared by
//!   every node (required for cluster-wide routing consistency) and the prime
//!   capacity sizing used when a partition store is built.
//! - **`store`**: The per-child storage engine. A fixed-capacity bucket array
//!   with install-once slots, per-bucket locking and an advisory overflow
//!   ceiling.
//! - **`routing`**: The master's view of the cluster. Child registration
//!   records plus the deterministic hash-to-owner assignment over a
//!   copy-on-write membership snapshot.
//! - **`replication`**: The write fan-out and read fallback logic. Primary
//!   first, then best-effort concurrent replica writes; reads fall back to
//!   replicas when the primary is unreachable.
//! - **`child`**: The thin HTTP surface exposing one `PartitionStore` to the
//!   master. No business logic lives here.
//! - **`master`**: The client-facing facade delegating to routing and
//!   replication, plus the background health checker.

pub mod child;
pub mod config;
pub mod hashing;
pub mod master;
pub mod replication;
pub mod routing;
pub mod store;
