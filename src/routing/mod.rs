//! Routing Module
//!
//! The master's view of the cluster and the deterministic assignment of keys
//! to children.
//!
//! ## Core Concepts
//! - **Registration**: children announce themselves once; the master keeps a
//!   registration record per child and mutates only its liveness status.
//! - **Snapshot routing**: every routing decision reads an immutable,
//!   atomically replaced snapshot of the reachable children, so a concurrent
//!   membership change can never expose a partially-updated list.
//! - **Determinism**: for a fixed membership the same hash always resolves to
//!   the same primary and the same replica ordering.

pub mod table;
pub mod types;

#[cfg(test)]
mod tests;

pub use table::RoutingTable;
pub use types::{ChildId, ChildInfo, ChildStatus};
