//! Replication Module
//!
//! Coordinates every client write and read across the cluster.
//!
//! ## Core Concepts
//! - **Primary first**: a write must land on the key's primary before any
//!   replica is contacted; a primary failure aborts the whole operation.
//! - **Best-effort replicas**: replica writes fan out concurrently and a
//!   replica failure is logged, never surfaced. A replica that already holds
//!   the key counts as consistent.
//! - **Read fallback**: reads go to the primary and fall back through the
//!   replica order only on transport failures. Genuine absence is never
//!   conflated with unreachability.
//! - **Transport seam**: all network access goes through the
//!   [`ChildTransport`] trait, so the coordination logic is testable against
//!   in-memory children.

pub mod coordinator;
pub mod transport;


pub use coordinator::{ReadError, ReplicationCoordinator, WriteError};
pub use transport::{ChildTransport, HttpChildClient, RpcError};
