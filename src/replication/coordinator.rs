use std::sync::Arc;

use futures::future::join_all;
use thiserror::Error;

use crate::child::protocol::AddRequest;
use crate::hashing;
use crate::routing::RoutingTable;
use crate::store::StoreError;

use super::transport::{ChildTransport, RpcError};

/// Why a client write was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WriteError {
    #[error("no reachable child to own the key")]
    NoChildren,

    /// Any primary failure, store-side or transport-side, aborts the write
    /// before replicas are contacted.
    #[error("primary write failed: {0}")]
    Primary(#[source] RpcError),
}

/// Why a client read produced no value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReadError {
    #[error("no reachable child to own the key")]
    NoChildren,

    /// A queried node answered and genuinely lacks the key. Distinct from
    /// `Unavailable`, which means nobody answered at all.
    #[error("key {0:?} not found")]
    NotFound(String),

    #[error("no reachable replica holds key {0:?}")]
    Unavailable(String),
}

/// Fans writes out to a key's primary and replicas and picks read targets.
///
/// Owns no state of its own: membership comes from the routing table and all
/// I/O goes through the transport seam.
pub struct ReplicationCoordinator<C> {
    routing: Arc<RoutingTable>,
    transport: C,
}

impl<C: ChildTransport> ReplicationCoordinator<C> {
    pub fn new(routing: Arc<RoutingTable>, transport: C) -> Self {
        Self { routing, transport }
    }

    pub fn transport(&self) -> &C {
        &self.transport
    }

    /// Writes a key to its primary, then best-effort to each replica.
    ///
    /// Replica writes are issued concurrently and their outcomes collected
    /// afterwards; a replica that rejects the key as a duplicate already
    /// holds it and is left alone. Only the primary outcome decides success.
    pub async fn write(&self, key: &str, value: String) -> Result<(), WriteError> {
        let hash = hashing::hash_key(key);
        let (primary, replicas) = self
            .routing
            .resolve_owner(hash)
            .ok_or(WriteError::NoChildren)?;

        let request = AddRequest {
            key: key.to_string(),
            hash,
            value,
        };

        self.transport
            .add(&primary, &request)
            .await
            .map_err(WriteError::Primary)?;
        tracing::debug!("Primary {} accepted key {:?} (hash {})", primary.id, key, hash);

        if replicas.is_empty() {
            return Ok(());
        }

        let outcomes = join_all(
            replicas
                .iter()
                .map(|replica| self.transport.add(replica, &request)),
        )
        .await;

        for (replica, outcome) in replicas.iter().zip(outcomes) {
            match outcome {
                Ok(()) => {
                    tracing::debug!("Replicated key {:?} to {}", key, replica.id);
                }
                Err(RpcError::Store(StoreError::DuplicateKey(_))) => {
                    // Already consistent, typically a re-forwarded write.
                    tracing::debug!("Replica {} already holds key {:?}", replica.id, key);
                }
                Err(e) => {
                    tracing::warn!("Replica {} skipped for key {:?}: {}", replica.id, key, e);
                }
            }
        }

        Ok(())
    }

    /// Reads a key from its primary, falling back through the replica order
    /// when a node is unreachable.
    ///
    /// An answered miss is authoritative: the first node that responds with
    /// "no such key" ends the read as `NotFound` without consulting further
    /// replicas.
    pub async fn read(&self, key: &str) -> Result<String, ReadError> {
        let hash = hashing::hash_key(key);
        let (primary, replicas) = self
            .routing
            .resolve_owner(hash)
            .ok_or(ReadError::NoChildren)?;

        let mut targets = Vec::with_capacity(1 + replicas.len());
        targets.push(primary);
        targets.extend(replicas);

        for target in &targets {
            match self.transport.get(target, key, hash).await {
                Ok(Some(value)) => return Ok(value),
                Ok(None) => return Err(ReadError::NotFound(key.to_string())),
                Err(RpcError::Store(StoreError::NotFound(_))) => {
                    return Err(ReadError::NotFound(key.to_string()))
                }
                Err(RpcError::Store(e)) => {
                    tracing::warn!("Child {} answered read with {}", target.id, e);
                }
                Err(RpcError::Transport(e)) => {
                    tracing::warn!("Child {} unreachable for key {:?}: {}", target.id, key, e);
                }
            }
        }

        Err(ReadError::Unavailable(key.to_string()))
    }
}
