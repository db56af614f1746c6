use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChildId(pub String);

impl ChildId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for ChildId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ChildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Liveness as last observed by the master's health checks.
///
/// A suspected child is excluded from routing but never removed
/// automatically; it returns to rotation as soon as a probe succeeds again.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChildStatus {
    Reachable,
    SuspectedDown,
}

/// One child's registration record on the master.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildInfo {
    pub id: ChildId,
    pub addr: SocketAddr,
    pub status: ChildStatus,
}

impl ChildInfo {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            id: ChildId::new(),
            addr,
            status: ChildStatus::Reachable,
        }
    }
}
