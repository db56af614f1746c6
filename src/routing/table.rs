use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;

use super::types::{ChildId, ChildInfo, ChildStatus};

/// Maps a key's hash code to the child owning it, plus its replica set.
///
/// Membership lives in two places with distinct roles: the `members` map is
/// the registry of every child the master has ever been told about (any
/// status), while `snapshot` is the immutable, sorted list of currently
/// reachable children that every routing call reads. The snapshot is rebuilt
/// and swapped whole on each membership change, so routing reads never lock
/// the registry and never observe a half-applied change.
pub struct RoutingTable {
    members: DashMap<ChildId, ChildInfo>,
    snapshot: RwLock<Arc<Vec<ChildInfo>>>,
    replica_count: usize,
}

impl RoutingTable {
    /// `replica_count` is the number of redundant copies requested per key;
    /// the effective count is capped by the live child count minus one.
    pub fn new(replica_count: usize) -> Self {
        Self {
            members: DashMap::new(),
            snapshot: RwLock::new(Arc::new(Vec::new())),
            replica_count,
        }
    }

    pub fn register(&self, child: ChildInfo) {
        tracing::info!("Registering child {} at {}", child.id, child.addr);
        self.members.insert(child.id.clone(), child);
        self.rebuild_snapshot();
    }

    pub fn deregister(&self, id: &ChildId) {
        if self.members.remove(id).is_some() {
            tracing::info!("Deregistered child {}", id);
            self.rebuild_snapshot();
        }
    }

    /// Records a health-check result. Rebuilds the routing snapshot only on
    /// an actual transition.
    pub fn set_status(&self, id: &ChildId, status: ChildStatus) {
        let changed = match self.members.get_mut(id) {
            Some(mut member) => {
                let changed = member.status != status;
                member.status = status;
                changed
            }
            None => false,
        };

        if changed {
            tracing::warn!("Child {} is now {:?}", id, status);
            self.rebuild_snapshot();
        }
    }

    /// Every registered child, reachable or not.
    pub fn members(&self) -> Vec<ChildInfo> {
        self.members.iter().map(|entry| entry.value().clone()).collect()
    }

    /// The current reachable set in routing order.
    pub fn live_children(&self) -> Arc<Vec<ChildInfo>> {
        self.snapshot.read().clone()
    }

    /// Resolves the primary owner and ordered replica set for a hash code.
    ///
    /// Primary index is `hash mod live_count` over the reachable children in
    /// fixed id order; replicas are the next N children cyclically. Returns
    /// `None` when no child is reachable.
    pub fn resolve_owner(&self, hash: u32) -> Option<(ChildInfo, Vec<ChildInfo>)> {
        let live = self.live_children();
        if live.is_empty() {
            return None;
        }

        let primary_idx = hash as usize % live.len();
        let replica_count = self.replica_count.min(live.len() - 1);
        let replicas = (1..=replica_count)
            .map(|offset| live[(primary_idx + offset) % live.len()].clone())
            .collect();

        Some((live[primary_idx].clone(), replicas))
    }

    fn rebuild_snapshot(&self) {
        let mut live: Vec<ChildInfo> = self
            .members
            .iter()
            .filter(|entry| entry.value().status == ChildStatus::Reachable)
            .map(|entry| entry.value().clone())
            .collect();
        live.sort_by(|a, b| a.id.cmp(&b.id));

        *self.snapshot.write() = Arc::new(live);
    }
}
