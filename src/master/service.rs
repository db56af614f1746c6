use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::child::protocol::BucketDump;
use crate::replication::{
    ChildTransport, ReadError, ReplicationCoordinator, RpcError, WriteError,
};
use crate::routing::{ChildId, ChildInfo, ChildStatus, RoutingTable};

/// How often the master probes every registered child.
pub const HEALTH_CHECK_INTERVAL: Duration = Duration::from_secs(2);

/// Top-level facade over routing and replication.
pub struct MasterService<C> {
    routing: Arc<RoutingTable>,
    coordinator: ReplicationCoordinator<C>,
}

impl<C: ChildTransport> MasterService<C> {
    pub fn new(routing: Arc<RoutingTable>, transport: C) -> Self {
        let coordinator = ReplicationCoordinator::new(routing.clone(), transport);
        Self {
            routing,
            coordinator,
        }
    }

    pub async fn put(&self, key: &str, value_json: String) -> Result<(), WriteError> {
        self.coordinator.write(key, value_json).await
    }

    pub async fn fetch(&self, key: &str) -> Result<String, ReadError> {
        self.coordinator.read(key).await
    }

    /// Creates a registration record for a newly announced child.
    pub fn register_child(&self, addr: SocketAddr) -> ChildId {
        let child = ChildInfo::new(addr);
        let id = child.id.clone();
        self.routing.register(child);
        id
    }

    pub fn children(&self) -> Vec<ChildInfo> {
        self.routing.members()
    }

    pub fn child(&self, id: &ChildId) -> Option<ChildInfo> {
        self.routing.members().into_iter().find(|c| &c.id == id)
    }

    /// Pulls one child's bucket dump for inspection/resync.
    pub async fn child_entries(&self, child: &ChildInfo) -> Result<Vec<BucketDump>, RpcError> {
        self.coordinator.transport().list_entries(child).await
    }

    /// Probes every registered child forever, flipping liveness statuses as
    /// results come in. A failed probe only suspends a child from routing;
    /// nothing is ever deregistered automatically.
    pub async fn run_health_loop(self: Arc<Self>) {
        let mut interval = tokio::time::interval(HEALTH_CHECK_INTERVAL);

        loop {
            interval.tick().await;

            for member in self.routing.members() {
                match self.coordinator.transport().ping(&member).await {
                    Ok(()) => {
                        if member.status == ChildStatus::SuspectedDown {
                            tracing::info!("Child {} answered again", member.id);
                        }
                        self.routing.set_status(&member.id, ChildStatus::Reachable);
                    }
                    Err(e) => {
                        tracing::warn!("Health check failed for child {}: {}", member.id, e);
                        self.routing
                            .set_status(&member.id, ChildStatus::SuspectedDown);
                    }
                }
            }
        }
    }
}
