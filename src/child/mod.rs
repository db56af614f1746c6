//! Child Node Module
//!
//! The network surface of one `PartitionStore`. Deliberately thin: the
//! handlers translate between HTTP and the store's exact error taxonomy and
//! add no logic of their own. Routing and replication decisions all live on
//! the master.

pub mod handlers;
pub mod protocol;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::routing::ChildId;
use crate::store::PartitionStore;

use self::protocol::{RegisterRequest, RegisterResponse, ENDPOINT_REGISTER};

/// Builds the child's HTTP router around one shared store.
pub fn router(store: Arc<PartitionStore>) -> Router {
    Router::new()
        .route(protocol::ENDPOINT_ADD, post(handlers::handle_add))
        .route("/get/:key", get(handlers::handle_get))
        .route(protocol::ENDPOINT_ENTRIES, get(handlers::handle_entries))
        .route(protocol::ENDPOINT_PING, get(handlers::handle_ping))
        .layer(Extension(store))
}

/// Announces this child to the master and returns the assigned id.
pub async fn register_with_master(master: SocketAddr, own_addr: SocketAddr) -> Result<ChildId> {
    let client = reqwest::Client::new();
    let url = format!("http://{}{}", master, ENDPOINT_REGISTER);

    let response = client
        .post(url)
        .json(&RegisterRequest { addr: own_addr })
        .timeout(std::time::Duration::from_secs(5))
        .send()
        .await?;

    if !response.status().is_success() {
        anyhow::bail!("Registration rejected by master: {}", response.status());
    }

    let registered: RegisterResponse = response.json().await?;
    tracing::info!("Registered with master {} as {}", master, registered.id);

    Ok(registered.id)
}
