//! Master Module
//!
//! The client-facing facade of the cluster. Receives `put`/`fetch` requests,
//! resolves ownership through the routing table, and delegates the actual
//! work to the replication coordinator. Also owns the child registry
//! endpoints and the background health checker that keeps liveness statuses
//! current.

pub mod handlers;
pub mod protocol;
pub mod service;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};

use crate::child::protocol::ENDPOINT_REGISTER;
use crate::replication::ChildTransport;

use self::service::MasterService;

/// Builds the master's HTTP router.
pub fn router<C: ChildTransport + 'static>(master: Arc<MasterService<C>>) -> Router {
    Router::new()
        .route(protocol::ENDPOINT_PUT, post(handlers::handle_put::<C>))
        .route("/fetch/:key", get(handlers::handle_fetch::<C>))
        .route(ENDPOINT_REGISTER, post(handlers::handle_register::<C>))
        .route(
            protocol::ENDPOINT_CHILDREN,
            get(handlers::handle_children::<C>),
        )
        .route(
            "/children/:id/entries",
            get(handlers::handle_child_entries::<C>),
        )
        .layer(Extension(master))
}
