use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use crate::child::protocol::{EntriesResponse, RegisterRequest, RegisterResponse};
use crate::replication::{ChildTransport, ReadError, RpcError, WriteError};
use crate::routing::{ChildId, ChildInfo};
use crate::store::StoreError;

use super::protocol::{FetchResponse, PutRequest, PutResponse};
use super::service::MasterService;

pub async fn handle_put<C: ChildTransport + 'static>(
    Extension(master): Extension<Arc<MasterService<C>>>,
    Json(req): Json<PutRequest>,
) -> (StatusCode, Json<PutResponse>) {
    // Malformed values are refused at the serialization boundary, before any
    // child is contacted.
    if let Err(e) = serde_json::from_str::<serde_json::Value>(&req.value_json) {
        tracing::error!("Rejected malformed value for key {:?}: {}", req.key, e);
        return (StatusCode::BAD_REQUEST, Json(PutResponse { ok: false }));
    }

    match master.put(&req.key, req.value_json).await {
        Ok(()) => (StatusCode::OK, Json(PutResponse { ok: true })),
        Err(WriteError::NoChildren) => {
            tracing::warn!("Put rejected, no reachable children");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(PutResponse { ok: false }),
            )
        }
        Err(WriteError::Primary(RpcError::Store(StoreError::DuplicateKey(_)))) => {
            (StatusCode::CONFLICT, Json(PutResponse { ok: false }))
        }
        Err(WriteError::Primary(RpcError::Store(StoreError::Overflow))) => (
            StatusCode::INSUFFICIENT_STORAGE,
            Json(PutResponse { ok: false }),
        ),
        Err(WriteError::Primary(e)) => {
            tracing::error!("Put failed at primary: {}", e);
            (StatusCode::BAD_GATEWAY, Json(PutResponse { ok: false }))
        }
    }
}

pub async fn handle_fetch<C: ChildTransport + 'static>(
    Extension(master): Extension<Arc<MasterService<C>>>,
    Path(key): Path<String>,
) -> (StatusCode, Json<FetchResponse>) {
    match master.fetch(&key).await {
        Ok(value_json) => (
            StatusCode::OK,
            Json(FetchResponse {
                value_json: Some(value_json),
            }),
        ),
        Err(ReadError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, Json(FetchResponse { value_json: None }))
        }
        Err(ReadError::NoChildren) => {
            tracing::warn!("Fetch rejected, no reachable children");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(FetchResponse { value_json: None }),
            )
        }
        Err(e @ ReadError::Unavailable(_)) => {
            tracing::error!("Fetch failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(FetchResponse { value_json: None }),
            )
        }
    }
}

pub async fn handle_register<C: ChildTransport + 'static>(
    Extension(master): Extension<Arc<MasterService<C>>>,
    Json(req): Json<RegisterRequest>,
) -> (StatusCode, Json<RegisterResponse>) {
    let id = master.register_child(req.addr);
    (StatusCode::OK, Json(RegisterResponse { id }))
}

pub async fn handle_children<C: ChildTransport + 'static>(
    Extension(master): Extension<Arc<MasterService<C>>>,
) -> Json<Vec<ChildInfo>> {
    Json(master.children())
}

pub async fn handle_child_entries<C: ChildTransport + 'static>(
    Extension(master): Extension<Arc<MasterService<C>>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<EntriesResponse>) {
    let Some(child) = master.child(&ChildId(id)) else {
        return (
            StatusCode::NOT_FOUND,
            Json(EntriesResponse { buckets: Vec::new() }),
        );
    };

    match master.child_entries(&child).await {
        Ok(buckets) => (StatusCode::OK, Json(EntriesResponse { buckets })),
        Err(e) => {
            tracing::error!("Entry dump from child {} failed: {}", child.id, e);
            (
                StatusCode::BAD_GATEWAY,
                Json(EntriesResponse { buckets: Vec::new() }),
            )
        }
    }
}
