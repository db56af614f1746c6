use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use crate::store::{PartitionStore, StoreError};

use super::protocol::{
    AddRequest, AddResponse, BucketDump, EntriesResponse, EntryDump, GetParams, GetResponse,
};

pub async fn handle_add(
    Extension(store): Extension<Arc<PartitionStore>>,
    Json(req): Json<AddRequest>,
) -> (StatusCode, Json<AddResponse>) {
    match store.add(&req.key, req.hash, req.value) {
        Ok(()) => (StatusCode::OK, Json(AddResponse { ok: true })),
        Err(StoreError::DuplicateKey(key)) => {
            tracing::debug!("Rejected duplicate key {:?}", key);
            (StatusCode::CONFLICT, Json(AddResponse { ok: false }))
        }
        Err(StoreError::Overflow) => {
            tracing::warn!("Store at capacity, rejected key {:?}", req.key);
            (
                StatusCode::INSUFFICIENT_STORAGE,
                Json(AddResponse { ok: false }),
            )
        }
        Err(e) => {
            tracing::error!("Unexpected store error on add: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AddResponse { ok: false }),
            )
        }
    }
}

pub async fn handle_get(
    Extension(store): Extension<Arc<PartitionStore>>,
    Path(key): Path<String>,
    Query(params): Query<GetParams>,
) -> (StatusCode, Json<GetResponse>) {
    match store.get(&key, params.hash) {
        Ok(value) => (StatusCode::OK, Json(GetResponse { value })),
        Err(StoreError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, Json(GetResponse { value: None }))
        }
        Err(e) => {
            tracing::error!("Unexpected store error on get: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(GetResponse { value: None }),
            )
        }
    }
}

pub async fn handle_entries(
    Extension(store): Extension<Arc<PartitionStore>>,
) -> (StatusCode, Json<EntriesResponse>) {
    let buckets = store
        .entries()
        .into_iter()
        .map(|(bucket, entries)| BucketDump {
            bucket,
            entries: entries
                .into_iter()
                .map(|entry| EntryDump {
                    key: entry.key,
                    hash: entry.hash,
                    value: entry.value,
                })
                .collect(),
        })
        .collect();

    (StatusCode::OK, Json(EntriesResponse { buckets }))
}

pub async fn handle_ping() -> StatusCode {
    StatusCode::OK
}
