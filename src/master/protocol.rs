//! Client-Facing Protocol
//!
//! DTOs for the master's public API. Values are opaque serialized JSON
//! strings end to end; the cluster stores and returns them untouched.

use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Public endpoint for client write requests.
pub const ENDPOINT_PUT: &str = "/put";
/// Public endpoint for client read requests (`/fetch/:key`).
pub const ENDPOINT_FETCH: &str = "/fetch";
/// Lists every registered child and its liveness status.
pub const ENDPOINT_CHILDREN: &str = "/children";

// --- Data Transfer Objects ---

#[derive(Debug, Serialize, Deserialize)]
pub struct PutRequest {
    pub key: String,
    /// The serialized JSON string of the value.
    pub value_json: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PutResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FetchResponse {
    /// The value, if found. `None` indicates the key does not exist.
    pub value_json: Option<String>,
}
