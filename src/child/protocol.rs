//! Node-to-Node Storage Protocol
//!
//! Defines the endpoints and Data Transfer Objects (DTOs) the master uses to
//! drive a child's partition store, plus the registration exchange.
//!
//! Values travel as opaque serialized JSON strings; the store never inspects
//! them. Store error kinds map onto HTTP statuses so they cross the boundary
//! unchanged: duplicate key -> 409, overflow -> 507, not found -> 404.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::routing::ChildId;

// --- API Endpoints ---

/// Insert one entry into the child's partition store.
pub const ENDPOINT_ADD: &str = "/add";
/// Key lookup; the master supplies the key's hash as a query parameter.
pub const ENDPOINT_GET: &str = "/get";
/// Bulk bucket dump for inspection/resync.
pub const ENDPOINT_ENTRIES: &str = "/entries";
/// Liveness probe used by the master's health loop.
pub const ENDPOINT_PING: &str = "/ping";
/// Master-side endpoint a child announces itself to at startup.
pub const ENDPOINT_REGISTER: &str = "/register";

// --- Data Transfer Objects ---

/// Write payload. The hash is computed master-side so every node in the
/// cluster routes and buckets the key identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddRequest {
    pub key: String,
    pub hash: u32,
    pub value: String,
}

/// Acknowledgment for write operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct AddResponse {
    pub ok: bool,
}

/// Query half of a lookup; paired with the key path segment.
#[derive(Debug, Deserialize)]
pub struct GetParams {
    pub hash: u32,
}

/// Lookup result. `value: None` with a 200 status means the key's bucket was
/// never allocated; a genuine miss in an allocated bucket is a 404 instead.
#[derive(Debug, Serialize, Deserialize)]
pub struct GetResponse {
    pub value: Option<String>,
}

/// One stored record as reported by a bucket dump.
#[derive(Debug, Serialize, Deserialize)]
pub struct EntryDump {
    pub key: String,
    pub hash: u32,
    pub value: String,
}

/// One non-empty bucket, keyed by the canonical index of its occupants.
#[derive(Debug, Serialize, Deserialize)]
pub struct BucketDump {
    pub bucket: u32,
    pub entries: Vec<EntryDump>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EntriesResponse {
    pub buckets: Vec<BucketDump>,
}

/// Sent by a child to the master at startup.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub addr: SocketAddr,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: ChildId,
}
