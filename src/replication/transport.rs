use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::child::protocol::{
    AddRequest, AddResponse, BucketDump, EntriesResponse, GetResponse, ENDPOINT_ADD,
    ENDPOINT_ENTRIES, ENDPOINT_GET, ENDPOINT_PING,
};
use crate::routing::ChildInfo;
use crate::store::StoreError;

/// Outcome of one RPC to a child.
///
/// `Store` carries the child's own error taxonomy across the wire unchanged;
/// `Transport` covers everything that prevented an answer (timeout, refused
/// connection, unexpected status). The two are never merged: a transport
/// failure triggers replica fallback, a store error is authoritative.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RpcError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("transport failure: {0}")]
    Transport(String),
}

/// The master's view of a single child's operations.
///
/// One implementation speaks HTTP ([`HttpChildClient`]); tests drive the
/// coordinator against in-memory children instead.
pub trait ChildTransport: Send + Sync {
    fn add(
        &self,
        child: &ChildInfo,
        req: &AddRequest,
    ) -> impl Future<Output = Result<(), RpcError>> + Send;

    fn get(
        &self,
        child: &ChildInfo,
        key: &str,
        hash: u32,
    ) -> impl Future<Output = Result<Option<String>, RpcError>> + Send;

    fn list_entries(
        &self,
        child: &ChildInfo,
    ) -> impl Future<Output = Result<Vec<BucketDump>, RpcError>> + Send;

    fn ping(&self, child: &ChildInfo) -> impl Future<Output = Result<(), RpcError>> + Send;
}

/// HTTP transport to a child node.
///
/// Every call carries the configured per-request timeout and is attempted
/// exactly once. Retry policy belongs to the caller's environment, not here;
/// a timed-out child is simply unreachable for that operation.
#[derive(Clone)]
pub struct HttpChildClient {
    http: reqwest::Client,
    timeout: Duration,
}

impl HttpChildClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            timeout,
        }
    }
}

impl ChildTransport for HttpChildClient {
    fn add(
        &self,
        child: &ChildInfo,
        req: &AddRequest,
    ) -> impl Future<Output = Result<(), RpcError>> + Send {
        async move {
            let url = format!("http://{}{}", child.addr, ENDPOINT_ADD);
            let response = self
                .http
                .post(url)
                .json(req)
                .timeout(self.timeout)
                .send()
                .await
                .map_err(|e| RpcError::Transport(e.to_string()))?;

            match response.status() {
                StatusCode::OK => {
                    let ack: AddResponse = response
                        .json()
                        .await
                        .map_err(|e| RpcError::Transport(e.to_string()))?;
                    if ack.ok {
                        Ok(())
                    } else {
                        Err(RpcError::Transport(format!(
                            "child {} acknowledged failure without an error status",
                            child.addr
                        )))
                    }
                }
                StatusCode::CONFLICT => {
                    Err(RpcError::Store(StoreError::DuplicateKey(req.key.clone())))
                }
                StatusCode::INSUFFICIENT_STORAGE => Err(RpcError::Store(StoreError::Overflow)),
                status => Err(RpcError::Transport(format!(
                    "unexpected status {} from {}",
                    status, child.addr
                ))),
            }
        }
    }

    fn get(
        &self,
        child: &ChildInfo,
        key: &str,
        hash: u32,
    ) -> impl Future<Output = Result<Option<String>, RpcError>> + Send {
        async move {
            let url = format!("http://{}{}/{}?hash={}", child.addr, ENDPOINT_GET, key, hash);
            let response = self
                .http
                .get(url)
                .timeout(self.timeout)
                .send()
                .await
                .map_err(|e| RpcError::Transport(e.to_string()))?;

            match response.status() {
                StatusCode::OK => {
                    let body: GetResponse = response
                        .json()
                        .await
                        .map_err(|e| RpcError::Transport(e.to_string()))?;
                    Ok(body.value)
                }
                StatusCode::NOT_FOUND => Err(RpcError::Store(StoreError::NotFound(key.to_string()))),
                status => Err(RpcError::Transport(format!(
                    "unexpected status {} from {}",
                    status, child.addr
                ))),
            }
        }
    }

    fn list_entries(
        &self,
        child: &ChildInfo,
    ) -> impl Future<Output = Result<Vec<BucketDump>, RpcError>> + Send {
        async move {
            let url = format!("http://{}{}", child.addr, ENDPOINT_ENTRIES);
            let response = self
                .http
                .get(url)
                .timeout(self.timeout)
                .send()
                .await
                .map_err(|e| RpcError::Transport(e.to_string()))?;

            if !response.status().is_success() {
                return Err(RpcError::Transport(format!(
                    "unexpected status {} from {}",
                    response.status(),
                    child.addr
                )));
            }

            let body: EntriesResponse = response
                .json()
                .await
                .map_err(|e| RpcError::Transport(e.to_string()))?;
            Ok(body.buckets)
        }
    }

    fn ping(&self, child: &ChildInfo) -> impl Future<Output = Result<(), RpcError>> + Send {
        async move {
            let url = format!("http://{}{}", child.addr, ENDPOINT_PING);
            let response = self
                .http
                .get(url)
                .timeout(self.timeout)
                .send()
                .await
                .map_err(|e| RpcError::Transport(e.to_string()))?;

            if response.status().is_success() {
                Ok(())
            } else {
                Err(RpcError::Transport(format!(
                    "ping answered {} from {}",
                    response.status(),
                    child.addr
                )))
            }
        }
    }
}
