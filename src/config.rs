//! Process Configuration
//!
//! The values the core consumes: the child's target partition capacity, the
//! master's replica count and per-call network timeout, and the bind/master
//! addresses. Parsed from plain `--flag value` arguments.

use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_REPLICA_COUNT: usize = 1;
pub const DEFAULT_RPC_TIMEOUT_MS: u64 = 500;
pub const DEFAULT_PARTITION_CAPACITY: usize = 25229;

#[derive(Debug, Clone)]
pub struct MasterConfig {
    pub bind: SocketAddr,
    /// Redundant copies requested per key; capped at runtime by the number
    /// of reachable children.
    pub replica_count: usize,
    /// Upper bound for every master-to-child call.
    pub rpc_timeout: Duration,
}

impl MasterConfig {
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut bind: Option<SocketAddr> = None;
        let mut replica_count = DEFAULT_REPLICA_COUNT;
        let mut rpc_timeout = Duration::from_millis(DEFAULT_RPC_TIMEOUT_MS);

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--bind" => {
                    bind = Some(value(args, i)?.parse().context("invalid --bind address")?);
                    i += 2;
                }
                "--replicas" => {
                    replica_count = value(args, i)?.parse().context("invalid --replicas count")?;
                    i += 2;
                }
                "--timeout-ms" => {
                    let ms: u64 = value(args, i)?.parse().context("invalid --timeout-ms")?;
                    rpc_timeout = Duration::from_millis(ms);
                    i += 2;
                }
                other => bail!("unknown master argument {:?}", other),
            }
        }

        Ok(Self {
            bind: bind.context("--bind is required")?,
            replica_count,
            rpc_timeout,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ChildConfig {
    pub bind: SocketAddr,
    /// Master to announce this child to. Optional so a child can be started
    /// ahead of its master and registered by hand.
    pub master: Option<SocketAddr>,
    /// Target entry capacity; the store rounds it up to the next prime.
    pub capacity: usize,
}

impl ChildConfig {
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut bind: Option<SocketAddr> = None;
        let mut master: Option<SocketAddr> = None;
        let mut capacity = DEFAULT_PARTITION_CAPACITY;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--bind" => {
                    bind = Some(value(args, i)?.parse().context("invalid --bind address")?);
                    i += 2;
                }
                "--master" => {
                    master = Some(value(args, i)?.parse().context("invalid --master address")?);
                    i += 2;
                }
                "--capacity" => {
                    capacity = value(args, i)?.parse().context("invalid --capacity")?;
                    i += 2;
                }
                other => bail!("unknown child argument {:?}", other),
            }
        }

        if capacity == 0 {
            bail!("--capacity must be positive");
        }

        Ok(Self {
            bind: bind.context("--bind is required")?,
            master,
            capacity,
        })
    }
}

fn value<'a>(args: &'a [String], i: usize) -> Result<&'a String> {
    args.get(i + 1)
        .with_context(|| format!("missing value for {}", args[i]))
}
