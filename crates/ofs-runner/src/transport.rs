//! # RPC Mediator Seam
//!
//! Scripts reach the outside world only through the `RpcTransport` handle
//! in their execution context. The trait is the seam where the real HTTP
//! mediator of the oracle sandbox attaches; the local simulation harness
//! plugs in a whitelisting mock instead (`ofs-sandbox`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A JSON-RPC request a script asks the mediator to perform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Endpoint the request targets.
    pub url: String,
    /// JSON-RPC method name.
    pub method: String,
    /// JSON-RPC params value.
    pub params: serde_json::Value,
}

impl RpcRequest {
    /// Build a request with the given method and params.
    pub fn new(url: impl Into<String>, method: impl Into<String>, params: serde_json::Value) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
            params,
        }
    }
}

/// Error performing a mediated request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The method is not on the transport's whitelist.
    #[error("rpc method {method} is not allowed by this transport")]
    MethodNotAllowed {
        /// The rejected method name.
        method: String,
    },

    /// The per-execution query budget has been spent.
    #[error("query budget exhausted: {allowed} queries allowed")]
    QueryBudgetExhausted {
        /// The number of queries the budget allowed.
        allowed: u32,
    },

    /// The request URL exceeds the configured limit.
    #[error("request url is {len} bytes, limit is {max}")]
    UrlTooLong {
        /// Actual URL length in bytes.
        len: usize,
        /// Configured maximum.
        max: usize,
    },

    /// The serialized request body exceeds the configured limit.
    #[error("request body is {len} bytes, limit is {max}")]
    RequestTooLarge {
        /// Actual body length in bytes.
        len: usize,
        /// Configured maximum.
        max: usize,
    },

    /// The upstream endpoint failed.
    #[error("upstream error: {0}")]
    Upstream(String),
}

/// Mediated request execution.
///
/// Implementations decide which methods are reachable and what the
/// responses are; the script only sees the result value.
pub trait RpcTransport: Send + Sync {
    /// Perform one request, returning the JSON result value.
    fn request(&self, req: &RpcRequest) -> Result<serde_json::Value, TransportError>;
}
