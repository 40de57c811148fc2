//! # Canned-Response Transport
//!
//! The local stand-in for the sandbox's HTTP mediator. Responses come
//! from a fixed method table; anything off the table is rejected, so a
//! simulated script can only reach the RPC surface it was whitelisted
//! for. Every request is counted against the query budget and appended
//! to a log the test harness can assert on.

use std::collections::BTreeMap;
use std::sync::Mutex;

use ofs_runner::{RpcRequest, RpcTransport, TransportError};

use crate::limits::SandboxLimits;

/// Whitelisting transport with canned responses.
pub struct CannedTransport {
    responses: BTreeMap<String, serde_json::Value>,
    allowed_queries: u32,
    max_url_length: usize,
    max_request_bytes: usize,
    used: Mutex<u32>,
    log: Mutex<Vec<RpcRequest>>,
}

impl CannedTransport {
    /// Empty transport bounded by the given limits.
    pub fn new(limits: &SandboxLimits) -> Self {
        Self {
            responses: BTreeMap::new(),
            allowed_queries: limits.num_allowed_queries,
            max_url_length: limits.max_query_url_length,
            max_request_bytes: limits.max_query_request_bytes,
            used: Mutex::new(0),
            log: Mutex::new(Vec::new()),
        }
    }

    /// Seed the fee/chain-probe responses a wallet client issues when it
    /// initializes against a testnet endpoint.
    pub fn with_default_responses(mut self) -> Self {
        self.insert_response("eth_chainId", serde_json::json!("0x13881"));
        self.insert_response("eth_estimateGas", serde_json::json!("0x5208"));
        self.insert_response("eth_maxPriorityFeePerGas", serde_json::json!("0x3b9aca00"));
        self
    }

    /// Whitelist `method` with a canned response value.
    pub fn insert_response(&mut self, method: impl Into<String>, value: serde_json::Value) {
        self.responses.insert(method.into(), value);
    }

    /// Builder-style [`insert_response`](Self::insert_response).
    pub fn with_response(mut self, method: impl Into<String>, value: serde_json::Value) -> Self {
        self.insert_response(method, value);
        self
    }

    /// Requests performed so far, in order.
    pub fn requests(&self) -> Vec<RpcRequest> {
        self.log.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Queries spent against the budget so far.
    pub fn queries_used(&self) -> u32 {
        self.used.lock().map(|u| *u).unwrap_or(0)
    }
}

impl RpcTransport for CannedTransport {
    fn request(&self, req: &RpcRequest) -> Result<serde_json::Value, TransportError> {
        {
            let mut used = self
                .used
                .lock()
                .map_err(|_| TransportError::Upstream("transport state poisoned".into()))?;
            if *used >= self.allowed_queries {
                return Err(TransportError::QueryBudgetExhausted {
                    allowed: self.allowed_queries,
                });
            }
            *used += 1;
        }

        if req.url.len() > self.max_url_length {
            return Err(TransportError::UrlTooLong {
                len: req.url.len(),
                max: self.max_url_length,
            });
        }

        let body_len = serde_json::to_vec(req).map(|b| b.len()).unwrap_or(0);
        if body_len > self.max_request_bytes {
            return Err(TransportError::RequestTooLarge {
                len: body_len,
                max: self.max_request_bytes,
            });
        }

        if let Ok(mut log) = self.log.lock() {
            log.push(req.clone());
        }

        match self.responses.get(&req.method) {
            Some(value) => {
                tracing::debug!(method = %req.method, "canned response served");
                Ok(value.clone())
            }
            None => {
                tracing::warn!(method = %req.method, "method not whitelisted");
                Err(TransportError::MethodNotAllowed {
                    method: req.method.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://polygon-mumbai.gateway.tenderly.co";

    fn transport(limits: &SandboxLimits) -> CannedTransport {
        CannedTransport::new(limits).with_default_responses()
    }

    #[test]
    fn serves_canned_responses() {
        let limits = SandboxLimits::default();
        let t = transport(&limits);

        let chain_id = t
            .request(&RpcRequest::new(URL, "eth_chainId", serde_json::json!([])))
            .unwrap();
        assert_eq!(chain_id, serde_json::json!("0x13881"));

        let gas = t
            .request(&RpcRequest::new(URL, "eth_estimateGas", serde_json::json!([])))
            .unwrap();
        assert_eq!(gas, serde_json::json!("0x5208"));

        assert_eq!(t.queries_used(), 2);
        assert_eq!(t.requests().len(), 2);
    }

    #[test]
    fn rejects_methods_off_the_whitelist() {
        let limits = SandboxLimits::default();
        let t = transport(&limits);

        let err = t
            .request(&RpcRequest::new(
                URL,
                "eth_sendRawTransaction",
                serde_json::json!(["0xdead"]),
            ))
            .unwrap_err();
        assert_eq!(
            err,
            TransportError::MethodNotAllowed {
                method: "eth_sendRawTransaction".into()
            }
        );
    }

    #[test]
    fn exhausts_the_query_budget() {
        let limits = SandboxLimits {
            num_allowed_queries: 2,
            ..SandboxLimits::default()
        };
        let t = transport(&limits);
        let req = RpcRequest::new(URL, "eth_chainId", serde_json::json!([]));

        t.request(&req).unwrap();
        t.request(&req).unwrap();
        let err = t.request(&req).unwrap_err();
        assert_eq!(err, TransportError::QueryBudgetExhausted { allowed: 2 });
    }

    #[test]
    fn enforces_url_length() {
        let limits = SandboxLimits {
            max_query_url_length: 16,
            ..SandboxLimits::default()
        };
        let t = transport(&limits);

        let err = t
            .request(&RpcRequest::new(
                "https://a-very-long-endpoint.example.com/v3/key",
                "eth_chainId",
                serde_json::json!([]),
            ))
            .unwrap_err();
        assert!(matches!(err, TransportError::UrlTooLong { .. }));
    }

    #[test]
    fn enforces_request_size() {
        let limits = SandboxLimits {
            max_query_request_bytes: 64,
            ..SandboxLimits::default()
        };
        let t = transport(&limits);

        let err = t
            .request(&RpcRequest::new(
                URL,
                "eth_chainId",
                serde_json::json!(["x".repeat(256)]),
            ))
            .unwrap_err();
        assert!(matches!(err, TransportError::RequestTooLarge { .. }));
    }
}
