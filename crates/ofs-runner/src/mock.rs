//! # Mock Engine
//!
//! A recording engine for tests and dry runs. Every execution is appended
//! to a log, which is how callers prove the negative the gate promises:
//! a rejected payload leaves the log untouched.

use std::sync::Mutex;

use ofs_core::ScriptSource;

use crate::engine::{EngineError, ExecutionContext, ScriptEngine, ScriptOutput};
use crate::transport::{RpcRequest, RpcTransport, TransportError};

/// Engine that records executed sources and returns canned bytes.
#[derive(Debug, Default)]
pub struct MockEngine {
    output: Vec<u8>,
    executed: Mutex<Vec<String>>,
}

impl MockEngine {
    /// Mock engine returning empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock engine returning the given bytes from every execution.
    pub fn with_output(bytes: Vec<u8>) -> Self {
        Self {
            output: bytes,
            executed: Mutex::new(Vec::new()),
        }
    }

    /// Source texts executed so far, in order.
    pub fn executions(&self) -> Vec<String> {
        self.executed.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl ScriptEngine for MockEngine {
    fn execute(
        &self,
        source: &ScriptSource,
        _ctx: &mut ExecutionContext,
    ) -> Result<ScriptOutput, EngineError> {
        if let Ok(mut executed) = self.executed.lock() {
            executed.push(source.as_str().to_string());
        }
        Ok(ScriptOutput::new(self.output.clone()))
    }
}

/// Transport that rejects every request.
///
/// The right mediator for contexts whose script is not supposed to reach
/// the network at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAllTransport;

impl RpcTransport for DenyAllTransport {
    fn request(&self, req: &RpcRequest) -> Result<serde_json::Value, TransportError> {
        Err(TransportError::MethodNotAllowed {
            method: req.method.clone(),
        })
    }
}
