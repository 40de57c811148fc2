//! # Sandbox Resource Limits
//!
//! The per-execution resource envelope. Defaults mirror the hosted
//! sandbox's documented limits so a script that passes local simulation
//! is not surprised in production.

use serde::{Deserialize, Serialize};

/// Resource limits for one simulated execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxLimits {
    /// Maximum size of the returned value in bytes.
    pub max_on_chain_response_bytes: usize,
    /// Maximum execution duration in milliseconds.
    pub max_execution_time_ms: u64,
    /// Maximum RAM usage in megabytes.
    ///
    /// Enforced by the hosted sandbox; recorded here so config files
    /// round-trip, but local simulation does not meter memory.
    pub max_memory_usage_mb: u64,
    /// Maximum number of mediated queries per execution.
    pub num_allowed_queries: u32,
    /// Maximum duration of each mediated query in milliseconds.
    pub max_query_duration_ms: u64,
    /// Maximum query URL length in bytes.
    pub max_query_url_length: usize,
    /// Maximum outgoing query payload size in bytes.
    pub max_query_request_bytes: usize,
    /// Maximum incoming query response size in bytes.
    pub max_query_response_bytes: usize,
}

impl Default for SandboxLimits {
    fn default() -> Self {
        Self {
            max_on_chain_response_bytes: 256,
            max_execution_time_ms: 10_000,
            max_memory_usage_mb: 128,
            num_allowed_queries: 5,
            max_query_duration_ms: 9_000,
            max_query_url_length: 2048,
            max_query_request_bytes: 2048,
            max_query_response_bytes: 2_097_152,
        }
    }
}
