//! # Simulation Driver
//!
//! Assembles an execution context, runs the integrity gate on a blocking
//! task, applies the wall-clock limit, and folds whatever happened into a
//! `SimulationReport`. The report mirrors the hosted toolkit's surface:
//! response bytes as a hex string, an error string, and the captured
//! terminal output.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ofs_core::encode::response_hex;
use ofs_core::{RunId, ScriptDigest, ScriptSource, Secrets};
use ofs_runner::{ExecutionContext, GateState, IntegrityGate, RpcTransport, ScriptEngine};

use crate::limits::SandboxLimits;

/// One simulation invocation.
#[derive(Debug, Clone)]
pub struct SimulationRequest {
    /// The candidate script source.
    pub source: ScriptSource,
    /// The digest commitment the source must hash to.
    pub expected_digest: ScriptDigest,
    /// Ordered script arguments. By the standard calling convention,
    /// position 0 repeats the expected digest hex string.
    pub args: Vec<String>,
    /// Explicit secret material for this execution.
    pub secrets: Secrets,
    /// Resource envelope to enforce.
    pub limits: SandboxLimits,
}

/// Outcome of one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Identifier of this run.
    pub run_id: RunId,
    /// Terminal verification state of the gate invocation.
    pub state: GateState,
    /// Response bytes as a `0x` hex string, when execution succeeded.
    pub response_bytes_hex: Option<String>,
    /// Error description, when anything went wrong.
    pub error_string: Option<String>,
    /// Terminal output captured from the script, newline joined.
    pub captured_terminal_output: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the run in milliseconds.
    pub duration_ms: u64,
}

/// Drives simulated executions against a fixed engine and transport.
pub struct Simulator {
    engine: Arc<dyn ScriptEngine>,
    transport: Arc<dyn RpcTransport>,
}

impl Simulator {
    /// Simulator executing through `engine`, mediating RPC via `transport`.
    pub fn new(engine: Arc<dyn ScriptEngine>, transport: Arc<dyn RpcTransport>) -> Self {
        Self { engine, transport }
    }

    /// Run one simulation to completion and report the outcome.
    ///
    /// The gate run is synchronous, so it is offloaded to a blocking task
    /// while this future enforces `max_execution_time_ms`. Hash
    /// verification itself has no suspension points; only the executed
    /// payload can run long enough to hit the limit.
    pub async fn simulate(&self, request: SimulationRequest) -> SimulationReport {
        let run_id = RunId::new();
        let started_at = Utc::now();
        let clock = Instant::now();

        let SimulationRequest {
            source,
            expected_digest,
            args,
            secrets,
            limits,
        } = request;

        tracing::info!(run_id = %run_id, digest = %expected_digest, "simulation started");

        let mut ctx = ExecutionContext::new(args, secrets, Arc::clone(&self.transport));
        let console = ctx.console.clone();
        let gate = IntegrityGate::new(Arc::clone(&self.engine));

        let budget = std::time::Duration::from_millis(limits.max_execution_time_ms);
        let handle =
            tokio::task::spawn_blocking(move || gate.run(&expected_digest, &source, &mut ctx));

        let (state, response_bytes_hex, error_string) =
            match tokio::time::timeout(budget, handle).await {
                Ok(Ok(Ok(output))) => {
                    if output.bytes.len() > limits.max_on_chain_response_bytes {
                        (
                            GateState::Executed,
                            None,
                            Some(format!(
                                "response is {} bytes, limit is {}",
                                output.bytes.len(),
                                limits.max_on_chain_response_bytes
                            )),
                        )
                    } else {
                        (GateState::Executed, Some(response_hex(&output.bytes)), None)
                    }
                }
                Ok(Ok(Err(gate_err))) => {
                    (gate_err.terminal_state(), None, Some(gate_err.to_string()))
                }
                // The blocking task died (script panic). Verified but never
                // ran to completion.
                Ok(Err(join_err)) => (
                    GateState::Verified,
                    None,
                    Some(format!("script execution failed: {join_err}")),
                ),
                Err(_) => (
                    GateState::Verified,
                    None,
                    Some(format!(
                        "execution exceeded {}ms",
                        limits.max_execution_time_ms
                    )),
                ),
            };

        let duration_ms = clock.elapsed().as_millis() as u64;
        match &error_string {
            Some(err) => tracing::warn!(run_id = %run_id, state = %state, error = %err, "simulation failed"),
            None => tracing::info!(run_id = %run_id, state = %state, duration_ms, "simulation finished"),
        }

        SimulationReport {
            run_id,
            state,
            response_bytes_hex,
            error_string,
            captured_terminal_output: console.contents(),
            started_at,
            duration_ms,
        }
    }
}
