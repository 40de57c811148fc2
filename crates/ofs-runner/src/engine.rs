//! # Script Engine Seam
//!
//! Defines the `ScriptEngine` trait the gate executes through, and the
//! `ExecutionContext` that carries everything a script is allowed to
//! touch. There is no ambient state: arguments, secrets, console, and the
//! RPC mediator all arrive explicitly in the context.

use std::sync::Arc;

use thiserror::Error;

use ofs_core::{ScriptSource, Secrets};

use crate::console::ConsoleBuffer;
use crate::transport::{RpcTransport, TransportError};

/// Everything a script may touch during one execution.
///
/// Built fresh per invocation; nothing in it survives the call except the
/// console buffer, which the harness drains into its report.
pub struct ExecutionContext {
    /// Ordered argument list. Position 0 carries the expected digest hex
    /// string when the invocation came through the gate's standard calling
    /// convention; the remaining positions are script-defined.
    pub args: Vec<String>,
    /// Explicit secret material for this execution.
    pub secrets: Secrets,
    /// Captured terminal output sink.
    pub console: ConsoleBuffer,
    /// Mediated RPC access.
    pub transport: Arc<dyn RpcTransport>,
}

impl ExecutionContext {
    /// Build a context with a fresh console buffer.
    pub fn new(args: Vec<String>, secrets: Secrets, transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            args,
            secrets,
            console: ConsoleBuffer::new(),
            transport,
        }
    }

    /// Argument at `index`, if supplied.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("args", &self.args)
            .field("secrets", &self.secrets)
            .field("console", &self.console)
            .finish_non_exhaustive()
    }
}

/// Raw bytes returned by a script, passed through to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOutput {
    /// The response bytes as the script produced them.
    pub bytes: Vec<u8>,
}

impl ScriptOutput {
    /// Wrap response bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

/// Error raised while executing a verified payload.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The supplied source does not correspond to any pinned module.
    #[error("no pinned module for source digest {digest}")]
    UnknownModule {
        /// Canonical rendering of the unmatched digest.
        digest: String,
    },

    /// The script body itself failed.
    #[error("script error: {0}")]
    Script(String),

    /// A mediated request failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Executes verified script sources.
///
/// Implementations must not execute anything the gate has not handed
/// them; the gate is the only caller.
pub trait ScriptEngine: Send + Sync {
    /// Execute a verified source within the given context.
    fn execute(
        &self,
        source: &ScriptSource,
        ctx: &mut ExecutionContext,
    ) -> Result<ScriptOutput, EngineError>;
}
