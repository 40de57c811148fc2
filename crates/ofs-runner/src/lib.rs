//! # ofs-runner — Integrity-Gated Script Execution
//!
//! The execution core of the Oracle Functions Stack. Before any script
//! payload runs, the gate recomputes its SHA-256 digest and compares it
//! against the caller-supplied commitment; only an exact match executes.
//!
//! ## Architecture
//!
//! - **Gate** (`gate.rs`): the integrity check itself. Two-way branch,
//!   no retries, no partial match. A mismatch reports both digests and
//!   the payload never reaches an engine.
//!
//! - **Engine** (`engine.rs`): the `ScriptEngine` trait and the
//!   capability-restricted `ExecutionContext`. A script touches only what
//!   the context hands it: its argument list, explicit secrets, a console
//!   sink, and an RPC mediator.
//!
//! - **Pinned modules** (`pinned.rs`): dynamic string evaluation is
//!   replaced by statically compiled modules, each pinned to the digest of
//!   the deployable source text it stands in for. Dispatch is by digest of
//!   the supplied source, so an unknown or tampered text never runs.
//!
//! - **Mock engine** (`mock.rs`): records what it executes; the test
//!   instrument for proving that rejected payloads are never run.
//!
//! ## Crate Policy
//!
//! - The gate is synchronous and stateless across calls. Anything async
//!   (timeouts, blocking offload) lives in `ofs-sandbox`.
//! - No `unwrap()`/`expect()` outside tests.

pub mod console;
pub mod engine;
pub mod gate;
pub mod mock;
pub mod pinned;
pub mod transport;

pub use console::ConsoleBuffer;
pub use engine::{EngineError, ExecutionContext, ScriptEngine, ScriptOutput};
pub use gate::{GateError, GateState, IntegrityGate};
pub use pinned::{PinnedModule, PinnedModuleEngine};
pub use transport::{RpcRequest, RpcTransport, TransportError};
