//! # ofs-sandbox — Local Simulation Harness
//!
//! Runs a script the way the remote oracle sandbox would, against local
//! stand-ins for the pieces that are external in production: a
//! whitelisting mock transport instead of the real HTTP mediator, and
//! enforced resource limits instead of the network's billing-backed ones.
//!
//! ## Architecture
//!
//! - **Limits** (`limits.rs`): the per-execution resource envelope,
//!   defaulting to the hosted sandbox's documented limits.
//!
//! - **Transport** (`transport.rs`): a canned-response JSON-RPC transport
//!   with method whitelisting, query budget accounting, and a request log
//!   for assertions.
//!
//! - **Simulator** (`simulator.rs`): the async driver. Offloads the
//!   synchronous gate run to a blocking task, applies the wall-clock
//!   timeout, and folds the outcome into a `SimulationReport`.
//!
//! ## Crate Policy
//!
//! - The simulator never panics on a script failure; every outcome lands
//!   in the report's `error_string` instead.
//! - Cancellation beyond the wall-clock timeout is the embedding
//!   harness's concern, matching the hosted sandbox's contract.

pub mod limits;
pub mod simulator;
pub mod transport;

pub use limits::SandboxLimits;
pub use simulator::{SimulationReport, SimulationRequest, Simulator};
pub use transport::CannedTransport;
