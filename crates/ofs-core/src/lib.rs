//! # ofs-core — Foundational Types for the Oracle Functions Stack
//!
//! This crate is the bedrock of the Oracle Functions Stack. It defines the
//! type-system primitives shared by the runner, the simulation sandbox, the
//! billing tooling, and the CLI. Every other crate in the workspace depends
//! on `ofs-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `ChainSelector`,
//!    `SubscriptionId`, `DonId`, `RunId` — all newtypes. No bare strings or
//!    bare integers for identifiers.
//!
//! 2. **`ScriptSource` newtype.** ALL script digest computation flows through
//!    `ScriptDigest::of_source()`, which accepts only `&ScriptSource`. The
//!    bytes that are hashed are exactly the bytes that would be executed;
//!    there is no second path.
//!
//! 3. **Explicit secrets.** `Secrets` is a value passed into every execution
//!    call. Nothing in the stack reads secret material from ambient global
//!    state, and the `Debug` impl redacts values so secrets never reach logs.
//!
//! 4. **Canonical digest rendering.** A `ScriptDigest` renders as `0x`
//!    followed by 64 lower-case hex characters. Parsing accepts either hex
//!    case but requires the prefix; the canonical form is what gets compared
//!    and what appears in error messages.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ofs-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod digest;
pub mod encode;
pub mod error;
pub mod identity;
pub mod secrets;
pub mod source;

// Re-export primary types for ergonomic imports.
pub use digest::{DigestParseError, ScriptDigest};
pub use error::OfsError;
pub use identity::{ChainSelector, RunId, SubscriptionId};
pub use secrets::{Secrets, SRC_KEY};
pub use source::ScriptSource;
