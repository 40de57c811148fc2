//! # ofs-cli — Oracle Functions Stack CLI
//!
//! Provides the `ofs` command-line interface for the development loop
//! around hosted function scripts: build the deployable artifacts and
//! their digest manifest, simulate a script locally under the sandbox
//! limits, and administer billing subscriptions.
//!
//! ## Subcommands
//!
//! - `ofs build` — digest-named script artifacts plus `manifest.json`.
//! - `ofs simulate` — gated local execution with the report printed the
//!   way the hosted tooling prints it.
//! - `ofs sub` — subscription accept/fund/info/timeout against a local
//!   YAML state file.
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from handlers.
//! - Handlers delegate to the domain crates — no gate, sandbox, or
//!   billing logic lives here.

pub mod build;
pub mod scripts;
pub mod simulate;
pub mod sub;
