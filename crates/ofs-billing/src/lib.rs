//! # ofs-billing — Subscription Administration
//!
//! Administrative operations for the billing subscriptions that pay for
//! hosted function executions: balance funding, ownership transfer, and
//! blocked-balance release for timed-out requests.
//!
//! ## Architecture
//!
//! - **Juels** (`juels.rs`): balance arithmetic at the token's base unit,
//!   with human-readable LINK rendering for operator output.
//!
//! - **Subscription** (`subscription.rs`): subscription records and the
//!   two-step ownership-transfer lifecycle (propose, then the proposed
//!   owner accepts).
//!
//! - **Router** (`router.rs`): the `FunctionsRouter` trait is the seam
//!   where the on-chain subscription contract attaches in production.
//!   `InMemoryRouter` is the local rendition the CLI and tests drive.
//!
//! - **Admin** (`admin.rs`): the operator-facing operations, each
//!   narrating what it changes at info level.

pub mod admin;
pub mod error;
pub mod juels;
pub mod router;
pub mod subscription;

pub use error::BillingError;
pub use juels::Juels;
pub use router::{FunctionsRouter, InMemoryRouter};
pub use subscription::{SubscriptionInfo, TransferState};
