//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the identifiers that travel through the stack.
//! These prevent accidental identifier confusion — you cannot pass a
//! `SubscriptionId` where a `ChainSelector` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Selector identifying a chain in the cross-chain messaging namespace.
///
/// Rendered in decimal on the wire (e.g. `"12532609583862916517"`), which
/// is how scripts receive it in their argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainSelector(pub u64);

/// Identifier of a billing subscription on the functions router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

/// Unique identifier for one local simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Generate a new random run identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ChainSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
