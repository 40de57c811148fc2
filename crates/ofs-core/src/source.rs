//! # Script Source — The Payload Under Verification
//!
//! Defines `ScriptSource`, the candidate source text whose integrity is
//! checked before execution. The text is treated as uninterpreted UTF-8
//! bytes for hashing, and as executable content only after the digest
//! check in `ofs-runner` succeeds.
//!
//! ## Security Invariant
//!
//! `ScriptDigest::of_source()` accepts only `&ScriptSource`. Because every
//! execution path also consumes a `&ScriptSource`, the bytes that were
//! hashed and the bytes that run are the same value by construction — no
//! code path can hash one string and execute another.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::OfsError;

/// An opaque source-code payload.
///
/// Immutable once constructed. Equality is byte equality of the text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptSource(String);

impl ScriptSource {
    /// Wrap a source text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Read a source file from disk.
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, OfsError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self(text))
    }

    /// The source as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The exact bytes that are hashed by `ScriptDigest::of_source()`.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Length of the source in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the source is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ScriptSource {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
