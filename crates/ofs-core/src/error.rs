//! # Error Types
//!
//! Top-level error type for foundational operations. The runner, sandbox,
//! and billing crates define their own local error enums; this one covers
//! the failure modes of the core types themselves.

use thiserror::Error;

use crate::digest::DigestParseError;

/// Top-level error for `ofs-core` operations.
#[derive(Error, Debug)]
pub enum OfsError {
    /// A supplied digest string could not be parsed.
    #[error("digest error: {0}")]
    Digest(#[from] DigestParseError),

    /// IO error reading a script source or config file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
