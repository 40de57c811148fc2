//! # On-Chain Response Encoding
//!
//! Helpers for packing a script's return value into the byte forms the
//! oracle network settles on-chain: UTF-8 strings and big-endian 256-bit
//! unsigned integers. The sandbox renders the final bytes as a `0x` hex
//! string for the simulation report.

use thiserror::Error;

/// Error decoding an on-chain response value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer is not exactly 32 bytes.
    #[error("uint256 response must be 32 bytes, got {got}")]
    BadLength {
        /// Number of bytes actually supplied.
        got: usize,
    },

    /// The value does not fit in a u128.
    #[error("uint256 response exceeds the supported integer range")]
    Overflow,
}

/// Encode a string response as its UTF-8 bytes.
pub fn encode_string(value: &str) -> Vec<u8> {
    value.as_bytes().to_vec()
}

/// Encode an unsigned integer as a 32-byte big-endian word.
pub fn encode_uint256(value: u128) -> Vec<u8> {
    let mut word = vec![0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Decode a 32-byte big-endian word back into an unsigned integer.
pub fn decode_uint256(bytes: &[u8]) -> Result<u128, DecodeError> {
    if bytes.len() != 32 {
        return Err(DecodeError::BadLength { got: bytes.len() });
    }
    if bytes[..16].iter().any(|b| *b != 0) {
        return Err(DecodeError::Overflow);
    }
    let mut low = [0u8; 16];
    low.copy_from_slice(&bytes[16..]);
    Ok(u128::from_be_bytes(low))
}

/// Render response bytes as a `0x`-prefixed lower-case hex string.
pub fn response_hex(bytes: &[u8]) -> String {
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("0x{hex}")
}
