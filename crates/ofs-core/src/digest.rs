//! # Script Digest — SHA-256 Integrity Commitment
//!
//! Defines `ScriptDigest`, the 256-bit commitment a caller supplies to pin
//! the exact script it intends to have executed. The runner recomputes the
//! digest over the supplied payload and executes only on exact match.
//!
//! ## Normalization Policy
//!
//! The on-wire form is `0x` followed by 64 lower-case hex characters.
//! Parsing requires the `0x`/`0X` prefix and accepts either hex case; the
//! parsed value is held as raw bytes, so comparison is byte equality —
//! equivalently, string equality of the canonical lower-case renderings.
//! A digest that differs only in input case therefore still matches; a
//! missing prefix or wrong length is a parse error, never a mismatch.
//!
//! ## Security Invariant
//!
//! `of_source()` accepts only `&ScriptSource`, so every digest in the
//! system is computed over the exact bytes that would be executed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::source::ScriptSource;

/// Number of hex characters in a rendered digest, excluding the prefix.
pub const DIGEST_HEX_LEN: usize = 64;

/// The `0x` marker carried by every on-wire digest string.
pub const DIGEST_PREFIX: &str = "0x";

/// Error parsing a hex-encoded digest string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DigestParseError {
    /// The string does not start with `0x`.
    #[error("digest is missing the 0x prefix")]
    MissingPrefix,

    /// The hex body is not exactly 64 characters.
    #[error("digest hex body must be {DIGEST_HEX_LEN} characters, got {got}")]
    BadLength {
        /// Number of hex characters actually supplied.
        got: usize,
    },

    /// A character in the hex body is not a hex digit.
    #[error("invalid hex digit {ch:?} in digest")]
    BadHexDigit {
        /// The offending character.
        ch: char,
    },
}

/// A SHA-256 digest over a script source.
///
/// Produced either by [`ScriptDigest::of_source()`] (the computed side of
/// the integrity check) or by parsing a caller-supplied hex string (the
/// expected side). Exists for the duration of a check; nothing here is
/// persisted.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScriptDigest([u8; 32]);

impl ScriptDigest {
    /// Compute the digest of a script source.
    ///
    /// Deterministic: the same source always yields the same digest.
    pub fn of_source(source: &ScriptSource) -> Self {
        let hash = Sha256::digest(source.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hash);
        Self(bytes)
    }

    /// Construct from a raw 32-byte value.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The raw 32-byte digest value.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render as 64 lower-case hex characters, without the `0x` prefix.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Display for ScriptDigest {
    /// The canonical on-wire form: `0x` + 64 lower-case hex characters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{DIGEST_PREFIX}{}", self.to_hex())
    }
}

impl fmt::Debug for ScriptDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScriptDigest({self})")
    }
}

impl FromStr for ScriptDigest {
    type Err = DigestParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or(DigestParseError::MissingPrefix)?;

        if body.chars().count() != DIGEST_HEX_LEN {
            return Err(DigestParseError::BadLength {
                got: body.chars().count(),
            });
        }

        let mut bytes = [0u8; 32];
        let mut chars = body.chars();
        for byte in bytes.iter_mut() {
            let hi = hex_value(chars.next().unwrap_or('\0'))?;
            let lo = hex_value(chars.next().unwrap_or('\0'))?;
            *byte = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }
}

/// Decode one hex digit, accepting either case.
fn hex_value(ch: char) -> Result<u8, DigestParseError> {
    ch.to_digit(16)
        .map(|v| v as u8)
        .ok_or(DigestParseError::BadHexDigit { ch })
}

impl Serialize for ScriptDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ScriptDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // SHA-256("return 1+1;")
    const RETURN_1_PLUS_1: &str =
        "0xaae1dac37219f0d261f7461a68aa5af02e7e1a1b44961a8637e630ca13654b8d";
    // SHA-256("")
    const EMPTY: &str = "0xe3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    // SHA-256("abc")
    const ABC: &str = "0xba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn of_source_matches_known_vectors() {
        let cases = [("return 1+1;", RETURN_1_PLUS_1), ("", EMPTY), ("abc", ABC)];
        for (text, expected) in cases {
            let digest = ScriptDigest::of_source(&ScriptSource::new(text));
            assert_eq!(digest.to_string(), expected);
        }
    }

    #[test]
    fn of_source_is_deterministic() {
        let src = ScriptSource::new("const out = Functions.encodeString('ok');");
        let d1 = ScriptDigest::of_source(&src);
        let d2 = ScriptDigest::of_source(&src);
        assert_eq!(d1, d2);
    }

    #[test]
    fn hex_rendering_is_lowercase_and_64_chars() {
        let hex = ScriptDigest::of_source(&ScriptSource::new("abc")).to_hex();
        assert_eq!(hex.len(), DIGEST_HEX_LEN);
        assert!(hex
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn parse_accepts_upper_case_hex() {
        let upper = format!("0x{}", ABC.trim_start_matches("0x").to_uppercase());
        let parsed: ScriptDigest = upper.parse().unwrap();
        // Normalizes back to the canonical lower-case rendering.
        assert_eq!(parsed.to_string(), ABC);
    }

    #[test]
    fn parse_accepts_upper_case_prefix() {
        let with_upper_prefix = format!("0X{}", ABC.trim_start_matches("0x"));
        let parsed: ScriptDigest = with_upper_prefix.parse().unwrap();
        assert_eq!(parsed.to_string(), ABC);
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        let bare = ABC.trim_start_matches("0x");
        assert_eq!(
            bare.parse::<ScriptDigest>(),
            Err(DigestParseError::MissingPrefix)
        );
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert_eq!(
            "0xabc".parse::<ScriptDigest>(),
            Err(DigestParseError::BadLength { got: 3 })
        );
    }

    #[test]
    fn parse_rejects_non_hex_characters() {
        let bad = format!("0x{}", "g".repeat(64));
        assert_eq!(
            bad.parse::<ScriptDigest>(),
            Err(DigestParseError::BadHexDigit { ch: 'g' })
        );
    }

    #[test]
    fn serde_round_trips_as_canonical_string() {
        let digest: ScriptDigest = ABC.parse().unwrap();
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(json, format!("\"{ABC}\""));
        let back: ScriptDigest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, digest);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn render_parse_round_trip(text in ".*") {
                let digest = ScriptDigest::of_source(&ScriptSource::new(text));
                let parsed: ScriptDigest = digest.to_string().parse().unwrap();
                prop_assert_eq!(parsed, digest);
            }

            #[test]
            fn determinism(text in ".*") {
                let src = ScriptSource::new(text);
                prop_assert_eq!(
                    ScriptDigest::of_source(&src),
                    ScriptDigest::of_source(&src)
                );
            }
        }
    }
}
