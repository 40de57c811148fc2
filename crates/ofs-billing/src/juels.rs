//! # Juels — Token Base-Unit Arithmetic
//!
//! Balances are held in juels, the token's base unit at 18 decimals.
//! Arithmetic stays in the base unit; the LINK rendering exists only for
//! operator-facing output.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Juels per whole LINK token (18 decimals).
pub const JUELS_PER_LINK: u128 = 1_000_000_000_000_000_000;

/// Error parsing a LINK decimal string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JuelsParseError {
    /// The string is not a decimal number.
    #[error("not a decimal LINK amount: {0:?}")]
    BadFormat(String),

    /// More than 18 fractional digits were supplied.
    #[error("LINK amounts carry at most 18 decimals, got {got}")]
    TooManyDecimals {
        /// Number of fractional digits supplied.
        got: usize,
    },
}

/// A balance in juels.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Juels(pub u128);

impl Juels {
    /// Zero balance.
    pub const ZERO: Juels = Juels(0);

    /// A whole number of LINK.
    pub fn from_link(link: u64) -> Self {
        Self(link as u128 * JUELS_PER_LINK)
    }

    /// Parse a decimal LINK string such as `"1.5"` into juels.
    pub fn from_link_str(s: &str) -> Result<Self, JuelsParseError> {
        let bad = || JuelsParseError::BadFormat(s.to_string());
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(bad());
        }
        if frac.len() > 18 {
            return Err(JuelsParseError::TooManyDecimals { got: frac.len() });
        }

        let whole_part: u128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| bad())?
        };
        let frac_part: u128 = if frac.is_empty() {
            0
        } else {
            let padded = format!("{frac:0<18}");
            padded.parse().map_err(|_| bad())?
        };

        Ok(Self(whole_part * JUELS_PER_LINK + frac_part))
    }

    /// Render as a decimal LINK amount with trailing zeros trimmed,
    /// e.g. `"1.5 LINK"`.
    pub fn format_link(&self) -> String {
        let whole = self.0 / JUELS_PER_LINK;
        let frac = self.0 % JUELS_PER_LINK;
        if frac == 0 {
            return format!("{whole} LINK");
        }
        let frac_str = format!("{frac:018}");
        let trimmed = frac_str.trim_end_matches('0');
        format!("{whole}.{trimmed} LINK")
    }

    /// Saturating addition.
    pub fn saturating_add(self, other: Juels) -> Juels {
        Juels(self.0.saturating_add(other.0))
    }

    /// Checked subtraction.
    pub fn checked_sub(self, other: Juels) -> Option<Juels> {
        self.0.checked_sub(other.0).map(Juels)
    }
}

impl std::fmt::Display for Juels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_amounts_render_without_fraction() {
        assert_eq!(Juels::from_link(1).format_link(), "1 LINK");
        assert_eq!(Juels::from_link(100).format_link(), "100 LINK");
        assert_eq!(Juels::ZERO.format_link(), "0 LINK");
    }

    #[test]
    fn fractional_amounts_trim_trailing_zeros() {
        assert_eq!(Juels(1_500_000_000_000_000_000).format_link(), "1.5 LINK");
        assert_eq!(Juels(40_000_000_000_000_000).format_link(), "0.04 LINK");
        assert_eq!(Juels(1).format_link(), "0.000000000000000001 LINK");
    }

    #[test]
    fn parse_round_trips() {
        for (s, juels) in [
            ("1", Juels::from_link(1)),
            ("1.5", Juels(1_500_000_000_000_000_000)),
            ("0.04", Juels(40_000_000_000_000_000)),
            (".5", Juels(500_000_000_000_000_000)),
            ("0", Juels::ZERO),
        ] {
            assert_eq!(Juels::from_link_str(s).unwrap(), juels, "input {s:?}");
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            Juels::from_link_str("one"),
            Err(JuelsParseError::BadFormat(_))
        ));
        assert!(matches!(
            Juels::from_link_str(""),
            Err(JuelsParseError::BadFormat(_))
        ));
        assert!(matches!(
            Juels::from_link_str("1.0000000000000000001"),
            Err(JuelsParseError::TooManyDecimals { got: 19 })
        ));
    }

    #[test]
    fn checked_sub_underflow_is_none() {
        assert_eq!(Juels(1).checked_sub(Juels(2)), None);
        assert_eq!(Juels(2).checked_sub(Juels(1)), Some(Juels(1)));
    }
}
