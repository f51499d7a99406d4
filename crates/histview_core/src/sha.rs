//! Commit identifiers.

use crate::error::{HistError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier reserved for the synthetic working-directory commit.
pub const ZERO_SHA: &str = "0000000000000000000000000000000000000000";

/// A commit identifier, stored as the hex text the VCS tool emits.
///
/// `Sha::new` accepts any text so abbreviated identifiers can be carried
/// around; `Sha::from_hex` is the validating constructor used when parsing
/// tool output.
///
/// # Examples
///
/// ```
/// use histview_core::Sha;
///
/// let sha = Sha::from_hex(&"ab".repeat(20)).unwrap();
/// assert_eq!(sha.short(), "abababab");
/// assert!(!sha.is_zero());
/// assert!(Sha::zero().is_zero());
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sha(String);

impl Sha {
    /// Length of a SHA-1 identifier as hex.
    pub const HEX_LEN: usize = 40;

    /// Length of a SHA-256 identifier as hex.
    pub const HEX_LEN_SHA256: usize = 64;

    /// Number of characters shown by [`Sha::short`].
    pub const SHORT_LEN: usize = 8;

    /// Wraps an identifier without validation.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The working-directory identifier.
    pub fn zero() -> Self {
        Self(ZERO_SHA.to_string())
    }

    /// Parses a full-length identifier.
    ///
    /// # Errors
    ///
    /// Returns `HistError::InvalidSha` if the text is not 40 or 64 hex
    /// characters.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.len() != Self::HEX_LEN && s.len() != Self::HEX_LEN_SHA256 {
            return Err(HistError::InvalidSha(format!(
                "expected {} or {} hex chars, got {}",
                Self::HEX_LEN,
                Self::HEX_LEN_SHA256,
                s.len()
            )));
        }

        hex::decode(s).map_err(|e| HistError::InvalidSha(format!("{}: {}", s, e)))?;

        Ok(Self(s.to_ascii_lowercase()))
    }

    /// Returns the identifier text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the reserved working-directory identifier.
    pub fn is_zero(&self) -> bool {
        self.0 == ZERO_SHA
    }

    /// True if no identifier is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Abbreviated form used for display.
    pub fn short(&self) -> &str {
        self.0.get(..Self::SHORT_LEN).unwrap_or(&self.0)
    }

    /// True if this identifier begins with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Display for Sha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Sha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sha({})", self.short())
    }
}

impl Borrow<str> for Sha {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Sha {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Sha {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Sha {
    fn from(s: String) -> Self {
        Self(s)
    }
}
