//! Ticker value object for instrument symbols.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A short instrument symbol, e.g. "VOD" or "BARC".
///
/// The ticker is normalized to uppercase on construction. Length
/// constraints are enforced by the trade validator, not here, so that
/// a single validation pass can report every violation at once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// Create a new ticker, normalized to uppercase.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().to_uppercase())
    }

    /// Get the ticker string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Length of the symbol in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Whether the symbol is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Ticker {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Ticker {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_to_uppercase() {
        let ticker = Ticker::new("vod");
        assert_eq!(ticker.as_str(), "VOD");
    }

    #[test]
    fn equality_after_normalization() {
        assert_eq!(Ticker::new("vod"), Ticker::new("VOD"));
    }

    #[test]
    fn len_counts_characters() {
        assert_eq!(Ticker::new("BARC").len(), 4);
        assert!(Ticker::new("").is_empty());
    }

    #[test]
    fn serde_is_transparent() {
        let ticker = Ticker::new("VOD");
        let json = serde_json::to_string(&ticker).unwrap();
        assert_eq!(json, "\"VOD\"");

        let parsed: Ticker = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ticker);
    }

    #[test]
    fn usable_as_map_key() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(Ticker::new("VOD"), 1);
        map.insert(Ticker::new("vod"), 2);
        assert_eq!(map.len(), 1);
    }
}
