//! Stop and line identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an empty or malformed identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} code: {reason}")]
pub struct InvalidCode {
    kind: &'static str,
    reason: &'static str,
}

fn validate(kind: &'static str, s: &str) -> Result<String, InvalidCode> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(InvalidCode {
            kind,
            reason: "must not be empty",
        });
    }

    if trimmed.chars().any(|c| c.is_whitespace() || c == '/') {
        return Err(InvalidCode {
            kind,
            reason: "must not contain whitespace or '/'",
        });
    }

    Ok(trimmed.to_string())
}

/// Provider code of a stop, e.g. `"15371"`.
///
/// Codes are used verbatim in provider URLs, so surrounding whitespace is
/// trimmed and embedded whitespace or path separators are rejected.
///
/// # Examples
///
/// ```
/// use tram_server::catalog::StopCode;
///
/// let stop = StopCode::parse(" 15371 ").unwrap();
/// assert_eq!(stop.as_str(), "15371");
///
/// assert!(StopCode::parse("").is_err());
/// assert!(StopCode::parse("15/371").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopCode(String);

impl StopCode {
    /// Parse a stop code, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidCode> {
        validate("stop", s).map(Self)
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StopCode {
    type Error = InvalidCode;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<StopCode> for String {
    fn from(code: StopCode) -> Self {
        code.0
    }
}

impl fmt::Debug for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopCode({})", self.0)
    }
}

impl fmt::Display for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provider code of a line, e.g. `"15"`.
///
/// A single physical stop may be served by several lines; the line code picks
/// which countdown to read from the stop's summary.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LineCode(String);

impl LineCode {
    /// Parse a line code, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidCode> {
        validate("line", s).map(Self)
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LineCode {
    type Error = InvalidCode;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<LineCode> for String {
    fn from(code: LineCode) -> Self {
        code.0
    }
}

impl fmt::Debug for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineCode({})", self.0)
    }
}

impl fmt::Display for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims() {
        assert_eq!(StopCode::parse("  11139\n").unwrap().as_str(), "11139");
        assert_eq!(LineCode::parse(" 3 ").unwrap().as_str(), "3");
    }

    #[test]
    fn reject_empty() {
        assert!(StopCode::parse("").is_err());
        assert!(StopCode::parse("   ").is_err());
        assert!(LineCode::parse("\t").is_err());
    }

    #[test]
    fn reject_embedded_separators() {
        assert!(StopCode::parse("113 39").is_err());
        assert!(StopCode::parse("../x").is_err());
        assert!(LineCode::parse("15|0").is_ok());
    }

    #[test]
    fn error_display() {
        let err = StopCode::parse("").unwrap_err();
        assert_eq!(err.to_string(), "invalid stop code: must not be empty");

        let err = LineCode::parse("a b").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid line code: must not contain whitespace or '/'"
        );
    }

    #[test]
    fn display_and_debug() {
        let stop = StopCode::parse("15371").unwrap();
        assert_eq!(format!("{stop}"), "15371");
        assert_eq!(format!("{stop:?}"), "StopCode(15371)");

        let line = LineCode::parse("59").unwrap();
        assert_eq!(format!("{line:?}"), "LineCode(59)");
    }

    #[test]
    fn deserialize_validates() {
        let ok: StopCode = serde_json::from_str("\"15371\"").unwrap();
        assert_eq!(ok.as_str(), "15371");

        let bad: Result<StopCode, _> = serde_json::from_str("\"\"");
        assert!(bad.is_err());
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(LineCode::parse("15").unwrap());
        assert!(set.contains(&LineCode::parse(" 15").unwrap()));
        assert!(!set.contains(&LineCode::parse("3").unwrap()));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Surrounding whitespace never changes the parsed code
        #[test]
        fn padding_is_ignored(code in "[0-9A-Za-z|_-]{1,8}", pad in "[ \t]{0,3}") {
            let padded = format!("{pad}{code}{pad}");
            let parsed = StopCode::parse(&padded).unwrap();
            prop_assert_eq!(parsed.as_str(), code.as_str());
        }

        /// Whitespace-only input is always rejected
        #[test]
        fn blank_rejected(s in "[ \t\n]{0,5}") {
            prop_assert!(LineCode::parse(&s).is_err());
        }
    }
}
