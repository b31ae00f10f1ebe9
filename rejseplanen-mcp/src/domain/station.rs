//! Upstream stop identifiers.

use std::fmt;

use super::ValidationError;

/// An upstream-issued stop or location identifier (e.g. `008600626`).
///
/// Identifiers are opaque: the only local guarantee is that the value is
/// non-empty once surrounding whitespace is removed. Whether the stop
/// actually exists is for the upstream API to decide.
///
/// # Examples
///
/// ```
/// use rejseplanen_mcp::domain::StopId;
///
/// let cph = StopId::parse("station_id", " 008600626 ").unwrap();
/// assert_eq!(cph.as_str(), "008600626");
///
/// assert!(StopId::parse("station_id", "   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StopId(String);

impl StopId {
    /// Parse an identifier, naming `field` in the error if it is blank.
    pub fn parse(field: &str, s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty(field));
        }
        Ok(StopId(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Whitespace-only input never yields an identifier
        #[test]
        fn whitespace_rejected(s in "[ \t\r\n]{0,12}") {
            prop_assert!(StopId::parse("id", &s).is_err());
        }

        /// Parsed identifiers never carry surrounding whitespace
        #[test]
        fn parsed_is_trimmed(s in " {0,3}[0-9A-Za-z]{1,12} {0,3}") {
            let id = StopId::parse("id", &s).unwrap();
            prop_assert_eq!(id.as_str(), s.trim());
        }
    }
}
