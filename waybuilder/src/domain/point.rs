//! Point identifiers and point records.

use std::fmt;

/// Error returned when parsing an invalid point code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid point id: {reason}")]
pub struct InvalidPointId {
    reason: &'static str,
}

/// A timetable point code such as `c213` (settlement) or `s9600213` (station).
///
/// Codes are non-empty ASCII alphanumerics (underscores allowed).
///
/// # Examples
///
/// ```
/// use waybuilder::domain::PointId;
///
/// let moscow = PointId::parse("c213").unwrap();
/// assert_eq!(moscow.as_str(), "c213");
///
/// assert!(PointId::parse("").is_err());
/// assert!(PointId::parse("c 213").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(String);

impl PointId {
    /// Parse a point code, rejecting empty strings and anything that is
    /// not ASCII alphanumeric or `_`.
    pub fn parse(s: &str) -> Result<Self, InvalidPointId> {
        if s.is_empty() {
            return Err(InvalidPointId {
                reason: "must not be empty",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
            return Err(InvalidPointId {
                reason: "must be ASCII letters, digits or '_'",
            });
        }

        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PointId({})", self.0)
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of a point list: a country, region, settlement or station.
///
/// Both fields are optional because the remote list is not guaranteed to
/// be complete. Records missing either one are skipped by name resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointRecord {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl PointRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
        }
    }

    /// Borrowed `{id, name}` view, or `None` when either is missing or empty.
    pub fn candidate(&self) -> Option<Candidate<'_>> {
        let id = self.id.as_deref().filter(|s| !s.is_empty())?;
        let name = self.name.as_deref().filter(|s| !s.is_empty())?;
        Some(Candidate { id, name })
    }
}

/// A well-formed point borrowed from a caller-owned candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate<'a> {
    pub id: &'a str,
    pub name: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_ids() {
        assert!(PointId::parse("c213").is_ok());
        assert!(PointId::parse("s9600213").is_ok());
        assert!(PointId::parse("l225").is_ok());
        assert!(PointId::parse("RU").is_ok());
    }

    #[test]
    fn reject_bad_ids() {
        assert!(PointId::parse("").is_err());
        assert!(PointId::parse("c-213").is_err());
        assert!(PointId::parse(" c213").is_err());
        assert!(PointId::parse("с213").is_err()); // Cyrillic 'с'
    }

    #[test]
    fn display_and_debug() {
        let id = PointId::parse("c2").unwrap();
        assert_eq!(id.to_string(), "c2");
        assert_eq!(format!("{id:?}"), "PointId(c2)");
    }

    #[test]
    fn candidate_requires_both_fields() {
        assert!(PointRecord::new("c1", "Moscow").candidate().is_some());

        let no_id = PointRecord {
            id: None,
            name: Some("Moscow".into()),
        };
        assert!(no_id.candidate().is_none());

        let empty_name = PointRecord {
            id: Some("c1".into()),
            name: Some(String::new()),
        };
        assert!(empty_name.candidate().is_none());
    }
}
