//! Cache fingerprint for route searches.

use std::fmt;

use super::{PointId, RouteDate};

/// Fingerprint of a route search: origin id, destination id and ISO date
/// concatenated with no separator (`c213` + `c2` + `2024-03-15`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey(String);

impl RouteKey {
    pub fn new(from: &PointId, to: &PointId, date: RouteDate) -> Self {
        Self(format!("{}{}{}", from.as_str(), to.as_str(), date.iso()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
