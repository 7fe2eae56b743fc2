//! Travel dates as typed by the user.

use std::fmt;

use chrono::{Days, NaiveDate};

/// Error returned when a date argument cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date {input:?}: expected today, tomorrow or YYYY-MM-DD")]
pub struct InvalidRouteDate {
    input: String,
}

/// A calendar date for a route search.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use waybuilder::domain::RouteDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
///
/// assert_eq!(RouteDate::parse("today", today).unwrap().to_string(), "2024-03-15");
/// assert_eq!(RouteDate::parse("tomorrow", today).unwrap().to_string(), "2024-03-16");
/// assert_eq!(RouteDate::parse("2024-05-01", today).unwrap().to_string(), "2024-05-01");
/// assert!(RouteDate::parse("15.03.2024", today).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteDate(NaiveDate);

impl RouteDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse `today`, `tomorrow` (relative to `today`) or an ISO date.
    pub fn parse(s: &str, today: NaiveDate) -> Result<Self, InvalidRouteDate> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "today" => return Ok(Self(today)),
            "tomorrow" => {
                return today
                    .checked_add_days(Days::new(1))
                    .map(Self)
                    .ok_or_else(|| InvalidRouteDate {
                        input: s.to_string(),
                    });
            }
            _ => {}
        }

        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| InvalidRouteDate {
                input: s.to_string(),
            })
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// ISO `YYYY-MM-DD` form used on the wire and in cache keys.
    pub fn iso(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for RouteDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
