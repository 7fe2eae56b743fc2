//! Timetable API response DTOs.
//!
//! These map directly onto the JSON returned by the `stations_list` and
//! `search` endpoints. The service leaves fields out freely, so nearly
//! everything is optional or defaulted.

use serde::{Deserialize, Serialize};

use crate::domain::PointRecord;

/// Code block attached to every point.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Codes {
    pub yandex_code: Option<String>,
    pub esr_code: Option<String>,
}

/// Response from `stations_list`: the whole point hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StationsList {
    #[serde(default)]
    pub countries: Vec<Country>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Country {
    pub title: Option<String>,
    #[serde(default)]
    pub codes: Codes,
    #[serde(default)]
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Region {
    pub title: Option<String>,
    #[serde(default)]
    pub codes: Codes,
    #[serde(default)]
    pub settlements: Vec<Settlement>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settlement {
    pub title: Option<String>,
    #[serde(default)]
    pub codes: Codes,
    #[serde(default)]
    pub stations: Vec<Station>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Station {
    pub title: Option<String>,
    #[serde(default)]
    pub codes: Codes,
    pub station_type: Option<String>,
    pub transport_type: Option<String>,
    pub direction: Option<String>,
}

/// Anything in the hierarchy that can be offered as a named point.
pub trait NamedPoint {
    fn title(&self) -> Option<&str>;
    fn codes(&self) -> &Codes;

    fn id(&self) -> Option<&str> {
        self.codes().yandex_code.as_deref()
    }

    fn to_record(&self) -> PointRecord {
        PointRecord {
            id: self.id().map(str::to_string),
            name: self.title().map(str::to_string),
        }
    }
}

macro_rules! impl_named_point {
    ($($ty:ty),*) => {
        $(impl NamedPoint for $ty {
            fn title(&self) -> Option<&str> {
                self.title.as_deref()
            }

            fn codes(&self) -> &Codes {
                &self.codes
            }
        })*
    };
}

impl_named_point!(Country, Region, Settlement, Station);

/// Response from `search`, or several pages of it merged together.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RouteSearch {
    pub pagination: Option<Pagination>,
    pub search: Option<SearchInfo>,
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub interval_segments: Vec<Segment>,
}

impl RouteSearch {
    /// Total number of results reported by the service.
    pub fn total(&self) -> usize {
        self.pagination.as_ref().map_or(0, |p| p.total)
    }

    /// Number of segments actually held.
    pub fn segment_count(&self) -> usize {
        self.segments.len() + self.interval_segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segment_count() == 0
    }

    /// Append the segments of a later page.
    pub fn merge_page(&mut self, page: RouteSearch) {
        self.segments.extend(page.segments);
        self.interval_segments.extend(page.interval_segments);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Pagination {
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

/// Echo of the request: resolved endpoints and date.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SearchInfo {
    pub from: Option<SearchPoint>,
    pub to: Option<SearchPoint>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SearchPoint {
    pub code: Option<String>,
    pub title: Option<String>,
    pub popular_title: Option<String>,
}

impl SearchPoint {
    /// Best display name: popular title, then plain title.
    pub fn display_name(&self) -> &str {
        self.popular_title
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.title.as_deref())
            .unwrap_or("?")
    }
}

/// A station at either end of a segment.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SegmentStop {
    pub code: Option<String>,
    pub title: Option<String>,
    pub station_type: Option<String>,
    pub transport_type: Option<String>,
}

/// The scheduled run ("thread") a segment belongs to.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Thread {
    pub uid: Option<String>,
    pub number: Option<String>,
    pub title: Option<String>,
    pub transport_type: Option<String>,
    pub vehicle: Option<String>,
}

/// One route result: a direct run or a journey with transfers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Segment {
    pub thread: Option<Thread>,
    pub from: Option<SegmentStop>,
    pub to: Option<SegmentStop>,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub start_date: Option<String>,
    pub duration: Option<f64>,
    #[serde(default)]
    pub has_transfers: bool,
    pub departure_from: Option<SegmentStop>,
    pub arrival_to: Option<SegmentStop>,
    #[serde(default)]
    pub details: Vec<SegmentDetail>,
}

/// A leg or a change inside a journey with transfers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SegmentDetail {
    #[serde(default)]
    pub is_transfer: bool,
    pub transfer_point: Option<SegmentStop>,
    pub thread: Option<Thread>,
    pub from: Option<SegmentStop>,
    pub to: Option<SegmentStop>,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub duration: Option<f64>,
}
