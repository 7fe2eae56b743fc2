//! Client for the remote timetable ("rasp") service.
//!
//! Key characteristics of the service:
//! - Points (countries, regions, settlements, stations) are identified by
//!   opaque codes such as `c213` or `s9600213`
//! - The full point hierarchy is served by one large `stations_list` call,
//!   which is why it is stored on disk between runs
//! - Route searches are paginated and comparatively slow, which is why
//!   their results are cached in memory

mod client;
mod error;
mod types;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_LANG, DEFAULT_PAGE_SIZE, DEFAULT_VERSION, RaspApi, RaspClient,
    RaspConfig, RouteQuery,
};
pub use error::RaspError;
pub use types::{
    Codes, Country, NamedPoint, Pagination, Region, RouteSearch, SearchInfo, SearchPoint, Segment,
    SegmentDetail, SegmentStop, Settlement, Station, StationsList, Thread,
};
