//! Domain types for the timetable client.
//!
//! These types validate their input at construction, so code that
//! receives them can rely on their shape.

mod date;
mod point;
mod route_key;

pub use date::{InvalidRouteDate, RouteDate};
pub use point::{Candidate, InvalidPointId, PointId, PointRecord};
pub use route_key::RouteKey;
