//! The point list: every country, region, settlement and station the
//! timetable service knows, with lookups and on-disk storage.

mod directory;
mod error;
mod store;

pub use directory::{PointDirectory, PointLevel};
pub use error::PointsError;
pub use store::PointStore;
