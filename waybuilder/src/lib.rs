//! Console client for a public transport timetable service.
//!
//! Answers: "how do I get from this place to that one on this day?"
//! Place names may be typed loosely; they are matched against the known
//! settlements and stations, and route searches are cached in memory.

pub mod cache;
pub mod config;
pub mod domain;
pub mod logging;
pub mod points;
pub mod rasp;
pub mod repl;
pub mod resolve;
