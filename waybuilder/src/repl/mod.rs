//! Line-oriented console over the timetable client.
//!
//! Reads one command per line, runs it against the point list and the
//! cached route client, and prints the results.

mod command;
mod output;
mod session;


pub use command::{ChangeSetting, Command, FindTarget, HELP_TEXT, ListTarget, ScanTarget};
pub use output::{columns, write_points, write_routes};
pub use session::{Flow, PROMPT, Session};
