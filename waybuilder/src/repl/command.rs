//! Console command grammar.
//!
//! Each input line is split on whitespace and parsed with `clap`, with the
//! binary name, help flags and version flag disabled so that only the
//! commands below are accepted.

use clap::{Parser, Subcommand};

use crate::points::PointLevel;

#[derive(Debug, Parser)]
#[command(
    name = "waybuilder",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show the command summary
    Help,

    /// Leave the console
    Quit,

    /// Write the config file and the point list to disk
    Save,

    /// Show where this run is logging to
    Logdir,

    /// Change a session setting
    Change {
        #[command(subcommand)]
        setting: ChangeSetting,
    },

    /// Download data from the timetable service
    Scan {
        #[command(subcommand)]
        target: ScanTarget,
    },

    /// List points by id, or routes between two points
    List {
        #[command(subcommand)]
        target: ListTarget,
    },

    /// Search points by name
    Find {
        #[command(subcommand)]
        target: FindTarget,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ChangeSetting {
    /// Response language, e.g. `ru_RU`
    Lang { lang: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ScanTarget {
    /// Fetch the full point list
    Points,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ListTarget {
    Country,
    Region {
        country: String,
    },
    City {
        country: String,
        region: String,
    },
    Station {
        country: String,
        region: String,
        city: String,
    },
    /// Routes between two point ids
    Way {
        from: String,
        to: String,
        /// `today`, `tomorrow` or `YYYY-MM-DD`
        date: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum FindTarget {
    Country {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    Region {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    City {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    Station {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Build a route by place names, interactively
    Way,
}

impl FindTarget {
    /// The level and search text of a point search, or `None` for `way`.
    pub fn point_search(&self) -> Option<(PointLevel, String)> {
        let (level, words) = match self {
            FindTarget::Country { text } => (PointLevel::Country, text),
            FindTarget::Region { text } => (PointLevel::Region, text),
            FindTarget::City { text } => (PointLevel::City, text),
            FindTarget::Station { text } => (PointLevel::Station, text),
            FindTarget::Way => return None,
        };
        Some((level, words.join(" ")))
    }
}

impl Command {
    /// Parse one input line.
    pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
        CommandLine::try_parse_from(line.split_whitespace()).map(|cl| cl.command)
    }
}

pub const HELP_TEXT: &str = "\
commands:
  help                                        show this summary
  quit                                        leave the console
  save                                        write config and point list to disk
  logdir                                      show the log file path
  change lang <lang>                          set the response language (e.g. ru_RU)
  scan points                                 download the point list
  list country                                list countries
  list region <country>                       list regions of a country
  list city <country> <region>                list cities of a region
  list station <country> <region> <city>      list stations of a city
  list way <from> <to> [date]                 list routes between two point ids
  find country|region|city|station <text>     search points whose name contains <text>
  find way                                    build a route by place names
dates: today, tomorrow or YYYY-MM-DD (default today)";
