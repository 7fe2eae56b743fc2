//! Console rendering of point tables and route lists.

use std::io::{self, Write};

use crate::domain::PointRecord;
use crate::points::PointLevel;
use crate::rasp::{RouteQuery, RouteSearch, Segment, SegmentDetail, SegmentStop, Thread};

/// Width of the id column in point tables.
const COLUMN_WIDTH: usize = 20;

/// Indent of the detail lines under each route.
const INFO_INDENT: &str = "    ";

/// Column titles for a point table.
pub fn columns(level: PointLevel) -> (&'static str, &'static str) {
    match level {
        PointLevel::Country => ("country name", "country id"),
        PointLevel::Region => ("region name", "region id"),
        PointLevel::City => ("city name", "city id"),
        PointLevel::Station => ("station name", "station id"),
    }
}

/// Write a two-column table of points.
///
/// Records without an id or a name are left out. Returns the number of rows
/// written.
pub fn write_points<W: Write>(
    out: &mut W,
    level: PointLevel,
    records: &[PointRecord],
) -> io::Result<usize> {
    let (name_col, id_col) = columns(level);
    writeln!(out, "{name_col} {id_col:>width$}", width = COLUMN_WIDTH)?;

    let mut rows = 0;
    for candidate in records.iter().filter_map(PointRecord::candidate) {
        writeln!(
            out,
            "{}{:>width$}",
            candidate.name,
            candidate.id,
            width = COLUMN_WIDTH
        )?;
        rows += 1;
    }
    Ok(rows)
}

/// Write a route search result.
///
/// Returns `false` when there was nothing to list.
pub fn write_routes<W: Write>(
    out: &mut W,
    query: &RouteQuery,
    search: &RouteSearch,
) -> io::Result<bool> {
    let info = search.search.as_ref();
    let from = info
        .and_then(|s| s.from.as_ref())
        .map_or(query.from.as_str(), |p| p.display_name());
    let to = info
        .and_then(|s| s.to.as_ref())
        .map_or(query.to.as_str(), |p| p.display_name());
    let date = info
        .and_then(|s| s.date.clone())
        .unwrap_or_else(|| query.date.iso());

    writeln!(out, "Ways list")?;
    writeln!(out, "from: {from}")?;
    writeln!(out, "to: {to}")?;
    writeln!(out, "date: {date}")?;
    writeln!(out, "Result count: {}", search.segment_count())?;
    writeln!(out)?;

    if search.is_empty() {
        return Ok(false);
    }

    // Numbering runs on across both lists.
    let mut number = 0;

    if !search.interval_segments.is_empty() {
        writeln!(out, "Interval flights list:")?;
        for segment in &search.interval_segments {
            writeln!(out, "[{number}]")?;
            write_interval(out, segment)?;
            number += 1;
        }
        writeln!(out)?;
    }

    if !search.segments.is_empty() {
        writeln!(out, "Schedule flights list:")?;
        for segment in &search.segments {
            writeln!(out, "[{number}]")?;
            if segment.has_transfers {
                write_transfers(out, &segment.details)?;
            } else {
                write_scheduled(out, segment)?;
            }
            number += 1;
        }
        writeln!(out)?;
    }

    Ok(true)
}

fn text(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn stop_title(stop: Option<&SegmentStop>) -> &str {
    text(stop.and_then(|s| s.title.as_deref()))
}

fn stop_type(stop: Option<&SegmentStop>) -> &str {
    text(stop.and_then(|s| s.station_type.as_deref()))
}

fn write_interval<W: Write>(out: &mut W, segment: &Segment) -> io::Result<()> {
    let from = segment.from.as_ref();
    let to = segment.to.as_ref();
    writeln!(out, "{INFO_INDENT}departure date: {}", text(segment.start_date.as_deref()))?;
    writeln!(out, "{INFO_INDENT}departure point: {}", stop_title(from))?;
    writeln!(out, "{INFO_INDENT}departure station type: {}", stop_type(from))?;
    writeln!(out, "{INFO_INDENT}arrival point: {}", stop_title(to))?;
    writeln!(out, "{INFO_INDENT}arrival station type: {}", stop_type(to))?;
    writeln!(out)
}

fn write_thread<W: Write>(out: &mut W, thread: Option<&Thread>) -> io::Result<()> {
    writeln!(out, "{INFO_INDENT}{}", text(thread.and_then(|t| t.title.as_deref())))?;
    writeln!(out, "{INFO_INDENT}flight name: {}", text(thread.and_then(|t| t.number.as_deref())))?;
    writeln!(
        out,
        "{INFO_INDENT}transport type: {}",
        text(thread.and_then(|t| t.transport_type.as_deref()))
    )?;
    if let Some(vehicle) = thread.and_then(|t| t.vehicle.as_deref()) {
        writeln!(out, "{INFO_INDENT}transport model: {vehicle}")?;
    }
    Ok(())
}

fn write_scheduled<W: Write>(out: &mut W, segment: &Segment) -> io::Result<()> {
    let from = segment.from.as_ref();
    let to = segment.to.as_ref();
    write_thread(out, segment.thread.as_ref())?;
    writeln!(out, "{INFO_INDENT}departure date: {}", text(segment.departure.as_deref()))?;
    writeln!(out, "{INFO_INDENT}arrival date: {}", text(segment.arrival.as_deref()))?;
    writeln!(out, "{INFO_INDENT}departure point: {}", stop_title(from))?;
    writeln!(out, "{INFO_INDENT}departure station type: {}", stop_type(from))?;
    writeln!(out, "{INFO_INDENT}arrival point: {}", stop_title(to))?;
    writeln!(out, "{INFO_INDENT}arrival station type: {}", stop_type(to))?;
    writeln!(out)
}

fn write_transfers<W: Write>(out: &mut W, details: &[SegmentDetail]) -> io::Result<()> {
    for detail in details {
        if detail.is_transfer {
            writeln!(
                out,
                "{INFO_INDENT}transfer point ==> {}",
                stop_title(detail.transfer_point.as_ref())
            )?;
            continue;
        }

        write_thread(out, detail.thread.as_ref())?;
        writeln!(out, "{INFO_INDENT}departure date: {}", text(detail.departure.as_deref()))?;
        writeln!(out, "{INFO_INDENT}arrival date: {}", text(detail.arrival.as_deref()))?;
        writeln!(out, "{INFO_INDENT}departure point: {}", stop_title(detail.from.as_ref()))?;
        writeln!(out, "{INFO_INDENT}arrival point: {}", stop_title(detail.to.as_ref()))?;
        writeln!(out)?;
    }
    Ok(())
}
