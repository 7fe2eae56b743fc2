//! In-memory view of the point hierarchy.

use std::fmt;

use crate::domain::PointRecord;
use crate::rasp::{Country, NamedPoint, Region, Settlement, StationsList};

/// A level of the point hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointLevel {
    Country,
    Region,
    City,
    Station,
}

impl fmt::Display for PointLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PointLevel::Country => "country",
            PointLevel::Region => "region",
            PointLevel::City => "city",
            PointLevel::Station => "station",
        })
    }
}

/// The country → region → settlement → station hierarchy, plus flattened
/// lists of every settlement and station for name resolution.
#[derive(Debug, Clone, Default)]
pub struct PointDirectory {
    list: StationsList,
    settlements: Vec<PointRecord>,
    stations: Vec<PointRecord>,
}

impl PointDirectory {
    pub fn from_list(list: StationsList) -> Self {
        let settlements = all_settlements(&list).map(NamedPoint::to_record).collect();
        let stations = all_settlements(&list)
            .flat_map(|s| &s.stations)
            .map(NamedPoint::to_record)
            .collect();

        Self {
            list,
            settlements,
            stations,
        }
    }

    /// The raw list, as stored on disk.
    pub fn list(&self) -> &StationsList {
        &self.list
    }

    /// True if nothing has been scanned yet.
    pub fn is_empty(&self) -> bool {
        self.list.countries.is_empty()
    }

    pub fn countries(&self) -> Vec<PointRecord> {
        records(&self.list.countries)
    }

    /// Regions of a country, or `None` if the country is unknown.
    pub fn regions(&self, country_id: &str) -> Option<Vec<PointRecord>> {
        self.country(country_id).map(|c| records(&c.regions))
    }

    pub fn settlements(&self, country_id: &str, region_id: &str) -> Option<Vec<PointRecord>> {
        self.region(country_id, region_id)
            .map(|r| records(&r.settlements))
    }

    pub fn stations(
        &self,
        country_id: &str,
        region_id: &str,
        city_id: &str,
    ) -> Option<Vec<PointRecord>> {
        self.region(country_id, region_id)
            .and_then(|r| by_id(&r.settlements, city_id))
            .map(|s| records(&s.stations))
    }

    /// Points on one level whose name contains `text`.
    ///
    /// Matching is a plain case-sensitive substring test. Points without an
    /// id or a name are never returned.
    pub fn find(&self, level: PointLevel, text: &str) -> Vec<PointRecord> {
        let countries = &self.list.countries;
        let regions = || countries.iter().flat_map(|c| &c.regions);

        match level {
            PointLevel::Country => filter_named(countries.iter(), text),
            PointLevel::Region => filter_named(regions(), text),
            PointLevel::City => filter_named(all_settlements(&self.list), text),
            PointLevel::Station => filter_named(
                all_settlements(&self.list).flat_map(|s| &s.stations),
                text,
            ),
        }
    }

    /// Every settlement, in hierarchy order.
    pub fn settlement_records(&self) -> &[PointRecord] {
        &self.settlements
    }

    /// Every station, in hierarchy order.
    pub fn station_records(&self) -> &[PointRecord] {
        &self.stations
    }

    fn country(&self, id: &str) -> Option<&Country> {
        by_id(&self.list.countries, id)
    }

    fn region(&self, country_id: &str, region_id: &str) -> Option<&Region> {
        self.country(country_id)
            .and_then(|c| by_id(&c.regions, region_id))
    }
}

fn all_settlements(list: &StationsList) -> impl Iterator<Item = &Settlement> {
    list.countries
        .iter()
        .flat_map(|c| &c.regions)
        .flat_map(|r| &r.settlements)
}

fn by_id<'a, P: NamedPoint>(points: &'a [P], id: &str) -> Option<&'a P> {
    points.iter().find(|p| p.id() == Some(id))
}

fn records<P: NamedPoint>(points: &[P]) -> Vec<PointRecord> {
    points.iter().map(NamedPoint::to_record).collect()
}

fn filter_named<'a, P, I>(points: I, text: &str) -> Vec<PointRecord>
where
    P: NamedPoint + 'a,
    I: Iterator<Item = &'a P>,
{
    points
        .filter(|p| p.id().is_some())
        .filter(|p| p.title().is_some_and(|t| t.contains(text)))
        .map(NamedPoint::to_record)
        .collect()
}
