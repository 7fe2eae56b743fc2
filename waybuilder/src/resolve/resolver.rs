//! Turning a typed place name into a point id.
//!
//! A query is scored against settlements first and stations second. An
//! exact match (cost 0) ends the search immediately; otherwise the best
//! few of each set are returned so the user can pick one.

use std::cmp::Ordering;

use tracing::debug;

use crate::domain::{Candidate, PointRecord};

use super::config::ResolverConfig;
use super::cost::{normalize, normalized_cost};
use super::top_k::BoundedTopK;

/// A candidate together with its cost against the query.
///
/// Ordered by cost, then by position in the candidate set.
#[derive(Debug, Clone, Copy)]
pub struct RankedMatch<'a> {
    pub cost: usize,
    pub candidate: Candidate<'a>,
    position: usize,
}

impl RankedMatch<'_> {
    /// Index of the candidate in the set it came from.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl PartialEq for RankedMatch<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankedMatch<'_> {}

impl PartialOrd for RankedMatch<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankedMatch<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .cmp(&other.cost)
            .then_with(|| self.position.cmp(&other.position))
    }
}

/// Result of scoring one candidate set.
#[derive(Debug, Clone)]
pub struct Ranking<'a> {
    /// Set when some candidate matched with cost 0; scanning stopped there.
    pub exact: Option<Candidate<'a>>,
    /// Best matches, lowest cost first.
    pub matches: Vec<RankedMatch<'a>>,
    /// Well-formed candidates that were scored.
    pub scored: usize,
    /// Candidates skipped for a missing id or name.
    pub skipped: usize,
    first: Option<Candidate<'a>>,
}

/// Suggestions offered when no single point could be chosen.
#[derive(Debug, Clone, Default)]
pub struct Suggestions<'a> {
    pub settlements: Vec<RankedMatch<'a>>,
    pub stations: Vec<RankedMatch<'a>>,
}

impl<'a> Suggestions<'a> {
    pub fn len(&self) -> usize {
        self.settlements.len() + self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All suggestions in display order: settlements, then stations.
    pub fn iter(&self) -> impl Iterator<Item = &RankedMatch<'a>> {
        self.settlements.iter().chain(self.stations.iter())
    }

    /// Pick a suggestion by its display number.
    pub fn choose(&self, index: usize) -> Option<Candidate<'a>> {
        self.iter().nth(index).map(|m| m.candidate)
    }
}

/// Outcome of resolving a query.
#[derive(Debug, Clone)]
pub enum Resolution<'a> {
    /// Exactly one point fits.
    Unique(Candidate<'a>),
    /// Several points could fit; the caller must choose.
    Ambiguous(Suggestions<'a>),
    /// There was nothing to match against.
    NoMatch,
}

/// A resolution plus counters describing the work done.
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    pub resolution: Resolution<'a>,
    pub scored: usize,
    pub skipped: usize,
}

/// Resolves place names against settlement and station lists.
///
/// Holds only configuration; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct PointResolver {
    config: ResolverConfig,
}

impl PointResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Score `query` against a single candidate set.
    pub fn rank<'a>(&self, query: &str, candidates: &'a [PointRecord]) -> Ranking<'a> {
        self.rank_normalized(&normalize(query), candidates)
    }

    /// Resolve `query`, trying settlements before stations.
    pub fn resolve<'a>(
        &self,
        query: &str,
        settlements: &'a [PointRecord],
        stations: &'a [PointRecord],
    ) -> Resolved<'a> {
        let query = normalize(query);

        let by_settlement = self.rank_normalized(&query, settlements);
        if let Some(exact) = by_settlement.exact {
            return Resolved {
                resolution: Resolution::Unique(exact),
                scored: by_settlement.scored,
                skipped: by_settlement.skipped,
            };
        }

        let by_station = self.rank_normalized(&query, stations);
        let scored = by_settlement.scored + by_station.scored;
        let skipped = by_settlement.skipped + by_station.skipped;

        let resolution = if let Some(exact) = by_station.exact {
            Resolution::Unique(exact)
        } else if scored == 0 {
            Resolution::NoMatch
        } else if scored == 1 {
            match by_settlement.first.or(by_station.first) {
                Some(only) => Resolution::Unique(only),
                None => Resolution::NoMatch,
            }
        } else {
            let suggestions = Suggestions {
                settlements: by_settlement.matches,
                stations: by_station.matches,
            };
            // A zero K keeps nothing to choose from.
            if suggestions.is_empty() {
                Resolution::NoMatch
            } else {
                Resolution::Ambiguous(suggestions)
            }
        };

        debug!(scored, skipped, "resolved point name");

        Resolved {
            resolution,
            scored,
            skipped,
        }
    }

    fn rank_normalized<'a>(&self, query: &[char], candidates: &'a [PointRecord]) -> Ranking<'a> {
        let mut top = BoundedTopK::new(self.config.max_results);
        let mut scored = 0;
        let mut skipped = 0;
        let mut first = None;

        for (position, record) in candidates.iter().enumerate() {
            let Some(candidate) = record.candidate() else {
                skipped += 1;
                continue;
            };

            scored += 1;
            first.get_or_insert(candidate);

            let cost = normalized_cost(query, &normalize(candidate.name), &self.config.costs);
            if cost == 0 {
                return Ranking {
                    exact: Some(candidate),
                    matches: vec![RankedMatch {
                        cost,
                        candidate,
                        position,
                    }],
                    scored,
                    skipped,
                    first,
                };
            }

            top.push(RankedMatch {
                cost,
                candidate,
                position,
            });
        }

        Ranking {
            exact: None,
            matches: top.into_sorted_vec(),
            scored,
            skipped,
            first,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(items: &[(&str, &str)]) -> Vec<PointRecord> {
        items
            .iter()
            .map(|(id, name)| PointRecord::new(*id, *name))
            .collect()
    }

    fn ids(matches: &[RankedMatch<'_>]) -> Vec<String> {
        matches.iter().map(|m| m.candidate.id.to_string()).collect()
    }

    #[test]
    fn moscow_ranks_ahead_of_moskva_and_paris() {
        let cities = records(&[("s1", "Moscow"), ("s2", "Moskva"), ("s3", "Paris")]);
        let resolver = PointResolver::default();

        let resolved = resolver.resolve("moscow", &cities, &[]);
        let Resolution::Ambiguous(suggestions) = resolved.resolution else {
            panic!("expected suggestions");
        };

        assert_eq!(ids(&suggestions.settlements), vec!["s1", "s2", "s3"]);
        let costs: Vec<_> = suggestions.settlements.iter().map(|m| m.cost).collect();
        assert_eq!(costs[0], 1);
        assert!(costs[1] < costs[2]);
    }

    #[test]
    fn exact_match_short_circuits() {
        let cities = records(&[("c1", "Omsk"), ("c2", "Tomsk"), ("c3", "Tomsk")]);
        let resolver = PointResolver::default();

        let resolved = resolver.resolve("Tomsk", &cities, &[]);
        match resolved.resolution {
            Resolution::Unique(c) => assert_eq!(c.id, "c2"),
            other => panic!("expected unique match, got {other:?}"),
        }
        // Scanning stopped at the first exact hit.
        assert_eq!(resolved.scored, 2);
    }

    #[test]
    fn exact_match_ignores_punctuation() {
        let cities = records(&[("c1", "Rostov-on-Don")]);
        let stations = records(&[("s1", "Rostov Glavny")]);
        let resolver = PointResolver::default();

        let resolved = resolver.resolve("Rostov on Don", &cities, &stations);
        assert!(matches!(resolved.resolution, Resolution::Unique(c) if c.id == "c1"));
    }

    #[test]
    fn station_exact_match_after_settlements() {
        let cities = records(&[("c1", "Kazan"), ("c2", "Samara")]);
        let stations = records(&[("s9", "Kazan Passazhirskaya")]);
        let resolver = PointResolver::default();

        let resolved = resolver.resolve("Kazan Passazhirskaya", &cities, &stations);
        assert!(matches!(resolved.resolution, Resolution::Unique(c) if c.id == "s9"));
    }

    #[test]
    fn single_candidate_is_chosen() {
        let stations = records(&[("s1", "Vnukovo")]);
        let resolver = PointResolver::default();

        let resolved = resolver.resolve("Vnukov", &[], &stations);
        assert!(matches!(resolved.resolution, Resolution::Unique(c) if c.id == "s1"));
    }

    #[test]
    fn single_candidate_is_chosen_even_with_zero_k() {
        let cities = records(&[("c1", "Sochi")]);
        let resolver = PointResolver::new(ResolverConfig::new(0));

        let resolved = resolver.resolve("Soci", &cities, &[]);
        assert!(matches!(resolved.resolution, Resolution::Unique(c) if c.id == "c1"));
    }

    #[test]
    fn zero_k_with_several_candidates_is_no_match() {
        let cities = records(&[("c1", "Omsk"), ("c2", "Tomsk")]);
        let resolver = PointResolver::new(ResolverConfig::new(0));

        let resolved = resolver.resolve("Omk", &cities, &[]);
        assert!(matches!(resolved.resolution, Resolution::NoMatch));
        assert_eq!(resolved.scored, 2);
    }

    #[test]
    fn no_candidates_is_no_match() {
        let resolver = PointResolver::default();
        let resolved = resolver.resolve("anything", &[], &[]);
        assert!(matches!(resolved.resolution, Resolution::NoMatch));
        assert_eq!(resolved.scored, 0);
    }

    #[test]
    fn empty_query_still_ranks() {
        let cities = records(&[("c1", "Ufa"), ("c2", "Perm"), ("c3", "Orenburg")]);
        let resolver = PointResolver::default();

        let resolved = resolver.resolve("", &cities, &[]);
        let Resolution::Ambiguous(s) = resolved.resolution else {
            panic!("expected suggestions");
        };
        assert_eq!(ids(&s.settlements), vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn malformed_candidates_are_skipped_and_counted() {
        let cities = vec![
            PointRecord {
                id: None,
                name: Some("Tver".into()),
            },
            PointRecord {
                id: Some("c2".into()),
                name: None,
            },
            PointRecord::new("c3", "Tula"),
            PointRecord::new("c4", "Tuva"),
        ];
        let resolver = PointResolver::default();

        let resolved = resolver.resolve("Tver", &cities, &[]);
        assert_eq!(resolved.skipped, 2);
        assert_eq!(resolved.scored, 2);
        let Resolution::Ambiguous(s) = resolved.resolution else {
            panic!("malformed Tver must not match");
        };
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn only_malformed_candidates_is_no_match() {
        let cities = vec![PointRecord::default(), PointRecord::default()];
        let resolver = PointResolver::default();
        let resolved = resolver.resolve("x", &cities, &[]);
        assert!(matches!(resolved.resolution, Resolution::NoMatch));
        assert_eq!(resolved.skipped, 2);
    }

    #[test]
    fn keeps_only_k_best_per_set() {
        let names: Vec<(String, String)> = (0..30)
            .map(|i| (format!("c{i}"), format!("{}x", "a".repeat(i))))
            .collect();
        let cities: Vec<PointRecord> = names
            .iter()
            .rev()
            .map(|(id, name)| PointRecord::new(id.clone(), name.clone()))
            .collect();
        let resolver = PointResolver::new(ResolverConfig::new(4));

        let ranking = resolver.rank("aaaaa", &cities);
        assert_eq!(ranking.scored, 30);
        let costs: Vec<_> = ranking.matches.iter().map(|m| m.cost).collect();
        assert_eq!(costs, vec![1, 1, 2, 2]);
        // Ties keep input order: "aaaaax" (c5) comes before "aaaax" (c4)
        // because the set was reversed.
        assert_eq!(ids(&ranking.matches)[..2], ["c5", "c4"]);
    }

    #[test]
    fn ties_are_broken_by_input_order() {
        let cities = records(&[("c1", "Abc"), ("c2", "Abd"), ("c3", "Abe")]);
        let resolver = PointResolver::default();
        let ranking = resolver.rank("Abz", &cities);
        assert_eq!(ids(&ranking.matches), vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn suggestions_number_settlements_then_stations() {
        let cities = records(&[("c1", "Pskov"), ("c2", "Penza")]);
        let stations = records(&[("s1", "Pskov Passazhirsky")]);
        let resolver = PointResolver::default();

        let resolved = resolver.resolve("Psko", &cities, &stations);
        let Resolution::Ambiguous(s) = resolved.resolution else {
            panic!("expected suggestions");
        };
        assert_eq!(s.len(), 3);
        assert_eq!(s.choose(0).map(|c| c.id), Some("c1"));
        assert_eq!(s.choose(2).map(|c| c.id), Some("s1"));
        assert_eq!(s.choose(3), None);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let cities = records(&[("c1", "Kaluga"), ("c2", "Kazan"), ("c3", "Kursk")]);
        let stations = records(&[("s1", "Kazansky"), ("s2", "Kurskaya")]);
        let resolver = PointResolver::default();

        let snapshot = |r: &Resolved<'_>| match &r.resolution {
            Resolution::Ambiguous(s) => s
                .iter()
                .map(|m| (m.candidate.id.to_string(), m.cost))
                .collect::<Vec<_>>(),
            other => panic!("unexpected {other:?}"),
        };

        let first = snapshot(&resolver.resolve("Kasan", &cities, &stations));
        for _ in 0..5 {
            assert_eq!(snapshot(&resolver.resolve("Kasan", &cities, &stations)), first);
        }
    }
}
