//! Approximate point-name resolution.
//!
//! Users type place names the way they remember them ("Rostov on Don",
//! "moskva"). This module scores such input against the known settlements
//! and stations with a Damerau-Levenshtein cost and either picks the single
//! obvious point or returns a short ranked list to choose from.

mod config;
mod cost;
mod resolver;
mod top_k;

pub use config::{DEFAULT_MAX_RESULTS, ResolverConfig};
pub use cost::{EditCosts, IGNORED_CHARS, edit_cost, edit_cost_with, normalize, normalized_cost};
pub use resolver::{PointResolver, RankedMatch, Ranking, Resolution, Resolved, Suggestions};
pub use top_k::BoundedTopK;
