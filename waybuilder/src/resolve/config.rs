//! Configuration for point-name resolution.

use super::cost::EditCosts;

/// Default number of ranked suggestions kept per candidate set.
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Configuration parameters for [`PointResolver`](super::PointResolver).
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// How many ranked candidates to keep from each candidate set.
    pub max_results: usize,

    /// Edit operation costs.
    pub costs: EditCosts,
}

impl ResolverConfig {
    pub fn new(max_results: usize) -> Self {
        Self {
            max_results,
            costs: EditCosts::default(),
        }
    }

    pub fn with_costs(mut self, costs: EditCosts) -> Self {
        self.costs = costs;
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESULTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ResolverConfig::default();
        assert_eq!(config.max_results, 10);
        assert_eq!(config.costs, EditCosts::default());
    }

    #[test]
    fn custom_config() {
        let costs = EditCosts {
            insert: 2,
            ..EditCosts::default()
        };
        let config = ResolverConfig::new(3).with_costs(costs);
        assert_eq!(config.max_results, 3);
        assert_eq!(config.costs.insert, 2);
    }
}
