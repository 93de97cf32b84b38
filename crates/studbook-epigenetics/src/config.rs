//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Generations walked above each parent by default (great-great-grandparents
/// of the foal's parents).
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Share of ancestral results a discipline must exceed to count as a
/// specialization.
pub const DEFAULT_SPECIALIZATION_THRESHOLD: f64 = 0.6;

/// Ancestors that must contribute results before a specialization counts.
pub const DEFAULT_MIN_CONTRIBUTING_ANCESTORS: usize = 3;

/// Tunables of the epigenetic trait engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Generations walked above each parent
    pub max_depth: usize,
    /// Strength a discipline must strictly exceed to be a specialization
    pub specialization_threshold: f64,
    /// Minimum number of ancestors with at least one result
    pub min_contributing_ancestors: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            specialization_threshold: DEFAULT_SPECIALIZATION_THRESHOLD,
            min_contributing_ancestors: DEFAULT_MIN_CONTRIBUTING_ANCESTORS,
        }
    }
}

impl EngineConfig {
    /// Override the traversal depth (builder pattern).
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
