//! Configuration for the layout engine.

use serde::{Deserialize, Serialize};

/// Default distance (document units) under which successive positions are
/// chained into the same grid line.
pub const DEFAULT_MERGE_THRESHOLD: f64 = 50.0;

/// Which coordinates a gap re-flow is allowed to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReflowScope {
    /// Only the axis whose gap was edited is rewritten.
    #[default]
    RequestedAxis,
    /// Both axes are rewritten from the reconstructed grid, which also
    /// snaps loosely placed rows/columns on the orthogonal axis.
    BothAxes,
}

/// Configuration options for grid inference and re-flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Chaining distance for grid line clustering.
    pub merge_threshold: f64,
    /// Coordinates written by gap re-flow.
    pub reflow_scope: ReflowScope,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            merge_threshold: DEFAULT_MERGE_THRESHOLD,
            reflow_scope: ReflowScope::default(),
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid line merge threshold.
    #[must_use]
    pub fn with_merge_threshold(mut self, threshold: f64) -> Self {
        self.merge_threshold = threshold;
        self
    }

    /// Set the re-flow scope.
    #[must_use]
    pub fn with_reflow_scope(mut self, scope: ReflowScope) -> Self {
        self.reflow_scope = scope;
        self
    }
}
