//! Layout engine for board elements.
//!
//! Infers the implicit grid behind freely placed elements, reports the
//! spacing of a selection, re-flows a selection to a new spacing and aligns
//! selections. All functions are pure: they take elements by reference and
//! return new ones, never changing identifiers, sizes or styles.

pub mod align;
pub mod config;
pub mod gap;
pub mod grid;

pub use align::{align, AlignMode};
pub use config::{LayoutConfig, ReflowScope, DEFAULT_MERGE_THRESHOLD};
pub use gap::{determine_grid_gaps, modified_position_by_axis_and_gap, Gap};
pub use grid::{find_grid_lines, nearest_line, snap_to_grid, snap_to_inferred_grid};

use serde::{Deserialize, Serialize};

/// A document axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

impl Axis {
    /// The other axis.
    #[must_use]
    pub const fn orthogonal(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

impl std::str::FromStr for Axis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" | "X" => Ok(Self::X),
            "y" | "Y" => Ok(Self::Y),
            other => Err(format!("unknown axis: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_round_trip() {
        assert_eq!("x".parse::<Axis>(), Ok(Axis::X));
        assert_eq!(Axis::Y.to_string(), "y");
        assert_eq!(Axis::X.orthogonal(), Axis::Y);
        assert!("z".parse::<Axis>().is_err());
    }
}
