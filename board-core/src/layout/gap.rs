//! Gap determination and gap re-flow.
//!
//! Naming follows the gap editor: the *row gap* is the horizontal space
//! between neighbouring columns of a row, the *column gap* is the vertical
//! space between neighbouring rows of a column.

use serde::{Deserialize, Serialize};

use crate::element::Placed;
use crate::layout::grid::{snap_to_inferred_grid, GridKey, SparseGrid};
use crate::layout::{Axis, LayoutConfig, ReflowScope};

/// Uniform spacing of a selection.
///
/// `None` on an axis means the spacing on that axis is not uniform and has
/// no single value. It is distinct from `Some(0.0)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gap {
    /// Horizontal spacing between columns.
    pub row_gap: Option<f64>,
    /// Vertical spacing between rows.
    pub column_gap: Option<f64>,
}

impl Gap {
    /// Both gaps zero, reported for selections too small to have spacing.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            row_gap: Some(0.0),
            column_gap: Some(0.0),
        }
    }

    /// The gap that controls spacing along `axis`.
    #[must_use]
    pub const fn along(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::X => self.row_gap,
            Axis::Y => self.column_gap,
        }
    }
}

/// Reduce gap candidates to a single value if they agree.
///
/// Candidates are rounded to whole units first so that drift from repeated
/// dragging does not read as non-uniform spacing. No candidates at all means
/// there is nothing to disagree about and reads as zero.
#[allow(clippy::float_cmp)] // rounded values are integral
fn consistent_gap(candidates: &[f64]) -> Option<f64> {
    let mut rounded = candidates.iter().map(|gap| gap.round());
    let Some(first) = rounded.next() else {
        return Some(0.0);
    };
    rounded.all(|gap| gap == first).then_some(first)
}

/// Derive the row and column gap of a set of elements.
///
/// Elements are snapped to their inferred grid, grouped into occupied rows
/// and columns, and the spacing between each pair of adjacent rows (and
/// columns) is collected. Rotation is not taken into account.
#[must_use]
pub fn determine_grid_gaps<P: Placed>(shapes: &[P], config: &LayoutConfig) -> Gap {
    if shapes.len() < 2 {
        return Gap::zero();
    }

    let snapped = snap_to_inferred_grid(shapes, config);
    let grid = SparseGrid::build(&snapped);

    let row_candidates = grid.gap_candidates(Axis::X);
    let column_candidates = grid.gap_candidates(Axis::Y);
    let gap = Gap {
        row_gap: consistent_gap(&row_candidates),
        column_gap: consistent_gap(&column_candidates),
    };

    tracing::debug!(
        elements = shapes.len(),
        grid = ?grid.dimensions(),
        ?row_candidates,
        ?column_candidates,
        ?gap,
        "determined grid gaps"
    );
    gap
}

/// Re-flow `selected` so that the gap along `axis` equals `gap_value`.
///
/// The gap on the other axis keeps its current value (zero when it is not
/// uniform). Elements are snapped to their inferred grid, every column is
/// as wide as its widest member and every row as tall as its tallest, and
/// rows/columns are laid out from the first one onwards. Only coordinates
/// change; which coordinates is governed by [`LayoutConfig::reflow_scope`].
///
/// The result has the same elements in the same order. Fewer than two
/// elements are returned unchanged. The input is never modified.
///
/// Applying the same gap twice gives the same positions as applying it once
/// as long as every re-flowed pitch (largest extent of a row or column plus
/// the gap) is at least [`LayoutConfig::merge_threshold`]. Below that the
/// next inference merges neighbouring lines into one.
#[must_use]
pub fn modified_position_by_axis_and_gap<P: Placed + Clone>(
    selected: &[P],
    gap_value: f64,
    axis: Axis,
    config: &LayoutConfig,
) -> Vec<P> {
    if selected.len() < 2 {
        return selected.to_vec();
    }

    let current = determine_grid_gaps(selected, config);
    let (row_gap, column_gap) = match axis {
        Axis::X => (gap_value, current.column_gap.unwrap_or(0.0)),
        Axis::Y => (current.row_gap.unwrap_or(0.0), gap_value),
    };

    let snapped = snap_to_inferred_grid(selected, config);
    let grid = SparseGrid::build(&snapped);
    let column_x = grid.pack(Axis::X, row_gap);
    let row_y = grid.pack(Axis::Y, column_gap);

    tracing::debug!(
        ?axis,
        row_gap,
        column_gap,
        grid = ?grid.dimensions(),
        "re-flowing selection"
    );

    selected
        .iter()
        .zip(&snapped)
        .map(|(original, snap)| {
            let target = (
                column_x.get(&GridKey(snap.x)),
                row_y.get(&GridKey(snap.y)),
            );
            let (Some(&x), Some(&y)) = target else {
                tracing::warn!(
                    x = snap.x,
                    y = snap.y,
                    "snapped element has no grid cell, leaving it in place"
                );
                return original.clone();
            };

            let mut moved = original.clone();
            let bounds = moved.bounds_mut();
            match config.reflow_scope {
                ReflowScope::RequestedAxis => {
                    bounds.set_coord(axis, if axis == Axis::X { x } else { y });
                }
                ReflowScope::BothAxes => {
                    bounds.x = x;
                    bounds.y = y;
                }
            }
            moved
        })
        .collect()
}
