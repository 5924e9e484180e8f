//! Grid line inference and snapping.
//!
//! Freely placed elements are treated as if they sat on an implicit grid.
//! Positions along one axis are clustered into grid lines, and every element
//! is snapped to its nearest line so that slightly misaligned rows and
//! columns are recognised as intended ones.
//!
//! ```text
//!   x:  0   3      148 151        x-lines:  1.5        149.5
//!       ┌─┐ ┌─┐    ┌─┐ ┌─┐   →              ┌─┐          ┌─┐
//!       └─┘ └─┘    └─┘ └─┘                  └─┘          └─┘
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::element::{Placed, Positionable};
use crate::layout::{Axis, LayoutConfig};

/// Cluster the positions of `shapes` along `axis` into grid lines.
///
/// Positions are sorted and walked in order; a position joins the current
/// cluster when it is closer than `merge_threshold` to the last position
/// added to that cluster. Each cluster is represented by the mean of its
/// members. The result is sorted ascending and does not depend on the
/// order of `shapes`.
#[must_use]
pub fn find_grid_lines<P: Placed>(shapes: &[P], axis: Axis, config: &LayoutConfig) -> Vec<f64> {
    let mut positions: Vec<f64> = shapes.iter().map(|s| s.bounds().coord(axis)).collect();
    positions.sort_by(f64::total_cmp);

    let mut lines = Vec::new();
    let mut cluster: Vec<f64> = Vec::new();

    for position in positions {
        if let Some(&last) = cluster.last() {
            if position - last >= config.merge_threshold {
                lines.push(mean(&cluster));
                cluster.clear();
            }
        }
        cluster.push(position);
    }
    if !cluster.is_empty() {
        lines.push(mean(&cluster));
    }

    tracing::trace!(?axis, lines = lines.len(), "inferred grid lines");
    lines
}

/// Mean of a non-empty cluster.
///
/// Summing offsets from the first member keeps the mean bit-exact when all
/// members coincide, so re-clustering an already snapped layout reproduces
/// the same lines.
#[allow(clippy::cast_precision_loss)] // cluster sizes are tiny
fn mean(values: &[f64]) -> f64 {
    let first = values[0];
    first + values.iter().map(|v| v - first).sum::<f64>() / values.len() as f64
}

/// The grid line in `lines` closest to `value`.
///
/// Ties keep the earlier line. With no lines the value is returned as is.
#[must_use]
pub fn nearest_line(value: f64, lines: &[f64]) -> f64 {
    lines
        .iter()
        .copied()
        .reduce(|best, line| {
            if (line - value).abs() < (best - value).abs() {
                line
            } else {
                best
            }
        })
        .unwrap_or(value)
}

/// Snap every shape to the nearest of the given grid lines.
///
/// Returns new boxes in input order; the inputs are untouched.
#[must_use]
pub fn snap_to_grid<P: Placed>(shapes: &[P], x_lines: &[f64], y_lines: &[f64]) -> Vec<Positionable> {
    shapes
        .iter()
        .map(|shape| {
            let bounds = shape.bounds();
            Positionable {
                x: nearest_line(bounds.x, x_lines),
                y: nearest_line(bounds.y, y_lines),
                ..*bounds
            }
        })
        .collect()
}

/// Infer grid lines on both axes and snap `shapes` to them.
#[must_use]
pub fn snap_to_inferred_grid<P: Placed>(shapes: &[P], config: &LayoutConfig) -> Vec<Positionable> {
    let x_lines = find_grid_lines(shapes, Axis::X, config);
    let y_lines = find_grid_lines(shapes, Axis::Y, config);
    snap_to_grid(shapes, &x_lines, &y_lines)
}

/// A snapped coordinate used as a row or column key.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GridKey(pub f64);

impl PartialEq for GridKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GridKey {}

impl PartialOrd for GridKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GridKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Row and column membership of a set of snapped boxes.
///
/// Only occupied rows and columns exist, so holes in a selection (a missing
/// cell, an L-shaped arrangement) do not produce phantom lines.
#[derive(Debug, Clone)]
pub(crate) struct SparseGrid<'a> {
    snapped: &'a [Positionable],
    /// Snapped `y` to the indices of the boxes in that row.
    rows: BTreeMap<GridKey, Vec<usize>>,
    /// Snapped `x` to the indices of the boxes in that column.
    columns: BTreeMap<GridKey, Vec<usize>>,
}

impl<'a> SparseGrid<'a> {
    pub(crate) fn build(snapped: &'a [Positionable]) -> Self {
        let mut rows: BTreeMap<GridKey, Vec<usize>> = BTreeMap::new();
        let mut columns: BTreeMap<GridKey, Vec<usize>> = BTreeMap::new();

        for (index, bounds) in snapped.iter().enumerate() {
            rows.entry(GridKey(bounds.y)).or_default().push(index);
            columns.entry(GridKey(bounds.x)).or_default().push(index);
        }

        Self {
            snapped,
            rows,
            columns,
        }
    }

    /// Number of occupied rows and columns.
    pub(crate) fn dimensions(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    /// Lines running across `axis`: columns for `x`, rows for `y`.
    fn lines(&self, axis: Axis) -> &BTreeMap<GridKey, Vec<usize>> {
        match axis {
            Axis::X => &self.columns,
            Axis::Y => &self.rows,
        }
    }

    fn members<'s>(&'s self, indices: &'s [usize]) -> impl Iterator<Item = &'s Positionable> + 's {
        indices.iter().map(move |&i| &self.snapped[i])
    }

    /// Spacing between each pair of adjacent lines along `axis`.
    ///
    /// The spacing is measured from the far edge of the widest (or tallest)
    /// member of a line to the next line. Overlapping or touching lines
    /// yield no candidate at all.
    pub(crate) fn gap_candidates(&self, axis: Axis) -> Vec<f64> {
        let lines = self.lines(axis);
        lines
            .iter()
            .zip(lines.keys().skip(1))
            .filter_map(|((_, indices), next)| {
                let far_edge = self
                    .members(indices)
                    .map(|b| b.end(axis))
                    .fold(f64::NEG_INFINITY, f64::max);
                let gap = next.0 - far_edge;
                (gap > 0.0).then_some(gap)
            })
            .collect()
    }

    /// Lay the lines along `axis` out with a fixed `gap` between them.
    ///
    /// The first line keeps its coordinate. Each following line starts after
    /// the largest member of the previous one plus `gap`.
    pub(crate) fn pack(&self, axis: Axis, gap: f64) -> BTreeMap<GridKey, f64> {
        let lines = self.lines(axis);
        let mut cursor = lines.keys().next().map_or(0.0, |key| key.0);

        lines
            .iter()
            .map(|(key, indices)| {
                let start = cursor;
                let extent = self
                    .members(indices)
                    .map(|b| b.extent(axis))
                    .fold(0.0, f64::max);
                cursor = start + extent + gap;
                (*key, start)
            })
            .collect()
    }
}
