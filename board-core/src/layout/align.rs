//! Alignment of a selection along one axis.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::element::{CanvasShape, ElementId, Positionable};
use crate::layout::Axis;

/// Where selected elements are aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignMode {
    /// Leading coordinate of the first element (left or top).
    Start,
    /// Middle of the span from the first element to the far edge of the last.
    Center,
    /// Leading coordinate of the last element.
    End,
}

impl std::str::FromStr for AlignMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" => Ok(Self::End),
            other => Err(format!("unknown alignment mode: {other}")),
        }
    }
}

/// The resolved alignment target of a selection.
#[derive(Debug, Clone, Copy, PartialEq)]
enum AlignTarget {
    /// Every element starts at this coordinate.
    Edge(f64),
    /// Every element is centred on this coordinate.
    Middle(f64),
}

impl AlignTarget {
    /// Resolve the target from the selected boxes.
    ///
    /// Boxes are ordered by their coordinate on `axis`; ties keep input
    /// order. Returns `None` for an empty selection.
    fn resolve(selected: &[&Positionable], axis: Axis, mode: AlignMode) -> Option<Self> {
        let mut sorted = selected.to_vec();
        sorted.sort_by(|a, b| a.coord(axis).total_cmp(&b.coord(axis)));
        let (first, last) = (sorted.first()?, sorted.last()?);

        Some(match mode {
            AlignMode::Start => Self::Edge(first.coord(axis)),
            AlignMode::End => Self::Edge(last.coord(axis)),
            AlignMode::Center => Self::Middle((first.coord(axis) + last.end(axis)) / 2.0),
        })
    }

    fn position_for(self, bounds: &Positionable, axis: Axis) -> f64 {
        match self {
            Self::Edge(at) => at,
            Self::Middle(middle) => middle - bounds.extent(axis) / 2.0,
        }
    }
}

/// Align the selected elements along `axis`.
///
/// Unselected elements are returned as they are and the result keeps the
/// order of `elements`. Only the coordinate on `axis` of selected elements
/// changes; sizes and the other axis are left alone.
#[must_use]
pub fn align(
    elements: &[CanvasShape],
    selected_ids: &[ElementId],
    axis: Axis,
    mode: AlignMode,
) -> Vec<CanvasShape> {
    let selected: HashSet<&ElementId> = selected_ids.iter().collect();
    let selected_bounds: Vec<&Positionable> = elements
        .iter()
        .filter(|e| selected.contains(e.id()))
        .map(CanvasShape::bounds)
        .collect();

    let Some(target) = AlignTarget::resolve(&selected_bounds, axis, mode) else {
        return elements.to_vec();
    };
    tracing::debug!(?axis, ?mode, ?target, count = selected_bounds.len(), "aligning");

    elements
        .iter()
        .map(|element| {
            let mut aligned = element.clone();
            if selected.contains(element.id()) {
                let bounds = aligned.bounds_mut();
                let position = target.position_for(bounds, axis);
                bounds.set_coord(axis, position);
            }
            aligned
        })
        .collect()
}
