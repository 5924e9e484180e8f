//! Property tests for the layout engine.
//!
//! Layouts are generated as jittered grids: every cell is at most a few
//! units off its intended position and neighbouring columns and rows are
//! always further apart than the merge threshold, so the inferred grid is
//! the intended one.
//!
//! Cells range from narrower to wider than the merge threshold. Re-flow is
//! only stable when every re-flowed pitch clears the threshold, so the
//! idempotence and read-back properties assume exactly that.

use board_core::layout::{
    determine_grid_gaps, find_grid_lines, modified_position_by_axis_and_gap,
};
use board_core::{
    Axis, CanvasShape, ElementId, LayoutConfig, Positionable, ReflowScope, ShapeDraft,
};
use proptest::prelude::*;

const MAX_CELL: f64 = 80.0;

/// Generate a jittered grid of 1..=3 rows and 1..=3 columns.
fn arb_grid() -> impl Strategy<Value = Vec<CanvasShape>> {
    (1usize..=3, 1usize..=3, 10u32..=40, 10u32..=40).prop_flat_map(|(rows, cols, gap_x, gap_y)| {
        let cell = (20u32..=80, 20u32..=80, -3i32..=3, -3i32..=3);
        prop::collection::vec(cell, rows * cols).prop_map(move |cells| {
            cells
                .into_iter()
                .enumerate()
                .map(|(i, (width, height, jitter_x, jitter_y))| {
                    let (row, col) = ((i / cols) as f64, (i % cols) as f64);
                    let x = col * (MAX_CELL + f64::from(gap_x)) + f64::from(jitter_x);
                    let y = row * (MAX_CELL + f64::from(gap_y)) + f64::from(jitter_y);
                    ShapeDraft::symbol(Positionable::new(x, y, f64::from(width), f64::from(height)))
                        .into_shape(ElementId::numbered("symbol", i as u64))
                })
                .collect()
        })
    })
}

/// A grid together with a shuffled copy of itself.
fn arb_shuffled_grid() -> impl Strategy<Value = (Vec<CanvasShape>, Vec<CanvasShape>)> {
    arb_grid().prop_flat_map(|grid| (Just(grid.clone()), Just(grid).prop_shuffle()))
}

fn arb_axis() -> impl Strategy<Value = Axis> {
    prop_oneof![Just(Axis::X), Just(Axis::Y)]
}

fn arb_config() -> impl Strategy<Value = LayoutConfig> {
    prop_oneof![
        Just(LayoutConfig::default()),
        Just(LayoutConfig::default().with_reflow_scope(ReflowScope::BothAxes)),
    ]
}

fn sorted_by_id(mut shapes: Vec<CanvasShape>) -> Vec<CanvasShape> {
    shapes.sort_by(|a, b| a.id().as_str().cmp(b.id().as_str()));
    shapes
}

fn column_count(shapes: &[CanvasShape]) -> usize {
    find_grid_lines(shapes, Axis::X, &LayoutConfig::default()).len()
}

fn min_extent(shapes: &[CanvasShape], axis: Axis) -> f64 {
    shapes
        .iter()
        .map(|s| s.bounds().extent(axis))
        .fold(f64::INFINITY, f64::min)
}

/// Whether re-flowing with `gap` keeps every line more than one threshold
/// away from its neighbour.
///
/// Each line is at least as large as its smallest member. With
/// `BothAxes` the other axis is packed with a gap that may be zero.
/// Pitches exactly at the threshold are left out: snapped lines sit on
/// non-integral means, and the re-measured pitch can land a rounding step
/// below it.
fn reflow_pitch_clears_threshold(
    shapes: &[CanvasShape],
    gap: f64,
    axis: Axis,
    config: &LayoutConfig,
) -> bool {
    let along = min_extent(shapes, axis) + gap > config.merge_threshold;
    match config.reflow_scope {
        ReflowScope::RequestedAxis => along,
        ReflowScope::BothAxes => {
            along && min_extent(shapes, axis.orthogonal()) > config.merge_threshold
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        max_global_rejects: 16_384,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_grid_lines_ignore_input_order(
        (grid, shuffled) in arb_shuffled_grid(),
        axis in arb_axis(),
    ) {
        let config = LayoutConfig::default();
        prop_assert_eq!(
            find_grid_lines(&grid, axis, &config),
            find_grid_lines(&shuffled, axis, &config)
        );
    }

    #[test]
    fn prop_gaps_ignore_input_order((grid, shuffled) in arb_shuffled_grid()) {
        let config = LayoutConfig::default();
        prop_assert_eq!(
            determine_grid_gaps(&grid, &config),
            determine_grid_gaps(&shuffled, &config)
        );
    }

    #[test]
    fn prop_reflow_ignores_input_order(
        (grid, shuffled) in arb_shuffled_grid(),
        gap in 0u32..=60,
        axis in arb_axis(),
        config in arb_config(),
    ) {
        let gap = f64::from(gap);
        let a = modified_position_by_axis_and_gap(&grid, gap, axis, &config);
        let b = modified_position_by_axis_and_gap(&shuffled, gap, axis, &config);
        prop_assert_eq!(sorted_by_id(a), sorted_by_id(b));
    }

    #[test]
    fn prop_reflow_keeps_elements_in_order(
        grid in arb_grid(),
        gap in 0u32..=60,
        axis in arb_axis(),
        config in arb_config(),
    ) {
        let moved = modified_position_by_axis_and_gap(&grid, f64::from(gap), axis, &config);
        prop_assert_eq!(moved.len(), grid.len());
        for (before, after) in grid.iter().zip(&moved) {
            prop_assert_eq!(before.id(), after.id());
            prop_assert_eq!(before.bounds().width, after.bounds().width);
            prop_assert_eq!(before.bounds().height, after.bounds().height);
            prop_assert_eq!(before.bounds().rotation, after.bounds().rotation);
        }
    }

    #[test]
    fn prop_reflow_is_idempotent(
        grid in arb_grid(),
        gap in 0u32..=40,
        axis in arb_axis(),
        config in arb_config(),
    ) {
        let gap = f64::from(gap);
        prop_assume!(reflow_pitch_clears_threshold(&grid, gap, axis, &config));
        let once = modified_position_by_axis_and_gap(&grid, gap, axis, &config);
        let twice = modified_position_by_axis_and_gap(&once, gap, axis, &config);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_reflow_touches_only_requested_axis(
        grid in arb_grid(),
        gap in 0u32..=60,
        axis in arb_axis(),
    ) {
        let moved = modified_position_by_axis_and_gap(&grid, f64::from(gap), axis, &LayoutConfig::default());
        let other = axis.orthogonal();
        for (before, after) in grid.iter().zip(&moved) {
            prop_assert_eq!(before.bounds().coord(other), after.bounds().coord(other));
        }
    }

    #[test]
    fn prop_applied_row_gap_reads_back(grid in arb_grid(), gap in 1u32..=40) {
        let config = LayoutConfig::default();
        let gap = f64::from(gap);
        prop_assume!(column_count(&grid) >= 2);
        prop_assume!(reflow_pitch_clears_threshold(&grid, gap, Axis::X, &config));

        let moved = modified_position_by_axis_and_gap(&grid, gap, Axis::X, &config);
        prop_assert_eq!(determine_grid_gaps(&moved, &config).row_gap, Some(gap));
    }
}
