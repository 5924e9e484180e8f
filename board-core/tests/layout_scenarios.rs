//! Integration tests for the layout engine and the board built on it.
//!
//! Exercises the public API only: gap determination, gap re-flow and
//! alignment on plain element collections, then the same operations through
//! a `Board` with selection, undo and document round-trips.

use board_core::layout::{align, determine_grid_gaps, modified_position_by_axis_and_gap};
use board_core::{
    AlignMode, Axis, Board, BoardConfig, BoardDocument, CanvasShape, ElementId, Gap, GapChange,
    LayoutConfig, Positionable, ReflowScope, ShapeDraft,
};

/// Helper to create a symbol with a fixed id.
fn symbol(id: &str, x: f64, y: f64, width: f64, height: f64) -> CanvasShape {
    ShapeDraft::symbol(Positionable::new(x, y, width, height)).into_shape(ElementId::new(id))
}

fn ids(shapes: &[CanvasShape]) -> Vec<ElementId> {
    shapes.iter().map(|s| s.id().clone()).collect()
}

fn xs(shapes: &[CanvasShape]) -> Vec<f64> {
    shapes.iter().map(|s| s.bounds().x).collect()
}

fn ys(shapes: &[CanvasShape]) -> Vec<f64> {
    shapes.iter().map(|s| s.bounds().y).collect()
}

fn two_by_two() -> Vec<CanvasShape> {
    vec![
        symbol("symbol_0", 0.0, 0.0, 100.0, 100.0),
        symbol("symbol_1", 150.0, 0.0, 100.0, 100.0),
        symbol("symbol_2", 0.0, 150.0, 100.0, 100.0),
        symbol("symbol_3", 150.0, 150.0, 100.0, 100.0),
    ]
}

// ===========================================================================
// Gap determination
// ===========================================================================

#[test]
fn test_uniform_row_reports_row_gap() {
    let row = vec![
        symbol("symbol_0", 0.0, 0.0, 50.0, 50.0),
        symbol("symbol_1", 70.0, 0.0, 50.0, 50.0),
        symbol("symbol_2", 140.0, 0.0, 50.0, 50.0),
    ];
    let gap = determine_grid_gaps(&row, &LayoutConfig::default());
    assert_eq!(gap.row_gap, Some(20.0));
}

#[test]
fn test_uneven_row_has_no_row_gap() {
    let row = vec![
        symbol("symbol_0", 0.0, 0.0, 50.0, 50.0),
        symbol("symbol_1", 70.0, 0.0, 50.0, 50.0),
        symbol("symbol_2", 160.0, 0.0, 50.0, 50.0),
    ];
    let gap = determine_grid_gaps(&row, &LayoutConfig::default());
    assert_eq!(gap.row_gap, None);
}

#[test]
fn test_tiny_selections_report_zero() {
    let config = LayoutConfig::default();
    let none: Vec<CanvasShape> = Vec::new();
    let one = vec![symbol("symbol_0", 10.0, 10.0, 50.0, 50.0)];

    assert_eq!(determine_grid_gaps(&none, &config), Gap::zero());
    assert_eq!(determine_grid_gaps(&one, &config), Gap::zero());
    assert_eq!(
        modified_position_by_axis_and_gap(&one, 10.0, Axis::X, &config),
        one
    );
}

#[test]
fn test_text_and_symbols_share_a_grid() {
    let mixed = vec![
        symbol("symbol_0", 0.0, 0.0, 80.0, 80.0),
        ShapeDraft::text(Positionable::new(100.0, 2.0, 80.0, 80.0), "yes")
            .into_shape(ElementId::new("text_1")),
        symbol("symbol_2", 200.0, -1.0, 80.0, 80.0),
    ];
    let gap = determine_grid_gaps(&mixed, &LayoutConfig::default());
    assert_eq!(gap.row_gap, Some(20.0));
    assert_eq!(gap.column_gap, Some(0.0));
}

// ===========================================================================
// Gap re-flow
// ===========================================================================

#[test]
fn test_reflow_two_by_two_grid() {
    let grid = two_by_two();
    let moved = modified_position_by_axis_and_gap(&grid, 80.0, Axis::X, &LayoutConfig::default());

    assert_eq!(ids(&moved), ids(&grid));
    assert_eq!(xs(&moved), vec![0.0, 180.0, 0.0, 180.0]);
    assert_eq!(ys(&moved), ys(&grid));
}

#[test]
fn test_reflow_keeps_sizes_and_styles() {
    let mut grid = two_by_two();
    if let CanvasShape::Symbol(symbol) = &mut grid[1] {
        symbol.background_color = Some("#ffcc00".to_string());
        symbol.text = Some("more".to_string());
    }

    let moved = modified_position_by_axis_and_gap(&grid, 10.0, Axis::Y, &LayoutConfig::default());

    for (before, after) in grid.iter().zip(&moved) {
        assert_eq!(before.bounds().width, after.bounds().width);
        assert_eq!(before.bounds().height, after.bounds().height);
        assert_eq!(before.bounds().x, after.bounds().x);
        assert_eq!(before.name(), after.name());
    }
    match &moved[1] {
        CanvasShape::Symbol(symbol) => {
            assert_eq!(symbol.background_color.as_deref(), Some("#ffcc00"));
            assert_eq!(symbol.text.as_deref(), Some("more"));
        }
        CanvasShape::Text(_) => panic!("expected a symbol"),
    }
}

#[test]
fn test_reflow_both_axes_scope_snaps_other_axis() {
    let noisy = vec![
        symbol("symbol_0", 0.0, 4.0, 100.0, 100.0),
        symbol("symbol_1", 150.0, 0.0, 100.0, 100.0),
    ];
    let config = LayoutConfig::default().with_reflow_scope(ReflowScope::BothAxes);

    let moved = modified_position_by_axis_and_gap(&noisy, 30.0, Axis::X, &config);
    assert_eq!(xs(&moved), vec![0.0, 130.0]);
    assert_eq!(ys(&moved), vec![2.0, 2.0]);

    let moved = modified_position_by_axis_and_gap(&noisy, 30.0, Axis::X, &LayoutConfig::default());
    assert_eq!(ys(&moved), vec![4.0, 0.0]);
}

// ===========================================================================
// Alignment
// ===========================================================================

fn spread() -> Vec<CanvasShape> {
    vec![
        symbol("symbol_0", 0.0, 0.0, 20.0, 20.0),
        symbol("symbol_1", 40.0, 50.0, 20.0, 20.0),
        symbol("symbol_2", 100.0, 100.0, 20.0, 20.0),
    ]
}

#[test]
fn test_align_bounds() {
    let shapes = spread();
    let selected = ids(&shapes);

    let end = align(&shapes, &selected, Axis::X, AlignMode::End);
    assert_eq!(xs(&end), vec![100.0, 100.0, 100.0]);

    let start = align(&shapes, &selected, Axis::X, AlignMode::Start);
    assert_eq!(xs(&start), vec![0.0, 0.0, 0.0]);

    let center = align(&shapes, &selected, Axis::X, AlignMode::Center);
    assert_eq!(xs(&center), vec![50.0, 50.0, 50.0]);

    for aligned in [&end, &start, &center] {
        assert_eq!(ys(aligned), ys(&shapes));
    }
}

#[test]
fn test_align_leaves_unselected_alone() {
    let shapes = spread();
    let aligned = align(&shapes, &ids(&shapes)[1..], Axis::Y, AlignMode::Start);

    assert_eq!(aligned[0], shapes[0]);
    assert_eq!(ys(&aligned), vec![0.0, 50.0, 50.0]);
}

// ===========================================================================
// Board workflow
// ===========================================================================

#[test]
fn test_board_gap_edit_then_undo() {
    let mut board = Board::new();
    let ids = board.add_elements(
        two_by_two()
            .into_iter()
            .map(|s| ShapeDraft::symbol(*s.bounds())),
    );
    board.select_all();

    assert_eq!(board.gaps(), Gap {
        row_gap: Some(50.0),
        column_gap: Some(50.0),
    });

    board.handle_gap_change(GapChange::along(Axis::X, 80.0));
    assert_eq!(board.gaps().row_gap, Some(80.0));
    assert_eq!(board.element(&ids[3]).map(|e| e.bounds().x), Some(180.0));

    assert!(board.undo());
    assert_eq!(board.gaps().row_gap, Some(50.0));
    assert!(board.redo());
    assert_eq!(board.gaps().row_gap, Some(80.0));
}

#[test]
fn test_board_survives_document_round_trip() {
    let mut board = Board::new();
    board.add_elements(
        two_by_two()
            .into_iter()
            .map(|s| ShapeDraft::symbol(*s.bounds())),
    );
    board.select_all();
    board.handle_gap_change(GapChange::along(Axis::Y, 25.0));

    let json = board.to_document().to_json_pretty().expect("serialize");
    let document = BoardDocument::from_json(&json).expect("parse");
    let mut reopened = Board::from_document(document, BoardConfig::default()).expect("open");

    assert_eq!(reopened.elements(), board.elements());
    reopened.select_all();
    assert_eq!(reopened.gaps().column_gap, Some(25.0));
}

#[test]
fn test_board_uses_configured_threshold() {
    // Columns 30 apart only count as separate with a smaller threshold.
    let drafts = [
        ShapeDraft::symbol(Positionable::new(0.0, 0.0, 20.0, 20.0)),
        ShapeDraft::symbol(Positionable::new(30.0, 0.0, 20.0, 20.0)),
    ];

    let mut coarse = Board::new();
    coarse.add_elements(drafts.clone());
    coarse.select_all();
    assert_eq!(coarse.gaps().row_gap, Some(0.0));

    let config = BoardConfig {
        layout: LayoutConfig::default().with_merge_threshold(25.0),
        ..BoardConfig::default()
    };
    let mut fine = Board::with_config(config);
    fine.add_elements(drafts);
    fine.select_all();
    assert_eq!(fine.gaps().row_gap, Some(10.0));
}
