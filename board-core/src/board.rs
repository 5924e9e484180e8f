//! Board state: elements, selection and undo history.
//!
//! The board is the thin stateful layer over the layout engine. Layout
//! operations run on the current selection and their result is merged back
//! into the element collection by id as a single undoable step.

use std::collections::{HashMap, HashSet};

use crate::document::{BoardDocument, DOCUMENT_VERSION};
use crate::geometry::{client_rect, Rect};
use crate::history::{History, Snapshot, DEFAULT_HISTORY_LIMIT};
use crate::layout::{
    align, determine_grid_gaps, modified_position_by_axis_and_gap, AlignMode, Axis, Gap,
    LayoutConfig,
};
use crate::page::{PageDimension, A4};
use crate::{BoardError, BoardResult, CanvasShape, ElementId, ShapeDraft, StyleChange};

/// Offset applied to copied elements so a paste does not hide the original.
pub const PASTE_OFFSET: f64 = 10.0;

/// Board configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// Layout engine settings.
    pub layout: LayoutConfig,
    /// Maximum number of undo steps kept.
    pub history_limit: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// An edit to the gap fields. Absent axes are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GapChange {
    /// New horizontal gap.
    pub x: Option<f64>,
    /// New vertical gap.
    pub y: Option<f64>,
}

impl GapChange {
    /// Change only the gap along `axis`.
    #[must_use]
    pub const fn along(axis: Axis, value: f64) -> Self {
        match axis {
            Axis::X => Self {
                x: Some(value),
                y: None,
            },
            Axis::Y => Self {
                x: None,
                y: Some(value),
            },
        }
    }
}

/// A board being edited.
#[derive(Debug, Clone)]
pub struct Board {
    /// Elements in paint order.
    elements: Vec<CanvasShape>,
    /// Selected element ids.
    selected_ids: Vec<ElementId>,
    number_of_pages: u32,
    is_landscape: bool,
    /// Next sequence number for generated ids.
    next_id: u64,
    /// Copied elements, already offset for pasting.
    clipboard: Vec<CanvasShape>,
    history: History,
    config: BoardConfig,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty single-page board.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BoardConfig::default())
    }

    /// Create an empty board with custom configuration.
    #[must_use]
    pub fn with_config(config: BoardConfig) -> Self {
        Self {
            elements: Vec::new(),
            selected_ids: Vec::new(),
            number_of_pages: 1,
            is_landscape: true,
            next_id: 0,
            clipboard: Vec::new(),
            history: History::new(config.history_limit),
            config,
        }
    }

    /// The board configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// All elements in paint order.
    #[must_use]
    pub fn elements(&self) -> &[CanvasShape] {
        &self.elements
    }

    /// Get an element by id.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&CanvasShape> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Number of pages.
    #[must_use]
    pub const fn number_of_pages(&self) -> u32 {
        self.number_of_pages
    }

    /// Whether pages are landscape.
    #[must_use]
    pub const fn is_landscape(&self) -> bool {
        self.is_landscape
    }

    /// Size of one page in document units.
    #[must_use]
    pub const fn page_dimension(&self) -> PageDimension {
        A4.oriented(self.is_landscape)
    }

    /// Add elements, giving each a fresh id. Returns the new ids in order.
    pub fn add_elements(&mut self, drafts: impl IntoIterator<Item = ShapeDraft>) -> Vec<ElementId> {
        let mut elements = self.elements.clone();
        let mut ids = Vec::new();

        for draft in drafts {
            let id = self.allocate_id(draft.name());
            elements.push(draft.into_shape(id.clone()));
            ids.push(id);
        }

        tracing::debug!(count = ids.len(), "adding elements");
        self.commit(elements);
        ids
    }

    /// Move one element, as at the end of a drag.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ElementNotFound`] if no element has this id.
    pub fn move_element(&mut self, id: &ElementId, x: f64, y: f64) -> BoardResult<()> {
        let index = self.index_of(id)?;
        let mut elements = self.elements.clone();
        elements[index] = elements[index].moved_to(x, y);
        self.commit(elements);
        Ok(())
    }

    /// Delete all selected elements. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let selected = self.selected_set();
        let elements: Vec<CanvasShape> = self
            .elements
            .iter()
            .filter(|e| !selected.contains(e.id()))
            .cloned()
            .collect();
        let removed = self.elements.len() - elements.len();

        self.selected_ids.clear();
        self.commit(elements);
        removed
    }

    /// Apply a style change to every selected element that has the
    /// property. Returns how many elements changed.
    pub fn style_selected(&mut self, change: &StyleChange) -> usize {
        let selected = self.selected_set();
        let mut styled = 0;
        let elements: Vec<CanvasShape> = self
            .elements
            .iter()
            .map(|e| {
                let mut e = e.clone();
                if selected.contains(e.id()) && e.apply_style(change) {
                    styled += 1;
                }
                e
            })
            .collect();

        tracing::debug!(?change, styled, "styled selection");
        self.commit(elements);
        styled
    }

    /// Apply a style change to one element.
    ///
    /// Returns whether the element has the property.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ElementNotFound`] if no element has this id.
    pub fn style_by_id(&mut self, id: &ElementId, change: &StyleChange) -> BoardResult<bool> {
        let index = self.index_of(id)?;
        let mut elements = self.elements.clone();
        let applied = elements[index].apply_style(change);
        self.commit(elements);
        Ok(applied)
    }

    // Clipboard

    /// Copy the selection, offset by [`PASTE_OFFSET`] on both axes.
    ///
    /// Returns how many elements were copied. An empty selection empties
    /// the clipboard.
    pub fn copy_selected(&mut self) -> usize {
        self.clipboard = self
            .selected()
            .into_iter()
            .map(|e| {
                let bounds = *e.bounds();
                e.moved_to(bounds.x + PASTE_OFFSET, bounds.y + PASTE_OFFSET)
            })
            .collect();
        self.clipboard.len()
    }

    /// Copied elements waiting to be pasted.
    #[must_use]
    pub fn clipboard(&self) -> &[CanvasShape] {
        &self.clipboard
    }

    /// Insert the clipboard as new elements with fresh ids and select them.
    ///
    /// Returns the new ids; empty when there is nothing to paste.
    pub fn paste(&mut self) -> Vec<ElementId> {
        if self.clipboard.is_empty() {
            return Vec::new();
        }

        let copied = self.clipboard.clone();
        let mut elements = self.elements.clone();
        let mut ids = Vec::with_capacity(copied.len());
        for shape in copied {
            let id = self.allocate_id(shape.name());
            elements.push(shape.with_id(id.clone()));
            ids.push(id);
        }

        tracing::debug!(count = ids.len(), "pasting elements");
        self.commit(elements);
        self.selected_ids.clone_from(&ids);
        ids
    }

    /// Copy the selection and paste it straight away.
    pub fn duplicate(&mut self) -> Vec<ElementId> {
        self.copy_selected();
        self.paste()
    }

    // Pages

    /// Append a page at the end of the board.
    pub fn add_page(&mut self) {
        let pages = self.number_of_pages + 1;
        self.commit_state(self.elements.clone(), pages);
    }

    /// Remove the last page. Elements are kept where they are.
    ///
    /// Returns `false` when the board is down to its last page.
    pub fn remove_page(&mut self) -> bool {
        if self.number_of_pages <= 1 {
            return false;
        }
        let pages = self.number_of_pages - 1;
        self.commit_state(self.elements.clone(), pages);
        true
    }

    // Selection

    /// Selected element ids, in the order they were selected.
    #[must_use]
    pub fn selected_ids(&self) -> &[ElementId] {
        &self.selected_ids
    }

    /// Selected elements in paint order.
    #[must_use]
    pub fn selected(&self) -> Vec<CanvasShape> {
        let selected = self.selected_set();
        self.elements
            .iter()
            .filter(|e| selected.contains(e.id()))
            .cloned()
            .collect()
    }

    /// Replace the selection.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ElementNotFound`] for an unknown id; the
    /// selection is left unchanged in that case.
    pub fn set_selection(&mut self, ids: &[ElementId]) -> BoardResult<()> {
        for id in ids {
            self.index_of(id)?;
        }
        let mut selected = Vec::with_capacity(ids.len());
        for id in ids {
            if !selected.contains(id) {
                selected.push(id.clone());
            }
        }
        self.selected_ids = selected;
        Ok(())
    }

    /// Click selection.
    ///
    /// A plain click selects only the clicked element unless it is already
    /// selected. With `additive` (shift/ctrl/meta held) the element is
    /// toggled in or out of the selection.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::ElementNotFound`] for an unknown id.
    pub fn toggle_selection(&mut self, id: &ElementId, additive: bool) -> BoardResult<()> {
        self.index_of(id)?;
        let is_selected = self.selected_ids.contains(id);

        match (additive, is_selected) {
            (false, false) => self.selected_ids = vec![id.clone()],
            (true, true) => self.selected_ids.retain(|s| s != id),
            (true, false) => self.selected_ids.push(id.clone()),
            (false, true) => {}
        }
        Ok(())
    }

    /// Select every element.
    pub fn select_all(&mut self) {
        self.selected_ids = self.elements.iter().map(|e| e.id().clone()).collect();
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selected_ids.clear();
    }

    /// Select every element whose rotated bounds overlap `area`.
    ///
    /// Replaces the selection. Returns how many elements were selected.
    pub fn select_in_rect(&mut self, area: Rect) -> usize {
        self.selected_ids = self
            .elements
            .iter()
            .filter(|e| area.intersects(&client_rect(e.bounds())))
            .map(|e| e.id().clone())
            .collect();
        self.selected_ids.len()
    }

    // Layout

    /// Current row and column gap of the selection.
    #[must_use]
    pub fn gaps(&self) -> Gap {
        determine_grid_gaps(&self.selected(), &self.config.layout)
    }

    /// Apply edited gap values to the selection.
    ///
    /// The horizontal gap is applied first, then the vertical one on the
    /// result. Unselected elements are untouched and the collection keeps
    /// its order. The whole change is one undo step.
    pub fn handle_gap_change(&mut self, change: GapChange) {
        let mut elements = self.elements.clone();

        for (axis, value) in [(Axis::X, change.x), (Axis::Y, change.y)] {
            let Some(value) = value else {
                continue;
            };
            let selected = self.selected_in(&elements);
            let moved = modified_position_by_axis_and_gap(&selected, value, axis, &self.config.layout);
            elements = merge_by_id(&elements, moved);
        }

        tracing::info!(?change, selected = self.selected_ids.len(), "applied gap change");
        self.commit(elements);
    }

    /// Align the selection along `axis`.
    pub fn align_selected(&mut self, axis: Axis, mode: AlignMode) {
        let elements = align(&self.elements, &self.selected_ids, axis, mode);
        tracing::info!(?axis, ?mode, selected = self.selected_ids.len(), "aligned selection");
        self.commit(elements);
    }

    // History

    /// Undo the last edit. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.undo(current) {
            Some(previous) => {
                self.restore(previous);
                true
            }
            None => false,
        }
    }

    /// Redo the last undone edit. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.redo(current) {
            Some(next) => {
                self.restore(next);
                true
            }
            None => false,
        }
    }

    /// Whether there is anything to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether there is anything to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // Persistence

    /// Capture the board as a document.
    #[must_use]
    pub fn to_document(&self) -> BoardDocument {
        BoardDocument {
            elements: self.elements.clone(),
            number_of_pages: self.number_of_pages,
            is_landscape: self.is_landscape,
            version: DOCUMENT_VERSION,
        }
    }

    /// Open a document as a fresh board with empty history and selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the document fails validation.
    pub fn from_document(document: BoardDocument, config: BoardConfig) -> BoardResult<Self> {
        let mut board = Self::with_config(config);
        board.open_document(document)?;
        Ok(board)
    }

    /// Replace the board content with a document.
    ///
    /// Selection and undo history are cleared; the clipboard is kept. On
    /// error the board is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the document fails validation.
    pub fn open_document(&mut self, document: BoardDocument) -> BoardResult<()> {
        document.validate()?;

        self.next_id = document
            .elements
            .iter()
            .filter_map(|e| e.id().sequence())
            .max()
            .map_or(0, |n| n + 1);
        self.elements = document.elements;
        self.number_of_pages = document.number_of_pages;
        self.is_landscape = document.is_landscape;
        self.selected_ids.clear();
        self.history.clear();

        tracing::debug!(
            elements = self.elements.len(),
            pages = self.number_of_pages,
            "opened document"
        );
        Ok(())
    }

    // Internals

    fn allocate_id(&mut self, name: &str) -> ElementId {
        let id = ElementId::numbered(name, self.next_id);
        self.next_id += 1;
        id
    }

    fn index_of(&self, id: &ElementId) -> BoardResult<usize> {
        self.elements
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| BoardError::ElementNotFound(id.to_string()))
    }

    fn selected_set(&self) -> HashSet<&ElementId> {
        self.selected_ids.iter().collect()
    }

    fn selected_in(&self, elements: &[CanvasShape]) -> Vec<CanvasShape> {
        let selected = self.selected_set();
        elements
            .iter()
            .filter(|e| selected.contains(e.id()))
            .cloned()
            .collect()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            elements: self.elements.clone(),
            number_of_pages: self.number_of_pages,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.elements = snapshot.elements;
        self.number_of_pages = snapshot.number_of_pages;
        let present: HashSet<&ElementId> = self.elements.iter().map(CanvasShape::id).collect();
        self.selected_ids.retain(|id| present.contains(id));
    }

    /// Install new elements, recording an undo step if anything changed.
    fn commit(&mut self, elements: Vec<CanvasShape>) {
        self.commit_state(elements, self.number_of_pages);
    }

    fn commit_state(&mut self, elements: Vec<CanvasShape>, number_of_pages: u32) {
        if elements == self.elements && number_of_pages == self.number_of_pages {
            return;
        }
        let previous = self.snapshot();
        self.history.record(previous);
        self.elements = elements;
        self.number_of_pages = number_of_pages;
    }
}

/// Replace elements of `all` with their counterpart in `updated`, by id.
fn merge_by_id(all: &[CanvasShape], updated: Vec<CanvasShape>) -> Vec<CanvasShape> {
    let mut updated: HashMap<ElementId, CanvasShape> = updated
        .into_iter()
        .map(|e| (e.id().clone(), e))
        .collect();
    all.iter()
        .map(|e| updated.remove(e.id()).unwrap_or_else(|| e.clone()))
        .collect()
}
