//! # Board Core
//!
//! Layout engine and editing state for AAC communication boards.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 board-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Board           │  Layout Engine           │
//! │  - Elements      │  - Grid line inference   │
//! │  - Selection     │  - Gap determination     │
//! │  - Undo/redo     │  - Gap re-flow           │
//! │                  │  - Alignment             │
//! ├─────────────────────────────────────────────┤
//! │  Geometry        │  Document                │
//! │  - Rotated boxes │  - JSON persistence      │
//! │  - Page formats  │  - Validation            │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! All coordinates are in A4 document space, not screen pixels.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod board;
pub mod document;
pub mod element;
pub mod error;
pub mod geometry;
pub mod history;
pub mod layout;
pub mod page;

pub use board::{Board, BoardConfig, GapChange};
pub use document::{BoardDocument, DOCUMENT_VERSION};
pub use element::{
    CanvasShape, ElementId, Placed, Positionable, ShapeDraft, StyleChange, SymbolShape, TextShape,
};
pub use error::{BoardError, BoardResult};
pub use geometry::{client_rect, Rect};
pub use layout::{AlignMode, Axis, Gap, LayoutConfig, ReflowScope};
pub use page::{PageDimension, PageFormat, A4};

/// Board core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
