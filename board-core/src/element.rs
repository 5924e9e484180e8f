//! Board elements - the symbols and text blocks placed on a page.

use serde::{Deserialize, Serialize};

use crate::layout::Axis;

/// Unique identifier for an element.
///
/// Identifiers are stable for the lifetime of an element and have the form
/// `"{name}_{n}"`, e.g. `symbol_3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Create an identifier from an existing string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build the identifier for the `n`-th element of the given kind.
    #[must_use]
    pub fn numbered(name: &str, n: u64) -> Self {
        Self(format!("{name}_{n}"))
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix of a generated identifier, if there is one.
    #[must_use]
    pub fn sequence(&self) -> Option<u64> {
        self.0.rsplit_once('_').and_then(|(_, n)| n.parse().ok())
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Position and size of an element in document space.
///
/// `x`/`y` is the top-left corner before rotation. `rotation` is in degrees
/// about that corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Positionable {
    /// X position (document units from the left page edge).
    pub x: f64,
    /// Y position (document units from the top page edge).
    pub y: f64,
    /// Width in document units.
    pub width: f64,
    /// Height in document units.
    pub height: f64,
    /// Rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
}

impl Positionable {
    /// Create an unrotated box.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
        }
    }

    /// Set the rotation in degrees.
    #[must_use]
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Right edge x-coordinate.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Coordinate along the given axis.
    #[must_use]
    pub const fn coord(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Overwrite the coordinate along the given axis.
    pub fn set_coord(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
    }

    /// Size along the given axis: width for `x`, height for `y`.
    #[must_use]
    pub const fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    /// Far edge along the given axis.
    #[must_use]
    pub fn end(&self, axis: Axis) -> f64 {
        self.coord(axis) + self.extent(axis)
    }

    /// Flip negative width/height produced by dragging up or left.
    ///
    /// The box keeps covering the same area; only the anchor corner moves.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.width < 0.0 {
            self.width = self.width.abs();
            self.x -= self.width;
        }
        if self.height < 0.0 {
            self.height = self.height.abs();
            self.y -= self.height;
        }
        self
    }
}

/// A communication symbol: an image with an optional caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolShape {
    /// Unique identifier.
    pub id: ElementId,
    /// Position and size.
    #[serde(flatten)]
    pub bounds: Positionable,
    /// Caption shown with the symbol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Image source URI or data URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Border color as hex.
    pub stroke: String,
    /// Border width.
    pub stroke_width: f64,
    /// Fill color as hex.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// A free text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextShape {
    /// Unique identifier.
    pub id: ElementId,
    /// Position and size.
    #[serde(flatten)]
    pub bounds: Positionable,
    /// Text content.
    #[serde(default)]
    pub text: String,
    /// Font size in document units.
    pub font_size: f64,
    /// Font family name.
    pub font_family: String,
    /// Text color as hex.
    pub color: String,
    /// Border color as hex.
    pub stroke: String,
    /// Border width.
    pub stroke_width: f64,
}

/// Any element that can be placed on a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum CanvasShape {
    /// An image symbol.
    Symbol(SymbolShape),
    /// A text block.
    Text(TextShape),
}

impl CanvasShape {
    /// The element's identifier.
    #[must_use]
    pub fn id(&self) -> &ElementId {
        match self {
            Self::Symbol(s) => &s.id,
            Self::Text(t) => &t.id,
        }
    }

    /// The discriminant used in identifiers and documents.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Symbol(_) => "symbol",
            Self::Text(_) => "text",
        }
    }

    /// Position and size.
    #[must_use]
    pub const fn bounds(&self) -> &Positionable {
        match self {
            Self::Symbol(s) => &s.bounds,
            Self::Text(t) => &t.bounds,
        }
    }

    /// Mutable position and size.
    pub fn bounds_mut(&mut self) -> &mut Positionable {
        match self {
            Self::Symbol(s) => &mut s.bounds,
            Self::Text(t) => &mut t.bounds,
        }
    }

    /// The same element under a different identifier.
    #[must_use]
    pub fn with_id(mut self, id: ElementId) -> Self {
        match &mut self {
            Self::Symbol(s) => s.id = id,
            Self::Text(t) => t.id = id,
        }
        self
    }

    /// Apply a style change.
    ///
    /// Returns `false` when this kind of element has no such property; the
    /// element is left as it was in that case.
    pub fn apply_style(&mut self, change: &StyleChange) -> bool {
        match (self, change) {
            (Self::Symbol(s), StyleChange::Stroke(v)) => s.stroke.clone_from(v),
            (Self::Text(t), StyleChange::Stroke(v)) => t.stroke.clone_from(v),
            (Self::Symbol(s), StyleChange::StrokeWidth(v)) => s.stroke_width = *v,
            (Self::Text(t), StyleChange::StrokeWidth(v)) => t.stroke_width = *v,
            (Self::Symbol(s), StyleChange::BackgroundColor(v)) => s.background_color.clone_from(v),
            (Self::Text(t), StyleChange::Color(v)) => t.color.clone_from(v),
            (Self::Text(t), StyleChange::FontSize(v)) => t.font_size = *v,
            (Self::Text(t), StyleChange::FontFamily(v)) => t.font_family.clone_from(v),
            _ => return false,
        }
        true
    }

    /// A copy of this element moved to `(x, y)`; everything else is kept.
    #[must_use]
    pub fn moved_to(&self, x: f64, y: f64) -> Self {
        let mut moved = self.clone();
        let bounds = moved.bounds_mut();
        bounds.x = x;
        bounds.y = y;
        moved
    }
}

/// A change to one visual property of an element.
///
/// ```json
/// { "property": "strokeWidth", "value": 3 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "property", content = "value", rename_all = "camelCase")]
pub enum StyleChange {
    /// Border color as hex.
    Stroke(String),
    /// Border width.
    StrokeWidth(f64),
    /// Symbol fill color; `None` clears it.
    BackgroundColor(Option<String>),
    /// Text color as hex.
    Color(String),
    /// Text size.
    FontSize(f64),
    /// Text font family.
    FontFamily(String),
}

/// Anything the layout engine can position.
///
/// Implemented for raw boxes and for full shapes so the grid and gap
/// functions work on either.
pub trait Placed {
    /// Position and size.
    fn bounds(&self) -> &Positionable;

    /// Mutable position and size.
    fn bounds_mut(&mut self) -> &mut Positionable;
}

impl Placed for Positionable {
    fn bounds(&self) -> &Positionable {
        self
    }

    fn bounds_mut(&mut self) -> &mut Positionable {
        self
    }
}

impl Placed for CanvasShape {
    fn bounds(&self) -> &Positionable {
        CanvasShape::bounds(self)
    }

    fn bounds_mut(&mut self) -> &mut Positionable {
        CanvasShape::bounds_mut(self)
    }
}

/// An element that has not been given an identifier yet.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeDraft {
    /// Symbol without an id.
    Symbol {
        /// Position and size.
        bounds: Positionable,
        /// Caption.
        text: Option<String>,
        /// Image source.
        image: Option<String>,
        /// Border color.
        stroke: String,
        /// Border width.
        stroke_width: f64,
        /// Fill color.
        background_color: Option<String>,
    },
    /// Text block without an id.
    Text {
        /// Position and size.
        bounds: Positionable,
        /// Text content.
        text: String,
        /// Font size.
        font_size: f64,
        /// Font family.
        font_family: String,
        /// Text color.
        color: String,
        /// Border color.
        stroke: String,
        /// Border width.
        stroke_width: f64,
    },
}

impl ShapeDraft {
    /// A plain black-bordered symbol.
    #[must_use]
    pub fn symbol(bounds: Positionable) -> Self {
        Self::Symbol {
            bounds,
            text: None,
            image: None,
            stroke: "#000000".to_string(),
            stroke_width: 2.0,
            background_color: None,
        }
    }

    /// A text block in the default font.
    #[must_use]
    pub fn text(bounds: Positionable, text: impl Into<String>) -> Self {
        Self::Text {
            bounds,
            text: text.into(),
            font_size: 16.0,
            font_family: "Arial".to_string(),
            color: "#000000".to_string(),
            stroke: "#000000".to_string(),
            stroke_width: 0.0,
        }
    }

    /// The discriminant the element will carry.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Symbol { .. } => "symbol",
            Self::Text { .. } => "text",
        }
    }

    /// Attach an identifier, producing a board element.
    #[must_use]
    pub fn into_shape(self, id: ElementId) -> CanvasShape {
        match self {
            Self::Symbol {
                bounds,
                text,
                image,
                stroke,
                stroke_width,
                background_color,
            } => CanvasShape::Symbol(SymbolShape {
                id,
                bounds: bounds.normalized(),
                text,
                image,
                stroke,
                stroke_width,
                background_color,
            }),
            Self::Text {
                bounds,
                text,
                font_size,
                font_family,
                color,
                stroke,
                stroke_width,
            } => CanvasShape::Text(TextShape {
                id,
                bounds: bounds.normalized(),
                text,
                font_size,
                font_family,
                color,
                stroke,
                stroke_width,
            }),
        }
    }
}
