//! Persisted board document.
//!
//! ```json
//! { "elements": [...], "numberOfPages": 2, "isLandscape": true, "version": 1 }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{BoardError, BoardResult, CanvasShape};

/// Newest document format version this crate reads and writes.
pub const DOCUMENT_VERSION: u32 = 1;

/// A saved board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDocument {
    /// All elements in paint order.
    pub elements: Vec<CanvasShape>,
    /// Number of pages the board spans.
    #[serde(default = "BoardDocument::default_number_of_pages")]
    pub number_of_pages: u32,
    /// Page orientation.
    #[serde(default = "BoardDocument::default_is_landscape")]
    pub is_landscape: bool,
    /// Format version.
    #[serde(default = "BoardDocument::default_version")]
    pub version: u32,
}

impl Default for BoardDocument {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl BoardDocument {
    const fn default_number_of_pages() -> u32 {
        1
    }

    const fn default_is_landscape() -> bool {
        true
    }

    const fn default_version() -> u32 {
        DOCUMENT_VERSION
    }

    /// A single landscape page holding the given elements.
    #[must_use]
    pub fn new(elements: Vec<CanvasShape>) -> Self {
        Self {
            elements,
            number_of_pages: Self::default_number_of_pages(),
            is_landscape: Self::default_is_landscape(),
            version: DOCUMENT_VERSION,
        }
    }

    /// Check the document can be loaded.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnsupportedVersion`] for documents from a newer
    /// format, and [`BoardError::InvalidDocument`] for zero pages or
    /// duplicate element ids.
    pub fn validate(&self) -> BoardResult<()> {
        if self.version > DOCUMENT_VERSION {
            return Err(BoardError::UnsupportedVersion {
                found: self.version,
                supported: DOCUMENT_VERSION,
            });
        }
        if self.number_of_pages == 0 {
            return Err(BoardError::InvalidDocument(
                "a board has at least one page".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for element in &self.elements {
            if !seen.insert(element.id()) {
                return Err(BoardError::InvalidDocument(format!(
                    "duplicate element id: {}",
                    element.id()
                )));
            }
        }
        Ok(())
    }

    /// Serialize the document to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> BoardResult<String> {
        serde_json::to_string(self).map_err(BoardError::Serialization)
    }

    /// Serialize the document to indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> BoardResult<String> {
        serde_json::to_string_pretty(self).map_err(BoardError::Serialization)
    }

    /// Parse and validate a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the document fails
    /// [`BoardDocument::validate`].
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }
}
