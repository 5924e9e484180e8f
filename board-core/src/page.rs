//! Page formats. Element coordinates are in A4 document units.

use serde::{Deserialize, Serialize};

/// Width and height of a page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageDimension {
    /// Page width.
    pub width: f64,
    /// Page height.
    pub height: f64,
}

/// A page format described by its shorter and longer side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFormat {
    /// Format name, e.g. `"a4"`.
    pub name: &'static str,
    shorter: f64,
    longer: f64,
}

/// A4 in document units.
pub const A4: PageFormat = PageFormat::new("a4", 595.28, 841.89);

impl PageFormat {
    /// Create a format from its two side lengths.
    #[must_use]
    pub const fn new(name: &'static str, shorter: f64, longer: f64) -> Self {
        Self {
            name,
            shorter,
            longer,
        }
    }

    /// Upright page dimensions.
    #[must_use]
    pub const fn portrait(&self) -> PageDimension {
        PageDimension {
            width: self.shorter,
            height: self.longer,
        }
    }

    /// Sideways page dimensions.
    #[must_use]
    pub const fn landscape(&self) -> PageDimension {
        PageDimension {
            width: self.longer,
            height: self.shorter,
        }
    }

    /// Dimensions for the given orientation.
    #[must_use]
    pub const fn oriented(&self, is_landscape: bool) -> PageDimension {
        if is_landscape {
            self.landscape()
        } else {
            self.portrait()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_orientation() {
        assert_eq!(A4.portrait().width, 595.28);
        assert_eq!(A4.landscape().width, 841.89);
        assert_eq!(A4.oriented(true), A4.landscape());
        assert_eq!(A4.oriented(false), A4.portrait());
    }

    #[test]
    fn test_custom_format() {
        let format = PageFormat::new("square", 100.0, 200.0);
        assert_eq!(format.portrait(), PageDimension {
            width: 100.0,
            height: 200.0,
        });
        assert_eq!(format.name, "square");
    }
}
