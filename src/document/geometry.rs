use serde::{Deserialize, Serialize};

use crate::document::document_model::StyleMap;

/// Tolerance used when comparing layout coordinates.
pub const DEFAULT_PRECISION: f64 = 0.0001;

/// Layout box including borders, as reported by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OffsetBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl OffsetBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
}

/// Border widths in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderWidths {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Box inside the borders.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BorderBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BorderBox {
    pub fn from_offset(offset: &OffsetBox, borders: &BorderWidths) -> Self {
        Self {
            left: offset.left + borders.left,
            top: offset.top + borders.top,
            width: offset.width - borders.left - borders.right,
            height: offset.height - borders.top - borders.bottom,
        }
    }

    /// Component-wise equality within `precision`.
    pub fn same_as(&self, other: &BorderBox, precision: f64) -> bool {
        equals_float(self.left, other.left, precision)
            && equals_float(self.top, other.top, precision)
            && equals_float(self.width, other.width, precision)
            && equals_float(self.height, other.height, precision)
    }
}

pub fn equals_float(x: f64, y: f64, precision: f64) -> bool {
    (x - y).abs() <= precision
}

pub fn border_widths(style: &StyleMap) -> BorderWidths {
    BorderWidths {
        left: pixels(style, "border-left-width"),
        right: pixels(style, "border-right-width"),
        top: pixels(style, "border-top-width"),
        bottom: pixels(style, "border-bottom-width"),
    }
}

/// Rounded pixel value of a `<number>px` property; anything else counts as 0.
fn pixels(style: &StyleMap, property: &str) -> f64 {
    style
        .get(property)
        .and_then(|v| v.trim().strip_suffix("px"))
        .and_then(|v| v.trim().parse::<f64>().ok())
        .map_or(0.0, f64::round)
}
