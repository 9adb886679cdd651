//! Menu placement relative to its anchor, clamped to the viewport.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::consts::{MENU_GAP, VIEWPORT_MARGIN};

/// An axis-aligned box in viewport pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self { top, left, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Viewport extent in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Computed top-left corner for a menu surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub top: f64,
    pub left: f64,
}

impl Geometry {
    /// CSS `top` value, rounded to whole pixels.
    #[must_use]
    pub fn top_css(&self) -> String {
        px(self.top)
    }

    /// CSS `left` value, rounded to whole pixels.
    #[must_use]
    pub fn left_css(&self) -> String {
        px(self.left)
    }
}

fn px(value: f64) -> String {
    format!("{}px", value.round())
}

/// Clamp with the lower bound winning when the interval is inverted.
#[must_use]
pub fn clamp(n: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(n))
}

fn finite(n: f64) -> f64 {
    if n.is_finite() { n } else { 0.0 }
}

/// Place `menu` beside `anchor`: vertically centered on the anchor, offset
/// [`MENU_GAP`] to its right, and kept [`VIEWPORT_MARGIN`] inside every edge.
///
/// The menu must already be laid out so its rect carries real dimensions.
/// When the menu is larger than the viewport the margin wins and the result
/// is [`VIEWPORT_MARGIN`] on that axis.
#[must_use]
pub fn position(menu: Rect, anchor: Rect, viewport: Size) -> Geometry {
    let menu_w = finite(menu.width).max(0.0);
    let menu_h = finite(menu.height).max(0.0);
    let anchor_top = finite(anchor.top);
    let anchor_h = finite(anchor.height);
    let anchor_right = finite(anchor.right());
    let vw = finite(viewport.width);
    let vh = finite(viewport.height);

    let top = clamp(
        anchor_top + anchor_h / 2.0 - menu_h / 2.0,
        VIEWPORT_MARGIN,
        vh - menu_h - VIEWPORT_MARGIN,
    );
    let left = clamp(anchor_right + MENU_GAP, VIEWPORT_MARGIN, vw - menu_w - VIEWPORT_MARGIN);

    Geometry { top, left }
}
