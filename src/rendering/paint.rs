//! Paint descriptions shared by the raster and recording canvases.

use crate::core::color::Rgba;

/// How a path is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintStyle {
    /// Fill the path interior (non-zero winding)
    Fill,
    /// Stroke the path outline with the given width
    Stroke { width: f64 },
}

/// A solid-color paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Rgba,
    pub style: PaintStyle,
    pub anti_alias: bool,
}

impl Paint {
    /// A filled paint with the given color.
    pub fn fill(color: Rgba) -> Self {
        Paint {
            color,
            style: PaintStyle::Fill,
            anti_alias: true,
        }
    }

    /// A stroked paint with the given color and line width.
    pub fn stroke(color: Rgba, width: f64) -> Self {
        Paint {
            color,
            style: PaintStyle::Stroke { width },
            anti_alias: true,
        }
    }

    /// True when this paint strokes rather than fills.
    pub fn is_stroke(&self) -> bool {
        matches!(self.style, PaintStyle::Stroke { .. })
    }
}
