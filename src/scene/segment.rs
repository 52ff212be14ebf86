//! Draw segments: the per-shape primitive records consumed by the renderers.
//!
//! A shape node owns an ordered list of segments. Each segment pairs one
//! primitive geometry with its own fill/stroke style, and later segments are
//! painted over earlier ones.

/// Geometry parameters for one primitive draw instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentGeometry {
    /// Axis-aligned rectangle
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Ellipse at a center point; a circle when `rx == ry`
    Ellipse { cx: f64, cy: f64, rx: f64, ry: f64 },
    /// Vertex list in `[x0, y0, x1, y1, ...]` order
    Polygon { points: Vec<f64> },
}

impl SegmentGeometry {
    /// Circle shorthand.
    pub fn circle(cx: f64, cy: f64, radius: f64) -> Self {
        SegmentGeometry::Ellipse {
            cx,
            cy,
            rx: radius,
            ry: radius,
        }
    }
}

/// Style attached to one segment, as authored.
///
/// Colors are packed 24-bit values; `None` means the author never set one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStyle {
    pub fill_color: Option<u32>,
    pub line_color: Option<u32>,
    pub line_width: f64,
    pub closed: bool,
}

impl Default for SegmentStyle {
    fn default() -> Self {
        SegmentStyle {
            fill_color: None,
            line_color: None,
            line_width: 0.0,
            closed: true,
        }
    }
}

/// One primitive draw instruction extracted from a shape node.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawSegment {
    pub geometry: SegmentGeometry,
    pub style: SegmentStyle,
}

impl DrawSegment {
    pub fn new(geometry: SegmentGeometry, style: SegmentStyle) -> Self {
        DrawSegment { geometry, style }
    }
}

/// A segment style with extraction defaults applied.
///
/// Line color defaults to black and width to zero when unset. The fill stays
/// optional: rectangles and ellipses always attempt a fill (defaulting to
/// black), while polygons fill only when a fill color was actually authored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedStyle {
    pub fill_color: Option<u32>,
    pub line_color: u32,
    pub line_width: f64,
    pub closed: bool,
}

impl ResolvedStyle {
    pub fn from_style(style: &SegmentStyle) -> Self {
        ResolvedStyle {
            fill_color: style.fill_color,
            line_color: style.line_color.unwrap_or(0x000000),
            line_width: style.line_width.max(0.0),
            closed: style.closed,
        }
    }
}

/// A geometry/style record as handed to the primitive renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSegment<'a> {
    pub geometry: &'a SegmentGeometry,
    pub style: ResolvedStyle,
}
