//! Path construction for the drawing canvases.
//!
//! Paths are built incrementally from move, line and cubic curve operations
//! and consumed by both the raster and the recording canvas. Ellipses are
//! expressed as four cubic Bézier arcs so a single element vocabulary covers
//! every primitive.

use std::fmt;

/// Magic number for approximating a quarter circle with one cubic Bézier.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// A path element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    /// Move to a new point (starts a new subpath)
    MoveTo(f64, f64),
    /// Line to a point
    LineTo(f64, f64),
    /// Cubic Bézier curve (cp1x, cp1y, cp2x, cp2y, x, y)
    CurveTo(f64, f64, f64, f64, f64, f64),
    /// Close the current subpath
    ClosePath,
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::MoveTo(x, y) => write!(f, "M {} {}", x, y),
            PathElement::LineTo(x, y) => write!(f, "L {} {}", x, y),
            PathElement::CurveTo(cp1x, cp1y, cp2x, cp2y, x, y) => {
                write!(f, "C {} {} {} {} {} {}", cp1x, cp1y, cp2x, cp2y, x, y)
            }
            PathElement::ClosePath => write!(f, "Z"),
        }
    }
}

/// A path: an ordered sequence of move, line, curve and close elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    elements: Vec<PathElement>,

    /// Current point (if any)
    current_point: Option<(f64, f64)>,

    /// Start of the current subpath (for close operations)
    subpath_start: Option<(f64, f64)>,

    /// Whether we have an open subpath
    has_open_subpath: bool,
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

impl Path {
    /// Create a new empty path.
    pub fn new() -> Self {
        Path {
            elements: Vec::new(),
            current_point: None,
            subpath_start: None,
            has_open_subpath: false,
        }
    }

    /// Move to a new point, starting a new subpath.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.elements.push(PathElement::MoveTo(x, y));
        self.current_point = Some((x, y));
        self.subpath_start = Some((x, y));
        self.has_open_subpath = false;
    }

    /// Add a line segment from the current point to (x, y).
    pub fn line_to(&mut self, x: f64, y: f64) {
        // If we don't have a current point, implicit move
        if self.current_point.is_none() {
            self.move_to(x, y);
            return;
        }

        self.elements.push(PathElement::LineTo(x, y));
        self.current_point = Some((x, y));
        self.has_open_subpath = true;
    }

    /// Add a cubic Bézier curve.
    ///
    /// # Arguments
    /// * `cp1x, cp1y` - First control point
    /// * `cp2x, cp2y` - Second control point
    /// * `x, y` - End point
    pub fn curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        // If we don't have a current point, implicit move
        if self.current_point.is_none() {
            self.move_to(cp1x, cp1y);
        }

        self.elements
            .push(PathElement::CurveTo(cp1x, cp1y, cp2x, cp2y, x, y));
        self.current_point = Some((x, y));
        self.has_open_subpath = true;
    }

    /// Close the current subpath.
    ///
    /// This adds a line from the current point back to the start of the subpath.
    pub fn close_path(&mut self) {
        if self.has_open_subpath {
            self.elements.push(PathElement::ClosePath);
            // Return to subpath start
            if let Some(start) = self.subpath_start {
                self.current_point = Some(start);
            }
            self.has_open_subpath = false;
        }
    }

    /// An axis-aligned rectangle as a closed subpath.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        let mut path = Path::new();
        path.move_to(x, y);
        path.line_to(x + width, y);
        path.line_to(x + width, y + height);
        path.line_to(x, y + height);
        path.close_path();
        path
    }

    /// An ellipse centered at (cx, cy), approximated with four cubic arcs.
    pub fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        let ox = rx * KAPPA;
        let oy = ry * KAPPA;

        let mut path = Path::new();
        path.move_to(cx + rx, cy);
        path.curve_to(cx + rx, cy + oy, cx + ox, cy + ry, cx, cy + ry);
        path.curve_to(cx - ox, cy + ry, cx - rx, cy + oy, cx - rx, cy);
        path.curve_to(cx - rx, cy - oy, cx - ox, cy - ry, cx, cy - ry);
        path.curve_to(cx + ox, cy - ry, cx + rx, cy - oy, cx + rx, cy);
        path.close_path();
        path
    }

    /// A polyline through `[x0, y0, x1, y1, ...]`, optionally closed.
    ///
    /// Returns an empty path when fewer than two vertices are present.
    pub fn polygon(points: &[f64], closed: bool) -> Self {
        let mut path = Path::new();
        if points.len() < 4 {
            return path;
        }

        path.move_to(points[0], points[1]);
        for pair in points[2..].chunks_exact(2) {
            path.line_to(pair[0], pair[1]);
        }
        if closed {
            path.close_path();
        }
        path
    }

    /// Get the path elements.
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the number of elements in the path.
    pub fn len(&self) -> usize {
        self.elements.len()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for el in &self.elements {
            write!(f, "{} ", el)?;
        }
        Ok(())
    }
}
