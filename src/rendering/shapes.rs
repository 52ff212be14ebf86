//! Primitive renderers: segment records to canvas calls.
//!
//! Each renderer builds the primitive's path, fills it first and strokes it
//! second, so borders always sit on top of fills. A stroke is issued only
//! when the resolved line width is positive.
//!
//! Degenerate geometry (non-positive radii, non-finite extents, polygons with
//! fewer than two vertices) is skipped with a warning rather than aborting
//! the walk; every well-formed sibling still renders.

use crate::core::color::Rgba;
use crate::core::error::ExportResult;
use crate::rendering::canvas::Canvas;
use crate::rendering::paint::Paint;
use crate::rendering::path::Path;
use crate::scene::{ResolvedSegment, SegmentGeometry};

fn finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

/// Fills and strokes `path` per the segment's resolved style.
///
/// Rectangles and ellipses always fill (defaulting to black); polygons fill
/// only when a fill color was authored, which keeps open polylines from
/// self-filling.
fn paint_path<C: Canvas>(
    canvas: &mut C,
    path: &Path,
    fill_color: Option<u32>,
    line_color: u32,
    line_width: f64,
) -> ExportResult<()> {
    if let Some(color) = fill_color {
        canvas.draw_path(path, &Paint::fill(Rgba::from_decimal(color)))?;
    }
    if line_width > 0.0 {
        canvas.draw_path(
            path,
            &Paint::stroke(Rgba::from_decimal(line_color), line_width),
        )?;
    }
    Ok(())
}

/// Renders one resolved segment onto the canvas.
pub fn render_segment<C: Canvas>(
    canvas: &mut C,
    segment: &ResolvedSegment<'_>,
    shape_label: &str,
) -> ExportResult<()> {
    let style = &segment.style;
    match segment.geometry {
        SegmentGeometry::Rect {
            x,
            y,
            width,
            height,
        } => {
            if !finite(&[*x, *y, *width, *height]) || *width <= 0.0 || *height <= 0.0 {
                eprintln!(
                    "Warning: skipping degenerate rect in '{}' ({}x{})",
                    shape_label, width, height
                );
                return Ok(());
            }
            let path = Path::rect(*x, *y, *width, *height);
            paint_path(
                canvas,
                &path,
                Some(style.fill_color.unwrap_or(0x000000)),
                style.line_color,
                style.line_width,
            )
        }
        SegmentGeometry::Ellipse { cx, cy, rx, ry } => {
            if !finite(&[*cx, *cy, *rx, *ry]) || *rx <= 0.0 || *ry <= 0.0 {
                eprintln!(
                    "Warning: skipping degenerate ellipse in '{}' (rx={}, ry={})",
                    shape_label, rx, ry
                );
                return Ok(());
            }
            let path = Path::ellipse(*cx, *cy, *rx, *ry);
            paint_path(
                canvas,
                &path,
                Some(style.fill_color.unwrap_or(0x000000)),
                style.line_color,
                style.line_width,
            )
        }
        SegmentGeometry::Polygon { points } => {
            if points.len() < 4 || points.len() % 2 != 0 || !finite(points) {
                eprintln!(
                    "Warning: skipping degenerate polygon in '{}' ({} coordinates)",
                    shape_label,
                    points.len()
                );
                return Ok(());
            }
            let path = Path::polygon(points, style.closed);
            // Polygons fill only when a fill color was actually authored
            paint_path(
                canvas,
                &path,
                style.fill_color,
                style.line_color,
                style.line_width,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::recorder::{DrawCommand, RecordingCanvas};
    use crate::scene::{ResolvedStyle, SegmentStyle};

    fn resolved<'a>(geometry: &'a SegmentGeometry, style: SegmentStyle) -> ResolvedSegment<'a> {
        ResolvedSegment {
            geometry,
            style: ResolvedStyle::from_style(&style),
        }
    }

    fn draw_paints(canvas: &RecordingCanvas) -> Vec<Paint> {
        canvas
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::DrawPath { paint, .. } => Some(*paint),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_fill_only_segment_emits_one_fill_no_stroke() {
        let mut canvas = RecordingCanvas::new(100, 100);
        let geometry = SegmentGeometry::Rect {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        };
        let segment = resolved(
            &geometry,
            SegmentStyle {
                fill_color: Some(0x720606),
                ..SegmentStyle::default()
            },
        );
        render_segment(&mut canvas, &segment, "rect").unwrap();

        let paints = draw_paints(&canvas);
        assert_eq!(paints.len(), 1);
        assert!(!paints[0].is_stroke());
    }

    #[test]
    fn test_fill_precedes_stroke() {
        let mut canvas = RecordingCanvas::new(100, 100);
        let geometry = SegmentGeometry::circle(20.0, 20.0, 5.0);
        let segment = resolved(
            &geometry,
            SegmentStyle {
                fill_color: Some(0x067206),
                line_color: Some(0x0E0E0E),
                line_width: 2.0,
                closed: true,
            },
        );
        render_segment(&mut canvas, &segment, "circle").unwrap();

        let paints = draw_paints(&canvas);
        assert_eq!(paints.len(), 2);
        assert!(!paints[0].is_stroke());
        assert!(paints[1].is_stroke());
    }

    #[test]
    fn test_unfilled_polygon_strokes_only() {
        let mut canvas = RecordingCanvas::new(100, 100);
        let geometry = SegmentGeometry::Polygon {
            points: vec![0.0, 0.0, 10.0, 0.0, 10.0, 10.0],
        };
        let segment = resolved(
            &geometry,
            SegmentStyle {
                line_color: Some(0x383838),
                line_width: 3.0,
                closed: false,
                ..SegmentStyle::default()
            },
        );
        render_segment(&mut canvas, &segment, "polyline").unwrap();

        let paints = draw_paints(&canvas);
        assert_eq!(paints.len(), 1);
        assert!(paints[0].is_stroke());
    }

    #[test]
    fn test_rect_without_fill_defaults_to_black() {
        let mut canvas = RecordingCanvas::new(100, 100);
        let geometry = SegmentGeometry::Rect {
            x: 0.0,
            y: 0.0,
            width: 5.0,
            height: 5.0,
        };
        let segment = resolved(&geometry, SegmentStyle::default());
        render_segment(&mut canvas, &segment, "rect").unwrap();

        let paints = draw_paints(&canvas);
        assert_eq!(paints.len(), 1);
        assert_eq!(paints[0].color, Rgba::black());
    }

    #[test]
    fn test_degenerate_geometry_skipped() {
        let mut canvas = RecordingCanvas::new(100, 100);

        let zero_radius = SegmentGeometry::circle(10.0, 10.0, 0.0);
        render_segment(
            &mut canvas,
            &resolved(&zero_radius, SegmentStyle::default()),
            "dot",
        )
        .unwrap();

        let single_point = SegmentGeometry::Polygon {
            points: vec![1.0, 2.0],
        };
        render_segment(
            &mut canvas,
            &resolved(&single_point, SegmentStyle::default()),
            "point",
        )
        .unwrap();

        let bad_rect = SegmentGeometry::Rect {
            x: 0.0,
            y: 0.0,
            width: f64::NAN,
            height: 10.0,
        };
        render_segment(
            &mut canvas,
            &resolved(&bad_rect, SegmentStyle::default()),
            "nan_rect",
        )
        .unwrap();

        assert!(canvas.commands().is_empty());
    }
}
