//! A tiny-skia backed raster canvas.
//!
//! This is the "live" surface of an export: every draw call is rasterized
//! immediately into an RGBA pixmap. Transform state lives in an explicit
//! stack so save/restore is a push/pop rather than an inverse computation.

use tiny_skia::{
    FillRule, Paint as SkiaPaint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

use crate::core::error::{ExportError, ExportResult};
use crate::rendering::canvas::Canvas;
use crate::rendering::paint::{Paint, PaintStyle};
use crate::rendering::path::{Path, PathElement};
use crate::texture::Texture;

fn to_skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for el in path.elements() {
        match el {
            PathElement::MoveTo(x, y) => builder.move_to(*x as f32, *y as f32),
            PathElement::LineTo(x, y) => builder.line_to(*x as f32, *y as f32),
            PathElement::CurveTo(cp1x, cp1y, cp2x, cp2y, x, y) => builder.cubic_to(
                *cp1x as f32,
                *cp1y as f32,
                *cp2x as f32,
                *cp2y as f32,
                *x as f32,
                *y as f32,
            ),
            PathElement::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

fn to_skia_paint(paint: &Paint) -> SkiaPaint<'static> {
    let mut sk_paint = SkiaPaint::default();
    sk_paint.set_color_rgba8(paint.color.r, paint.color.g, paint.color.b, paint.color.a);
    sk_paint.anti_alias = paint.anti_alias;
    sk_paint
}

/// A raster drawing surface.
pub struct PixmapCanvas {
    pixmap: Pixmap,
    transform_stack: Vec<Transform>,
}

impl PixmapCanvas {
    /// Creates a transparent surface of the given pixel size.
    pub fn new(width: u32, height: u32) -> ExportResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            ExportError::Rendering(format!("invalid surface size {}x{}", width, height))
        })?;
        Ok(PixmapCanvas {
            pixmap,
            transform_stack: vec![Transform::identity()],
        })
    }

    /// Creates a surface cleared to a solid background color.
    pub fn with_background(width: u32, height: u32, background: u32) -> ExportResult<Self> {
        let mut canvas = Self::new(width, height)?;
        let (r, g, b, _) = crate::core::color::decimal_to_rgba(background);
        let color = tiny_skia::Color::from_rgba8(r, g, b, 255);
        canvas.pixmap.fill(color);
        Ok(canvas)
    }

    fn ctm(&self) -> Transform {
        // The stack always holds at least the base entry
        *self.transform_stack.last().unwrap_or(&Transform::identity())
    }

    fn concat(&mut self, local: Transform) {
        if let Some(current) = self.transform_stack.last_mut() {
            *current = current.pre_concat(local);
        }
    }

    /// Consumes the canvas and returns the rasterized frame.
    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Borrow the frame rendered so far.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

impl Canvas for PixmapCanvas {
    fn save(&mut self) {
        self.transform_stack.push(self.ctm());
    }

    fn restore(&mut self) {
        if self.transform_stack.len() > 1 {
            self.transform_stack.pop();
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.concat(Transform::from_translate(dx as f32, dy as f32));
    }

    fn rotate(&mut self, degrees: f64, px: f64, py: f64) {
        self.concat(Transform::from_rotate_at(
            degrees as f32,
            px as f32,
            py as f32,
        ));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.concat(Transform::from_scale(sx as f32, sy as f32));
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) -> ExportResult<()> {
        let Some(sk_path) = to_skia_path(path) else {
            // Empty or single-point paths rasterize to nothing
            return Ok(());
        };

        let sk_paint = to_skia_paint(paint);
        let transform = self.ctm();

        match paint.style {
            PaintStyle::Fill => {
                self.pixmap
                    .fill_path(&sk_path, &sk_paint, FillRule::Winding, transform, None);
            }
            PaintStyle::Stroke { width } => {
                let stroke = Stroke {
                    width: width as f32,
                    ..Stroke::default()
                };
                self.pixmap
                    .stroke_path(&sk_path, &sk_paint, &stroke, transform, None);
            }
        }

        Ok(())
    }

    fn draw_image(
        &mut self,
        texture: &Texture,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> ExportResult<()> {
        if texture.width == 0 || texture.height == 0 {
            return Err(ExportError::Rendering(format!(
                "texture '{}' has zero extent",
                texture.key
            )));
        }

        // Map the texture's pixel grid into the requested rectangle
        let sx = width / texture.width as f64;
        let sy = height / texture.height as f64;
        let placement = Transform::from_row(sx as f32, 0.0, 0.0, sy as f32, x as f32, y as f32);
        let transform = self.ctm().pre_concat(placement);

        self.pixmap.draw_pixmap(
            0,
            0,
            texture.pixmap.as_ref(),
            &PixmapPaint::default(),
            transform,
            None,
        );

        Ok(())
    }

    fn stack_depth(&self) -> usize {
        self.transform_stack.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Rgba;

    fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let idx = ((y * pixmap.width() + x) * 4) as usize;
        let data = pixmap.data();
        (data[idx], data[idx + 1], data[idx + 2], data[idx + 3])
    }

    #[test]
    fn test_fill_rect_covers_pixels() {
        let mut canvas = PixmapCanvas::new(20, 20).unwrap();
        canvas
            .draw_path(
                &Path::rect(0.0, 0.0, 20.0, 20.0),
                &Paint::fill(Rgba::from_decimal(0xFF0000)),
            )
            .unwrap();
        let pixmap = canvas.into_pixmap();
        assert_eq!(pixel(&pixmap, 10, 10), (255, 0, 0, 255));
    }

    #[test]
    fn test_translate_moves_drawing() {
        let mut canvas = PixmapCanvas::new(20, 20).unwrap();
        canvas.translate(10.0, 0.0);
        canvas
            .draw_path(
                &Path::rect(0.0, 0.0, 5.0, 5.0),
                &Paint::fill(Rgba::from_decimal(0x00FF00)),
            )
            .unwrap();
        let pixmap = canvas.into_pixmap();
        assert_eq!(pixel(&pixmap, 12, 2), (0, 255, 0, 255));
        assert_eq!(pixel(&pixmap, 2, 2).3, 0);
    }

    #[test]
    fn test_restore_undoes_transform() {
        let mut canvas = PixmapCanvas::new(20, 20).unwrap();
        canvas.save();
        canvas.translate(100.0, 100.0);
        canvas.restore();
        assert_eq!(canvas.stack_depth(), 0);
        canvas
            .draw_path(
                &Path::rect(0.0, 0.0, 4.0, 4.0),
                &Paint::fill(Rgba::black()),
            )
            .unwrap();
        let pixmap = canvas.into_pixmap();
        assert_eq!(pixel(&pixmap, 1, 1), (0, 0, 0, 255));
    }

    #[test]
    fn test_background_fill() {
        let canvas = PixmapCanvas::with_background(4, 4, 0x0E0E0E).unwrap();
        assert_eq!(pixel(canvas.pixmap(), 0, 0), (14, 14, 14, 255));
    }

    #[test]
    fn test_zero_size_surface_rejected() {
        assert!(PixmapCanvas::new(0, 10).is_err());
    }
}
