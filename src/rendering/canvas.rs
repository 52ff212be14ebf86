//! The drawing surface abstraction.
//!
//! The scene walker issues every drawing operation through this trait, so the
//! same traversal drives both the raster surface and the command recorder.
//! Implementations keep a save/restore stack of transform state; transform
//! calls compose onto the current entry and only affect operations issued
//! until the matching restore.

use crate::core::error::ExportResult;
use crate::rendering::paint::Paint;
use crate::rendering::path::Path;
use crate::texture::Texture;

/// A 2D drawing surface with a saved-state stack.
pub trait Canvas {
    /// Pushes a copy of the current transform state.
    fn save(&mut self);

    /// Pops back to the most recently saved state.
    ///
    /// Restoring past the bottom of the stack is a no-op.
    fn restore(&mut self);

    /// Composes a translation onto the current transform.
    fn translate(&mut self, dx: f64, dy: f64);

    /// Composes a rotation of `degrees` about the point (px, py).
    fn rotate(&mut self, degrees: f64, px: f64, py: f64);

    /// Composes a scale onto the current transform.
    fn scale(&mut self, sx: f64, sy: f64);

    /// Draws a path under the current transform.
    fn draw_path(&mut self, path: &Path, paint: &Paint) -> ExportResult<()>;

    /// Draws a texture into the axis-aligned rectangle (x, y, width, height)
    /// under the current transform.
    fn draw_image(
        &mut self,
        texture: &Texture,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> ExportResult<()>;

    /// Number of saved states above the base entry.
    ///
    /// Zero means the stack is balanced.
    fn stack_depth(&self) -> usize;
}
