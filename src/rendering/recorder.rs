//! The recording canvas: captures draw calls instead of rasterizing them.
//!
//! The walker drives a [`RecordingCanvas`] exactly like a raster surface, and
//! the captured command list becomes a [`Picture`]. A picture is a faithful,
//! resolution-independent re-recording of the scene, which is what the PDF
//! writer serializes.

use crate::core::error::{ExportError, ExportResult};
use crate::rendering::canvas::Canvas;
use crate::rendering::paint::Paint;
use crate::rendering::path::Path;
use crate::texture::{Texture, TextureCache};

/// One captured canvas operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate {
        dx: f64,
        dy: f64,
    },
    /// Rotation in degrees about (px, py)
    Rotate {
        degrees: f64,
        px: f64,
        py: f64,
    },
    Scale {
        sx: f64,
        sy: f64,
    },
    DrawPath {
        path: Path,
        paint: Paint,
    },
    /// Texture placement; the texture itself lives in the cache under `key`
    DrawImage {
        key: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

/// A canvas that records operations instead of executing them.
#[derive(Debug)]
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
    depth: usize,
}

impl RecordingCanvas {
    /// Starts a recording for a surface of the given logical size.
    pub fn new(width: u32, height: u32) -> Self {
        RecordingCanvas {
            width,
            height,
            commands: Vec::new(),
            depth: 0,
        }
    }

    /// The commands captured so far, in issue order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Finalizes the recording into an immutable picture.
    ///
    /// Fails when save/restore calls are unbalanced, since replaying such a
    /// stream would corrupt downstream graphics state.
    pub fn finish_recording(self) -> ExportResult<Picture> {
        if self.depth != 0 {
            return Err(ExportError::Finalize(format!(
                "unbalanced save/restore: {} state(s) left on the stack",
                self.depth
            )));
        }
        Ok(Picture {
            width: self.width,
            height: self.height,
            commands: self.commands,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
        self.depth += 1;
    }

    fn restore(&mut self) {
        if self.depth == 0 {
            return;
        }
        self.commands.push(DrawCommand::Restore);
        self.depth -= 1;
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.commands.push(DrawCommand::Translate { dx, dy });
    }

    fn rotate(&mut self, degrees: f64, px: f64, py: f64) {
        self.commands.push(DrawCommand::Rotate { degrees, px, py });
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.commands.push(DrawCommand::Scale { sx, sy });
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) -> ExportResult<()> {
        self.commands.push(DrawCommand::DrawPath {
            path: path.clone(),
            paint: *paint,
        });
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
        self.commands.push(DrawCommand::DrawImage {
            key: texture.key.clone(),
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn stack_depth(&self) -> usize {
        self.depth
    }
}

/// An immutable, replayable record of a scene's draw calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl Picture {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The recorded commands, in issue order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Serializes the picture into a single-page PDF document.
    ///
    /// Raster draws are looked up in `textures`; the cache must contain every
    /// key the recording references.
    pub fn to_pdf(&self, textures: &TextureCache) -> ExportResult<Vec<u8>> {
        crate::pdf::write_pdf(self, textures)
    }
}
