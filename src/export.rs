//! The export session: preload, rasterize, record, serialize.
//!
//! One session holds the surface configuration and the HTTP client used for
//! remote texture references; each `export` call runs the full pipeline for
//! one scene tree. The scene is walked twice with identical traversal logic:
//! once onto the live raster surface and once onto the recorder whose output
//! feeds the PDF writer.

use tiny_skia::Pixmap;

use crate::core::error::ExportResult;
use crate::rendering::{render_scene, PixmapCanvas, Picture, RecordingCanvas, WalkerOptions};
use crate::scene::SceneNode;
use crate::texture::preload::{default_client, preload_textures};
use crate::texture::TextureCache;

/// Target surface parameters.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceConfig {
    pub width: u32,
    pub height: u32,
    /// Solid background for the raster frame; `None` leaves it transparent.
    ///
    /// The recording stays background-free either way, so the PDF page keeps
    /// the viewer's own page color.
    pub background: Option<u32>,
}

impl SurfaceConfig {
    pub fn new(width: u32, height: u32) -> Self {
        SurfaceConfig {
            width,
            height,
            background: None,
        }
    }

    pub fn with_background(mut self, color: u32) -> Self {
        self.background = Some(color);
        self
    }
}

/// Callback invoked with the finished recording and the texture cache that
/// resolves its raster references.
pub type PictureCallback<'a> = Box<dyn FnOnce(&Picture, &TextureCache) + 'a>;

/// The rendered outputs of a PDF export.
pub struct PdfExport {
    /// The rasterized frame
    pub frame: Pixmap,
    /// The serialized single-page document
    pub pdf: Vec<u8>,
}

/// A configured export pipeline.
pub struct ExportSession {
    surface: SurfaceConfig,
    options: WalkerOptions,
    client: reqwest::Client,
}

impl ExportSession {
    pub fn new(surface: SurfaceConfig) -> ExportResult<Self> {
        Ok(ExportSession {
            surface,
            options: WalkerOptions::default(),
            client: default_client()?,
        })
    }

    pub fn with_options(mut self, options: WalkerOptions) -> Self {
        self.options = options;
        self
    }

    fn live_canvas(&self) -> ExportResult<PixmapCanvas> {
        match self.surface.background {
            Some(color) => {
                PixmapCanvas::with_background(self.surface.width, self.surface.height, color)
            }
            None => PixmapCanvas::new(self.surface.width, self.surface.height),
        }
    }

    fn rasterize(&self, root: &SceneNode, textures: &TextureCache) -> ExportResult<Pixmap> {
        let mut canvas = self.live_canvas()?;
        render_scene(root, &mut canvas, textures, &self.options)?;
        Ok(canvas.into_pixmap())
    }

    fn record(&self, root: &SceneNode, textures: &TextureCache) -> ExportResult<Picture> {
        let mut recorder = RecordingCanvas::new(self.surface.width, self.surface.height);
        render_scene(root, &mut recorder, textures, &self.options)?;
        recorder.finish_recording()
    }

    /// Runs the pipeline: preload every texture, rasterize the scene, then
    /// re-record it and hand the picture to `on_complete`.
    ///
    /// A recording that cannot be finalized is reported as a warning and the
    /// callback is skipped; the raster frame is still returned, since it was
    /// already rendered from the same traversal.
    pub async fn export(
        &self,
        root: &SceneNode,
        on_complete: Option<PictureCallback<'_>>,
    ) -> ExportResult<Pixmap> {
        let textures = preload_textures(root, &self.client).await?;

        let frame = self.rasterize(root, &textures)?;

        match self.record(root, &textures) {
            Ok(picture) => {
                if let Some(callback) = on_complete {
                    callback(&picture, &textures);
                }
            }
            Err(e) => {
                eprintln!("Warning: recording not finalized, skipping callback: {}", e);
            }
        }

        Ok(frame)
    }

    /// Runs the pipeline and serializes the recording into a PDF document.
    ///
    /// Unlike [`export`](Self::export), a recording failure here is a hard
    /// error, since the document is the requested output.
    pub async fn export_pdf(&self, root: &SceneNode) -> ExportResult<PdfExport> {
        let textures = preload_textures(root, &self.client).await?;
        let frame = self.rasterize(root, &textures)?;
        let picture = self.record(root, &textures)?;
        let pdf = picture.to_pdf(&textures)?;
        Ok(PdfExport { frame, pdf })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::build::{rectangle, ShapeStyle};
    use crate::scene::Group;
    use std::cell::Cell;

    fn shape_scene() -> SceneNode {
        let mut root = Group::new("root");
        root.add_child(rectangle(
            "r",
            10.0,
            10.0,
            30.0,
            30.0,
            ShapeStyle::filled(0x720606),
            0.0,
        ));
        SceneNode::Group(root)
    }

    #[tokio::test]
    async fn test_export_invokes_callback_with_picture() {
        let session = ExportSession::new(SurfaceConfig::new(100, 100)).unwrap();
        let called = Cell::new(false);

        let frame = session
            .export(
                &shape_scene(),
                Some(Box::new(|picture, _textures| {
                    called.set(true);
                    assert_eq!(picture.width(), 100);
                    assert!(!picture.commands().is_empty());
                })),
            )
            .await
            .unwrap();

        assert!(called.get());
        assert_eq!(frame.width(), 100);
    }

    #[tokio::test]
    async fn test_export_pdf_produces_document_and_frame() {
        let session = ExportSession::new(SurfaceConfig::new(120, 80).with_background(0x0E0E0E))
            .unwrap();
        let output = session.export_pdf(&shape_scene()).await.unwrap();

        assert_eq!((output.frame.width(), output.frame.height()), (120, 80));
        assert!(output.pdf.starts_with(b"%PDF-1.4"));

        // Background is applied to the frame
        let data = output.frame.data();
        assert_eq!(&data[..4], &[14, 14, 14, 255]);
    }

    #[tokio::test]
    async fn test_missing_texture_fails_before_any_rendering() {
        let session = ExportSession::new(SurfaceConfig::new(50, 50)).unwrap();
        let node = crate::scene::build::sprite("/no/such/file.png", 0.0, 0.0, 10.0, 10.0);
        assert!(session.export(&node, None).await.is_err());
    }
}
