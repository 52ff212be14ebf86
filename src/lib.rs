//! # scene2pdf
//!
//! A scene-graph-to-PDF translator: declarative 2D scene trees are rendered
//! with a software rasterizer and, in the same pass structure, re-recorded
//! into a resolution-independent picture that serializes as a single-page
//! vector PDF document.
//!
//! ## Pipeline
//!
//! ```text
//! SceneNode tree
//!    │  preload (fetch + decode every referenced texture)
//!    ▼
//! scene walker ──► PixmapCanvas (raster frame)
//!    │
//!    └──────────► RecordingCanvas ──► Picture ──► PDF bytes
//! ```
//!
//! Both surfaces are driven by the same walker, so the raster frame and the
//! vector document can only differ through surface behavior, never through
//! traversal order or transform math.
//!
//! ## Example
//!
//! ```no_run
//! use scene2pdf::export::{ExportSession, SurfaceConfig};
//! use scene2pdf::scenes::build_scene;
//!
//! # async fn run() -> scene2pdf::core::ExportResult<()> {
//! let scene = build_scene("shapes", 500, 500).expect("known scene name");
//! let session = ExportSession::new(SurfaceConfig::new(500, 500).with_background(0x0E0E0E))?;
//! let output = session.export_pdf(&scene).await?;
//! std::fs::write("shapes.pdf", &output.pdf).ok();
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod export;
pub mod pdf;
pub mod rendering;
pub mod scene;
pub mod scenes;
pub mod texture;

pub use crate::core::{ColorTable, ExportError, ExportResult, Rgba};
pub use crate::export::{ExportSession, PdfExport, SurfaceConfig};
pub use crate::rendering::{
    render_scene, Canvas, DrawCommand, Paint, Path, Picture, PixmapCanvas, RecordingCanvas,
    WalkerOptions,
};
pub use crate::scene::{Group, SceneNode, Shape, Sprite, Transform2D};
pub use crate::texture::{preload::preload_textures, Texture, TextureCache};
