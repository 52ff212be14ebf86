//! Rendering: canvases, paths, paints and the scene walker.

pub mod canvas;
pub mod matrix;
pub mod paint;
pub mod path;
pub mod pixmap_canvas;
pub mod recorder;
pub mod shapes;
pub mod walker;

pub use canvas::Canvas;
pub use matrix::Matrix;
pub use paint::{Paint, PaintStyle};
pub use path::{Path, PathElement};
pub use pixmap_canvas::PixmapCanvas;
pub use recorder::{DrawCommand, Picture, RecordingCanvas};
pub use walker::{render_scene, WalkerOptions};
