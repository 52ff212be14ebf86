//! Exports the built-in "shapes" scene as shapes.pdf plus a PNG preview.
//!
//! Run with: cargo run --example export_shapes

use scene2pdf::export::{ExportSession, SurfaceConfig};
use scene2pdf::scenes::build_scene;

#[tokio::main]
async fn main() {
    let scene = build_scene("shapes", 500, 500).expect("shapes is a built-in scene");

    let surface = SurfaceConfig::new(500, 500).with_background(0x0E0E0E);
    let session = ExportSession::new(surface).expect("session setup");

    let output = session.export_pdf(&scene).await.expect("export");

    std::fs::write("shapes.pdf", &output.pdf).expect("write pdf");
    println!("Wrote shapes.pdf ({} bytes)", output.pdf.len());

    let png = output.frame.encode_png().expect("encode png");
    std::fs::write("shapes.png", &png).expect("write png");
    println!("Wrote shapes.png ({} bytes)", png.len());
}
