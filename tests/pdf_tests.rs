//! Document structure tests for the PDF serializer.


use scene2pdf::export::{ExportSession, SurfaceConfig};
use scene2pdf::scenes::build_scene;
use test_utils::*;

async fn export_pdf_bytes(width: u32, height: u32) -> Vec<u8> {
    let session = ExportSession::new(SurfaceConfig::new(width, height)).unwrap();
    session
        .export_pdf(&two_rects_scene())
        .await
        .unwrap()
        .pdf
}

#[tokio::test]
async fn test_document_framing() {
    let pdf = export_pdf_bytes(320, 240).await;
    let text = String::from_utf8_lossy(&pdf);

    assert!(text.starts_with("%PDF-1.4\n"));
    assert!(text.contains("/Type /Catalog"));
    assert!(text.contains("/Type /Pages"));
    assert!(text.contains("/MediaBox [0 0 320 240]"));
    assert!(text.contains("xref"));
    assert!(text.contains("startxref"));
    assert!(text.trim_end().ends_with("%%EOF"));
}

#[tokio::test]
async fn test_content_stream_inflates_and_flips() {
    let pdf = export_pdf_bytes(200, 300).await;
    let content = decode_content_stream(&pdf);

    // Global y-flip comes first, so scene coordinates are emitted verbatim
    assert!(content.starts_with("1 0 0 -1 0 300 cm\n"));

    // The walk brackets every node with q/Q
    let q = content.matches("q\n").count();
    let capital_q = content.matches("Q\n").count();
    assert!(q >= 3);
    assert_eq!(q, capital_q);
}

#[tokio::test]
async fn test_content_paints_fill_before_stroke() {
    let pdf = export_pdf_bytes(200, 200).await;
    let content = decode_content_stream(&pdf);

    // The bordered rect fills (f) before it strokes (S)
    let fill_at = content.rfind("f\n").unwrap();
    let stroke_at = content.rfind("S\n").unwrap();
    assert!(fill_at < stroke_at);
    assert!(content.contains(" rg\n"));
    assert!(content.contains(" RG\n"));
    assert!(content.contains("2 w\n"));
}

#[tokio::test]
async fn test_demo_scenes_serialize() {
    for name in scene2pdf::scenes::SCENE_NAMES {
        let scene = build_scene(name, 500, 500).unwrap();
        let session = ExportSession::new(SurfaceConfig::new(500, 500)).unwrap();
        let output = session.export_pdf(&scene).await.unwrap();
        assert!(
            output.pdf.len() > 500,
            "scene '{}' produced an implausibly small document",
            name
        );
        let content = decode_content_stream(&output.pdf);
        assert!(content.contains("f\n"), "scene '{}' has no fills", name);
    }
}
