//! Serializing a recorded picture into a single-page PDF document.
//!
//! The document is assembled object by object with tracked byte offsets, then
//! finished with a cross-reference table, trailer and `%%EOF` marker. The
//! recorded draw commands become one Flate-compressed content stream; raster
//! draws become image XObjects, deduplicated by texture key.
//!
//! ## Document layout
//!
//! ```text
//! %PDF-1.4
//! 1 0 obj  << /Type /Catalog >>
//! 2 0 obj  << /Type /Pages >>
//! 3 0 obj  << /Type /Page >>
//! 4 0 obj  content stream
//! 5 0 obj+ image XObjects (and /SMask streams)
//! xref
//! trailer
//! %%EOF
//! ```

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use rustc_hash::FxHashMap;

use crate::core::color::degrees_to_radians;
use crate::core::error::{ExportError, ExportResult};
use crate::rendering::matrix::Matrix;
use crate::rendering::paint::PaintStyle;
use crate::rendering::path::{Path, PathElement};
use crate::rendering::recorder::{DrawCommand, Picture};
use crate::texture::{Texture, TextureCache};

/// Formats a coordinate the way content streams expect: integers bare,
/// everything else with four decimals.
fn num(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e12 {
        format!("{}", value as i64)
    } else {
        format!("{:.4}", value)
    }
}

fn color_component(channel: u8) -> String {
    format!("{:.4}", channel as f64 / 255.0)
}

fn deflate(data: &[u8]) -> ExportResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .and_then(|_| encoder.finish())
        .map_err(|e| ExportError::Finalize(format!("stream compression failed: {}", e)))
}

/// A registered image XObject: resource name plus assigned object ids.
struct ImageSlot {
    name: String,
    object_id: u32,
    smask_id: Option<u32>,
}

/// Low-level document assembler with offset tracking.
struct DocumentWriter {
    buffer: Vec<u8>,
    /// Byte offset of each written object, indexed by object number - 1
    offsets: Vec<u64>,
}

impl DocumentWriter {
    fn new() -> Self {
        let mut buffer = Vec::new();
        buffer.extend_from_slice(b"%PDF-1.4\n");
        // Binary comment so transfer tools treat the file as binary
        buffer.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");
        DocumentWriter {
            buffer,
            offsets: Vec::new(),
        }
    }

    /// Writes one indirect object with a dictionary body.
    fn write_object(&mut self, id: u32, body: &str) {
        self.begin_object(id);
        self.buffer.extend_from_slice(body.as_bytes());
        self.buffer.extend_from_slice(b"\nendobj\n");
    }

    /// Writes one indirect stream object; `dict` must not include /Length.
    fn write_stream(&mut self, id: u32, dict: &str, data: &[u8]) {
        self.begin_object(id);
        let header = format!("<< {} /Length {} >>\nstream\n", dict, data.len());
        self.buffer.extend_from_slice(header.as_bytes());
        self.buffer.extend_from_slice(data);
        self.buffer.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn begin_object(&mut self, id: u32) {
        debug_assert_eq!(id as usize, self.offsets.len() + 1);
        self.offsets.push(self.buffer.len() as u64);
        let header = format!("{} 0 obj\n", id);
        self.buffer.extend_from_slice(header.as_bytes());
    }

    /// Writes the xref table and trailer, returning the finished document.
    fn finish(mut self) -> Vec<u8> {
        let xref_offset = self.buffer.len() as u64;
        let count = self.offsets.len();

        self.buffer.extend_from_slice(b"xref\n");
        let subsection = format!("0 {}\n", count + 1);
        self.buffer.extend_from_slice(subsection.as_bytes());
        self.buffer.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &self.offsets {
            let entry = format!("{:010} {:05} n \n", offset, 0);
            self.buffer.extend_from_slice(entry.as_bytes());
        }

        let trailer = format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            count + 1,
            xref_offset
        );
        self.buffer.extend_from_slice(trailer.as_bytes());
        self.buffer
    }
}

fn append_matrix(content: &mut String, matrix: &Matrix) {
    let [a, b, c, d, e, f] = matrix.as_coeffs();
    content.push_str(&format!(
        "{} {} {} {} {} {} cm\n",
        num(a),
        num(b),
        num(c),
        num(d),
        num(e),
        num(f)
    ));
}

fn append_path(content: &mut String, path: &Path) {
    for el in path.elements() {
        match el {
            PathElement::MoveTo(x, y) => {
                content.push_str(&format!("{} {} m\n", num(*x), num(*y)));
            }
            PathElement::LineTo(x, y) => {
                content.push_str(&format!("{} {} l\n", num(*x), num(*y)));
            }
            PathElement::CurveTo(cp1x, cp1y, cp2x, cp2y, x, y) => {
                content.push_str(&format!(
                    "{} {} {} {} {} {} c\n",
                    num(*cp1x),
                    num(*cp1y),
                    num(*cp2x),
                    num(*cp2y),
                    num(*x),
                    num(*y)
                ));
            }
            PathElement::ClosePath => content.push_str("h\n"),
        }
    }
}

/// Replays the recorded commands into content stream text.
///
/// The first operator flips the coordinate system to y-down so recorded
/// coordinates can be emitted verbatim. Image placements flip back locally,
/// otherwise every raster would come out mirrored.
pub(crate) fn build_content(
    picture: &Picture,
    image_names: &FxHashMap<String, String>,
) -> ExportResult<String> {
    let mut content = String::new();
    content.push_str(&format!("1 0 0 -1 0 {} cm\n", picture.height()));

    for command in picture.commands() {
        match command {
            DrawCommand::Save => content.push_str("q\n"),
            DrawCommand::Restore => content.push_str("Q\n"),
            DrawCommand::Translate { dx, dy } => {
                content.push_str(&format!("1 0 0 1 {} {} cm\n", num(*dx), num(*dy)));
            }
            DrawCommand::Rotate { degrees, px, py } => {
                let matrix = Matrix::rotation_about(degrees_to_radians(*degrees), *px, *py);
                append_matrix(&mut content, &matrix);
            }
            DrawCommand::Scale { sx, sy } => {
                content.push_str(&format!("{} 0 0 {} 0 0 cm\n", num(*sx), num(*sy)));
            }
            DrawCommand::DrawPath { path, paint } => {
                if path.is_empty() {
                    continue;
                }
                match paint.style {
                    PaintStyle::Fill => {
                        content.push_str(&format!(
                            "{} {} {} rg\n",
                            color_component(paint.color.r),
                            color_component(paint.color.g),
                            color_component(paint.color.b)
                        ));
                        append_path(&mut content, path);
                        content.push_str("f\n");
                    }
                    PaintStyle::Stroke { width } => {
                        content.push_str(&format!(
                            "{} {} {} RG\n{} w\n",
                            color_component(paint.color.r),
                            color_component(paint.color.g),
                            color_component(paint.color.b),
                            num(width)
                        ));
                        append_path(&mut content, path);
                        content.push_str("S\n");
                    }
                }
            }
            DrawCommand::DrawImage {
                key,
                x,
                y,
                width,
                height,
            } => {
                let name = image_names.get(key).ok_or_else(|| {
                    ExportError::TextureMissing { key: key.clone() }
                })?;
                content.push_str(&format!(
                    "q\n{} 0 0 {} {} {} cm\n/{} Do\nQ\n",
                    num(*width),
                    num(-height),
                    num(*x),
                    num(y + height),
                    name
                ));
            }
        }
    }

    Ok(content)
}

fn write_image_objects(
    writer: &mut DocumentWriter,
    texture: &Texture,
    slot: &ImageSlot,
) -> ExportResult<()> {
    let mut rgb = Vec::with_capacity(texture.rgba.len() / 4 * 3);
    for px in texture.rgba.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }
    let rgb_compressed = deflate(&rgb)?;

    let smask_entry = match slot.smask_id {
        Some(id) => format!(" /SMask {} 0 R", id),
        None => String::new(),
    };
    let dict = format!(
        "/Type /XObject /Subtype /Image /Width {} /Height {} \
         /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /FlateDecode{}",
        texture.width, texture.height, smask_entry
    );
    writer.write_stream(slot.object_id, &dict, &rgb_compressed);

    if let Some(smask_id) = slot.smask_id {
        let alpha: Vec<u8> = texture.rgba.chunks_exact(4).map(|px| px[3]).collect();
        let alpha_compressed = deflate(&alpha)?;
        let smask_dict = format!(
            "/Type /XObject /Subtype /Image /Width {} /Height {} \
             /ColorSpace /DeviceGray /BitsPerComponent 8 /Filter /FlateDecode",
            texture.width, texture.height
        );
        writer.write_stream(smask_id, &smask_dict, &alpha_compressed);
    }

    Ok(())
}

/// Serializes a picture into a complete single-page PDF document.
pub fn write_pdf(picture: &Picture, textures: &TextureCache) -> ExportResult<Vec<u8>> {
    // Register one XObject per distinct texture key, in first-use order
    let mut slots: Vec<(String, ImageSlot)> = Vec::new();
    let mut image_names: FxHashMap<String, String> = FxHashMap::default();
    let mut next_id = 5u32;
    for command in picture.commands() {
        if let DrawCommand::DrawImage { key, .. } = command {
            if image_names.contains_key(key) {
                continue;
            }
            let texture = textures
                .get(key)
                .ok_or_else(|| ExportError::TextureMissing { key: key.clone() })?;
            let name = format!("Im{}", slots.len() + 1);
            let object_id = next_id;
            next_id += 1;
            let smask_id = if texture.has_alpha() {
                let id = next_id;
                next_id += 1;
                Some(id)
            } else {
                None
            };
            image_names.insert(key.clone(), name.clone());
            slots.push((
                key.clone(),
                ImageSlot {
                    name,
                    object_id,
                    smask_id,
                },
            ));
        }
    }

    let content = build_content(picture, &image_names)?;
    let content_compressed = deflate(content.as_bytes())?;

    let mut writer = DocumentWriter::new();
    writer.write_object(1, "<< /Type /Catalog /Pages 2 0 R >>");
    writer.write_object(2, "<< /Type /Pages /Kids [3 0 R] /Count 1 >>");

    let xobjects = if slots.is_empty() {
        String::new()
    } else {
        let entries: Vec<String> = slots
            .iter()
            .map(|(_, slot)| format!("/{} {} 0 R", slot.name, slot.object_id))
            .collect();
        format!(" /Resources << /XObject << {} >> >>", entries.join(" "))
    };
    writer.write_object(
        3,
        &format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Contents 4 0 R{} >>",
            picture.width(),
            picture.height(),
            xobjects
        ),
    );
    writer.write_stream(4, "/Filter /FlateDecode", &content_compressed);

    for (key, slot) in &slots {
        let texture = textures
            .get(key)
            .ok_or_else(|| ExportError::TextureMissing { key: key.clone() })?;
        write_image_objects(&mut writer, texture, slot)?;
    }

    Ok(writer.finish())
}
