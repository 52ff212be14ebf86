//! Decoded raster textures and the per-export texture cache.
//!
//! Textures enter the cache exclusively through the preload pass in
//! [`preload`]; once an export starts drawing, the cache never changes. A
//! sprite whose key misses the cache is a hard error, not a lazy load.

pub mod preload;

use rustc_hash::FxHashMap;
use tiny_skia::Pixmap;

use crate::core::error::{ExportError, ExportResult};

/// A decoded, sized raster texture.
#[derive(Clone)]
pub struct Texture {
    /// The asset reference that produced this texture
    pub key: String,
    pub width: u32,
    pub height: u32,
    /// Straight (non-premultiplied) RGBA bytes, row-major
    pub rgba: Vec<u8>,
    /// Premultiplied copy for the raster canvas
    pub pixmap: Pixmap,
}

impl Texture {
    /// Builds a texture from straight RGBA bytes.
    ///
    /// The byte length must be exactly `width * height * 4`.
    pub fn from_rgba(
        key: impl Into<String>,
        width: u32,
        height: u32,
        rgba: Vec<u8>,
    ) -> ExportResult<Self> {
        let key = key.into();
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(ExportError::AssetDecode {
                key,
                reason: format!(
                    "pixel buffer is {} bytes, expected {} for {}x{}",
                    rgba.len(),
                    expected,
                    width,
                    height
                ),
            });
        }

        // tiny-skia wants premultiplied alpha
        let mut premultiplied = rgba.clone();
        for px in premultiplied.chunks_exact_mut(4) {
            let a = px[3] as u16;
            if a < 255 {
                px[0] = ((px[0] as u16 * a) / 255) as u8;
                px[1] = ((px[1] as u16 * a) / 255) as u8;
                px[2] = ((px[2] as u16 * a) / 255) as u8;
            }
        }

        let size = tiny_skia::IntSize::from_wh(width, height).ok_or_else(|| {
            ExportError::AssetDecode {
                key: key.clone(),
                reason: format!("invalid texture size {}x{}", width, height),
            }
        })?;
        let pixmap =
            Pixmap::from_vec(premultiplied, size).ok_or_else(|| ExportError::AssetDecode {
                key: key.clone(),
                reason: "could not build pixmap from pixel buffer".to_string(),
            })?;

        Ok(Texture {
            key,
            width,
            height,
            rgba,
            pixmap,
        })
    }

    /// True when any pixel is less than fully opaque.
    pub fn has_alpha(&self) -> bool {
        self.rgba.chunks_exact(4).any(|px| px[3] < 255)
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("key", &self.key)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// The immutable key-to-texture map built by the preload pass.
#[derive(Debug, Clone, Default)]
pub struct TextureCache {
    textures: FxHashMap<String, Texture>,
}

impl TextureCache {
    /// A cache with no textures, for scenes without sprites.
    pub fn empty() -> Self {
        TextureCache::default()
    }

    pub(crate) fn insert(&mut self, texture: Texture) {
        self.textures.insert(texture.key.clone(), texture);
    }

    /// Looks up a texture by its asset reference.
    pub fn get(&self, key: &str) -> Option<&Texture> {
        self.textures.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.textures.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Iterates over the cached textures in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Texture> {
        self.textures.values()
    }
}
