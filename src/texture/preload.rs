//! The texture preload pass.
//!
//! Before any drawing starts, the scene is scanned for sprite references and
//! every referenced asset is fetched, decoded and sized concurrently. The
//! pass is all-or-nothing: one bad asset rejects the whole preload, so the
//! walker never encounters a half-populated cache.

use std::time::Duration;

use image::imageops::FilterType;
use rustc_hash::FxHashSet;
use tokio::task::JoinSet;

use crate::core::error::{ExportError, ExportResult};
use crate::scene::SceneNode;
use crate::texture::{Texture, TextureCache};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// One pending asset load: the reference plus the pixel size to decode to.
#[derive(Debug, Clone, PartialEq)]
struct TextureRequest {
    key: String,
    width: u32,
    height: u32,
}

fn target_extent(value: f64) -> u32 {
    if value.is_finite() {
        value.round().max(1.0) as u32
    } else {
        1
    }
}

/// Walks the tree collecting one request per distinct texture key.
///
/// When several sprites share a key, the first one encountered decides the
/// decoded size.
fn collect_requests(
    node: &SceneNode,
    seen: &mut FxHashSet<String>,
    requests: &mut Vec<TextureRequest>,
) {
    match node {
        SceneNode::Group(group) => {
            for child in &group.children {
                collect_requests(child, seen, requests);
            }
        }
        SceneNode::Sprite(sprite) => {
            if seen.insert(sprite.texture_ref.clone()) {
                requests.push(TextureRequest {
                    key: sprite.texture_ref.clone(),
                    width: target_extent(sprite.width),
                    height: target_extent(sprite.height),
                });
            }
        }
        SceneNode::Shape(_) => {}
    }
}

/// The HTTP client used for remote texture references.
pub fn default_client() -> ExportResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| ExportError::Generic(format!("failed to build HTTP client: {}", e)))
}

async fn fetch_bytes(client: &reqwest::Client, key: &str) -> ExportResult<Vec<u8>> {
    if key.starts_with("http://") || key.starts_with("https://") {
        let response = client
            .get(key)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ExportError::AssetFetch {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        let bytes = response.bytes().await.map_err(|e| ExportError::AssetFetch {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    } else {
        tokio::fs::read(key).await.map_err(|e| ExportError::AssetFetch {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}

async fn load_texture(client: reqwest::Client, request: TextureRequest) -> ExportResult<Texture> {
    let bytes = fetch_bytes(&client, &request.key).await?;

    let decoded = image::load_from_memory(&bytes).map_err(|e| ExportError::AssetDecode {
        key: request.key.clone(),
        reason: e.to_string(),
    })?;

    let sized = if decoded.width() != request.width || decoded.height() != request.height {
        decoded.resize_exact(request.width, request.height, FilterType::Triangle)
    } else {
        decoded
    };

    let rgba = sized.to_rgba8();
    Texture::from_rgba(request.key, request.width, request.height, rgba.into_raw())
}

/// Fetches and decodes every texture the scene references.
///
/// Loads run concurrently; the first failure rejects the whole pass and
/// cancels the remaining loads.
pub async fn preload_textures(
    root: &SceneNode,
    client: &reqwest::Client,
) -> ExportResult<TextureCache> {
    let mut seen = FxHashSet::default();
    let mut requests = Vec::new();
    collect_requests(root, &mut seen, &mut requests);

    if requests.is_empty() {
        return Ok(TextureCache::empty());
    }

    let mut tasks = JoinSet::new();
    for request in requests {
        tasks.spawn(load_texture(client.clone(), request));
    }

    let mut cache = TextureCache::empty();
    while let Some(joined) = tasks.join_next().await {
        let texture =
            joined.map_err(|e| ExportError::Generic(format!("texture task failed: {}", e)))??;
        cache.insert(texture);
    }
    Ok(cache)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::build::sprite;
    use crate::scene::Group;
    use std::io::Write;

    fn png_fixture(dir: &tempfile::TempDir, name: &str, width: u32, height: u32) -> String {
        let path = dir.path().join(name);
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        img.save(&path).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_preload_decodes_and_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let key = png_fixture(&dir, "tex.png", 8, 8);

        let mut root = Group::new("root");
        root.add_child(sprite(&key, 0.0, 0.0, 32.0, 16.0));

        let client = default_client().unwrap();
        let cache = preload_textures(&SceneNode::Group(root), &client)
            .await
            .unwrap();
        let texture = cache.get(&key).unwrap();
        assert_eq!((texture.width, texture.height), (32, 16));
        assert_eq!(texture.rgba.len(), 32 * 16 * 4);
    }

    #[tokio::test]
    async fn test_shared_key_loaded_once() {
        let dir = tempfile::tempdir().unwrap();
        let key = png_fixture(&dir, "shared.png", 4, 4);

        let mut root = Group::new("root");
        root.add_child(sprite(&key, 0.0, 0.0, 16.0, 16.0));
        root.add_child(sprite(&key, 50.0, 50.0, 64.0, 64.0));

        let client = default_client().unwrap();
        let cache = preload_textures(&SceneNode::Group(root), &client)
            .await
            .unwrap();
        assert_eq!(cache.len(), 1);
        // First sprite encountered decides the size
        assert_eq!(cache.get(&key).unwrap().width, 16);
    }

    #[tokio::test]
    async fn test_missing_file_rejects_whole_preload() {
        let dir = tempfile::tempdir().unwrap();
        let good = png_fixture(&dir, "good.png", 4, 4);

        let mut root = Group::new("root");
        root.add_child(sprite(&good, 0.0, 0.0, 4.0, 4.0));
        root.add_child(sprite("/nonexistent/missing.png", 0.0, 0.0, 4.0, 4.0));

        let client = default_client().unwrap();
        let err = preload_textures(&SceneNode::Group(root), &client)
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::AssetFetch { .. }));
    }

    #[tokio::test]
    async fn test_undecodable_bytes_reject_preload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"not an image at all").unwrap();
        let key = path.to_string_lossy().into_owned();

        let node = sprite(&key, 0.0, 0.0, 4.0, 4.0);
        let client = default_client().unwrap();
        let err = preload_textures(&node, &client).await.unwrap_err();
        assert!(matches!(err, ExportError::AssetDecode { .. }));
    }

    #[tokio::test]
    async fn test_shape_only_scene_yields_empty_cache() {
        let node = SceneNode::Group(Group::new("no_sprites"));
        let client = default_client().unwrap();
        let cache = preload_textures(&node, &client).await.unwrap();
        assert!(cache.is_empty());
    }
}
