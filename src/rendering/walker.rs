//! The scene walker: one depth-first traversal that drives any canvas.
//!
//! The walker is where the translation semantics live. Both the raster
//! surface and the command recorder are driven by this same function, so the
//! two outputs can only diverge through canvas behavior, never through
//! traversal logic.

use crate::core::color::radians_to_degrees;
use crate::core::error::{ExportError, ExportResult};
use crate::rendering::canvas::Canvas;
use crate::rendering::shapes;
use crate::scene::{SceneNode, Shape, Sprite, Transform2D};
use crate::texture::TextureCache;

/// Traversal options.
#[derive(Debug, Clone, Copy)]
pub struct WalkerOptions {
    /// Whether a sprite's own node transform is applied before drawing it.
    ///
    /// Off by default: sprites are usually positioned purely by their
    /// (x, y, width, height) rectangle, with transforms on ancestor groups.
    pub sprite_transforms: bool,
}

impl Default for WalkerOptions {
    fn default() -> Self {
        WalkerOptions {
            sprite_transforms: false,
        }
    }
}

/// Applies a node transform to the canvas in the fixed decomposition order:
/// position, pivot compensation, rotation about the scaled pivot, scale.
fn apply_transform<C: Canvas>(canvas: &mut C, transform: &Transform2D) {
    let (px, py) = transform.position;
    let (pivot_x, pivot_y) = transform.pivot;
    let (sx, sy) = transform.scale;

    canvas.translate(px, py);

    let scaled_pivot_x = pivot_x * sx;
    let scaled_pivot_y = pivot_y * sy;
    canvas.translate(-scaled_pivot_x, -scaled_pivot_y);

    if transform.rotation != 0.0 {
        canvas.rotate(
            radians_to_degrees(transform.rotation),
            scaled_pivot_x,
            scaled_pivot_y,
        );
    }

    if (sx, sy) != (1.0, 1.0) {
        canvas.scale(sx, sy);
    }
}

fn render_shape<C: Canvas>(canvas: &mut C, shape: &Shape) -> ExportResult<()> {
    for segment in shape.segments() {
        shapes::render_segment(canvas, &segment, &shape.label)?;
    }
    Ok(())
}

fn render_sprite<C: Canvas>(
    canvas: &mut C,
    sprite: &Sprite,
    textures: &TextureCache,
    options: &WalkerOptions,
) -> ExportResult<()> {
    let texture = textures
        .get(&sprite.texture_ref)
        .ok_or_else(|| ExportError::TextureMissing {
            key: sprite.texture_ref.clone(),
        })?;

    if options.sprite_transforms {
        apply_transform(canvas, &sprite.transform);
    }

    canvas.draw_image(texture, sprite.x, sprite.y, sprite.width, sprite.height)
}

/// Renders a scene tree onto a canvas, depth-first, children in order.
///
/// Every node is bracketed by save/restore, so a sibling can never observe
/// another sibling's transform. Sprite texture lookups that miss the cache
/// abort the walk with [`ExportError::TextureMissing`].
pub fn render_scene<C: Canvas>(
    node: &SceneNode,
    canvas: &mut C,
    textures: &TextureCache,
    options: &WalkerOptions,
) -> ExportResult<()> {
    canvas.save();

    #[cfg(feature = "debug-logging")]
    eprintln!(
        "DEBUG: walking '{}' at depth {}",
        node.label(),
        canvas.stack_depth()
    );

    let result = match node {
        SceneNode::Group(group) => {
            if !group.transform.is_identity() {
                apply_transform(canvas, &group.transform);
            }
            group
                .children
                .iter()
                .try_for_each(|child| render_scene(child, canvas, textures, options))
        }
        SceneNode::Shape(shape) => {
            if !shape.transform.is_identity() {
                apply_transform(canvas, &shape.transform);
            }
            render_shape(canvas, shape)
        }
        SceneNode::Sprite(sprite) => render_sprite(canvas, sprite, textures, options),
    };

    canvas.restore();
    result
}
