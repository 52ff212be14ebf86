//! Built-in demo scenes, selectable by name.
//!
//! These exist for the CLI and the integration tests: each builder returns a
//! fully realized tree sized for the requested surface.

use crate::core::color::ColorTable;
use crate::scene::build::{
    circle, equilateral_triangle, group, rectangle, right_triangle, spiral, star, ShapeStyle,
};
use crate::scene::{Group, SceneNode, Transform2D};

/// Names accepted by [`build_scene`].
pub const SCENE_NAMES: &[&str] = &["shapes", "composition"];

/// Builds a named demo scene for a surface of the given size.
///
/// Returns `None` for unknown names; [`SCENE_NAMES`] lists the valid ones.
pub fn build_scene(name: &str, width: u32, height: u32) -> Option<SceneNode> {
    match name {
        "shapes" => Some(shapes_scene(width, height)),
        "composition" => Some(composition_scene(width, height)),
        _ => None,
    }
}

fn color(table: &ColorTable, name: &str) -> u32 {
    // The default table carries every name the demo scenes use
    table.get(name).unwrap_or(0x000000)
}

/// One figure per quadrant plus a spiral across the middle.
fn shapes_scene(width: u32, height: u32) -> SceneNode {
    let palette = ColorTable::default();
    let center = (width as f64 / 2.0, height as f64 / 2.0);

    let area = 360.0;
    let figure = 80.0;
    let quarter = area / 4.0;

    let mut root = Group::new("shapes_scene");
    root.transform = Transform2D::at(center.0 - area / 2.0, center.1 - area / 2.0);

    let area_center = (area / 2.0, area / 2.0);

    root.add_child(circle(
        "circle_1",
        area_center.0 - quarter,
        area_center.1 - quarter,
        figure,
        ShapeStyle::filled(color(&palette, "darkRed")).with_border(
            3.0,
            color(&palette, "brightRed"),
        ),
        0.0,
    ));

    root.add_child(equilateral_triangle(
        "triangle_1",
        area_center.0 + quarter,
        area_center.1 - quarter,
        figure * 2.0,
        ShapeStyle::filled(color(&palette, "darkGreen")).with_border(
            3.0,
            color(&palette, "brightGreen"),
        ),
        0.0,
    ));

    root.add_child(rectangle(
        "square_1",
        area_center.0 - quarter - figure,
        area_center.1 + quarter - figure,
        figure * 2.0,
        figure * 2.0,
        ShapeStyle::filled(color(&palette, "darkBlue")).with_border(
            3.0,
            color(&palette, "brightBlue"),
        ),
        0.0,
    ));

    root.add_child(star(
        "star_1",
        area_center.0 + quarter,
        area_center.1 + quarter,
        figure * 1.2,
        5,
        ShapeStyle::filled(color(&palette, "darkYellow")).with_border(
            3.0,
            color(&palette, "brightYellow"),
        ),
        -25.0,
    ));

    root.add_child(spiral(
        "spiral_1",
        area_center.0,
        area_center.1,
        area / 2.0,
        20.0,
        2.0,
        color(&palette, "lightCarbon"),
    ));

    SceneNode::Group(root)
}

/// A flat geometric composition built from right triangles and rectangles.
fn composition_scene(width: u32, height: u32) -> SceneNode {
    let palette = ColorTable::default();
    let center = (width as f64 / 2.0, height as f64 / 2.0);

    let outer = 360.0;
    let catet = 90.0;
    let left = center.0 - outer / 2.0;
    let top = center.1 - outer / 2.0;

    let children = vec![
        rectangle(
            "background",
            left,
            top,
            outer,
            outer,
            ShapeStyle::filled(color(&palette, "lightCarbon")),
            0.0,
        ),
        right_triangle(
            "triangle_1",
            left,
            top,
            catet,
            catet,
            ShapeStyle::filled(color(&palette, "darkBlue")),
            90.0,
        ),
        right_triangle(
            "triangle_2",
            left + catet,
            top + catet,
            catet,
            catet,
            ShapeStyle::filled(color(&palette, "carbon")),
            -90.0,
        ),
        right_triangle(
            "big_triangle_1",
            left,
            top + catet * 3.0,
            catet * 2.0,
            catet * 2.0,
            ShapeStyle::filled(color(&palette, "darkRed")),
            0.0,
        ),
        right_triangle(
            "big_triangle_2",
            left + outer,
            top,
            catet * 2.0,
            catet * 2.0,
            ShapeStyle::filled(color(&palette, "darkGreen")),
            180.0,
        ),
        rectangle(
            "long_rect_1",
            center.0 - catet,
            center.1 - catet,
            catet,
            catet * 3.0,
            ShapeStyle::filled(color(&palette, "darkBlue")),
            0.0,
        ),
        right_triangle(
            "triangle_3",
            center.0,
            center.1 + catet,
            catet * 1.4,
            catet * 1.4,
            ShapeStyle::filled(color(&palette, "carbon")),
            -135.0,
        ),
        rectangle(
            "square_1",
            center.0 + catet,
            center.1,
            catet,
            catet,
            ShapeStyle::filled(color(&palette, "brightRed")),
            45.0,
        ),
        circle(
            "circle_1",
            center.0 - catet / 2.0,
            center.1 + catet,
            catet / 2.0,
            ShapeStyle::filled(color(&palette, "brightBlue")),
            0.0,
        ),
    ];

    group("composition_scene", Transform2D::default(), children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_scene_name() {
        assert!(build_scene("nope", 500, 500).is_none());
    }

    #[test]
    fn test_all_named_scenes_build() {
        for name in SCENE_NAMES {
            let scene = build_scene(name, 500, 500).unwrap();
            assert!(scene.node_count() > 1, "scene '{}' is empty", name);
        }
    }

    #[test]
    fn test_shapes_scene_labels() {
        let SceneNode::Group(root) = build_scene("shapes", 500, 500).unwrap() else {
            panic!("expected group root");
        };
        let labels: Vec<&str> = root.children.iter().map(|c| c.label()).collect();
        assert!(labels.contains(&"circle_1"));
        assert!(labels.contains(&"star_1"));
        assert!(labels.contains(&"spiral_1"));
    }
}
