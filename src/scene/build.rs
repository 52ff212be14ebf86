//! Convenience constructors for scene nodes.
//!
//! These wrappers do not matter much to the translator itself, but they make
//! assembling larger structures (demo scenes, nested containers) much less
//! noisy. Rotation is expressed in degrees here and stored on the node as
//! radians, with the pivot moved to the rotation point so shapes spin in
//! place.

use crate::core::color::degrees_to_radians;
use crate::scene::{
    DrawSegment, SceneNode, SegmentGeometry, SegmentStyle, Shape, Sprite, Transform2D,
};

/// Shared style knobs for the shape builders.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeStyle {
    /// Packed fill color; `None` leaves the shape unfilled (polygons) or
    /// defaulting to black (rects/ellipses)
    pub fill: Option<u32>,
    /// Border thickness; zero disables the stroke
    pub border_width: f64,
    /// Packed border color
    pub border_color: Option<u32>,
}

impl ShapeStyle {
    pub fn filled(color: u32) -> Self {
        ShapeStyle {
            fill: Some(color),
            ..ShapeStyle::default()
        }
    }

    pub fn with_border(mut self, width: f64, color: u32) -> Self {
        self.border_width = width;
        self.border_color = Some(color);
        self
    }
}

fn segment_style(style: &ShapeStyle, closed: bool) -> SegmentStyle {
    SegmentStyle {
        fill_color: style.fill,
        line_color: style.border_color,
        line_width: style.border_width,
        closed,
    }
}

fn shape_with(
    label: &str,
    cx: f64,
    cy: f64,
    angle_deg: f64,
    geometry: SegmentGeometry,
    style: SegmentStyle,
) -> SceneNode {
    let mut shape = Shape::new(label);
    if angle_deg != 0.0 {
        shape.transform = Transform2D::default().rotated_about(cx, cy, degrees_to_radians(angle_deg));
    }
    shape.push_segment(DrawSegment::new(geometry, style));
    SceneNode::Shape(shape)
}

/// A rectangle with its top-left corner at (x, y).
pub fn rectangle(
    label: &str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    style: ShapeStyle,
    angle_deg: f64,
) -> SceneNode {
    shape_with(
        label,
        x,
        y,
        angle_deg,
        SegmentGeometry::Rect {
            x,
            y,
            width,
            height,
        },
        segment_style(&style, true),
    )
}

/// A circle centered at (cx, cy).
pub fn circle(
    label: &str,
    cx: f64,
    cy: f64,
    radius: f64,
    style: ShapeStyle,
    angle_deg: f64,
) -> SceneNode {
    shape_with(
        label,
        cx,
        cy,
        angle_deg,
        SegmentGeometry::circle(cx, cy, radius),
        segment_style(&style, true),
    )
}

/// An equilateral triangle centered at (cx, cy).
pub fn equilateral_triangle(
    label: &str,
    cx: f64,
    cy: f64,
    side_length: f64,
    style: ShapeStyle,
    angle_deg: f64,
) -> SceneNode {
    let height = (3.0_f64.sqrt() / 2.0) * side_length;
    let points = vec![
        cx,
        cy - height / 2.0,
        cx - side_length / 2.0,
        cy + height / 2.0,
        cx + side_length / 2.0,
        cy + height / 2.0,
    ];
    shape_with(
        label,
        cx,
        cy,
        angle_deg,
        SegmentGeometry::Polygon { points },
        segment_style(&style, true),
    )
}

/// A right triangle with its right-angle vertex at (cx, cy).
pub fn right_triangle(
    label: &str,
    cx: f64,
    cy: f64,
    leg_a: f64,
    leg_b: f64,
    style: ShapeStyle,
    angle_deg: f64,
) -> SceneNode {
    let points = vec![cx, cy - leg_a, cx + leg_b, cy, cx, cy];
    shape_with(
        label,
        cx,
        cy,
        angle_deg,
        SegmentGeometry::Polygon { points },
        segment_style(&style, true),
    )
}

/// A star polygon alternating between `radius` and `radius / 2`.
pub fn star(
    label: &str,
    cx: f64,
    cy: f64,
    radius: f64,
    spikes: u32,
    style: ShapeStyle,
    angle_deg: f64,
) -> SceneNode {
    let spikes = spikes.max(2);
    let step = std::f64::consts::PI / spikes as f64;
    // Start at the top so one spike points straight up before rotation
    let start = -std::f64::consts::FRAC_PI_2;

    let mut points = Vec::with_capacity(spikes as usize * 4);
    for i in 0..(2 * spikes) {
        let angle = start + i as f64 * step;
        let r = if i % 2 == 0 { radius } else { radius / 2.0 };
        points.push(cx + r * angle.cos());
        points.push(cy + r * angle.sin());
    }

    shape_with(
        label,
        cx,
        cy,
        angle_deg,
        SegmentGeometry::Polygon { points },
        segment_style(&style, true),
    )
}

/// An Archimedean spiral drawn as one open polyline.
pub fn spiral(
    label: &str,
    cx: f64,
    cy: f64,
    radius: f64,
    spacing: f64,
    line_width: f64,
    line_color: u32,
) -> SceneNode {
    let turns = (radius / spacing.max(1.0)).floor().max(1.0) as usize;
    let points_per_turn = 100;
    let total_points = points_per_turn * turns;

    let mut points = Vec::with_capacity((total_points + 1) * 2);
    for i in 0..=total_points {
        let angle = (i as f64 / points_per_turn as f64) * 2.0 * std::f64::consts::PI;
        let current_radius = (i as f64 / total_points as f64) * radius;
        points.push(cx + current_radius * angle.cos());
        points.push(cy + current_radius * angle.sin());
    }

    let mut shape = Shape::new(label);
    shape.push_segment(DrawSegment::new(
        SegmentGeometry::Polygon { points },
        SegmentStyle {
            fill_color: None,
            line_color: Some(line_color),
            line_width,
            closed: false,
        },
    ));
    SceneNode::Shape(shape)
}

/// A sprite of the given size positioned at (x, y).
///
/// The texture reference doubles as the cache key; the trailing path
/// component becomes the label.
pub fn sprite(texture_ref: &str, x: f64, y: f64, width: f64, height: f64) -> SceneNode {
    let label = texture_ref
        .rsplit('/')
        .next()
        .unwrap_or(texture_ref)
        .to_string();
    SceneNode::Sprite(Sprite {
        label,
        texture_ref: texture_ref.to_string(),
        x,
        y,
        width,
        height,
        transform: Transform2D::default(),
    })
}

/// A group with the given transform and children.
pub fn group(label: &str, transform: Transform2D, children: Vec<SceneNode>) -> SceneNode {
    SceneNode::Group(crate::scene::Group {
        label: label.to_string(),
        transform,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_builder() {
        let node = rectangle("r", 10.0, 20.0, 30.0, 40.0, ShapeStyle::filled(0xFF0000), 0.0);
        let SceneNode::Shape(shape) = node else {
            panic!("expected shape");
        };
        assert_eq!(shape.label, "r");
        assert!(shape.transform.is_identity());
        assert_eq!(shape.segments.len(), 1);
        assert_eq!(shape.segments[0].style.fill_color, Some(0xFF0000));
    }

    #[test]
    fn test_rotated_builder_moves_pivot() {
        let node = circle("c", 50.0, 60.0, 10.0, ShapeStyle::filled(0x00FF00), 90.0);
        let SceneNode::Shape(shape) = node else {
            panic!("expected shape");
        };
        assert_eq!(shape.transform.pivot, (50.0, 60.0));
        assert_eq!(shape.transform.position, (50.0, 60.0));
        assert!((shape.transform.rotation - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_star_point_count() {
        let node = star("s", 0.0, 0.0, 10.0, 5, ShapeStyle::filled(0x123456), 0.0);
        let SceneNode::Shape(shape) = node else {
            panic!("expected shape");
        };
        match &shape.segments[0].geometry {
            SegmentGeometry::Polygon { points } => assert_eq!(points.len(), 20),
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_spiral_is_open_and_unfilled() {
        let node = spiral("sp", 0.0, 0.0, 100.0, 10.0, 5.0, 0x383838);
        let SceneNode::Shape(shape) = node else {
            panic!("expected shape");
        };
        let style = &shape.segments[0].style;
        assert!(!style.closed);
        assert_eq!(style.fill_color, None);
        assert_eq!(style.line_color, Some(0x383838));
    }

    #[test]
    fn test_sprite_label_from_path() {
        let node = sprite("assets/old_wallpaper.png", 0.0, 0.0, 500.0, 500.0);
        let SceneNode::Sprite(s) = node else {
            panic!("expected sprite");
        };
        assert_eq!(s.label, "old_wallpaper.png");
        assert_eq!(s.texture_ref, "assets/old_wallpaper.png");
    }
}
