//! The source scene graph model.
//!
//! A scene is a finite, acyclic tree of nodes, fully realized in memory before
//! translation begins. Each parent exclusively owns its children, so lifetimes
//! follow the tree shape and no back-pointers exist.
//!
//! Node kinds form a closed sum type: translation dispatches with an
//! exhaustive `match` rather than ordered runtime type checks, so a general
//! kind can never shadow a more specific one.

pub mod build;
pub mod segment;

use smallvec::SmallVec;

pub use segment::{DrawSegment, ResolvedSegment, ResolvedStyle, SegmentGeometry, SegmentStyle};

/// A node-local 2D transform, relative to the parent's already-applied one.
///
/// Application order is fixed and never reordered:
/// translate(position), translate(-pivot * scale), rotate about
/// (pivot * scale), then scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// Position offset in parent space
    pub position: (f64, f64),
    /// Pivot point in local space
    pub pivot: (f64, f64),
    /// Scale factors (x, y)
    pub scale: (f64, f64),
    /// Rotation angle in radians
    pub rotation: f64,
}

impl Default for Transform2D {
    fn default() -> Self {
        Transform2D {
            position: (0.0, 0.0),
            pivot: (0.0, 0.0),
            scale: (1.0, 1.0),
            rotation: 0.0,
        }
    }
}

impl Transform2D {
    /// An identity transform translated to (x, y).
    pub fn at(x: f64, y: f64) -> Self {
        Transform2D {
            position: (x, y),
            ..Transform2D::default()
        }
    }

    /// Returns a copy rotated by `radians` about the local point (px, py).
    ///
    /// Matches the wrapper recipe the demo scenes use: pivot and position are
    /// both moved to the rotation point so the node spins in place.
    pub fn rotated_about(mut self, px: f64, py: f64, radians: f64) -> Self {
        self.pivot = (px, py);
        self.position = (px, py);
        self.rotation = radians;
        self
    }

    /// True when the transform is an identity and can be skipped entirely.
    pub fn is_identity(&self) -> bool {
        self.position == (0.0, 0.0)
            && self.pivot == (0.0, 0.0)
            && self.scale == (1.0, 1.0)
            && self.rotation == 0.0
    }
}

/// A container node: an ordered list of owned children plus a transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub label: String,
    pub transform: Transform2D,
    pub children: Vec<SceneNode>,
}

impl Group {
    pub fn new(label: impl Into<String>) -> Self {
        Group {
            label: label.into(),
            transform: Transform2D::default(),
            children: Vec::new(),
        }
    }

    /// Appends a child; later children paint over earlier ones.
    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }
}

/// A graphics node: an ordered list of draw segments plus a transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub label: String,
    pub transform: Transform2D,
    pub segments: SmallVec<[DrawSegment; 2]>,
}

impl Shape {
    pub fn new(label: impl Into<String>) -> Self {
        Shape {
            label: label.into(),
            transform: Transform2D::default(),
            segments: SmallVec::new(),
        }
    }

    /// Appends a draw segment; draw order is preserved.
    pub fn push_segment(&mut self, segment: DrawSegment) {
        self.segments.push(segment);
    }

    /// Extracts the segment records in draw order, with style defaults
    /// applied.
    ///
    /// The iterator borrows the node and is restartable; the node is never
    /// mutated.
    pub fn segments(&self) -> impl Iterator<Item = ResolvedSegment<'_>> + '_ {
        self.segments.iter().map(|segment| ResolvedSegment {
            geometry: &segment.geometry,
            style: ResolvedStyle::from_style(&segment.style),
        })
    }
}

/// A raster leaf node referencing a preloaded texture by key.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub label: String,
    /// Asset reference key; must resolve in the texture cache before drawing
    pub texture_ref: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub transform: Transform2D,
}

/// One element of the scene tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Group(Group),
    Shape(Shape),
    Sprite(Sprite),
}

impl SceneNode {
    /// The node's debug label.
    pub fn label(&self) -> &str {
        match self {
            SceneNode::Group(g) => &g.label,
            SceneNode::Shape(s) => &s.label,
            SceneNode::Sprite(s) => &s.label,
        }
    }

    /// Total node count of the subtree rooted here, including this node.
    pub fn node_count(&self) -> usize {
        match self {
            SceneNode::Group(g) => 1 + g.children.iter().map(SceneNode::node_count).sum::<usize>(),
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_order_preserved() {
        let mut shape = Shape::new("stacked");
        shape.push_segment(DrawSegment::new(
            SegmentGeometry::Rect {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
            },
            SegmentStyle {
                fill_color: Some(0x111111),
                ..SegmentStyle::default()
            },
        ));
        shape.push_segment(DrawSegment::new(
            SegmentGeometry::circle(5.0, 5.0, 2.0),
            SegmentStyle {
                fill_color: Some(0x222222),
                ..SegmentStyle::default()
            },
        ));

        let fills: Vec<Option<u32>> = shape.segments().map(|s| s.style.fill_color).collect();
        assert_eq!(fills, vec![Some(0x111111), Some(0x222222)]);
    }

    #[test]
    fn test_segments_iterator_restartable() {
        let mut shape = Shape::new("twice");
        shape.push_segment(DrawSegment::new(
            SegmentGeometry::circle(0.0, 0.0, 1.0),
            SegmentStyle::default(),
        ));
        assert_eq!(shape.segments().count(), 1);
        assert_eq!(shape.segments().count(), 1);
    }

    #[test]
    fn test_closed_flag_roundtrip() {
        let mut shape = Shape::new("open_poly");
        shape.push_segment(DrawSegment::new(
            SegmentGeometry::Polygon {
                points: vec![0.0, 0.0, 10.0, 0.0, 10.0, 10.0],
            },
            SegmentStyle {
                closed: false,
                ..SegmentStyle::default()
            },
        ));
        let extracted: Vec<_> = shape.segments().collect();
        assert_eq!(extracted.len(), 1);
        assert!(!extracted[0].style.closed);
        match extracted[0].geometry {
            SegmentGeometry::Polygon { points } => {
                assert_eq!(points, &vec![0.0, 0.0, 10.0, 0.0, 10.0, 10.0]);
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_node_count() {
        let mut inner = Group::new("inner");
        inner.add_child(SceneNode::Shape(Shape::new("leaf")));
        let mut root = Group::new("root");
        root.add_child(SceneNode::Group(inner));
        root.add_child(SceneNode::Shape(Shape::new("leaf2")));
        assert_eq!(SceneNode::Group(root).node_count(), 4);
    }
}
