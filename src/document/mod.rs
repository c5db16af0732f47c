//! In-memory shape document: two named layers of shapes.
//!
//! A [`Shape`] carries its own points, color and type together, so inserting or
//! removing one can never leave the persisted points/colors/types out of step.
//! See [`storage`] for the on-disk three-file format.

pub mod storage;

use crate::draw::Color;
use crate::geometry::Point;

pub use storage::DocumentError;

/// Kind of figure a shape's points describe.
///
/// The discriminants are the integer tags stored in `.types` files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShapeType {
    /// Open polyline through every point
    #[default]
    Line = 0,
    /// Circle whose diameter runs between the first two points
    Circle = 1,
    Triangle = 2,
    Quadrilateral = 3,
}

impl ShapeType {
    /// All shape types in tag order, as listed by the editor's shape buttons.
    pub const ALL: [ShapeType; 4] = [
        ShapeType::Line,
        ShapeType::Circle,
        ShapeType::Triangle,
        ShapeType::Quadrilateral,
    ];

    /// Number of clicks needed to place a shape of this type.
    pub fn required_points(self) -> usize {
        match self {
            ShapeType::Line | ShapeType::Circle => 2,
            ShapeType::Triangle => 3,
            ShapeType::Quadrilateral => 4,
        }
    }

    /// Decodes a stored tag; anything outside the known range becomes [`ShapeType::Line`].
    pub fn from_tag(tag: i64) -> Self {
        match tag {
            1 => ShapeType::Circle,
            2 => ShapeType::Triangle,
            3 => ShapeType::Quadrilateral,
            _ => ShapeType::Line,
        }
    }

    pub fn tag(self) -> i64 {
        self as i64
    }

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            ShapeType::Line => "Line",
            ShapeType::Circle => "Circle",
            ShapeType::Triangle => "Triangle",
            ShapeType::Quadrilateral => "Quadrilateral",
        }
    }

    /// True for the closed polygon types, whose boundary includes the edge back to the first point.
    pub fn is_polygon(self) -> bool {
        matches!(self, ShapeType::Triangle | ShapeType::Quadrilateral)
    }
}

/// One drawable figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub points: Vec<Point>,
    pub color: Color,
    pub kind: ShapeType,
}

impl Shape {
    pub fn new(points: Vec<Point>, color: Color, kind: ShapeType) -> Self {
        Self {
            points,
            color,
            kind,
        }
    }

    /// Whether there are enough points to draw the shape as its type.
    ///
    /// Incomplete shapes (e.g. a triangle read from disk with two points) are
    /// drawn and hit-tested as polylines instead.
    pub fn is_complete(&self) -> bool {
        self.points.len() >= self.kind.required_points()
    }
}

/// Identifies one of the two layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerId {
    Foliage,
    Trunks,
}

impl LayerId {
    /// Search and render order: foliage first, trunks on top.
    pub const ALL: [LayerId; 2] = [LayerId::Foliage, LayerId::Trunks];

    pub fn name(self) -> &'static str {
        match self {
            LayerId::Foliage => "foliage",
            LayerId::Trunks => "trunks",
        }
    }

    /// Points file name inside the base directory.
    pub fn file_name(self) -> &'static str {
        match self {
            LayerId::Foliage => "paths.txt",
            LayerId::Trunks => "current.txt",
        }
    }
}

/// Named, ordered collection of shapes. Later shapes draw on top.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Layer {
    pub shapes: Vec<Shape>,
}

impl Layer {
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Removes and returns the shape at `index`, or `None` when out of range.
    pub fn remove(&mut self, index: usize) -> Option<Shape> {
        (index < self.shapes.len()).then(|| self.shapes.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }
}

/// The foliage and trunks layers edited together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub foliage: Layer,
    pub trunks: Layer,
}

impl Document {
    pub fn new(foliage: Layer, trunks: Layer) -> Self {
        Self { foliage, trunks }
    }

    pub fn layer(&self, id: LayerId) -> &Layer {
        match id {
            LayerId::Foliage => &self.foliage,
            LayerId::Trunks => &self.trunks,
        }
    }

    pub fn layer_mut(&mut self, id: LayerId) -> &mut Layer {
        match id {
            LayerId::Foliage => &mut self.foliage,
            LayerId::Trunks => &mut self.trunks,
        }
    }

    /// Looks up a shape by layer and index.
    pub fn shape(&self, id: LayerId, index: usize) -> Option<&Shape> {
        self.layer(id).shapes.get(index)
    }

    pub fn shape_mut(&mut self, id: LayerId, index: usize) -> Option<&mut Shape> {
        self.layer_mut(id).shapes.get_mut(index)
    }

    /// Total number of shapes across both layers.
    pub fn shape_count(&self) -> usize {
        self.foliage.len() + self.trunks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::WHITE;

    #[test]
    fn required_points_follow_shape_type() {
        assert_eq!(ShapeType::Line.required_points(), 2);
        assert_eq!(ShapeType::Circle.required_points(), 2);
        assert_eq!(ShapeType::Triangle.required_points(), 3);
        assert_eq!(ShapeType::Quadrilateral.required_points(), 4);
    }

    #[test]
    fn unknown_tags_decode_as_line() {
        assert_eq!(ShapeType::from_tag(3), ShapeType::Quadrilateral);
        assert_eq!(ShapeType::from_tag(4), ShapeType::Line);
        assert_eq!(ShapeType::from_tag(-1), ShapeType::Line);
        for kind in ShapeType::ALL {
            assert_eq!(ShapeType::from_tag(kind.tag()), kind);
        }
    }

    #[test]
    fn short_polygon_is_incomplete() {
        let shape = Shape::new(
            vec![Point::new(0, 0), Point::new(5, 5)],
            WHITE,
            ShapeType::Triangle,
        );
        assert!(!shape.is_complete());
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut layer = Layer::default();
        assert!(layer.remove(0).is_none());
        layer.push(Shape::new(vec![], WHITE, ShapeType::Line));
        assert!(layer.remove(0).is_some());
        assert!(layer.is_empty());
    }
}
