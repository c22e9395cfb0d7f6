//! Shapes understood by the solver.

use glam::Vec2;

use crate::{
    polygon::{ConcavePolygon, ConvexPolygon},
    tangent, Transform2,
};

/// The type tag of a shape.
///
/// The ordering is used to canonicalize shape pairs: the solver always queries a pair with the
/// lower-ordered shape first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeType {
    Line,
    Ray,
    Segment,
    Circle,
    Rectangle,
    Capsule,
    ConvexPolygon,
    ConcavePolygon,
}

impl ShapeType {
    /// Returns `true` if shapes of this type have infinite extent along some direction.
    #[inline]
    pub fn is_unbounded(self) -> bool {
        matches!(self, ShapeType::Line | ShapeType::Ray)
    }
}

/// A shape in its local coordinate space.
#[derive(Clone, Debug)]
pub enum Shape {
    Line(Line),
    Ray(Ray),
    Segment(Segment),
    Circle(Circle),
    Rectangle(Rectangle),
    Capsule(Capsule),
    ConvexPolygon(ConvexPolygon),
    ConcavePolygon(ConcavePolygon),
}

impl Shape {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Line(_) => ShapeType::Line,
            Shape::Ray(_) => ShapeType::Ray,
            Shape::Segment(_) => ShapeType::Segment,
            Shape::Circle(_) => ShapeType::Circle,
            Shape::Rectangle(_) => ShapeType::Rectangle,
            Shape::Capsule(_) => ShapeType::Capsule,
            Shape::ConvexPolygon(_) => ShapeType::ConvexPolygon,
            Shape::ConcavePolygon(_) => ShapeType::ConcavePolygon,
        }
    }

    #[inline]
    pub fn is_concave(&self) -> bool {
        matches!(self, Shape::ConcavePolygon(_))
    }
}

macro_rules! impl_from_shape {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Shape {
                #[inline]
                fn from(shape: $ty) -> Shape {
                    Shape::$ty(shape)
                }
            }
        )*
    };
}

impl_from_shape!(
    Line,
    Ray,
    Segment,
    Circle,
    Rectangle,
    Capsule,
    ConvexPolygon,
    ConcavePolygon
);

/// An infinite line, given by its normal and its distance from the origin along that normal.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub normal: Vec2,
    pub distance: f32,
}

/// A ray cast from the local origin along local +Y.
#[derive(Clone, Debug, PartialEq)]
pub struct Ray {
    pub length: f32,
}

/// A line segment.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    a: Vec2,
    b: Vec2,
    normal: Vec2,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Segment {
        Segment {
            a,
            b,
            normal: tangent((b - a).normalize_or_zero()),
        }
    }

    #[inline]
    pub fn a(&self) -> Vec2 {
        self.a
    }

    #[inline]
    pub fn b(&self) -> Vec2 {
        self.b
    }

    /// The unit normal of the segment in local space.
    ///
    /// This is zero if the endpoints coincide.
    #[inline]
    pub fn normal(&self) -> Vec2 {
        self.normal
    }
}

/// A circle centered at the local origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    pub radius: f32,
}

/// A rectangle centered at the local origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Rectangle {
    pub half_extents: Vec2,
}

impl Rectangle {
    /// Returns the corner of the rectangle in the same quadrant as `local_point`.
    #[inline]
    pub fn corner_toward(&self, local_point: Vec2) -> Vec2 {
        let he = self.half_extents;
        Vec2::new(
            if local_point.x < 0.0 { -he.x } else { he.x },
            if local_point.y < 0.0 { -he.y } else { he.y },
        )
    }

    /// Returns the four corners in local space, counterclockwise from the top right.
    #[inline]
    pub fn corners(&self) -> [Vec2; 4] {
        let he = self.half_extents;
        [
            he,
            Vec2::new(-he.x, he.y),
            -he,
            Vec2::new(he.x, -he.y),
        ]
    }
}

/// A capsule centered at the local origin, extending along local Y.
#[derive(Clone, Debug, PartialEq)]
pub struct Capsule {
    pub radius: f32,
    /// The distance between the centers of the two end caps.
    pub height: f32,
}

impl Capsule {
    /// Computes the world-space centers of the two end caps, the +Y cap first.
    #[inline]
    pub fn cap_centers(&self, transform: &Transform2) -> [Vec2; 2] {
        let half = transform.basis_y() * self.height * 0.5;
        let origin = transform.origin();
        [origin + half, origin - half]
    }
}
