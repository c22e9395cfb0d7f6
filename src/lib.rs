//! A narrow-phase 2D collision solver for convex shapes based on the separating axis theorem.
//!
//! Given two convex shapes and their placements, [`solve`] determines whether they overlap and, if
//! so, finds the axis of minimum penetration and reports up to two contact point pairs through a
//! callback. [`contact()`] wraps the same query and collects the result into a [`Manifold`].

use std::ops::Mul;

use glam::{Affine2, Vec2};

use crate::glam_ext::Mat2Ext;

pub mod contact;
mod glam_ext;
pub mod pair;
pub mod polygon;
pub mod sat;
pub mod shape;
pub mod solver;
pub mod support;

#[doc(inline)]
pub use contact::{ContactPair, Manifold};
#[doc(inline)]
pub use pair::{PairRecord, PairTable};
#[doc(inline)]
pub use polygon::{ConcavePolygon, ConvexPolygon};
#[doc(inline)]
pub use shape::{Capsule, Circle, Line, Ray, Rectangle, Segment, Shape, ShapeType};
#[doc(inline)]
pub use solver::{collide, contact, solve, SatError};
#[doc(inline)]
pub use support::{Projection, Support, SupportSet};

/// Tolerance used for degenerate axes and contact rejection.
pub const CMP_EPSILON: f32 = 0.00001;

/// Minimum alignment between a query direction and a face normal for the face to be reported as a
/// two-point support.
pub const SUPPORT_THRESHOLD: f32 = 0.99998;

/// Axis substituted for a candidate axis too short to normalize.
pub const FALLBACK_AXIS: Vec2 = Vec2::Y;

/// Maximum number of support points returned by any shape.
pub const MAX_SUPPORTS: usize = 2;

/// A 2D affine transformation together with its precomputed inverse.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform2 {
    forward: Affine2,
    inverse: Affine2,
}

impl Default for Transform2 {
    fn default() -> Self {
        Transform2::IDENTITY
    }
}

impl Transform2 {
    pub const IDENTITY: Self = Transform2 {
        forward: Affine2::IDENTITY,
        inverse: Affine2::IDENTITY,
    };

    /// Constructs a transform from an affine map, computing its inverse.
    pub fn new(forward: Affine2) -> Transform2 {
        Transform2 {
            forward,
            inverse: forward.inverse(),
        }
    }

    /// Constructs a transform from an affine map and an inverse computed by the caller.
    ///
    /// `inverse` is trusted to be the inverse of `forward`.
    #[inline]
    pub fn with_inverse(forward: Affine2, inverse: Affine2) -> Transform2 {
        Transform2 { forward, inverse }
    }

    pub fn from_translation(translation: Vec2) -> Transform2 {
        Transform2::new(Affine2::from_translation(translation))
    }

    /// Constructs a rotation by `angle` radians followed by a translation.
    pub fn from_angle_translation(angle: f32, translation: Vec2) -> Transform2 {
        Transform2::new(Affine2::from_angle_translation(angle, translation))
    }

    #[inline]
    pub fn forward(&self) -> &Affine2 {
        &self.forward
    }

    #[inline]
    pub fn inverse(&self) -> &Affine2 {
        &self.inverse
    }

    /// Returns the transform with the forward and inverse maps exchanged.
    #[inline]
    pub fn inverted(&self) -> Transform2 {
        Transform2 {
            forward: self.inverse,
            inverse: self.forward,
        }
    }

    /// The image of the local X axis.
    #[inline]
    pub fn basis_x(&self) -> Vec2 {
        self.forward.matrix2.x_axis
    }

    /// The image of the local Y axis.
    #[inline]
    pub fn basis_y(&self) -> Vec2 {
        self.forward.matrix2.y_axis
    }

    /// The image of the local origin.
    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.forward.translation
    }

    /// Maps a local point to world space.
    #[inline]
    pub fn xform(&self, point: Vec2) -> Vec2 {
        self.forward.transform_point2(point)
    }

    /// Maps a world point to local space.
    #[inline]
    pub fn xform_inv(&self, point: Vec2) -> Vec2 {
        self.inverse.transform_point2(point)
    }

    /// Maps a world direction into local space by the transposed basis.
    ///
    /// For rigid transforms this is the exact inverse rotation.
    #[inline]
    pub fn basis_xform_inv(&self, dir: Vec2) -> Vec2 {
        self.forward.matrix2.transpose_mul_vec2(dir)
    }

    /// Maps a local surface normal to world space by the inverse-transposed basis.
    ///
    /// The result is not normalized.
    #[inline]
    pub fn xform_normal(&self, normal: Vec2) -> Vec2 {
        self.inverse.matrix2.transpose_mul_vec2(normal)
    }
}

impl Mul<Vec2> for Transform2 {
    type Output = Vec2;

    #[inline]
    fn mul(self, rhs: Vec2) -> Self::Output {
        self.xform(rhs)
    }
}

impl From<Affine2> for Transform2 {
    #[inline]
    fn from(affine: Affine2) -> Transform2 {
        Transform2::new(affine)
    }
}

/// Returns the tangent of `v`, rotated a quarter turn clockwise.
#[inline]
pub(crate) fn tangent(v: Vec2) -> Vec2 {
    Vec2::new(v.y, -v.x)
}

/// Normalizes a candidate axis, substituting [`FALLBACK_AXIS`] if it is too short.
#[inline]
pub(crate) fn normalize_axis(axis: Vec2) -> Vec2 {
    if axis.x.abs() < CMP_EPSILON && axis.y.abs() < CMP_EPSILON {
        return FALLBACK_AXIS;
    }

    axis.try_normalize().unwrap_or(FALLBACK_AXIS)
}
