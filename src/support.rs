//! Projection and support queries for convex shapes.

use arrayvec::ArrayVec;
use glam::Vec2;

use crate::{
    polygon::ConvexPolygon,
    shape::{Capsule, Circle, Rectangle, Segment},
    Transform2, MAX_SUPPORTS, SUPPORT_THRESHOLD,
};

/// Up to two extreme points of a shape: a single vertex, or the endpoints of an edge.
pub type SupportSet = ArrayVec<Vec2, MAX_SUPPORTS>;

/// The extent of a shape projected onto an axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    pub min: f32,
    pub max: f32,
}

impl Projection {
    /// Constructs a projection from two bounds in either order.
    #[inline]
    pub fn new(a: f32, b: f32) -> Projection {
        if a <= b {
            Projection { min: a, max: b }
        } else {
            Projection { min: b, max: a }
        }
    }

    /// Projects a set of points onto `axis`.
    pub fn of_points<I>(axis: Vec2, points: I) -> Projection
    where
        I: IntoIterator<Item = Vec2>,
    {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;

        for p in points {
            let d = axis.dot(p);
            min = min.min(d);
            max = max.max(d);
        }

        Projection { min, max }
    }

    #[inline]
    pub fn extent(&self) -> f32 {
        self.max - self.min
    }

    #[inline]
    pub fn midpoint(&self) -> f32 {
        0.5 * (self.min + self.max)
    }

    /// Returns `true` _iff_ `self` and `other` share at least one point.
    #[inline]
    pub fn overlaps(&self, other: &Projection) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

/// A trait for convex shapes which can be projected onto an axis and queried for their extreme
/// points along a direction.
pub trait Support {
    /// Projects the shape, placed by `transform`, onto the world axis `axis`.
    fn project_range(&self, axis: Vec2, transform: &Transform2) -> Projection;

    /// Computes the extreme points of the shape in local space along the unit direction `dir`.
    fn local_supports(&self, dir: Vec2) -> SupportSet;

    /// Computes the extreme points of the shape, placed by `transform`, along the world
    /// direction `dir`.
    ///
    /// The default implementation maps `dir` into local space, calls `local_supports`, and maps the
    /// resulting points back to world space.
    #[inline]
    fn supports(&self, dir: Vec2, transform: &Transform2) -> SupportSet {
        let local_dir = transform.basis_xform_inv(dir).normalize_or_zero();

        self.local_supports(local_dir)
            .into_iter()
            .map(|p| transform.xform(p))
            .collect()
    }
}

impl Support for Segment {
    fn project_range(&self, axis: Vec2, transform: &Transform2) -> Projection {
        Projection::new(
            axis.dot(transform.xform(self.a())),
            axis.dot(transform.xform(self.b())),
        )
    }

    fn local_supports(&self, dir: Vec2) -> SupportSet {
        let mut out = SupportSet::new();

        if dir.dot(self.normal()).abs() > SUPPORT_THRESHOLD {
            out.push(self.a());
            out.push(self.b());
        } else if dir.dot(self.b() - self.a()) > 0.0 {
            out.push(self.b());
        } else {
            out.push(self.a());
        }

        out
    }
}

impl Support for Circle {
    fn project_range(&self, axis: Vec2, transform: &Transform2) -> Projection {
        let d = axis.dot(transform.origin());
        let scale = transform.basis_xform_inv(axis).length();
        let r = self.radius * scale;

        Projection {
            min: d - r,
            max: d + r,
        }
    }

    fn local_supports(&self, dir: Vec2) -> SupportSet {
        let mut out = SupportSet::new();
        out.push(dir * self.radius);
        out
    }
}

impl Support for Rectangle {
    fn project_range(&self, axis: Vec2, transform: &Transform2) -> Projection {
        Projection::of_points(axis, self.corners().map(|c| transform.xform(c)))
    }

    fn local_supports(&self, dir: Vec2) -> SupportSet {
        let he = self.half_extents;
        let mut out = SupportSet::new();

        for i in 0..2 {
            let dp = dir[i];
            if dp.abs() < SUPPORT_THRESHOLD {
                continue;
            }

            // Face normal to axis `i`, spanning the other axis.
            let j = i ^ 1;
            let sign = if dp > 0.0 { 1.0 } else { -1.0 };

            let mut p0 = Vec2::ZERO;
            p0[i] = he[i] * sign;
            p0[j] = he[j];
            let mut p1 = p0;
            p1[j] = -he[j];

            out.push(p0);
            out.push(p1);
            return out;
        }

        out.push(self.corner_toward(dir));
        out
    }
}

impl Support for Capsule {
    fn project_range(&self, axis: Vec2, transform: &Transform2) -> Projection {
        let mut n = transform.basis_xform_inv(axis).normalize_or_zero();
        let h = if n.y > 0.0 { self.height } else { -self.height };

        n *= self.radius;
        n.y += h * 0.5;

        Projection::new(
            axis.dot(transform.xform(n)),
            axis.dot(transform.xform(-n)),
        )
    }

    fn local_supports(&self, dir: Vec2) -> SupportSet {
        let mut out = SupportSet::new();
        let half = Vec2::new(0.0, self.height * 0.5);

        if dir.y.abs() < 1.0 - SUPPORT_THRESHOLD {
            // Nearly perpendicular to the capsule axis: the flat side.
            let n = Vec2::new(dir.x, 0.0).normalize_or_zero() * self.radius;
            out.push(n + half);
            out.push(n - half);
        } else {
            let cap = if dir.y > 0.0 { half } else { -half };
            out.push(dir * self.radius + cap);
        }

        out
    }
}

impl Support for ConvexPolygon {
    fn project_range(&self, axis: Vec2, transform: &Transform2) -> Projection {
        Projection::of_points(axis, self.points().iter().map(|&p| transform.xform(p)))
    }

    fn local_supports(&self, dir: Vec2) -> SupportSet {
        let count = self.point_count();
        let mut out = SupportSet::new();

        let mut best = 0;
        let mut best_dist = f32::NEG_INFINITY;

        for i in 0..count {
            if self.segment_normal(i).dot(dir) > SUPPORT_THRESHOLD {
                out.push(self.point(i));
                out.push(self.point((i + 1) % count));
                return out;
            }

            let dist = dir.dot(self.point(i));
            if dist > best_dist {
                best = i;
                best_dist = dist;
            }
        }

        out.push(self.point(best));
        out
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    use approx::assert_abs_diff_eq;
    use glam::Affine2;

    use super::*;

    fn unit_box() -> Rectangle {
        Rectangle {
            half_extents: Vec2::splat(0.5),
        }
    }

    #[test]
    fn projection_bounds() {
        let p = Projection::new(3.0, -1.0);
        assert_eq!(p, Projection { min: -1.0, max: 3.0 });
        assert_eq!(p.extent(), 4.0);
        assert_eq!(p.midpoint(), 1.0);

        assert!(p.overlaps(&Projection::new(3.0, 5.0)));
        assert!(!p.overlaps(&Projection::new(3.5, 5.0)));
    }

    #[test]
    fn segment_projection_and_supports() {
        let seg = Segment::new(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0));
        let t = Transform2::from_translation(Vec2::new(0.0, 2.0));

        assert_eq!(seg.project_range(Vec2::X, &t), Projection::new(-1.0, 1.0));
        assert_eq!(seg.project_range(Vec2::Y, &t), Projection::new(2.0, 2.0));

        // Face-on: both endpoints.
        let face = seg.supports(Vec2::Y, &t);
        assert_eq!(face.as_slice(), &[Vec2::new(-1.0, 2.0), Vec2::new(1.0, 2.0)]);

        // Oblique: the endpoint further along the direction.
        let tip = seg.supports(Vec2::new(-1.0, 1.0), &t);
        assert_eq!(tip.as_slice(), &[Vec2::new(-1.0, 2.0)]);
    }

    #[test]
    fn circle_projection_and_supports() {
        let circle = Circle { radius: 2.0 };
        let t = Transform2::from_translation(Vec2::new(3.0, 0.0));

        assert_eq!(circle.project_range(Vec2::X, &t), Projection::new(1.0, 5.0));

        // Scaling the placement scales the radius.
        let scaled = Transform2::new(Affine2::from_scale(Vec2::splat(2.0)));
        assert_eq!(circle.project_range(Vec2::Y, &scaled), Projection::new(-4.0, 4.0));

        let s = circle.supports(-Vec2::X, &t);
        assert_eq!(s.as_slice(), &[Vec2::new(1.0, 0.0)]);
    }

    #[test]
    fn rectangle_projection() {
        let rect = unit_box();
        let t = Transform2::from_angle_translation(FRAC_PI_4, Vec2::ZERO);
        let p = rect.project_range(Vec2::X, &t);

        assert_abs_diff_eq!(p.max, 0.5_f32.sqrt(), epsilon = 1e-6);
        assert_abs_diff_eq!(p.min, -(0.5_f32.sqrt()), epsilon = 1e-6);
    }

    #[test]
    fn rectangle_supports() {
        let rect = unit_box();

        let face = rect.local_supports(Vec2::X);
        assert_eq!(face.as_slice(), &[Vec2::new(0.5, 0.5), Vec2::new(0.5, -0.5)]);

        let face = rect.local_supports(-Vec2::Y);
        assert_eq!(face.as_slice(), &[Vec2::new(0.5, -0.5), Vec2::new(-0.5, -0.5)]);

        let corner = rect.local_supports(Vec2::new(-1.0, 1.0).normalize());
        assert_eq!(corner.as_slice(), &[Vec2::new(-0.5, 0.5)]);
    }

    #[test]
    fn capsule_projection() {
        let capsule = Capsule {
            radius: 0.5,
            height: 2.0,
        };

        let along = capsule.project_range(Vec2::Y, &Transform2::IDENTITY);
        assert_eq!(along, Projection::new(-1.5, 1.5));

        let across = capsule.project_range(Vec2::X, &Transform2::IDENTITY);
        assert_abs_diff_eq!(across.min, -0.5);
        assert_abs_diff_eq!(across.max, 0.5);

        let t = Transform2::from_angle_translation(-FRAC_PI_2, Vec2::new(4.0, 0.0));
        let rotated = capsule.project_range(Vec2::X, &t);
        assert_abs_diff_eq!(rotated.min, 2.5, epsilon = 1e-5);
        assert_abs_diff_eq!(rotated.max, 5.5, epsilon = 1e-5);
    }

    #[test]
    fn capsule_supports() {
        let capsule = Capsule {
            radius: 0.5,
            height: 2.0,
        };

        let side = capsule.local_supports(-Vec2::X);
        assert_eq!(side.as_slice(), &[Vec2::new(-0.5, 1.0), Vec2::new(-0.5, -1.0)]);

        let top = capsule.local_supports(Vec2::Y);
        assert_eq!(top.as_slice(), &[Vec2::new(0.0, 1.5)]);

        let dir = Vec2::new(1.0, -1.0).normalize();
        let cap = capsule.local_supports(dir);
        assert_abs_diff_eq!(cap[0], dir * 0.5 - Vec2::Y, epsilon = 1e-6);
    }

    #[test]
    fn polygon_supports() {
        let tri = ConvexPolygon::new([Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0), Vec2::Y]).unwrap();

        let base = tri.local_supports(-Vec2::Y);
        assert_eq!(base.as_slice(), &[Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0)]);

        let apex = tri.local_supports(Vec2::Y);
        assert_eq!(apex.as_slice(), &[Vec2::Y]);

        let t = Transform2::from_translation(Vec2::new(10.0, 0.0));
        let p = tri.project_range(Vec2::X, &t);
        assert_eq!(p, Projection::new(9.0, 11.0));
    }
}
