//! Polygonal shapes.

use glam::Vec2;
use smallvec::SmallVec;

use crate::{tangent, CMP_EPSILON};

type PointList = SmallVec<[Vec2; 8]>;

/// A convex polygon.
///
/// Edge `i` runs from point `i` to point `i + 1`, wrapping around at the end of the point list.
/// Each edge stores its outward unit normal.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvexPolygon {
    points: PointList,
    normals: PointList,
}

impl ConvexPolygon {
    /// Constructs a convex polygon from its vertices, in either winding order.
    ///
    /// Returns `None` if there are fewer than three points, if any point is not finite, if the
    /// polygon has no area, or if the points do not describe a convex polygon.
    pub fn new<I>(points: I) -> Option<ConvexPolygon>
    where
        I: IntoIterator<Item = Vec2>,
    {
        let points: PointList = points.into_iter().collect();

        if points.len() < 3 || points.iter().any(|p| !p.is_finite()) {
            return None;
        }

        let n = points.len();
        let edge = |i: usize| points[(i + 1) % n] - points[i];

        if (0..n).any(|i| edge(i).length_squared() == 0.0) {
            return None;
        }
        let max_edge_sq = (0..n).map(|i| edge(i).length_squared()).fold(0.0, f32::max);

        // Twice the signed area, positive for counterclockwise winding. The tolerance is relative
        // to the polygon's size.
        let area2: f32 = (0..n).map(|i| points[i].perp_dot(points[(i + 1) % n])).sum();
        if !area2.is_finite() || area2.abs() <= f32::EPSILON * max_edge_sq {
            return None;
        }
        let sign = area2.signum();

        // Every turn must bend the same way as the winding.
        let turns = (0..n).all(|i| edge(i).perp_dot(edge((i + 1) % n)) * sign >= 0.0);
        if !turns {
            return None;
        }

        // Every vertex must lie on the inner side of every edge. This rejects self-intersecting
        // outlines which wind around more than once.
        let inside = (0..n).all(|i| {
            let e = edge(i);
            points.iter().all(|&p| {
                let d = p - points[i];
                e.perp_dot(d) * sign >= -CMP_EPSILON * e.length() * d.length()
            })
        });
        if !inside {
            return None;
        }

        // The clockwise tangent of an edge points outward for counterclockwise winding.
        let normals = (0..n)
            .map(|i| sign * tangent(edge(i).normalize_or_zero()))
            .collect();

        Some(ConvexPolygon { points, normals })
    }

    /// Constructs an axis-aligned box with the given half-extents.
    pub fn from_half_extents(half_extents: Vec2) -> Option<ConvexPolygon> {
        let he = half_extents;
        ConvexPolygon::new([
            Vec2::new(-he.x, -he.y),
            Vec2::new(he.x, -he.y),
            he,
            Vec2::new(-he.x, he.y),
        ])
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn point(&self, index: usize) -> Vec2 {
        self.points[index]
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Returns the outward unit normal of edge `index`.
    #[inline]
    pub fn segment_normal(&self, index: usize) -> Vec2 {
        self.normals[index]
    }

    #[inline]
    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }
}

/// An arbitrary collection of segments.
///
/// Concave polygons are not handled by the separating axis solver.
#[derive(Clone, Debug, PartialEq)]
pub struct ConcavePolygon {
    segments: Vec<[Vec2; 2]>,
}

impl ConcavePolygon {
    pub fn new(segments: Vec<[Vec2; 2]>) -> ConcavePolygon {
        ConcavePolygon { segments }
    }

    #[inline]
    pub fn segments(&self) -> &[[Vec2; 2]] {
        &self.segments
    }
}
