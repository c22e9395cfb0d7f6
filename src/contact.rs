//! Contact generation.
//!
//! Once the axis of minimum penetration is known, each shape reports its support set along that
//! axis: a single point or an edge. The contact pairs are derived from the two support sets.

use arrayvec::ArrayVec;
use glam::Vec2;

use crate::{sat::Collector, tangent, CMP_EPSILON, MAX_SUPPORTS};

/// A pair of corresponding points on two colliding shapes, in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContactPair {
    /// The contact point on the first shape.
    pub on_a: Vec2,
    /// The contact point on the second shape.
    pub on_b: Vec2,
}

impl ContactPair {
    pub fn reverse(self) -> ContactPair {
        ContactPair {
            on_a: self.on_b,
            on_b: self.on_a,
        }
    }

    /// The separation between the two points along `normal`.
    ///
    /// This is negative when the points are penetrating along a normal pointing from A to B.
    #[inline]
    pub fn separation(&self, normal: Vec2) -> f32 {
        normal.dot(self.on_b - self.on_a)
    }
}

/// The result of a collision test between two penetrating shapes.
#[derive(Clone, Debug, PartialEq)]
pub struct Manifold {
    /// The axis of minimum penetration, pointing from the first shape toward the second.
    pub normal: Vec2,
    /// The penetration depth along `self.normal`.
    pub depth: f32,
    /// The contact pairs.
    pub points: ArrayVec<ContactPair, MAX_SUPPORTS>,
}

impl Manifold {
    pub fn reverse(self) -> Manifold {
        Manifold {
            normal: -self.normal,
            points: self.points.into_iter().map(ContactPair::reverse).collect(),
            ..self
        }
    }
}

/// Reports the contact pairs between two support sets to `collector`.
///
/// The support set with fewer points is treated as A, flipping the collector if necessary.
pub(crate) fn generate_contacts_from_supports(
    points_a: &[Vec2],
    points_b: &[Vec2],
    collector: &mut Collector<'_>,
) {
    debug_assert!(!points_a.is_empty() && !points_b.is_empty());

    let (points_a, points_b) = if points_a.len() > points_b.len() {
        collector.flip();
        (points_b, points_a)
    } else {
        (points_a, points_b)
    };

    match (points_a, points_b) {
        ([a], [b]) => point_point(*a, *b, collector),
        ([a], [b0, b1]) => point_edge(*a, [*b0, *b1], collector),
        ([a0, a1], [b0, b1]) => edge_edge([*a0, *a1], [*b0, *b1], collector),
        _ => {}
    }
}

fn point_point(a: Vec2, b: Vec2, collector: &mut Collector<'_>) {
    collector.call(a, b);
}

fn point_edge(a: Vec2, edge_b: [Vec2; 2], collector: &mut Collector<'_>) {
    collector.call(a, project_on_line(a, edge_b));
}

fn edge_edge(edge_a: [Vec2; 2], edge_b: [Vec2; 2], collector: &mut Collector<'_>) {
    let normal = collector.normal;

    // Both edges are ordered along the tangent of the contact normal.
    let t = tangent(normal);
    let (a, da) = sort_along(t, edge_a);
    let (b, db) = sort_along(t, edge_b);

    // Discard pairs which are not penetrating along the normal.
    let mut emit = |on_a: Vec2, on_b: Vec2| {
        if normal.dot(on_a) > normal.dot(on_b) - CMP_EPSILON {
            return;
        }

        collector.call(on_a, on_b);
    };

    if da[0] < db[0] {
        if da[1] > db[1] {
            // A contains B.
            for p in b {
                emit(project_on_line(p, a), p);
            }
        } else {
            emit(project_on_line(b[0], a), b[0]);
            emit(a[1], project_on_line(a[1], b));
        }
    } else if db[1] > da[1] {
        // B contains A.
        for p in a {
            emit(p, project_on_line(p, b));
        }
    } else {
        emit(a[0], project_on_line(a[0], b));
        emit(project_on_line(b[1], a), b[1]);
    }
}

/// Orders the endpoints of `edge` by their coordinate along `axis`.
#[inline]
fn sort_along(axis: Vec2, edge: [Vec2; 2]) -> ([Vec2; 2], [f32; 2]) {
    let d0 = axis.dot(edge[0]);
    let d1 = axis.dot(edge[1]);

    if d0 > d1 {
        ([edge[1], edge[0]], [d1, d0])
    } else {
        (edge, [d0, d1])
    }
}

/// Projects `point` onto the infinite line through `edge`.
///
/// If the edge has no length, returns its first endpoint.
#[inline]
fn project_on_line(point: Vec2, edge: [Vec2; 2]) -> Vec2 {
    let [p0, p1] = edge;

    match (p1 - p0).try_normalize() {
        Some(dir) => p0 + dir * dir.dot(point - p0),
        None => p0,
    }
}
