//! Shape-pair dispatch.

use arrayvec::ArrayVec;
use glam::Vec2;
use tracing::{debug, warn};

use crate::{
    contact::{ContactPair, Manifold},
    sat::{pairs, Collector},
    shape::{Shape, ShapeType},
    Transform2, MAX_SUPPORTS,
};

/// Errors reported for shape pairs outside the separating axis solver's domain.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum SatError {
    #[error("{0:?} is unbounded and cannot be tested with the separating axis solver")]
    Unbounded(ShapeType),
    #[error("{0:?} is concave and cannot be tested with the separating axis solver")]
    Concave(ShapeType),
    #[error("no separating axis test exists for {0:?} against {1:?}")]
    UnsupportedPair(ShapeType, ShapeType),
}

/// Tests two placed shapes for overlap.
///
/// If the shapes overlap and `callback` is provided, it is called once per contact pair with the
/// world-space points on each shape, as `(on_a, on_b)`, or `(on_b, on_a)` if `swap` is set.
///
/// `sep_axis` is an optional separating axis cache owned by the caller, where a zero vector means
/// no axis is cached. A cached axis which still separates the shapes ends the query early. The
/// cache is overwritten with any new separating axis, and cleared once contacts are generated.
///
/// Returns `Ok(true)` if the shapes overlap.
pub fn solve<'a>(
    shape_a: &Shape,
    transform_a: &Transform2,
    shape_b: &Shape,
    transform_b: &Transform2,
    callback: Option<&'a mut dyn FnMut(Vec2, Vec2)>,
    swap: bool,
    sep_axis: Option<&'a mut Vec2>,
) -> Result<bool, SatError> {
    let mut collector = Collector::new(callback, swap, sep_axis);
    dispatch(shape_a, transform_a, shape_b, transform_b, &mut collector)?;

    Ok(collector.collided())
}

/// Tests two placed shapes for overlap without generating contacts.
pub fn collide(
    shape_a: &Shape,
    transform_a: &Transform2,
    shape_b: &Shape,
    transform_b: &Transform2,
) -> Result<bool, SatError> {
    solve(shape_a, transform_a, shape_b, transform_b, None, false, None)
}

/// Computes the contact manifold between two placed shapes.
///
/// Returns `Ok(None)` if the shapes do not overlap.
pub fn contact(
    shape_a: &Shape,
    transform_a: &Transform2,
    shape_b: &Shape,
    transform_b: &Transform2,
) -> Result<Option<Manifold>, SatError> {
    let mut points = ArrayVec::<ContactPair, MAX_SUPPORTS>::new();
    let mut callback = |on_a: Vec2, on_b: Vec2| {
        let pushed = points.try_push(ContactPair { on_a, on_b });
        debug_assert!(pushed.is_ok());
    };

    let mut collector = Collector::new(Some(&mut callback), false, None);
    dispatch(shape_a, transform_a, shape_b, transform_b, &mut collector)?;

    if !collector.collided() {
        return Ok(None);
    }

    let normal = collector.contact_normal();
    let depth = collector.depth();
    drop(collector);

    debug!(?normal, depth, count = points.len(), "contact manifold");

    Ok(Some(Manifold {
        normal,
        depth,
        points,
    }))
}

fn validate(shape: &Shape) -> Result<(), SatError> {
    let ty = shape.shape_type();

    if ty.is_unbounded() {
        warn!(shape_type = ?ty, "rejected unbounded shape");
        return Err(SatError::Unbounded(ty));
    }

    if shape.is_concave() {
        warn!(shape_type = ?ty, "rejected concave shape");
        return Err(SatError::Concave(ty));
    }

    Ok(())
}

/// Validates both shapes and runs the axis generator for their types.
///
/// The shape with the lower [`ShapeType`] is always passed to the generator first; if the caller's
/// order is reversed, the collector's swap flag is toggled so contacts are still reported in the
/// caller's order.
fn dispatch(
    shape_a: &Shape,
    transform_a: &Transform2,
    shape_b: &Shape,
    transform_b: &Transform2,
    collector: &mut Collector<'_>,
) -> Result<(), SatError> {
    validate(shape_a)?;
    validate(shape_b)?;

    if shape_a.shape_type() > shape_b.shape_type() {
        collector.swap = !collector.swap;
        route(shape_b, transform_b, shape_a, transform_a, collector)
    } else {
        route(shape_a, transform_a, shape_b, transform_b, collector)
    }
}

fn route(
    shape_a: &Shape,
    ta: &Transform2,
    shape_b: &Shape,
    tb: &Transform2,
    collector: &mut Collector<'_>,
) -> Result<(), SatError> {
    match (shape_a, shape_b) {
        (Shape::Segment(a), Shape::Segment(b)) => pairs::segment_segment(a, ta, b, tb, collector),
        (Shape::Segment(a), Shape::Circle(b)) => pairs::segment_circle(a, ta, b, tb, collector),
        (Shape::Segment(a), Shape::Rectangle(b)) => {
            pairs::segment_rectangle(a, ta, b, tb, collector)
        }
        (Shape::Segment(a), Shape::Capsule(b)) => pairs::segment_capsule(a, ta, b, tb, collector),
        (Shape::Segment(a), Shape::ConvexPolygon(b)) => {
            pairs::segment_convex_polygon(a, ta, b, tb, collector)
        }

        (Shape::Circle(a), Shape::Circle(b)) => pairs::circle_circle(a, ta, b, tb, collector),
        (Shape::Circle(a), Shape::Rectangle(b)) => {
            pairs::circle_rectangle(a, ta, b, tb, collector)
        }
        (Shape::Circle(a), Shape::Capsule(b)) => pairs::circle_capsule(a, ta, b, tb, collector),
        (Shape::Circle(a), Shape::ConvexPolygon(b)) => {
            pairs::circle_convex_polygon(a, ta, b, tb, collector)
        }

        (Shape::Rectangle(a), Shape::Rectangle(b)) => {
            pairs::rectangle_rectangle(a, ta, b, tb, collector)
        }
        (Shape::Rectangle(a), Shape::Capsule(b)) => {
            pairs::rectangle_capsule(a, ta, b, tb, collector)
        }
        (Shape::Rectangle(a), Shape::ConvexPolygon(b)) => {
            pairs::rectangle_convex_polygon(a, ta, b, tb, collector)
        }

        (Shape::Capsule(a), Shape::Capsule(b)) => pairs::capsule_capsule(a, ta, b, tb, collector),
        (Shape::Capsule(a), Shape::ConvexPolygon(b)) => {
            pairs::capsule_convex_polygon(a, ta, b, tb, collector)
        }

        (Shape::ConvexPolygon(a), Shape::ConvexPolygon(b)) => {
            pairs::convex_polygon_convex_polygon(a, ta, b, tb, collector)
        }

        _ => {
            let (type_a, type_b) = (shape_a.shape_type(), shape_b.shape_type());
            warn!(?type_a, ?type_b, "no separating axis test for shape pair");
            return Err(SatError::UnsupportedPair(type_a, type_b));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::f32::consts::TAU;

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        polygon::{ConcavePolygon, ConvexPolygon},
        shape::{Capsule, Circle, Line, Ray, Rectangle, Segment},
        support::{Projection, Support},
    };

    fn square() -> Shape {
        Rectangle {
            half_extents: Vec2::splat(0.5),
        }
        .into()
    }

    fn circle() -> Shape {
        Circle { radius: 1.0 }.into()
    }

    fn at(x: f32, y: f32) -> Transform2 {
        Transform2::from_translation(Vec2::new(x, y))
    }

    fn pentagon() -> ConvexPolygon {
        ConvexPolygon::new((0..5).map(|i| Vec2::from_angle(i as f32 * TAU / 5.0) * 0.5)).unwrap()
    }

    /// One shape of each solvable type.
    fn fixtures() -> Vec<Shape> {
        vec![
            Segment::new(Vec2::new(-0.6, -0.2), Vec2::new(0.7, 0.3)).into(),
            Circle { radius: 0.5 }.into(),
            Rectangle {
                half_extents: Vec2::new(0.5, 0.3),
            }
            .into(),
            Capsule {
                radius: 0.3,
                height: 0.8,
            }
            .into(),
            pentagon().into(),
        ]
    }

    #[test]
    fn squares() {
        assert!(!collide(&square(), &Transform2::IDENTITY, &square(), &at(1.5, 0.0)).unwrap());

        let manifold = contact(&square(), &Transform2::IDENTITY, &square(), &at(0.5, 0.0))
            .unwrap()
            .unwrap();
        assert_abs_diff_eq!(manifold.normal, Vec2::X, epsilon = 1e-6);
        assert_abs_diff_eq!(manifold.depth, 0.5, epsilon = 1e-6);
        assert_eq!(manifold.points.len(), 2);

        for p in &manifold.points {
            assert_abs_diff_eq!(p.separation(manifold.normal), -0.5, epsilon = 1e-6);
        }
    }

    #[test]
    fn circles() {
        let manifold = contact(&circle(), &Transform2::IDENTITY, &circle(), &at(1.5, 0.0))
            .unwrap()
            .unwrap();
        assert_abs_diff_eq!(manifold.normal, Vec2::X, epsilon = 1e-6);
        assert_abs_diff_eq!(manifold.depth, 0.5, epsilon = 1e-6);
        assert_eq!(manifold.points.len(), 1);

        // Both points lie on the segment joining the centers.
        let pair = manifold.points[0];
        assert_abs_diff_eq!(pair.on_a, Vec2::new(1.0, 0.0), epsilon = 1e-6);
        assert_abs_diff_eq!(pair.on_b, Vec2::new(0.5, 0.0), epsilon = 1e-6);

        let none = contact(&circle(), &Transform2::IDENTITY, &circle(), &at(3.0, 0.0)).unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn identical_segments() {
        let seg: Shape = Segment::new(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0)).into();
        let t = Transform2::IDENTITY;

        let mut pairs = Vec::new();
        let mut callback = |a: Vec2, b: Vec2| pairs.push((a, b));
        let collided = solve(&seg, &t, &seg, &t, Some(&mut callback), false, None).unwrap();

        // Every edge pair lies within tolerance along the normal, so no contact is reported.
        assert!(collided);
        assert!(pairs.is_empty());

        let manifold = contact(&seg, &t, &seg, &t).unwrap().unwrap();
        assert_eq!(manifold.depth, 0.0);
        assert!(manifold.points.is_empty());
    }

    #[test]
    fn swap_flag_reverses_callback_order() {
        let mut pairs = Vec::new();
        let mut callback = |a: Vec2, b: Vec2| pairs.push((a, b));
        let collided = solve(
            &circle(),
            &Transform2::IDENTITY,
            &circle(),
            &at(1.5, 0.0),
            Some(&mut callback),
            true,
            None,
        )
        .unwrap();

        assert!(collided);
        assert_eq!(pairs.len(), 1);
        assert_abs_diff_eq!(pairs[0].0, Vec2::new(0.5, 0.0), epsilon = 1e-6);
        assert_abs_diff_eq!(pairs[0].1, Vec2::new(1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn rejects_unsolvable_shapes() {
        let line: Shape = Line {
            normal: Vec2::Y,
            distance: 0.0,
        }
        .into();
        let ray: Shape = Ray { length: 2.0 }.into();
        let concave: Shape = ConcavePolygon::new(vec![[Vec2::ZERO, Vec2::X]]).into();
        let t = Transform2::IDENTITY;

        assert_eq!(
            collide(&line, &t, &circle(), &t),
            Err(SatError::Unbounded(ShapeType::Line))
        );
        assert_eq!(
            collide(&circle(), &t, &ray, &t),
            Err(SatError::Unbounded(ShapeType::Ray))
        );
        assert_eq!(
            contact(&square(), &t, &concave, &t),
            Err(SatError::Concave(ShapeType::ConcavePolygon))
        );

        // Contract failures never reach the callback or the cache.
        let mut called = false;
        let mut callback = |_: Vec2, _: Vec2| called = true;
        let mut cache = Vec2::X;
        let result = solve(&line, &t, &line, &t, Some(&mut callback), false, Some(&mut cache));
        assert!(result.is_err());
        assert!(!called);
        assert_eq!(cache, Vec2::X);
    }

    #[test]
    fn every_pair_is_order_independent() {
        let shapes = fixtures();
        let placements = [
            (
                Transform2::from_angle_translation(0.2, Vec2::ZERO),
                Transform2::from_angle_translation(-0.5, Vec2::new(0.3, 0.2)),
            ),
            (
                Transform2::from_angle_translation(1.1, Vec2::new(-0.1, 0.4)),
                Transform2::from_angle_translation(2.3, Vec2::new(0.45, -0.35)),
            ),
            (
                Transform2::IDENTITY,
                Transform2::from_angle_translation(0.7, Vec2::new(3.0, 1.0)),
            ),
        ];

        for (i, a) in shapes.iter().enumerate() {
            for b in &shapes[i..] {
                for (ta, tb) in &placements {
                    let forward = contact(a, ta, b, tb).unwrap();
                    let backward = contact(b, tb, a, ta).unwrap();

                    let label = (a.shape_type(), b.shape_type());
                    assert_eq!(forward.is_some(), backward.is_some(), "{label:?}");

                    let (Some(forward), Some(backward)) = (forward, backward) else {
                        continue;
                    };

                    assert_abs_diff_eq!(forward.depth, backward.depth, epsilon = 1e-4);
                    assert_abs_diff_eq!(forward.normal, -backward.normal, epsilon = 1e-4);

                    // Different types share one canonical query, so contacts match exactly.
                    if a.shape_type() != b.shape_type() {
                        assert_eq!(forward, backward.reverse(), "{label:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn polygon_depth_is_minimal() {
        let poly = pentagon();
        let rect = Rectangle {
            half_extents: Vec2::new(0.6, 0.25),
        };
        let rect_poly = ConvexPolygon::from_half_extents(rect.half_extents).unwrap();

        let shape_a: Shape = poly.clone().into();
        let shape_b: Shape = rect.clone().into();

        for step in 0..48 {
            let ta = Transform2::from_angle_translation(step as f32 * 0.41, Vec2::ZERO);
            let offset = Vec2::from_angle(step as f32 * 0.83) * (0.2 + step as f32 * 0.02);
            let tb = Transform2::from_angle_translation(step as f32 * -0.29, offset);

            // The candidate axes are the edge normals of both polygons.
            let overlap = |axis: Vec2| {
                let pa = poly.project_range(axis, &ta);
                let pb = rect.project_range(axis, &tb);
                (pa.max - pb.min).min(pb.max - pa.min)
            };
            let candidates = poly
                .normals()
                .iter()
                .map(|&n| ta.xform_normal(n).normalize())
                .chain(rect_poly.normals().iter().map(|&n| tb.xform_normal(n).normalize()));
            let expected = candidates.map(overlap).fold(f32::INFINITY, f32::min);

            match contact(&shape_a, &ta, &shape_b, &tb).unwrap() {
                Some(manifold) => {
                    assert!(expected >= 0.0, "step {step}");
                    assert_abs_diff_eq!(manifold.depth, expected, epsilon = 1e-4);

                    // No sampled direction penetrates less than the reported depth.
                    for k in 0..180 {
                        let axis = Vec2::from_angle(k as f32 * TAU / 360.0);
                        assert!(overlap(axis) >= manifold.depth - 1e-4, "step {step}, k {k}");
                    }
                }
                None => assert!(expected < 0.0, "step {step}"),
            }
        }
    }

    fn project(shape: &Shape, axis: Vec2, transform: &Transform2) -> Projection {
        match shape {
            Shape::Segment(s) => s.project_range(axis, transform),
            Shape::Circle(c) => c.project_range(axis, transform),
            Shape::Rectangle(r) => r.project_range(axis, transform),
            Shape::Capsule(c) => c.project_range(axis, transform),
            Shape::ConvexPolygon(p) => p.project_range(axis, transform),
            other => panic!("{:?} has no projection", other.shape_type()),
        }
    }

    #[test]
    fn collisions_have_no_separating_direction() {
        let shapes = fixtures();

        for (i, a) in shapes.iter().enumerate() {
            for b in &shapes[i..] {
                let label = (a.shape_type(), b.shape_type());
                let mut hits = 0;

                for step in 0..64 {
                    let ta = Transform2::from_angle_translation(step as f32 * 0.41, Vec2::ZERO);
                    let offset = Vec2::from_angle(step as f32 * 0.83) * (0.1 + step as f32 * 0.02);
                    let tb = Transform2::from_angle_translation(step as f32 * -0.29, offset);

                    if !collide(a, &ta, b, &tb).unwrap() {
                        continue;
                    }
                    hits += 1;

                    for k in 0..180 {
                        let axis = Vec2::from_angle(k as f32 * TAU / 360.0);
                        let pa = project(a, axis, &ta);
                        let pb = project(b, axis, &tb);
                        let overlap = (pa.max - pb.min).min(pb.max - pa.min);
                        assert!(overlap >= -1e-4, "{label:?}, step {step}, k {k}");
                    }
                }

                assert!(hits > 0, "{label:?}");
            }
        }
    }
}
