//! Candidate axes for each pair of shape types.
//!
//! Every generator tests the cached separating axis first, then each candidate axis in turn,
//! returning as soon as one separates the shapes. If none does, contacts are generated along the
//! axis of minimum penetration.

use glam::Vec2;

use super::{Collector, SeparatorAxisTest};
use crate::{
    polygon::ConvexPolygon,
    shape::{Capsule, Circle, Rectangle, Segment},
    Transform2,
};

/// Returns from the enclosing generator if `$axis` separates the shapes.
macro_rules! try_axis {
    ($sat:ident, $axis:expr) => {
        if !$sat.test_axis($axis) {
            return;
        }
    };
}

/// The world-space normal of a segment.
#[inline]
fn segment_normal(segment: &Segment, transform: &Transform2) -> Vec2 {
    transform.xform_normal(segment.normal())
}

/// The world-space normal of edge `index` of a polygon.
#[inline]
fn edge_normal(polygon: &ConvexPolygon, transform: &Transform2, index: usize) -> Vec2 {
    transform.xform_normal(polygon.segment_normal(index))
}

/// The world-space corner of a rectangle in the same quadrant as the world point `toward`.
#[inline]
fn rectangle_corner(rectangle: &Rectangle, transform: &Transform2, toward: Vec2) -> Vec2 {
    transform.xform(rectangle.corner_toward(transform.xform_inv(toward)))
}

/// Tests both segment normals.
pub fn segment_segment(
    segment_a: &Segment,
    transform_a: &Transform2,
    segment_b: &Segment,
    transform_b: &Transform2,
    collector: &mut Collector<'_>,
) {
    let mut sat = SeparatorAxisTest::new(segment_a, transform_a, segment_b, transform_b, collector);

    if !sat.test_previous_axis() {
        return;
    }

    try_axis!(sat, segment_normal(segment_a, transform_a));
    try_axis!(sat, segment_normal(segment_b, transform_b));

    sat.generate_contacts();
}

/// Tests the segment normal and the direction from the center to each endpoint.
pub fn segment_circle(
    segment_a: &Segment,
    transform_a: &Transform2,
    circle_b: &Circle,
    transform_b: &Transform2,
    collector: &mut Collector<'_>,
) {
    let mut sat = SeparatorAxisTest::new(segment_a, transform_a, circle_b, transform_b, collector);

    if !sat.test_previous_axis() {
        return;
    }

    let center = transform_b.origin();

    try_axis!(sat, segment_normal(segment_a, transform_a));
    try_axis!(sat, transform_a.xform(segment_a.a()) - center);
    try_axis!(sat, transform_a.xform(segment_a.b()) - center);

    sat.generate_contacts();
}

/// Tests the segment normal and the rectangle's axes.
pub fn segment_rectangle(
    segment_a: &Segment,
    transform_a: &Transform2,
    rectangle_b: &Rectangle,
    transform_b: &Transform2,
    collector: &mut Collector<'_>,
) {
    let mut sat =
        SeparatorAxisTest::new(segment_a, transform_a, rectangle_b, transform_b, collector);

    if !sat.test_previous_axis() {
        return;
    }

    try_axis!(sat, segment_normal(segment_a, transform_a));
    try_axis!(sat, transform_b.basis_x());
    try_axis!(sat, transform_b.basis_y());

    sat.generate_contacts();
}

/// Tests the segment normal, the capsule's cross axis and each endpoint against each cap.
pub fn segment_capsule(
    segment_a: &Segment,
    transform_a: &Transform2,
    capsule_b: &Capsule,
    transform_b: &Transform2,
    collector: &mut Collector<'_>,
) {
    let mut sat = SeparatorAxisTest::new(segment_a, transform_a, capsule_b, transform_b, collector);

    if !sat.test_previous_axis() {
        return;
    }

    try_axis!(sat, segment_normal(segment_a, transform_a));
    try_axis!(sat, transform_b.basis_x());

    let caps = capsule_b.cap_centers(transform_b);
    for endpoint in [segment_a.a(), segment_a.b()] {
        let endpoint = transform_a.xform(endpoint);

        for cap in caps {
            try_axis!(sat, endpoint - cap);
        }
    }

    sat.generate_contacts();
}

/// Tests the segment normal and every polygon edge normal.
pub fn segment_convex_polygon(
    segment_a: &Segment,
    transform_a: &Transform2,
    polygon_b: &ConvexPolygon,
    transform_b: &Transform2,
    collector: &mut Collector<'_>,
) {
    let mut sat = SeparatorAxisTest::new(segment_a, transform_a, polygon_b, transform_b, collector);

    if !sat.test_previous_axis() {
        return;
    }

    try_axis!(sat, segment_normal(segment_a, transform_a));

    for i in 0..polygon_b.point_count() {
        try_axis!(sat, edge_normal(polygon_b, transform_b, i));
    }

    sat.generate_contacts();
}

/// Tests the line between the centers.
pub fn circle_circle(
    circle_a: &Circle,
    transform_a: &Transform2,
    circle_b: &Circle,
    transform_b: &Transform2,
    collector: &mut Collector<'_>,
) {
    let mut sat = SeparatorAxisTest::new(circle_a, transform_a, circle_b, transform_b, collector);

    if !sat.test_previous_axis() {
        return;
    }

    try_axis!(sat, transform_a.origin() - transform_b.origin());

    sat.generate_contacts();
}

/// Tests the rectangle's axes and the direction from the center to the nearest corner.
pub fn circle_rectangle(
    circle_a: &Circle,
    transform_a: &Transform2,
    rectangle_b: &Rectangle,
    transform_b: &Transform2,
    collector: &mut Collector<'_>,
) {
    let mut sat =
        SeparatorAxisTest::new(circle_a, transform_a, rectangle_b, transform_b, collector);

    if !sat.test_previous_axis() {
        return;
    }

    let center = transform_a.origin();

    try_axis!(sat, transform_b.basis_x());
    try_axis!(sat, transform_b.basis_y());
    try_axis!(sat, rectangle_corner(rectangle_b, transform_b, center) - center);

    sat.generate_contacts();
}

/// Tests the capsule's cross axis and the direction from each cap to the center.
pub fn circle_capsule(
    circle_a: &Circle,
    transform_a: &Transform2,
    capsule_b: &Capsule,
    transform_b: &Transform2,
    collector: &mut Collector<'_>,
) {
    let mut sat = SeparatorAxisTest::new(circle_a, transform_a, capsule_b, transform_b, collector);

    if !sat.test_previous_axis() {
        return;
    }

    let center = transform_a.origin();

    try_axis!(sat, transform_b.basis_x());

    for cap in capsule_b.cap_centers(transform_b) {
        try_axis!(sat, center - cap);
    }

    sat.generate_contacts();
}

/// Tests each polygon edge normal and the direction from the center to each vertex.
pub fn circle_convex_polygon(
    circle_a: &Circle,
    transform_a: &Transform2,
    polygon_b: &ConvexPolygon,
    transform_b: &Transform2,
    collector: &mut Collector<'_>,
) {
    let mut sat = SeparatorAxisTest::new(circle_a, transform_a, polygon_b, transform_b, collector);

    if !sat.test_previous_axis() {
        return;
    }

    let center = transform_a.origin();

    for i in 0..polygon_b.point_count() {
        try_axis!(sat, transform_b.xform(polygon_b.point(i)) - center);
        try_axis!(sat, edge_normal(polygon_b, transform_b, i));
    }

    sat.generate_contacts();
}

/// Tests the axes of both rectangles.
pub fn rectangle_rectangle(
    rectangle_a: &Rectangle,
    transform_a: &Transform2,
    rectangle_b: &Rectangle,
    transform_b: &Transform2,
    collector: &mut Collector<'_>,
) {
    let mut sat =
        SeparatorAxisTest::new(rectangle_a, transform_a, rectangle_b, transform_b, collector);

    if !sat.test_previous_axis() {
        return;
    }

    try_axis!(sat, transform_a.basis_x());
    try_axis!(sat, transform_a.basis_y());
    try_axis!(sat, transform_b.basis_x());
    try_axis!(sat, transform_b.basis_y());

    sat.generate_contacts();
}

/// Tests the rectangle's axes, the capsule's cross axis and each cap against its nearest corner.
pub fn rectangle_capsule(
    rectangle_a: &Rectangle,
    transform_a: &Transform2,
    capsule_b: &Capsule,
    transform_b: &Transform2,
    collector: &mut Collector<'_>,
) {
    let mut sat =
        SeparatorAxisTest::new(rectangle_a, transform_a, capsule_b, transform_b, collector);

    if !sat.test_previous_axis() {
        return;
    }

    try_axis!(sat, transform_a.basis_x());
    try_axis!(sat, transform_a.basis_y());
    try_axis!(sat, transform_b.basis_x());

    // Nearest rectangle corner to each cap.
    for cap in capsule_b.cap_centers(transform_b) {
        try_axis!(sat, rectangle_corner(rectangle_a, transform_a, cap) - cap);
    }

    sat.generate_contacts();
}

/// Tests the rectangle's axes and every polygon edge normal.
pub fn rectangle_convex_polygon(
    rectangle_a: &Rectangle,
    transform_a: &Transform2,
    polygon_b: &ConvexPolygon,
    transform_b: &Transform2,
    collector: &mut Collector<'_>,
) {
    let mut sat =
        SeparatorAxisTest::new(rectangle_a, transform_a, polygon_b, transform_b, collector);

    if !sat.test_previous_axis() {
        return;
    }

    try_axis!(sat, transform_a.basis_x());
    try_axis!(sat, transform_a.basis_y());

    for i in 0..polygon_b.point_count() {
        try_axis!(sat, edge_normal(polygon_b, transform_b, i));
    }

    sat.generate_contacts();
}

/// Tests both cross axes and the direction between every pair of caps.
pub fn capsule_capsule(
    capsule_a: &Capsule,
    transform_a: &Transform2,
    capsule_b: &Capsule,
    transform_b: &Transform2,
    collector: &mut Collector<'_>,
) {
    let mut sat = SeparatorAxisTest::new(capsule_a, transform_a, capsule_b, transform_b, collector);

    if !sat.test_previous_axis() {
        return;
    }

    try_axis!(sat, transform_b.basis_x());
    try_axis!(sat, transform_a.basis_x());

    let caps_b = capsule_b.cap_centers(transform_b);
    for cap_a in capsule_a.cap_centers(transform_a) {
        for cap_b in caps_b {
            try_axis!(sat, cap_a - cap_b);
        }
    }

    sat.generate_contacts();
}

/// Tests the capsule's cross axis, each vertex against each cap, and every edge normal.
pub fn capsule_convex_polygon(
    capsule_a: &Capsule,
    transform_a: &Transform2,
    polygon_b: &ConvexPolygon,
    transform_b: &Transform2,
    collector: &mut Collector<'_>,
) {
    let mut sat = SeparatorAxisTest::new(capsule_a, transform_a, polygon_b, transform_b, collector);

    if !sat.test_previous_axis() {
        return;
    }

    try_axis!(sat, transform_a.basis_x());

    let caps = capsule_a.cap_centers(transform_a);
    for i in 0..polygon_b.point_count() {
        let vertex = transform_b.xform(polygon_b.point(i));

        for cap in caps {
            try_axis!(sat, vertex - cap);
        }

        try_axis!(sat, edge_normal(polygon_b, transform_b, i));
    }

    sat.generate_contacts();
}

/// Tests the edge normals of both polygons.
pub fn convex_polygon_convex_polygon(
    polygon_a: &ConvexPolygon,
    transform_a: &Transform2,
    polygon_b: &ConvexPolygon,
    transform_b: &Transform2,
    collector: &mut Collector<'_>,
) {
    let mut sat = SeparatorAxisTest::new(polygon_a, transform_a, polygon_b, transform_b, collector);

    if !sat.test_previous_axis() {
        return;
    }

    for i in 0..polygon_a.point_count() {
        try_axis!(sat, edge_normal(polygon_a, transform_a, i));
    }

    for i in 0..polygon_b.point_count() {
        try_axis!(sat, edge_normal(polygon_b, transform_b, i));
    }

    sat.generate_contacts();
}
