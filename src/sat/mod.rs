//! The separating axis test.
//!
//! Two convex shapes are disjoint _iff_ there is an axis onto which their projections do not
//! overlap. For each pair of shape types, [`pairs`] enumerates a finite set of candidate axes which
//! is sufficient for that pair; [`SeparatorAxisTest`] projects both shapes onto each candidate,
//! stops at the first separating axis, and otherwise keeps the axis of minimum penetration for
//! contact generation.

use glam::Vec2;
use tracing::trace;

use crate::{contact, normalize_axis, support::Support, Transform2};

pub mod pairs;

/// Penetration depth assigned before any axis has been tested.
const INITIAL_DEPTH: f32 = 1e15;

/// Per-query state shared between the axis generators, the tester and the contact generator.
pub struct Collector<'a> {
    callback: Option<&'a mut dyn FnMut(Vec2, Vec2)>,
    sep_axis: Option<&'a mut Vec2>,
    pub(crate) swap: bool,
    pub(crate) collided: bool,
    pub(crate) normal: Vec2,
    pub(crate) depth: f32,
}

impl<'a> Collector<'a> {
    /// Constructs a collector.
    ///
    /// If `swap` is set, contact pairs are reported to `callback` as `(on_b, on_a)`. A zero vector
    /// in `sep_axis` means there is no cached separating axis.
    pub fn new(
        callback: Option<&'a mut dyn FnMut(Vec2, Vec2)>,
        swap: bool,
        sep_axis: Option<&'a mut Vec2>,
    ) -> Collector<'a> {
        Collector {
            callback,
            sep_axis,
            swap,
            collided: false,
            normal: Vec2::ZERO,
            depth: 0.0,
        }
    }

    /// Reports a contact pair, honoring the swap flag.
    #[inline]
    pub fn call(&mut self, on_a: Vec2, on_b: Vec2) {
        if let Some(callback) = self.callback.as_deref_mut() {
            if self.swap {
                callback(on_b, on_a);
            } else {
                callback(on_a, on_b);
            }
        }
    }

    #[inline]
    pub fn collided(&self) -> bool {
        self.collided
    }

    #[inline]
    pub fn swap(&self) -> bool {
        self.swap
    }

    /// The penetration depth along the winning axis.
    #[inline]
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// The winning axis, pointing from the second shape toward the first in internal order.
    #[inline]
    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    /// The winning axis, pointing from the shape reported first to the callback toward the shape
    /// reported second.
    #[inline]
    pub fn contact_normal(&self) -> Vec2 {
        if self.swap {
            self.normal
        } else {
            -self.normal
        }
    }

    #[inline]
    pub(crate) fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Exchanges the roles of the two shapes for the remainder of the query.
    #[inline]
    pub(crate) fn flip(&mut self) {
        self.swap = !self.swap;
        self.normal = -self.normal;
    }

    #[inline]
    fn cached_axis(&self) -> Option<Vec2> {
        self.sep_axis
            .as_deref()
            .copied()
            .filter(|axis| *axis != Vec2::ZERO)
    }

    #[inline]
    fn store_axis(&mut self, axis: Vec2) {
        if let Some(cache) = self.sep_axis.as_deref_mut() {
            *cache = axis;
        }
    }
}

/// Tests candidate axes between two placed shapes and tracks the axis of minimum penetration.
pub struct SeparatorAxisTest<'s, 'c, A: ?Sized, B: ?Sized> {
    shape_a: &'s A,
    transform_a: &'s Transform2,
    shape_b: &'s B,
    transform_b: &'s Transform2,
    best_depth: f32,
    best_axis: Vec2,
    axis_count: usize,
    best_axis_index: Option<usize>,
    collector: &'s mut Collector<'c>,
}

impl<'s, 'c, A, B> SeparatorAxisTest<'s, 'c, A, B>
where
    A: Support + ?Sized,
    B: Support + ?Sized,
{
    pub fn new(
        shape_a: &'s A,
        transform_a: &'s Transform2,
        shape_b: &'s B,
        transform_b: &'s Transform2,
        collector: &'s mut Collector<'c>,
    ) -> Self {
        SeparatorAxisTest {
            shape_a,
            transform_a,
            shape_b,
            transform_b,
            best_depth: INITIAL_DEPTH,
            best_axis: Vec2::ZERO,
            axis_count: 0,
            best_axis_index: None,
            collector,
        }
    }

    /// Tests the axis cached by a previous query, if there is one.
    ///
    /// Returns `false` if the cached axis still separates the shapes.
    pub fn test_previous_axis(&mut self) -> bool {
        match self.collector.cached_axis() {
            Some(axis) => self.test_axis(axis),
            None => true,
        }
    }

    /// Tests a single candidate axis.
    ///
    /// Returns `false` if the axis separates the shapes, in which case it is written to the
    /// separating axis cache. Otherwise, the overlap along the axis is recorded if it is the
    /// smallest seen so far.
    pub fn test_axis(&mut self, axis: Vec2) -> bool {
        let axis = normalize_axis(axis);
        let index = self.axis_count;
        self.axis_count += 1;

        let proj_a = self.shape_a.project_range(axis, self.transform_a);
        let proj_b = self.shape_b.project_range(axis, self.transform_b);

        // Widen B by half of A's extent and measure it from A's midpoint. This reduces to
        // `dmin = min_b - max_a` and `dmax = max_b - min_a`.
        let half_a = 0.5 * proj_a.extent();
        let mid_a = proj_a.midpoint();
        let dmin = (proj_b.min - half_a) - mid_a;
        let dmax = (proj_b.max + half_a) - mid_a;

        if dmin > 0.0 || dmax < 0.0 {
            trace!(?axis, index, "separating axis");
            self.collector.store_axis(axis);
            return false;
        }

        let dmin = dmin.abs();

        if dmax < dmin {
            // B lies toward -axis.
            if dmax < self.best_depth {
                self.best_depth = dmax;
                self.best_axis = axis;
                self.best_axis_index = Some(index);
            }
        } else if dmin < self.best_depth {
            // B lies toward +axis.
            self.best_depth = dmin;
            self.best_axis = -axis;
            self.best_axis_index = Some(index);
        }

        true
    }

    /// The smallest penetration depth recorded so far.
    #[inline]
    pub fn best_depth(&self) -> f32 {
        self.best_depth
    }

    /// The axis of minimum penetration recorded so far, pointing from B toward A, or zero if no
    /// overlapping axis has been tested.
    #[inline]
    pub fn best_axis(&self) -> Vec2 {
        self.best_axis
    }

    /// Marks the shapes as colliding and reports contacts along the axis of minimum penetration.
    ///
    /// Does nothing if no overlapping axis has been tested.
    pub fn generate_contacts(&mut self) {
        if self.best_axis == Vec2::ZERO {
            return;
        }

        trace!(
            axis = ?self.best_axis,
            depth = self.best_depth,
            index = ?self.best_axis_index,
            tested = self.axis_count,
            "minimum penetration axis"
        );

        self.collector.collided = true;
        self.collector.normal = self.best_axis;
        self.collector.depth = self.best_depth;

        if !self.collector.has_callback() {
            return;
        }

        let supports_a = self.shape_a.supports(-self.best_axis, self.transform_a);
        let supports_b = self.shape_b.supports(self.best_axis, self.transform_b);

        contact::generate_contacts_from_supports(&supports_a, &supports_b, self.collector);

        // The cached axis no longer separates the pair.
        self.collector.store_axis(Vec2::ZERO);
    }
}
