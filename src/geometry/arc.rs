//! Merging segments: 45-degree rotated interval boxes.
//!
//! A [`ManhattanArc`] holds a point, a 45-degree diagonal segment, or a tilted
//! rectangular region ("TRR") uniformly as an interval box in the rotated
//! coordinates `(x - y, x + y)`; a scalar axis is the degenerate interval
//! `[v, v]`. The payoff of the representation:
//!
//! - L1 distance in the plane is the component-wise `max` of the rotated axis
//!   distances, with no branching on shape;
//! - an L1 Minkowski ball is an axial enlargement;
//! - merging two sets in ratio `alpha : (d - alpha)` is two enlargements
//!   followed by an intersection, which is again a merging segment — the
//!   operator is closed.

use super::interval::Interval;
use super::ops::{max2, Intersect, MinDist, Scalar};
use super::point::{Point, Point2};
use super::recti::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ManhattanArc<T> {
    rotated: Rect<T>,
}

impl<T: Scalar> ManhattanArc<T> {
    /// From rotated-axis intervals.
    pub fn new(xr: Interval<T>, yr: Interval<T>) -> Self {
        Self {
            rotated: Point::new(xr, yr),
        }
    }

    /// From rotated-axis scalars: a single rotated point.
    pub fn from_rotated(a: T, b: T) -> Self {
        Self::new(Interval::point(a), Interval::point(b))
    }

    /// From original plane coordinates, applying `(x, y) -> (x - y, x + y)`.
    pub fn construct(x: T, y: T) -> Self {
        Self::from_rotated(x - y, x + y)
    }

    pub fn from_point(p: &Point2<T>) -> Self {
        let r = p.rotates();
        Self::from_rotated(r.x, r.y)
    }

    /// The rotated-axis intervals.
    pub fn xr(&self) -> Interval<T> {
        self.rotated.x
    }

    pub fn yr(&self) -> Interval<T> {
        self.rotated.y
    }

    /// `true` when an intersection emptied either rotated axis.
    pub fn is_invalid(&self) -> bool {
        self.rotated.is_invalid()
    }

    /// Minimum rectilinear distance: the `max` of the rotated-axis distances
    /// equals the L-infinity distance in rotated space, which is the L1
    /// distance in the original plane.
    pub fn min_dist_with(&self, other: &Self) -> T {
        max2(
            self.rotated.x.min_dist_with(&other.rotated.x),
            self.rotated.y.min_dist_with(&other.rotated.y),
        )
    }

    /// Minkowski sum with the L1 ball of radius `alpha`.
    pub fn enlarge_with(&self, alpha: T) -> Self {
        Self::new(
            self.rotated.x.enlarge_with(alpha),
            self.rotated.y.enlarge_with(alpha),
        )
    }

    /// Component-wise interval intersection; the result carries the invalid
    /// sentinel on an axis that came out empty.
    pub fn intersect_with(&self, other: &Self) -> Self {
        let r = self.rotated.intersect_with(&other.rotated);
        Self::new(r.x, r.y)
    }

    /// The locus of points at distance `alpha` from `self` and `d - alpha`
    /// from `other`, where `d` is their minimum distance. For
    /// `alpha` in `[0, d]` the result is non-empty.
    pub fn merge_with(&self, other: &Self, alpha: T) -> Self {
        let distance = self.min_dist_with(other);
        self.enlarge_with(alpha)
            .intersect_with(&other.enlarge_with(distance - alpha))
    }

    /// Center of the region, in original coordinates.
    pub fn center(&self) -> Point2<T> {
        self.rotated.center().inv_rotates()
    }

    /// Lower rotated corner, in original coordinates.
    pub fn lower_corner(&self) -> Point2<T> {
        self.rotated.lower_corner().inv_rotates()
    }

    /// Upper rotated corner, in original coordinates.
    pub fn upper_corner(&self) -> Point2<T> {
        self.rotated.upper_corner().inv_rotates()
    }

    /// The point inside the region closest to `q` under L1: map `q` into
    /// rotated space, clamp each axis, map back. Ties resolve toward the
    /// lower rotated corner (that is what clamping produces).
    pub fn nearest_point_to(&self, q: &Point2<T>) -> Point2<T> {
        let r = q.rotates();
        Point::new(self.rotated.x.clamp(r.x), self.rotated.y.clamp(r.y)).inv_rotates()
    }
}
