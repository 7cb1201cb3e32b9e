//! Routing coordinates and keep-out regions.
//!
//! [`Position`] abstracts what the router needs from a coordinate: L1
//! distance, the nearest point on a monotone route span, and keep-out
//! blocking tests. It is implemented for plain 2D points (keep-out:
//! [`Rect`]) and for layered 3D points (keep-out: [`Cuboid`], checked by
//! xy-projection plus z-overlap).
//!
//! Blocking is exact over integers and uses the *open* region: contact with
//! the boundary alone does not block, so routes may hug keep-out edges.

use std::fmt::Debug;

use crate::geometry::ops::{max2, min2, HullWith, MinDist, NearestTo};
use crate::geometry::point::{Point, Point2, Point3};
use crate::geometry::recti::{Cuboid, Rect};
use crate::geometry::Displace;

pub trait Position: Clone + Eq + Ord + Debug {
    /// Axis-aligned keep-out region for this coordinate space.
    type Region: Clone + Debug;

    /// L1 distance.
    fn dist(&self, other: &Self) -> i64;

    /// The point on a monotone (shortest) route from `a` to `b` closest to
    /// `q`; splicing there leaves the route's length unchanged.
    fn nearest_on_span(a: &Self, b: &Self, q: &Self) -> Self;

    /// Whether the straight connection from `a` to `b` crosses the open
    /// region.
    fn blocked(a: &Self, b: &Self, region: &Self::Region) -> bool;

    /// Detour candidates on the region boundary.
    fn region_corners(region: &Self::Region) -> Vec<Self>;
}

impl Position for Point2<i64> {
    type Region = Rect<i64>;

    fn dist(&self, other: &Self) -> i64 {
        self.min_dist_with(other)
    }

    fn nearest_on_span(a: &Self, b: &Self, q: &Self) -> Self {
        a.hull_with(b).nearest_to(q)
    }

    fn blocked(a: &Self, b: &Self, region: &Self::Region) -> bool {
        segment_crosses_rect(a, b, region)
    }

    fn region_corners(region: &Self::Region) -> Vec<Self> {
        let (x, y) = (region.x, region.y);
        vec![
            Point::new(x.lb(), y.lb()),
            Point::new(x.lb(), y.ub()),
            Point::new(x.ub(), y.lb()),
            Point::new(x.ub(), y.ub()),
        ]
    }
}

impl Position for Point3<i64> {
    type Region = Cuboid<i64>;

    fn dist(&self, other: &Self) -> i64 {
        self.min_dist_with(other)
    }

    fn nearest_on_span(a: &Self, b: &Self, q: &Self) -> Self {
        a.hull_with(b).nearest_to(q)
    }

    fn blocked(a: &Self, b: &Self, region: &Self::Region) -> bool {
        let (zlo, zhi) = (min2(a.y, b.y), max2(a.y, b.y));
        if zhi <= region.y.lb() || zlo >= region.y.ub() {
            return false;
        }
        segment_crosses_rect(&a.x, &b.x, &region.x)
    }

    fn region_corners(region: &Self::Region) -> Vec<Self> {
        let mut corners = Vec::with_capacity(8);
        for z in [region.y.lb(), region.y.ub()] {
            for xy in <Point2<i64> as Position>::region_corners(&region.x) {
                corners.push(Point::new(xy, z));
            }
        }
        corners
    }
}

/// Exact segment-versus-open-rectangle test: the bounding boxes must overlap
/// with positive extent on both axes, and the rectangle's corners must not
/// all lie strictly on one side of the carrying line.
fn segment_crosses_rect(a: &Point2<i64>, b: &Point2<i64>, r: &Rect<i64>) -> bool {
    if max2(a.x, b.x) <= r.x.lb()
        || min2(a.x, b.x) >= r.x.ub()
        || max2(a.y, b.y) <= r.y.lb()
        || min2(a.y, b.y) >= r.y.ub()
    {
        return false;
    }
    let d = b.displace(a);
    let mut pos = false;
    let mut neg = false;
    for corner in <Point2<i64> as Position>::region_corners(r) {
        let s = d.cross(&corner.displace(a));
        if s > 0 {
            pos = true;
        } else if s < 0 {
            neg = true;
        }
    }
    !(pos ^ neg)
}
