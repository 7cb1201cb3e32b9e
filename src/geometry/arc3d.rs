//! 3D merging segments as three coupled planar projections.
//!
//! A point set in 3D is represented by the [`ManhattanArc`]s of its xy, yz,
//! and xz projections. The shared axes must stay consistent (xy's `y` pairs
//! with yz's `x`, and so on); operations construct outputs from two of the
//! three projections and use the third as a debug-mode consistency check.
//!
//! Each coordinate difference appears in exactly two projections, so the 3D
//! L1 distance is `(d_xy + d_yz + d_xz) / 2`.

use super::arc::ManhattanArc;
use super::ops::{max2, Scalar};
use super::point::{Point, Point3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ManhattanArc3D<T> {
    pub xy: ManhattanArc<T>,
    pub yz: ManhattanArc<T>,
    pub xz: ManhattanArc<T>,
}

impl<T: Scalar> ManhattanArc3D<T> {
    pub fn new(xy: ManhattanArc<T>, yz: ManhattanArc<T>, xz: ManhattanArc<T>) -> Self {
        Self { xy, yz, xz }
    }

    pub fn from_point(p: &Point3<T>) -> Self {
        let (x, y, z) = (p.x.x, p.x.y, p.y);
        Self {
            xy: ManhattanArc::construct(x, y),
            yz: ManhattanArc::construct(y, z),
            xz: ManhattanArc::construct(x, z),
        }
    }

    pub fn is_invalid(&self) -> bool {
        self.xy.is_invalid() || self.yz.is_invalid() || self.xz.is_invalid()
    }

    /// 3D L1 distance: half the sum of the projection distances.
    ///
    /// Clamped merges can leave the three projections slightly decoupled,
    /// with the half-sum below one projection's own distance; the result is
    /// bounded below by each projection so a subsequent merge stays
    /// non-empty.
    pub fn min_dist_with(&self, other: &Self) -> T {
        let d_xy = self.xy.min_dist_with(&other.xy);
        let d_yz = self.yz.min_dist_with(&other.yz);
        let d_xz = self.xz.min_dist_with(&other.xz);
        let half_sum = (d_xy + d_yz + d_xz) / T::two();
        max2(max2(d_xy, d_yz), max2(d_xz, half_sum))
    }

    pub fn enlarge_with(&self, alpha: T) -> Self {
        Self {
            xy: self.xy.enlarge_with(alpha),
            yz: self.yz.enlarge_with(alpha),
            xz: self.xz.enlarge_with(alpha),
        }
    }

    pub fn intersect_with(&self, other: &Self) -> Self {
        Self {
            xy: self.xy.intersect_with(&other.xy),
            yz: self.yz.intersect_with(&other.yz),
            xz: self.xz.intersect_with(&other.xz),
        }
    }

    pub fn merge_with(&self, other: &Self, alpha: T) -> Self {
        let distance = self.min_dist_with(other);
        self.enlarge_with(alpha)
            .intersect_with(&other.enlarge_with(distance - alpha))
    }

    pub fn center(&self) -> Point3<T> {
        let xy = self.xy.center();
        let xz = self.xz.center();
        debug_assert!(xy.x == xz.x, "projection centers disagree on x");
        Point::new(Point::new(xy.x, xy.y), xz.y)
    }

    pub fn lower_corner(&self) -> Point3<T> {
        let xy = self.xy.lower_corner();
        let xz = self.xz.lower_corner();
        Point::new(Point::new(xy.x, xy.y), xz.y)
    }

    pub fn upper_corner(&self) -> Point3<T> {
        let xy = self.xy.upper_corner();
        let xz = self.xz.upper_corner();
        Point::new(Point::new(xy.x, xy.y), xz.y)
    }

    /// Per-projection nearest points, reassembled into a 3D point with the
    /// yz projection as the consistency check.
    pub fn nearest_point_to(&self, q: &Point3<T>) -> Point3<T> {
        let (x, y, z) = (q.x.x, q.x.y, q.y);
        let nxy = self.xy.nearest_point_to(&Point::new(x, y));
        let nxz = self.xz.nearest_point_to(&Point::new(x, z));
        if cfg!(debug_assertions) {
            let nyz = self.yz.nearest_point_to(&Point::new(y, z));
            debug_assert!(nxy.y == nyz.x, "xy and yz projections disagree on y");
            debug_assert!(nyz.y == nxz.y, "yz and xz projections disagree on z");
        }
        Point::new(Point::new(nxy.x, nxy.y), nxz.y)
    }
}
