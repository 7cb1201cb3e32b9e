//! Named rectilinear specialisations of [`Point`].

use super::interval::Interval;
use super::ops::Scalar;
use super::point::{Point, Point2};

/// An axis-aligned rectangle: a point whose both coordinates are intervals.
pub type Rect<T> = Point<Interval<T>, Interval<T>>;

/// A vertical segment: fixed `x`, spanning `y`.
pub type VSegment<T> = Point<T, Interval<T>>;

/// A horizontal segment: spanning `x`, fixed `y`.
pub type HSegment<T> = Point<Interval<T>, T>;

/// A 3D keep-out: an xy rectangle extruded over a `z` range.
pub type Cuboid<T> = Point<Rect<T>, Interval<T>>;

impl<T: Scalar> Rect<T> {
    pub fn width(&self) -> T {
        self.x.length()
    }

    pub fn height(&self) -> T {
        self.y.length()
    }

    pub fn area(&self) -> T {
        self.x.length() * self.y.length()
    }

    pub fn lower_corner(&self) -> Point2<T> {
        Point::new(self.x.lb(), self.y.lb())
    }

    pub fn upper_corner(&self) -> Point2<T> {
        Point::new(self.x.ub(), self.y.ub())
    }

    pub fn center(&self) -> Point2<T> {
        Point::new(
            (self.x.lb() + self.x.ub()) / T::two(),
            (self.y.lb() + self.y.ub()) / T::two(),
        )
    }

    /// `true` when either axis carries the empty-intersection sentinel.
    pub fn is_invalid(&self) -> bool {
        self.x.is_invalid() || self.y.is_invalid()
    }
}
