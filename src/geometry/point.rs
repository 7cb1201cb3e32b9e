//! Two-coordinate records with polymorphic coordinates.
//!
//! A coordinate may be a scalar, an [`Interval`], or a nested [`Point`]:
//! `Point<Interval<T>, Interval<T>>` is an axis-aligned rectangle,
//! `Point<Point<T, T>, T>` a 3D point. Every pairwise operation delegates
//! component-wise through the dispatch traits of [`super::ops`].
//!
//! [`Interval`]: super::interval::Interval

use std::ops::{Add, AddAssign, Sub, SubAssign};

use super::ops::{Contains, Displace, HullWith, Intersect, MinDist, NearestTo, Overlaps, Scalar};
use super::vector::Vector2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point<X, Y> {
    pub x: X,
    pub y: Y,
}

/// A plain 2D point.
pub type Point2<T> = Point<T, T>;

/// A 3D point, `(x, y)` nested under a layer coordinate `z`.
pub type Point3<T> = Point<Point<T, T>, T>;

impl<X, Y> Point<X, Y> {
    pub const fn new(x: X, y: Y) -> Self {
        Self { x, y }
    }

    /// Swaps the two coordinates (and their types): a vertical segment flips
    /// into a horizontal one.
    pub fn flip(self) -> Point<Y, X> {
        Point::new(self.y, self.x)
    }
}

impl<T: Scalar> Point2<T> {
    /// Maps into 45-degree rotated coordinates: `(x, y) -> (x - y, x + y)`.
    pub fn rotates(self) -> Self {
        Point::new(self.x - self.y, self.x + self.y)
    }

    /// Inverse of [`Point2::rotates`]: `(a, b) -> ((a + b) / 2, (b - a) / 2)`.
    ///
    /// Integer inputs of odd coordinate-sum parity truncate toward zero.
    pub fn inv_rotates(self) -> Self {
        Point::new((self.x + self.y) / T::two(), (self.y - self.x) / T::two())
    }
}

impl<T: Scalar> Point3<T> {
    pub fn xyz(x: T, y: T, z: T) -> Self {
        Point::new(Point::new(x, y), z)
    }
}

impl<X, Y, VX, VY> Add<Vector2<VX, VY>> for Point<X, Y>
where
    X: Add<VX>,
    Y: Add<VY>,
{
    type Output = Point<X::Output, Y::Output>;

    fn add(self, rhs: Vector2<VX, VY>) -> Self::Output {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<X, Y, VX, VY> Sub<Vector2<VX, VY>> for Point<X, Y>
where
    X: Sub<VX>,
    Y: Sub<VY>,
{
    type Output = Point<X::Output, Y::Output>;

    fn sub(self, rhs: Vector2<VX, VY>) -> Self::Output {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<X, Y, U, V> Sub<Point<U, V>> for Point<X, Y>
where
    X: Displace<U>,
    Y: Displace<V>,
{
    type Output = Vector2<X::Output, Y::Output>;

    fn sub(self, rhs: Point<U, V>) -> Self::Output {
        self.displace(&rhs)
    }
}

impl<X, Y, VX, VY> AddAssign<Vector2<VX, VY>> for Point<X, Y>
where
    X: AddAssign<VX>,
    Y: AddAssign<VY>,
{
    fn add_assign(&mut self, rhs: Vector2<VX, VY>) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl<X, Y, VX, VY> SubAssign<Vector2<VX, VY>> for Point<X, Y>
where
    X: SubAssign<VX>,
    Y: SubAssign<VY>,
{
    fn sub_assign(&mut self, rhs: Vector2<VX, VY>) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl<X, Y, U, V> Overlaps<Point<U, V>> for Point<X, Y>
where
    X: Overlaps<U>,
    Y: Overlaps<V>,
{
    fn overlaps(&self, other: &Point<U, V>) -> bool {
        self.x.overlaps(&other.x) && self.y.overlaps(&other.y)
    }
}

impl<X, Y, U, V> Contains<Point<U, V>> for Point<X, Y>
where
    X: Contains<U>,
    Y: Contains<V>,
{
    fn contains(&self, other: &Point<U, V>) -> bool {
        self.x.contains(&other.x) && self.y.contains(&other.y)
    }
}

impl<X, Y, U, V> Intersect<Point<U, V>> for Point<X, Y>
where
    X: Intersect<U>,
    Y: Intersect<V>,
{
    type Output = Point<X::Output, Y::Output>;

    fn intersect_with(&self, other: &Point<U, V>) -> Self::Output {
        Point::new(self.x.intersect_with(&other.x), self.y.intersect_with(&other.y))
    }
}

impl<X, Y, U, V> HullWith<Point<U, V>> for Point<X, Y>
where
    X: HullWith<U>,
    Y: HullWith<V>,
{
    type Output = Point<X::Output, Y::Output>;

    fn hull_with(&self, other: &Point<U, V>) -> Self::Output {
        Point::new(self.x.hull_with(&other.x), self.y.hull_with(&other.y))
    }
}

impl<X, Y, U, V, D> MinDist<Point<U, V>> for Point<X, Y>
where
    X: MinDist<U, Dist = D>,
    Y: MinDist<V, Dist = D>,
    D: Scalar,
{
    type Dist = D;

    fn min_dist_with(&self, other: &Point<U, V>) -> D {
        self.x.min_dist_with(&other.x) + self.y.min_dist_with(&other.y)
    }
}

impl<X, Y, U, V> NearestTo<Point<U, V>> for Point<X, Y>
where
    X: NearestTo<U>,
    Y: NearestTo<V>,
{
    type Output = Point<X::Output, Y::Output>;

    fn nearest_to(&self, other: &Point<U, V>) -> Self::Output {
        Point::new(self.x.nearest_to(&other.x), self.y.nearest_to(&other.y))
    }
}

impl<X, Y, U, V> Displace<Point<U, V>> for Point<X, Y>
where
    X: Displace<U>,
    Y: Displace<V>,
{
    type Output = Vector2<X::Output, Y::Output>;

    fn displace(&self, other: &Point<U, V>) -> Self::Output {
        Vector2::new(self.x.displace(&other.x), self.y.displace(&other.y))
    }
}
