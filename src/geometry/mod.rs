//! The rectilinear geometry algebra: points, vectors, intervals, and the
//! 45-degree rotated merging segments built from them.

pub mod arc;
pub mod arc3d;
pub mod interval;
pub mod ops;
pub mod point;
pub mod recti;
pub mod vector;

pub use arc::ManhattanArc;
pub use arc3d::ManhattanArc3D;
pub use interval::Interval;
pub use ops::{Contains, Displace, HullWith, Intersect, MinDist, NearestTo, Overlaps, Scalar};
pub use point::{Point, Point2, Point3};
pub use recti::{Cuboid, HSegment, Rect, VSegment};
pub use vector::Vector2;
