//! A rectilinear (Manhattan, L1) computational-geometry library for physical
//! design, built around one primitive: the merging segment.
//!
//! # Crate layout
//!
//! The [`geometry`] module holds the algebra of points, vectors, intervals,
//! and the 45-degree rotated [`ManhattanArc`] (with a coupled-projection 3D
//! variant). Every pairwise operation — overlap, containment, intersection,
//! hull, minimum distance, nearest point, displacement — dispatches through
//! small `std::ops`-style traits, so scalars, intervals, and nested points
//! compose freely: a rectangle is a `Point` of intervals, a 3D point a
//! `Point` of points.
//!
//! On top of it:
//!
//! - [`cts`] builds zero-skew clock trees with Deferred Merge Embedding and a
//!   pluggable delay model (linear or Elmore);
//! - [`router`] grows routing trees toward terminals, optionally splicing
//!   Steiner points and detouring around rectangular keep-outs;
//! - [`steiner`] solves the Steiner-forest problem on a grid with the
//!   primal-dual moat-growing scheme plus reverse delete;
//! - [`polygon`] offers rectilinear polygon construction, hulls, point
//!   location, and recursive convex decomposition;
//! - [`analysis`] reports skew and structural statistics of built trees.
//!
//! # Examples
//!
//! A zero-skew clock tree over two sinks, tapped from a source in between:
//!
//! ```rust
//! use trellis::cts::delay::LinearDelay;
//! use trellis::cts::{DmeBuilder, Sink};
//! use trellis::{analysis, Point};
//!
//! let sinks = vec![
//!     Sink::new("s1", Point::new(0, 0), 1.0),
//!     Sink::new("s2", Point::new(10, 0), 1.0),
//! ];
//! let builder = DmeBuilder::with_source(LinearDelay::default(), Point::new(5, 0));
//! let tree = builder.build(&sinks).unwrap();
//!
//! assert_eq!(tree.root().position, Point::new(5, 0));
//! assert_eq!(tree.total_wirelength(), 10);
//! assert_eq!(analysis::skew(&tree).skew, 0.0);
//! ```
//!
//! A Steiner forest connecting one pair across a 2x2 grid:
//!
//! ```rust
//! use trellis::steiner::steiner_forest_grid;
//!
//! let forest = steiner_forest_grid(2, 2, &[((0, 0), (1, 1))]).unwrap();
//! assert_eq!(forest.total_cost, 2.0);
//! assert_eq!(forest.steiner_nodes.iter().copied().collect::<Vec<_>>(), vec![1]);
//! ```
//!
//! Wirelength-driven global routing:
//!
//! ```rust
//! use trellis::router::GlobalRouter;
//! use trellis::Point;
//!
//! let mut router =
//!     GlobalRouter::new(Point::new(0, 0), vec![Point::new(1, 1), Point::new(2, 2)]).unwrap();
//! router.route_with_steiners();
//! assert_eq!(router.tree.calculate_wirelength(), 4);
//! ```

pub mod analysis;
pub mod cts;
pub mod error;
pub mod geometry;
pub mod polygon;
pub mod router;
pub mod steiner;

pub use error::Error;
pub use geometry::{
    Contains, Cuboid, Displace, HSegment, HullWith, Intersect, Interval, ManhattanArc,
    ManhattanArc3D, MinDist, NearestTo, Overlaps, Point, Point2, Point3, Rect, Scalar, VSegment,
    Vector2,
};
