//! Rectilinear polygons in staircase (compressed) form.
//!
//! A staircase chain stores only the independent corners: between consecutive
//! stored vertices `p0` and `p1` the polygon runs horizontally to
//! `(p1.x, p0.y)` and then vertically to `p1`. [`staircase_to_chain`] expands
//! the implied corners into the explicit axis-aligned vertex chain used by
//! the convex decomposition.

use itertools::Itertools;

use crate::error::Error;
use crate::geometry::ops::Scalar;
use crate::geometry::point::{Point, Point2};
use crate::geometry::vector::Vector2;
use crate::geometry::Displace;

use super::ring::Ring;
use super::polygon_is_monotone;

/// A rectilinear polygon: origin vertex plus displacements of the remaining
/// staircase corners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RPolygon<T: Scalar> {
    origin: Point2<T>,
    vecs: Vec<Vector2<T, T>>,
}

impl<T: Scalar> RPolygon<T> {
    pub fn from_pointset(pointset: &[Point2<T>]) -> Result<Self, Error> {
        if pointset.len() < 2 {
            return Err(Error::EmptyInput("rectilinear polygon needs at least 2 corners"));
        }
        let origin = pointset[0];
        let vecs = pointset[1..].iter().map(|v| v.displace(&origin)).collect();
        Ok(Self { origin, vecs })
    }

    pub fn origin(&self) -> Point2<T> {
        self.origin
    }

    pub fn vertices(&self) -> Vec<Point2<T>> {
        std::iter::once(self.origin)
            .chain(self.vecs.iter().map(|v| self.origin + *v))
            .collect()
    }

    pub fn translate(&mut self, rhs: Vector2<T, T>) {
        self.origin += rhs;
    }

    /// Exact signed area of the staircase polygon, positive for
    /// anticlockwise chains.
    pub fn signed_area(&self) -> T {
        let vs = &self.vecs;
        let Some(first) = vs.first() else {
            return T::zero();
        };
        let mut res = first.x * first.y;
        for (v0, v1) in vs.iter().tuple_windows() {
            res += v1.x * (v1.y - v0.y);
        }
        res
    }

    pub fn is_anticlockwise(&self) -> bool {
        self.signed_area() > T::zero()
    }
}

/// Builds a y-monotone staircase from an unordered point set; also reports
/// the handedness of the produced chain.
pub fn create_ymono_rpolygon<T: Scalar + Ord>(
    lst: &[Point2<T>],
) -> Result<(Vec<Point2<T>>, bool), Error> {
    if lst.len() < 2 {
        return Err(Error::EmptyInput("rectilinear polygon needs at least 2 corners"));
    }
    let dir = |p: &Point2<T>| (p.y, p.x);
    let botmost = *lst.iter().min_by_key(|p| dir(p)).unwrap();
    let topmost = *lst.iter().max_by_key(|p| dir(p)).unwrap();
    let anticlockwise = topmost.x >= botmost.x;
    let (mut side1, mut side2): (Vec<_>, Vec<_>) = if anticlockwise {
        lst.iter().copied().partition(|p| p.x >= botmost.x)
    } else {
        lst.iter().copied().partition(|p| p.x <= botmost.x)
    };
    side1.sort_by_key(|p| dir(p));
    side2.sort_by_key(|p| dir(p));
    side2.reverse();
    side1.extend(side2);
    Ok((side1, anticlockwise))
}

/// Builds an x-monotone staircase from an unordered point set; also reports
/// the handedness of the produced chain.
pub fn create_xmono_rpolygon<T: Scalar + Ord>(
    lst: &[Point2<T>],
) -> Result<(Vec<Point2<T>>, bool), Error> {
    if lst.len() < 2 {
        return Err(Error::EmptyInput("rectilinear polygon needs at least 2 corners"));
    }
    let leftmost = *lst.iter().min().unwrap();
    let rightmost = *lst.iter().max().unwrap();
    let anticlockwise = rightmost.y <= leftmost.y;
    let (mut side1, mut side2): (Vec<_>, Vec<_>) = if anticlockwise {
        lst.iter().copied().partition(|p| p.y <= leftmost.y)
    } else {
        lst.iter().copied().partition(|p| p.y >= leftmost.y)
    };
    side1.sort();
    side2.sort();
    side2.reverse();
    side1.extend(side2);
    Ok((side1, anticlockwise))
}

/// Builds a deterministic non-monotone (but simple) staircase from a point
/// set, by partitioning twice around the extreme chord.
pub fn create_test_rpolygon<T: Scalar + Ord>(lst: &[Point2<T>]) -> Result<Vec<Point2<T>>, Error> {
    if lst.len() < 2 {
        return Err(Error::EmptyInput("rectilinear polygon needs at least 2 corners"));
    }
    let dir = |p: &Point2<T>| (p.y, p.x);
    let max_pt = *lst.iter().max_by_key(|p| dir(p)).unwrap();
    let min_pt = *lst.iter().min_by_key(|p| dir(p)).unwrap();
    let chord = max_pt.displace(&min_pt);

    let (lst1, lst2): (Vec<_>, Vec<_>) = lst
        .iter()
        .copied()
        .partition(|pt| chord.cross(&pt.displace(&min_pt)) < T::zero());
    let max_pt1 = *lst1.iter().max().unwrap_or(&min_pt);
    let (lst3, lst4): (Vec<_>, Vec<_>) = lst1.into_iter().partition(|p| p.y < max_pt1.y);
    let min_pt2 = *lst2.iter().min().unwrap_or(&max_pt);
    let (lst5, lst6): (Vec<_>, Vec<_>) = lst2.into_iter().partition(|p| p.y > min_pt2.y);

    let sorted = |mut v: Vec<Point2<T>>, reverse: bool| {
        v.sort();
        if reverse {
            v.reverse();
        }
        v
    };
    let sorted_dir = |mut v: Vec<Point2<T>>, reverse: bool| {
        v.sort_by_key(|p| dir(p));
        if reverse {
            v.reverse();
        }
        v
    };

    let (mut a, b, c, d) = if chord.x < T::zero() {
        (
            sorted(lst6, true),
            sorted_dir(lst5, false),
            sorted(lst4, false),
            sorted_dir(lst3, true),
        )
    } else {
        (
            sorted(lst3, false),
            sorted_dir(lst4, false),
            sorted(lst5, true),
            sorted_dir(lst6, true),
        )
    };
    a.extend(b);
    a.extend(c);
    a.extend(d);
    Ok(a)
}

/// Horizontal-ray parity on the staircase, with the half-open convention of
/// [`super::point_in_polygon`]: boundary points belong to exactly one cell of
/// a partition.
pub fn point_in_rpolygon<T: Scalar>(pointset: &[Point2<T>], q: &Point2<T>) -> bool {
    let Some(&last) = pointset.last() else {
        return false;
    };
    let mut res = false;
    let mut p0 = last;
    for &p1 in pointset {
        if ((p1.y <= q.y && q.y < p0.y) || (p0.y <= q.y && q.y < p1.y)) && p1.x > q.x {
            res = !res;
        }
        p0 = p1;
    }
    res
}

pub fn rpolygon_is_xmonotone<T: Scalar + Ord>(lst: &[Point2<T>]) -> bool {
    polygon_is_monotone(lst, |p| (p.x, p.y))
}

pub fn rpolygon_is_ymonotone<T: Scalar + Ord>(lst: &[Point2<T>]) -> bool {
    polygon_is_monotone(lst, |p| (p.y, p.x))
}

/// Orthoconvexity: every axis line meets the polygon in one segment, which
/// for a staircase chain is x- and y-monotonicity together.
pub fn rpolygon_is_convex<T: Scalar + Ord>(lst: &[Point2<T>]) -> bool {
    rpolygon_is_xmonotone(lst) && rpolygon_is_ymonotone(lst)
}

/// Rectilinear convex hull by deletion: walks the cyclic corner list removing
/// every corner whose staircase turn is reflex or collinear with respect to
/// the chain's orientation, until a full pass removes nothing.
pub fn rpolygon_make_convex_hull<T: Scalar + Ord>(
    pointset: &[Point2<T>],
    anticlockwise: bool,
) -> Vec<Point2<T>> {
    let n = pointset.len();
    if n < 3 {
        return pointset.to_vec();
    }
    let mut ring = Ring::new(n);
    let mut remaining = n;
    let mut anchor = 0usize;

    loop {
        let mut changed = false;
        let mut v = anchor;
        let mut steps = remaining;
        while steps > 0 && remaining > 2 {
            let vp = ring.prev(v);
            let vn = ring.next(v);
            // turn at a stored corner: (dy in) * (dx out)
            let area_diff =
                (pointset[v].y - pointset[vp].y) * (pointset[vn].x - pointset[v].x);
            let reflex = if anticlockwise {
                area_diff >= T::zero()
            } else {
                area_diff <= T::zero()
            };
            if reflex {
                ring.detach(v);
                remaining -= 1;
                changed = true;
                if v == anchor {
                    anchor = vn;
                }
                v = vn;
            } else {
                v = vn;
            }
            steps -= 1;
        }
        if !changed || remaining <= 2 {
            break;
        }
    }

    ring.cycle_from(anchor).map(|i| pointset[i]).collect()
}

/// Expands a staircase into the explicit axis-aligned vertex chain, inserting
/// the implied corner `(next.x, prev.y)` wherever consecutive corners differ
/// in both coordinates.
pub fn staircase_to_chain<T: Scalar>(pointset: &[Point2<T>]) -> Vec<Point2<T>> {
    let n = pointset.len();
    let mut chain = Vec::with_capacity(2 * n);
    for i in 0..n {
        let p0 = pointset[i];
        let p1 = pointset[(i + 1) % n];
        chain.push(p0);
        if p0.x != p1.x && p0.y != p1.y {
            chain.push(Point::new(p1.x, p0.y));
        }
    }
    chain
}
