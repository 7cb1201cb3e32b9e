//! General polygons: origin plus displacement vectors, monotone
//! reconstruction from point sets, convex hulls, and point location.
//!
//! The monotone builders reconstruct a simple polygon from an *unordered*
//! point set by partitioning around the chord between the two extreme points
//! in the chosen direction and sorting each side along it. Point location
//! uses horizontal-ray parity with a half-open edge convention, so for a
//! partition of the plane into polygons every query point lies in exactly
//! one of them.

pub mod cut;
pub mod ring;
pub mod rpolygon;

use crate::error::Error;
use crate::geometry::ops::Scalar;
use crate::geometry::point::{Point, Point2};
use crate::geometry::vector::Vector2;
use crate::geometry::Displace;

use ring::Ring;

pub use cut::rpolygon_cut_convex;
pub use rpolygon::{
    create_test_rpolygon, create_xmono_rpolygon, create_ymono_rpolygon, point_in_rpolygon,
    rpolygon_is_convex, rpolygon_is_xmonotone, rpolygon_is_ymonotone, rpolygon_make_convex_hull,
    staircase_to_chain, RPolygon,
};

/// A polygon stored as an origin vertex plus the displacement of every other
/// vertex from that origin. Translation touches only the origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polygon<T: Scalar> {
    origin: Point2<T>,
    vecs: Vec<Vector2<T, T>>,
}

impl<T: Scalar> Polygon<T> {
    /// Builds a polygon from an ordered vertex chain.
    pub fn from_pointset(pointset: &[Point2<T>]) -> Result<Self, Error> {
        if pointset.len() < 3 {
            return Err(Error::EmptyInput("polygon needs at least 3 points"));
        }
        let origin = pointset[0];
        let vecs = pointset[1..].iter().map(|v| v.displace(&origin)).collect();
        Ok(Self { origin, vecs })
    }

    pub fn origin(&self) -> Point2<T> {
        self.origin
    }

    /// The vertex chain in original coordinates.
    pub fn vertices(&self) -> Vec<Point2<T>> {
        std::iter::once(self.origin)
            .chain(self.vecs.iter().map(|v| self.origin + *v))
            .collect()
    }

    /// Moves the polygon by `rhs`.
    pub fn translate(&mut self, rhs: Vector2<T, T>) {
        self.origin += rhs;
    }

    /// Twice the signed area (exact for integer coordinates), positive for
    /// anticlockwise chains. Translation-invariant; reflection flips the
    /// sign. Uses a running two-vertex window over the shoelace identity.
    pub fn signed_area_x2(&self) -> T {
        let vs = &self.vecs;
        if vs.len() < 2 {
            return T::zero();
        }
        let n = vs.len();
        let mut res = vs[0].x * vs[1].y - vs[n - 1].x * vs[n - 2].y;
        let mut v0 = vs[0];
        let mut v1 = vs[1];
        for &v2 in &vs[2..] {
            res += v1.x * (v2.y - v0.y);
            v0 = v1;
            v1 = v2;
        }
        res
    }

    /// `true` iff every edge is axis-aligned.
    pub fn is_rectilinear(&self) -> bool {
        let mut chain = Vec::with_capacity(self.vecs.len() + 1);
        chain.push(Vector2::new(T::zero(), T::zero()));
        chain.extend(self.vecs.iter().copied());
        let n = chain.len();
        (0..n).all(|i| {
            let a = chain[i];
            let b = chain[(i + 1) % n];
            a.x == b.x || a.y == b.y
        })
    }

    /// Orientation, decided at the lexicographically minimal vertex.
    pub fn is_anticlockwise(&self) -> Result<bool, Error>
    where
        T: Ord,
    {
        let verts = self.vertices();
        Ok(polygon_is_anticlockwise_info(&verts)?.0)
    }

    /// `true` iff all turns share the orientation's sign (collinear turns
    /// allowed).
    pub fn is_convex(&self) -> Result<bool, Error>
    where
        T: Ord,
    {
        if self.vecs.len() < 3 {
            return Ok(true);
        }
        let anticlockwise = self.is_anticlockwise()?;
        let verts = self.vertices();
        let n = verts.len();
        Ok((0..n).all(|i| {
            let p = verts[(i + n - 1) % n];
            let c = verts[i];
            let q = verts[(i + 1) % n];
            let cross = c.displace(&p).cross(&q.displace(&c));
            if anticlockwise {
                cross >= T::zero()
            } else {
                cross <= T::zero()
            }
        }))
    }
}

fn sorted_by_key<P, K, F>(mut items: Vec<P>, key: F, reverse: bool) -> Vec<P>
where
    K: Ord,
    F: Fn(&P) -> K,
{
    items.sort_by_key(|p| key(p));
    if reverse {
        items.reverse();
    }
    items
}

/// Reconstructs a monotone polygon from an unordered point set, `dir` giving
/// the (primary, secondary) sort coordinates.
pub fn create_mono_polygon<T, F>(lst: &[Point2<T>], dir: F) -> Result<Vec<Point2<T>>, Error>
where
    T: Scalar + Ord,
    F: Fn(&Point2<T>) -> (T, T),
{
    if lst.len() < 3 {
        return Err(Error::EmptyInput("polygon needs at least 3 points"));
    }
    let max_pt = *lst.iter().max_by_key(|p| dir(p)).unwrap();
    let min_pt = *lst.iter().min_by_key(|p| dir(p)).unwrap();
    let chord = max_pt.displace(&min_pt);
    let (below, above): (Vec<_>, Vec<_>) = lst
        .iter()
        .copied()
        .partition(|pt| chord.cross(&pt.displace(&min_pt)) <= T::zero());
    let mut chain = sorted_by_key(below, |p| dir(p), false);
    chain.extend(sorted_by_key(above, |p| dir(p), true));
    Ok(chain)
}

/// Monotone reconstruction along y.
pub fn create_ymono_polygon<T: Scalar + Ord>(lst: &[Point2<T>]) -> Result<Vec<Point2<T>>, Error> {
    create_mono_polygon(lst, |p| (p.y, p.x))
}

/// Monotone reconstruction along x.
pub fn create_xmono_polygon<T: Scalar + Ord>(lst: &[Point2<T>]) -> Result<Vec<Point2<T>>, Error> {
    create_mono_polygon(lst, |p| (p.x, p.y))
}

/// Builds a deterministic, simple, non-monotone chain from a point set by a
/// second partition around a secondary axis; used to produce awkward but
/// valid polygons for stress inputs.
pub fn create_test_polygon<T: Scalar + Ord>(lst: &[Point2<T>]) -> Result<Vec<Point2<T>>, Error> {
    if lst.len() < 3 {
        return Err(Error::EmptyInput("polygon needs at least 3 points"));
    }
    let dir1 = |p: &Point2<T>| (p.y, p.x);
    let upmost = *lst.iter().max_by_key(|p| dir1(p)).unwrap();
    let dnmost = *lst.iter().min_by_key(|p| dir1(p)).unwrap();
    let chord = upmost.displace(&dnmost);

    let (lst1, lst2): (Vec<_>, Vec<_>) = lst
        .iter()
        .copied()
        .partition(|pt| chord.cross(&pt.displace(&dnmost)) < T::zero());
    let rightmost = *lst1.iter().max().unwrap_or(&dnmost);
    let (lst3, lst4): (Vec<_>, Vec<_>) = lst1.into_iter().partition(|a| a.y < rightmost.y);
    let leftmost = *lst2.iter().min().unwrap_or(&upmost);
    let (lst5, lst6): (Vec<_>, Vec<_>) = lst2.into_iter().partition(|a| a.y > leftmost.y);

    let (mut a, b, c, d) = if chord.x < T::zero() {
        (
            sorted_by_key(lst6, |p| *p, true),
            sorted_by_key(lst5, |p| dir1(p), false),
            sorted_by_key(lst4, |p| *p, false),
            sorted_by_key(lst3, |p| dir1(p), true),
        )
    } else {
        (
            sorted_by_key(lst3, |p| *p, false),
            sorted_by_key(lst4, |p| dir1(p), false),
            sorted_by_key(lst5, |p| *p, true),
            sorted_by_key(lst6, |p| dir1(p), true),
        )
    };
    a.extend(b);
    a.extend(c);
    a.extend(d);
    Ok(a)
}

/// Checks monotonicity of a closed chain along the primary coordinate of
/// `dir`: non-decreasing from the minimum round to the maximum, then
/// non-increasing back.
pub fn polygon_is_monotone<T, F>(lst: &[Point2<T>], dir: F) -> bool
where
    T: Scalar + Ord,
    F: Fn(&Point2<T>) -> (T, T),
{
    if lst.len() <= 3 {
        return true;
    }
    let n = lst.len();
    let min_index = (0..n).min_by_key(|&i| dir(&lst[i])).unwrap();
    let max_index = (0..n).max_by_key(|&i| dir(&lst[i])).unwrap();

    let violates = |start: usize, stop: usize, descending: bool| {
        let mut i = start;
        while i != stop {
            let j = (i + 1) % n;
            let a = dir(&lst[i]).0;
            let b = dir(&lst[j]).0;
            if (descending && a < b) || (!descending && a > b) {
                return true;
            }
            i = j;
        }
        false
    };

    !violates(min_index, max_index, false) && !violates(max_index, min_index, true)
}

pub fn polygon_is_xmonotone<T: Scalar + Ord>(lst: &[Point2<T>]) -> bool {
    polygon_is_monotone(lst, |p| (p.x, p.y))
}

pub fn polygon_is_ymonotone<T: Scalar + Ord>(lst: &[Point2<T>]) -> bool {
    polygon_is_monotone(lst, |p| (p.y, p.x))
}

/// Horizontal-ray parity point location.
///
/// Strictly interior points test `true`, strictly exterior `false`; the
/// boundary behaviour follows the half-open edge convention
/// `[min(y0, y1), max(y0, y1))`, so each shared-edge point belongs to exactly
/// one polygon of a partition.
pub fn point_in_polygon<T: Scalar>(pointset: &[Point2<T>], q: &Point2<T>) -> bool {
    let Some(&last) = pointset.last() else {
        return false;
    };
    let mut res = false;
    let mut p0 = last;
    for &p1 in pointset {
        if (p1.y <= q.y && q.y < p0.y) || (p0.y <= q.y && q.y < p1.y) {
            let det = q.displace(&p0).cross(&p1.displace(&p0));
            if (p1.y > p0.y && det < T::zero()) || (p1.y < p0.y && det > T::zero()) {
                res = !res;
            }
        }
        p0 = p1;
    }
    res
}

/// Orientation at the lexicographically minimal vertex, plus that vertex's
/// index.
pub fn polygon_is_anticlockwise_info<T: Scalar + Ord>(
    pointset: &[Point2<T>],
) -> Result<(bool, usize), Error> {
    let n = pointset.len();
    if n < 3 {
        return Err(Error::EmptyInput("polygon needs at least 3 points"));
    }
    let min_index = (0..n).min_by_key(|&i| (pointset[i].x, pointset[i].y)).unwrap();
    let prev = pointset[(min_index + n - 1) % n];
    let cur = pointset[min_index];
    let next = pointset[(min_index + 1) % n];
    let cross = cur.displace(&prev).cross(&next.displace(&cur));
    Ok((cross > T::zero(), min_index))
}

pub fn polygon_is_anticlockwise<T: Scalar + Ord>(pointset: &[Point2<T>]) -> Result<bool, Error> {
    Ok(polygon_is_anticlockwise_info(pointset)?.0)
}

/// Convex hull by reflex deletion: walk the cyclic vertex list removing each
/// vertex whose turn is reflex or collinear until only convex turns remain.
pub fn polygon_make_convex_hull<T: Scalar + Ord>(
    pointset: &[Point2<T>],
) -> Result<Vec<Point2<T>>, Error> {
    let n = pointset.len();
    if n < 3 {
        return Err(Error::EmptyInput("convex hull needs at least 3 points"));
    }
    if n == 3 {
        return Ok(pointset.to_vec());
    }
    let max_index = (0..n).max_by_key(|&i| (pointset[i].x, pointset[i].y)).unwrap();
    let (anticlockwise, min_index) = polygon_is_anticlockwise_info(pointset)?;

    let mut ring = Ring::new(n);
    let process = |ring: &mut Ring, v_start: usize, v_stop: usize| {
        let mut v = ring.next(v_start);
        while v != v_stop {
            let vn = ring.next(v);
            let vp = ring.prev(v);
            let vec1 = pointset[v].displace(&pointset[vp]);
            let vec2 = pointset[vn].displace(&pointset[v]);
            let cross = vec1.cross(&vec2);
            let reflex = if anticlockwise {
                cross <= T::zero()
            } else {
                cross >= T::zero()
            };
            if reflex {
                ring.detach(v);
                v = vp;
            } else {
                v = vn;
            }
        }
    };
    process(&mut ring, min_index, max_index);
    process(&mut ring, max_index, min_index);

    Ok(ring.cycle_from(min_index).map(|i| pointset[i]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_CHAIN: [(i64, i64); 14] = [
        (0, -4),
        (0, -1),
        (3, -3),
        (5, 1),
        (2, 2),
        (3, 3),
        (1, 4),
        (-2, 4),
        (-2, 2),
        (-4, 3),
        (-5, 1),
        (-6, -2),
        (-3, -3),
        (-3, -4),
    ];

    fn chain() -> Vec<Point2<i64>> {
        TEST_CHAIN.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn signed_area_of_the_test_chain() {
        let p = Polygon::from_pointset(&chain()).unwrap();
        assert_eq!(p.signed_area_x2(), 110);
    }

    #[test]
    fn signed_area_is_translation_invariant() {
        let mut p = Polygon::from_pointset(&chain()).unwrap();
        let before = p.signed_area_x2();
        p.translate(Vector2::new(17, -5));
        assert_eq!(p.signed_area_x2(), before);
        assert_eq!(p.origin(), Point::new(17, -9));
    }

    #[test]
    fn reflection_flips_the_area_sign() {
        let pts = chain();
        let mirrored: Vec<_> = pts.iter().map(|p| Point::new(-p.x, p.y)).collect();
        let a = Polygon::from_pointset(&pts).unwrap().signed_area_x2();
        let b = Polygon::from_pointset(&mirrored).unwrap().signed_area_x2();
        assert_eq!(a, -b);
    }

    #[test]
    fn rectilinear_detection() {
        let sq = [(0, 0), (0, 1), (1, 1), (1, 0)].map(|(x, y)| Point::new(x, y));
        assert!(Polygon::from_pointset(&sq).unwrap().is_rectilinear());
        assert!(!Polygon::from_pointset(&chain()).unwrap().is_rectilinear());
    }

    #[test]
    fn orientation_and_convexity_of_a_square() {
        let sq = [(0, 0), (1, 0), (1, 1), (0, 1)].map(|(x, y)| Point::new(x, y));
        let p = Polygon::from_pointset(&sq).unwrap();
        assert!(p.is_anticlockwise().unwrap());
        assert!(p.is_convex().unwrap());
        assert!(!Polygon::from_pointset(&chain()).unwrap().is_convex().unwrap());
    }

    #[test]
    fn test_polygon_reconstruction_is_deterministic() {
        let scrambled = [
            (-2, 2),
            (0, -1),
            (-5, 1),
            (-2, 4),
            (0, -4),
            (-4, 3),
            (-6, -2),
            (5, 1),
            (2, 2),
            (3, -3),
            (-3, -3),
            (3, 3),
            (-3, -4),
            (1, 4),
        ]
        .map(|(x, y)| Point::new(x, y));
        let built = create_test_polygon(&scrambled).unwrap();
        assert_eq!(built, chain());
    }

    #[test]
    fn monotone_builders() {
        let pts = chain();
        let ymono = create_ymono_polygon(&pts).unwrap();
        assert!(polygon_is_ymonotone(&ymono));
        let xmono = create_xmono_polygon(&pts).unwrap();
        assert!(polygon_is_xmonotone(&xmono));
        // the test chain itself is neither
        assert!(!polygon_is_xmonotone(&pts));
    }

    #[test]
    fn monotone_check_on_simple_chains() {
        let sq = [(0, 0), (1, 0), (1, 1), (0, 1)].map(|(x, y)| Point::new(x, y));
        assert!(polygon_is_xmonotone(&sq));
        assert!(polygon_is_ymonotone(&sq));
        let zig = [(0, 0), (1, 1), (0, 1), (1, 0)].map(|(x, y)| Point::new(x, y));
        assert!(!polygon_is_xmonotone(&zig));
    }

    #[test]
    fn point_location() {
        let pts = chain();
        assert!(point_in_polygon(&pts, &Point::new(0, 1)));
        assert!(point_in_polygon(&pts, &Point::new(0, 0)));
        assert!(!point_in_polygon(&pts, &Point::new(10, 10)));
    }

    #[test]
    fn shared_edge_points_belong_to_exactly_one_cell() {
        // two unit squares sharing the edge x = 1
        let left = [(0, 0), (1, 0), (1, 1), (0, 1)].map(|(x, y)| Point::new(x, y));
        let right = [(1, 0), (2, 0), (2, 1), (1, 1)].map(|(x, y)| Point::new(x, y));
        for y in 0..2 {
            let q = Point::new(1, y);
            let inl = point_in_polygon(&left, &q);
            let inr = point_in_polygon(&right, &q);
            assert!(inl != inr, "boundary point {:?} in {} cells", q, inl as u8 + inr as u8);
        }
    }

    #[test]
    fn convex_hull_by_deletion() {
        let pts = [(0, 0), (2, 0), (2, 2), (0, 2), (1, 1)].map(|(x, y)| Point::new(x, y));
        let hull = polygon_make_convex_hull(&pts).unwrap();
        assert_eq!(hull.len(), 4);
        assert!(Polygon::from_pointset(&hull).unwrap().is_convex().unwrap());

        let hull2 = polygon_make_convex_hull(&chain()).unwrap();
        assert!(Polygon::from_pointset(&hull2).unwrap().is_convex().unwrap());
        let inner = Polygon::from_pointset(&chain()).unwrap().signed_area_x2();
        let outer = Polygon::from_pointset(&hull2).unwrap().signed_area_x2();
        assert!(outer >= inner);
    }

    #[test]
    fn degenerate_inputs_error() {
        let two = [Point::new(0, 0), Point::new(1, 1)];
        assert!(matches!(
            Polygon::from_pointset(&two),
            Err(Error::EmptyInput(_))
        ));
        assert!(matches!(
            create_xmono_polygon(&two),
            Err(Error::EmptyInput(_))
        ));
    }
}
