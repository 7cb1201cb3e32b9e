//! Recursive convex decomposition of rectilinear polygons.
//!
//! The input is an explicit rectilinear vertex chain (each edge axis-aligned)
//! plus its orientation. One step: find a reflex vertex — a turn whose sign
//! disagrees with the orientation — cast the two inward axial rays obtained
//! by extending its incident edges, cut along the shorter first hit, and
//! continue on both sub-chains. Splicing goes through the arena [`Ring`], so
//! each cut is O(1) pointer surgery; the work list is an explicit stack
//! rather than recursion. With `r` reflex vertices the decomposition makes at
//! most `r` cuts, and the signed areas of the pieces sum to the input's.

use tracing::trace;

use crate::geometry::ops::Scalar;
use crate::geometry::point::{Point, Point2};
use crate::geometry::Displace;

use super::ring::Ring;

/// Cuts a rectilinear polygon into rectilinear convex pieces.
pub fn rpolygon_cut_convex<T: Scalar + Ord>(
    chain: &[Point2<T>],
    anticlockwise: bool,
) -> Vec<Vec<Point2<T>>> {
    if chain.len() < 3 {
        return if chain.is_empty() {
            Vec::new()
        } else {
            vec![chain.to_vec()]
        };
    }

    let mut pts: Vec<Point2<T>> = chain.to_vec();
    let mut ring = Ring::new(pts.len());
    let mut pieces = Vec::new();
    let mut stack = vec![0usize];
    // one cut per reflex vertex suffices; the budget keeps degenerate
    // (non-simple) input from cutting forever
    let mut budget = pts.len();

    while let Some(start) = stack.pop() {
        let reflex = if budget == 0 {
            None
        } else {
            find_reflex(&pts, &ring, start, anticlockwise)
        };
        match reflex.and_then(|v| cut_at(&mut pts, &mut ring, v)) {
            None => pieces.push(ring.cycle_from(start).map(|i| pts[i]).collect()),
            Some((piece_start, other_start)) => {
                budget -= 1;
                stack.push(piece_start);
                stack.push(other_start);
            }
        }
    }
    pieces
}

/// First vertex on the cycle whose turn disagrees with the orientation.
fn find_reflex<T: Scalar>(
    pts: &[Point2<T>],
    ring: &Ring,
    start: usize,
    anticlockwise: bool,
) -> Option<usize> {
    for v in ring.cycle_from(start) {
        let vp = ring.prev(v);
        let vn = ring.next(v);
        let d_in = pts[v].displace(&pts[vp]);
        let d_out = pts[vn].displace(&pts[v]);
        let cross = d_in.cross(&d_out);
        let reflex = if anticlockwise {
            cross < T::zero()
        } else {
            cross > T::zero()
        };
        if reflex {
            return Some(v);
        }
    }
    None
}

/// Axis unit direction of the edge `from -> to`; zero-length edges give
/// `(0, 0)`.
fn edge_dir<T: Scalar>(from: &Point2<T>, to: &Point2<T>) -> (T, T) {
    let sign = |d: T| {
        if d > T::zero() {
            T::one()
        } else if d < T::zero() {
            -T::one()
        } else {
            T::zero()
        }
    };
    (sign(to.x - from.x), sign(to.y - from.y))
}

/// First boundary hit of the axial ray from `pts[v]` in direction `dir`,
/// skipping the edges incident to `v`. Returns `(edge start, distance, hit)`.
fn ray_hit<T: Scalar>(
    pts: &[Point2<T>],
    ring: &Ring,
    v: usize,
    dir: (T, T),
) -> Option<(usize, T, Point2<T>)> {
    let origin = pts[v];
    let mut best: Option<(usize, T, Point2<T>)> = None;
    for u in ring.cycle_from(v) {
        let w = ring.next(u);
        if u == v || w == v {
            continue;
        }
        let (pu, pw) = (pts[u], pts[w]);
        if pu == pw {
            continue;
        }
        let candidate = if dir.1 == T::zero() {
            // horizontal ray against vertical edges
            if pu.x != pw.x {
                continue;
            }
            let span_lo = if pu.y < pw.y { pu.y } else { pw.y };
            let span_hi = if pu.y < pw.y { pw.y } else { pu.y };
            if !(span_lo <= origin.y && origin.y <= span_hi) {
                continue;
            }
            let delta = pu.x - origin.x;
            if delta * dir.0 <= T::zero() {
                continue;
            }
            (u, delta.abs(), Point::new(pu.x, origin.y))
        } else {
            // vertical ray against horizontal edges
            if pu.y != pw.y {
                continue;
            }
            let span_lo = if pu.x < pw.x { pu.x } else { pw.x };
            let span_hi = if pu.x < pw.x { pw.x } else { pu.x };
            if !(span_lo <= origin.x && origin.x <= span_hi) {
                continue;
            }
            let delta = pu.y - origin.y;
            if delta * dir.1 <= T::zero() {
                continue;
            }
            (u, delta.abs(), Point::new(origin.x, pu.y))
        };
        match &best {
            Some((_, d, _)) if *d <= candidate.1 => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Cuts the cycle at reflex vertex `v` along the shorter inward ray, splicing
/// in the hit point and a duplicate of `v`. Returns a start node inside each
/// of the two resulting cycles, or `None` when no ray hits (non-simple
/// input).
fn cut_at<T: Scalar + Ord>(
    pts: &mut Vec<Point2<T>>,
    ring: &mut Ring,
    v: usize,
) -> Option<(usize, usize)> {
    let a = ring.prev(v);
    let b = ring.next(v);
    let pv = pts[v];
    let d_in = edge_dir(&pts[a], &pv);
    let d_out = edge_dir(&pv, &pts[b]);

    let hit1 = ray_hit(pts, ring, v, d_in);
    let hit2 = ray_hit(pts, ring, v, (-d_out.0, -d_out.1));
    let (u, _, m) = match (hit1, hit2) {
        (Some(h1), Some(h2)) => {
            if h1.1 <= h2.1 {
                h1
            } else {
                h2
            }
        }
        (Some(h1), None) => h1,
        (None, Some(h2)) => h2,
        // a simple polygon always offers a hit
        (None, None) => return None,
    };
    trace!(?pv, ?m, "cutting reflex vertex");

    let w = ring.next(u);
    // piece 1 keeps v .. u and closes through the hit point
    let m1 = ring.push();
    pts.push(m);
    // piece 2 keeps w .. a and closes through copies of the hit point and v
    let v2 = ring.push();
    pts.push(pv);
    let m2 = ring.push();
    pts.push(m);

    ring.link(u, m1);
    ring.link(m1, v);
    ring.link(a, v2);
    ring.link(v2, m2);
    ring.link(m2, w);

    Some((v, m2))
}
