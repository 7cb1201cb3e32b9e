//! Property tests over the geometric laws the crate is built on.

use proptest::prelude::*;

use trellis::cts::delay::LinearDelay;
use trellis::cts::{DmeBuilder, Sink};
use trellis::polygon::{
    create_test_rpolygon, point_in_polygon, rpolygon_cut_convex, staircase_to_chain, Polygon,
    RPolygon,
};
use trellis::steiner::{steiner_forest_grid, UnionFind};
use trellis::{
    analysis, Contains, Displace, HullWith, Interval, ManhattanArc, MinDist, Point, Vector2,
};

const C: i64 = 10_000;

proptest! {
    #[test]
    fn min_dist_is_symmetric_and_zero_on_self(
        x1 in -C..C, y1 in -C..C, x2 in -C..C, y2 in -C..C,
    ) {
        let p = Point::new(x1, y1);
        let q = Point::new(x2, y2);
        prop_assert_eq!(p.min_dist_with(&q), q.min_dist_with(&p));
        prop_assert_eq!(p.min_dist_with(&p), 0);
    }

    #[test]
    fn min_dist_satisfies_the_triangle_inequality(
        x1 in -C..C, y1 in -C..C, x2 in -C..C, y2 in -C..C, x3 in -C..C, y3 in -C..C,
    ) {
        let p = Point::new(x1, y1);
        let q = Point::new(x2, y2);
        let r = Point::new(x3, y3);
        prop_assert!(p.min_dist_with(&r) <= p.min_dist_with(&q) + q.min_dist_with(&r));
    }

    #[test]
    fn adding_then_subtracting_a_vector_is_identity(
        x in -C..C, y in -C..C, vx in -C..C, vy in -C..C,
    ) {
        let p = Point::new(x, y);
        let v = Vector2::new(vx, vy);
        prop_assert_eq!((p + v) - v, p);
    }

    #[test]
    fn displacement_is_antisymmetric(
        x1 in -C..C, y1 in -C..C, x2 in -C..C, y2 in -C..C,
    ) {
        let p = Point::new(x1, y1);
        let q = Point::new(x2, y2);
        prop_assert_eq!(p.displace(&q), -q.displace(&p));
    }

    #[test]
    fn hull_contains_both_points_and_commutes(
        x1 in -C..C, y1 in -C..C, x2 in -C..C, y2 in -C..C,
    ) {
        let p = Point::new(x1, y1);
        let q = Point::new(x2, y2);
        let h = p.hull_with(&q);
        prop_assert!(h.contains(&p));
        prop_assert!(h.contains(&q));
        prop_assert_eq!(h, q.hull_with(&p));
    }

    #[test]
    fn interval_laws(a in -C..C, b in -C..C, c in -C..C, d in -C..C, delta in 0i64..1000) {
        let i = Interval::new(a.min(b), a.max(b));
        let j = Interval::new(c.min(d), c.max(d));
        prop_assert!(i.lb() <= i.ub());
        let h = i.hull_with(&j);
        prop_assert!(h.contains(&i));
        prop_assert!(h.contains(&j));
        prop_assert!(i.enlarge_with(delta).contains(&i));
    }

    #[test]
    fn vector_scaling_round_trips(vx in -C..C, vy in -C..C, k in 1i64..100) {
        let v = Vector2::new(vx, vy);
        prop_assert_eq!(v * k / k, v);
    }

    #[test]
    fn flip_is_an_involution(x in -C..C, y in -C..C) {
        let p = Point::new(x, y);
        prop_assert_eq!(p.flip().flip(), p);
    }

    #[test]
    fn rotation_round_trips(x in -C..C, y in -C..C) {
        let p = Point::new(x, y);
        prop_assert_eq!(p.rotates().inv_rotates(), p);
    }

    #[test]
    fn arc_distance_equals_point_distance(
        x1 in -C..C, y1 in -C..C, x2 in -C..C, y2 in -C..C,
    ) {
        let p = Point::new(x1, y1);
        let q = Point::new(x2, y2);
        let a = ManhattanArc::from_point(&p);
        let b = ManhattanArc::from_point(&q);
        prop_assert_eq!(a.min_dist_with(&b), p.min_dist_with(&q));
    }

    #[test]
    fn merging_splits_the_distance_exactly(
        x1 in -C..C, y1 in -C..C, x2 in -C..C, y2 in -C..C, alpha_seed in 0i64..,
    ) {
        let a = ManhattanArc::from_point(&Point::new(x1, y1));
        let b = ManhattanArc::from_point(&Point::new(x2, y2));
        let d = a.min_dist_with(&b);
        let alpha = alpha_seed.rem_euclid(d + 1);
        let m = a.merge_with(&b, alpha);
        prop_assert!(!m.is_invalid());
        prop_assert_eq!(m.min_dist_with(&a), alpha);
        prop_assert_eq!(m.min_dist_with(&b), d - alpha);
    }

    #[test]
    fn signed_area_is_translation_invariant(
        coords in proptest::collection::vec((-C..C, -C..C), 3..10),
        tx in -C..C, ty in -C..C,
    ) {
        let pts: Vec<Point<i64, i64>> = coords.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let mut poly = Polygon::from_pointset(&pts).unwrap();
        let before = poly.signed_area_x2();
        poly.translate(Vector2::new(tx, ty));
        prop_assert_eq!(poly.signed_area_x2(), before);
    }

    #[test]
    fn reflection_flips_the_area_sign(
        coords in proptest::collection::vec((-C..C, -C..C), 3..10),
    ) {
        let pts: Vec<Point<i64, i64>> = coords.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let mirrored: Vec<Point<i64, i64>> =
            coords.iter().map(|&(x, y)| Point::new(-x, y)).collect();
        let a = Polygon::from_pointset(&pts).unwrap().signed_area_x2();
        let b = Polygon::from_pointset(&mirrored).unwrap().signed_area_x2();
        prop_assert_eq!(a, -b);
    }

    #[test]
    fn convex_decomposition_preserves_area(
        xs in Just((0..8i64).map(|i| i * 2).collect::<Vec<_>>()).prop_shuffle(),
        ys in Just((0..8i64).map(|i| i * 2).collect::<Vec<_>>()).prop_shuffle(),
    ) {
        let pts: Vec<Point<i64, i64>> = xs
            .iter()
            .zip(&ys)
            .map(|(&x, &y)| Point::new(x, y))
            .collect();
        let staircase = create_test_rpolygon(&pts).unwrap();
        let acw = RPolygon::from_pointset(&staircase).unwrap().is_anticlockwise();
        let chain = staircase_to_chain(&staircase);
        let original = Polygon::from_pointset(&chain).unwrap().signed_area_x2();
        let pieces = rpolygon_cut_convex(&chain, acw);
        let total: i64 = pieces
            .iter()
            .map(|p| Polygon::from_pointset(p).unwrap().signed_area_x2())
            .sum();
        prop_assert_eq!(total, original);
    }

    #[test]
    fn point_in_polygon_partitions_shared_edges(x in 0i64..3, y in 0i64..2) {
        // two rectangles sharing the edge x = 1; every lattice point of the
        // covered strip belongs to exactly one of them
        let left = [
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(1, 2),
            Point::new(0, 2),
        ];
        let right = [
            Point::new(1, 0),
            Point::new(3, 0),
            Point::new(3, 2),
            Point::new(1, 2),
        ];
        let q = Point::new(x, y);
        let count = point_in_polygon(&left, &q) as u32 + point_in_polygon(&right, &q) as u32;
        prop_assert_eq!(count, 1);
    }

    #[test]
    fn dme_skew_is_bounded_by_rounding(
        coords in proptest::collection::vec((0i64..200, 0i64..200), 2..9),
    ) {
        let sinks: Vec<Sink<Point<i64, i64>>> = coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Sink::new(format!("s{i}"), Point::new(x, y), 1.0))
            .collect();
        let tree = DmeBuilder::new(LinearDelay::default()).build(&sinks).unwrap();
        let report = analysis::skew(&tree);
        prop_assert!(report.skew >= 0.0);
        if !tree.needs_elongation() {
            // integer rounding can cost a couple of units per merge level
            let bound = 4.0 * (sinks.len() as f64);
            prop_assert!(report.skew <= bound, "skew {} over {}", report.skew, bound);
        }
        prop_assert_eq!(
            report.total_wirelength,
            tree.nodes().map(|n| n.wire_length).sum::<i64>()
        );
    }

    #[test]
    fn steiner_forest_connects_and_is_minimal(
        h in 2usize..5, w in 2usize..5,
        picks in proptest::collection::vec((0usize..25, 0usize..25), 1..4),
    ) {
        let pairs: Vec<_> = picks
            .iter()
            .map(|&(a, b)| ((a / w % h, a % w), (b / w % h, b % w)))
            .collect();
        let forest = steiner_forest_grid(h, w, &pairs).unwrap();

        // every pair connected in the union-closure of the forest
        let mut uf = UnionFind::new(h * w);
        for &(u, v, _) in &forest.edges {
            uf.union(u, v);
        }
        for &((sr, sc), (tr, tc)) in &pairs {
            prop_assert!(uf.connected(sr * w + sc, tr * w + tc));
        }

        // reverse-delete minimality: removing any edge breaks some pair
        for skip in 0..forest.edges.len() {
            let mut trial = UnionFind::new(h * w);
            for (j, &(u, v, _)) in forest.edges.iter().enumerate() {
                if j != skip {
                    trial.union(u, v);
                }
            }
            let intact = pairs.iter().all(|&((sr, sc), (tr, tc))| {
                trial.connected(sr * w + sc, tr * w + tc)
            });
            prop_assert!(!intact);
        }
    }
}
