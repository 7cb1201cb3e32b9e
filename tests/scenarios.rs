//! End-to-end scenarios pinning exact expected values across the crate.

use approx::assert_ulps_eq;

use trellis::cts::delay::LinearDelay;
use trellis::cts::{DmeBuilder, Sink};
use trellis::polygon::{point_in_polygon, rpolygon_cut_convex, Polygon};
use trellis::steiner::steiner_forest_grid;
use trellis::{analysis, Intersect, Interval, ManhattanArc, ManhattanArc3D, MinDist, Point, Point3};

#[test]
fn interval_algebra() {
    assert_eq!(
        Interval::new(4, 8).intersect_with(&Interval::new(5, 6)),
        Interval::new(5, 6)
    );
    assert_eq!(Interval::new(3, 5).min_dist_with(&Interval::new(7, 8)), 2);
    assert_eq!(Interval::new(3, 5).enlarge_with(2), Interval::new(1, 7));
}

#[test]
fn merging_two_rotated_points() {
    let a = ManhattanArc::from_rotated(1, 1);
    let b = ManhattanArc::from_rotated(3, 3);
    assert_eq!(
        a.merge_with(&b, 2),
        ManhattanArc::new(Interval::new(3, 3), Interval::new(3, 3))
    );
}

#[test]
fn planar_l1_distance_through_arcs() {
    let p = Point::new(-8, 2);
    let q = Point::new(3, 4);
    assert_eq!(p.min_dist_with(&q), 13);
    let a = ManhattanArc::from_point(&p);
    let b = ManhattanArc::from_point(&q);
    assert_eq!(a.min_dist_with(&b), 13);
}

#[test]
fn three_dimensional_l1_distance_through_arc_triples() {
    let p = Point3::xyz(8, 3, -2);
    let q = Point3::xyz(-3, 7, 4);
    assert_eq!(p.min_dist_with(&q), 21);
    let a = ManhattanArc3D::from_point(&p);
    let b = ManhattanArc3D::from_point(&q);
    assert_eq!(a.min_dist_with(&b), 21);
}

#[test]
fn dme_balances_two_sinks_around_the_source() {
    let sinks = vec![
        Sink::new("s1", Point::new(0, 0), 1.0),
        Sink::new("s2", Point::new(10, 0), 1.0),
    ];
    let builder = DmeBuilder::with_source(LinearDelay::default(), Point::new(5, 0));
    let tree = builder.build(&sinks).unwrap();

    assert_eq!(tree.root().position, Point::new(5, 0));
    let report = analysis::skew(&tree);
    assert_ulps_eq!(report.skew, 0.0);
    assert_eq!(report.total_wirelength, 10);
    for sink in tree.sinks() {
        assert_eq!(sink.wire_length, 5);
    }
}

#[test]
fn steiner_forest_on_the_smallest_grid() {
    let forest = steiner_forest_grid(2, 2, &[((0, 0), (1, 1))]).unwrap();
    let mut edges = forest.edges.clone();
    edges.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
    assert_eq!(edges, vec![(0, 1, 1.0), (1, 3, 1.0)]);
    assert_ulps_eq!(forest.total_cost, 2.0);
    assert!(forest.sources.contains(&0));
    assert!(forest.terminals.contains(&3));
    assert!(forest.steiner_nodes.contains(&1));
}

#[test]
fn l_shape_decomposes_into_two_rectangles() {
    let l: Vec<Point<i64, i64>> = [(0, 0), (2, 0), (2, 1), (1, 1), (1, 2), (0, 2)]
        .iter()
        .map(|&(x, y)| Point::new(x, y))
        .collect();
    let pieces = rpolygon_cut_convex(&l, true);
    assert_eq!(pieces.len(), 2);
    let total: i64 = pieces
        .iter()
        .map(|p| Polygon::from_pointset(p).unwrap().signed_area_x2())
        .sum();
    assert_eq!(total, 2 * 3);
}

#[test]
fn point_location_in_the_reference_chain() {
    let chain: Vec<Point<i64, i64>> = [
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
    ]
    .iter()
    .map(|&(x, y)| Point::new(x, y))
    .collect();
    assert!(point_in_polygon(&chain, &Point::new(0, 1)));
    assert!(!point_in_polygon(&chain, &Point::new(10, 10)));
}
