//! Deferred Merge Embedding (DME) clock-tree synthesis.
//!
//! The builder runs the classic two-phase construction over merging
//! segments:
//!
//! 1. a balanced merge tree is formed by recursive bipartition, sorting the
//!    active set along alternating axes;
//! 2. bottom-up, every internal node gets a merging segment — the locus of
//!    tapping points that balance its children's delays — via
//!    [`ManhattanArc::merge_with`];
//! 3. top-down, each node is embedded at its segment's point nearest to its
//!    parent (the root at its segment's upper corner, or nearest to an
//!    external source);
//! 4. delays propagate from the root through the configured [`DelayModel`].
//!
//! When no merge needed clamping, the embedded tree has zero skew between
//! all sinks.

pub mod delay;

use tracing::debug;

use crate::error::Error;
use crate::geometry::arc::ManhattanArc;
use crate::geometry::arc3d::ManhattanArc3D;
use crate::geometry::ops::MinDist;
use crate::geometry::point::{Point2, Point3};

use delay::{BranchLoad, DelayModel};

/// A clock sink: a named position with input capacitance.
#[derive(Clone, Debug)]
pub struct Sink<P> {
    pub name: String,
    pub position: P,
    pub capacitance: f64,
}

impl<P> Sink<P> {
    pub fn new(name: impl Into<String>, position: P, capacitance: f64) -> Self {
        Self {
            name: name.into(),
            position,
            capacitance,
        }
    }
}

/// A node of the synthesised clock tree, stored in the tree's arena.
#[derive(Clone, Debug)]
pub struct ClockNode<P> {
    pub name: String,
    pub position: P,
    pub left: Option<usize>,
    pub right: Option<usize>,
    pub parent: Option<usize>,
    /// L1 length of the wire up to the parent.
    pub wire_length: i64,
    pub delay: f64,
    pub capacitance: f64,
    /// Set when delay balancing clamped this branch: the wire must be
    /// snaked to make up the residual delay.
    pub need_elongation: bool,
}

impl<P> ClockNode<P> {
    fn leaf(name: String, position: P, capacitance: f64) -> Self {
        Self {
            name,
            position,
            left: None,
            right: None,
            parent: None,
            wire_length: 0,
            delay: 0.0,
            capacitance,
            need_elongation: false,
        }
    }

    pub fn is_sink(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// An arena-allocated clock tree rooted at [`ClockTree::root`].
#[derive(Clone, Debug)]
pub struct ClockTree<P> {
    nodes: Vec<ClockNode<P>>,
    root: usize,
}

impl<P> ClockTree<P> {
    pub fn root(&self) -> &ClockNode<P> {
        &self.nodes[self.root]
    }

    pub fn root_index(&self) -> usize {
        self.root
    }

    pub fn node(&self, index: usize) -> &ClockNode<P> {
        &self.nodes[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &ClockNode<P>> {
        self.nodes.iter()
    }

    pub fn sinks(&self) -> impl Iterator<Item = &ClockNode<P>> {
        self.nodes.iter().filter(|n| n.is_sink())
    }

    /// Sum of all wire lengths to parents.
    pub fn total_wirelength(&self) -> i64 {
        self.nodes.iter().map(|n| n.wire_length).sum()
    }

    /// Whether any branch was clamped during delay balancing.
    pub fn needs_elongation(&self) -> bool {
        self.nodes.iter().any(|n| n.need_elongation)
    }
}

/// A coordinate the DME builder can synthesise over: it knows its merging
/// segment type and how to key the bipartition sort.
pub trait MergePoint: Clone + PartialEq + std::fmt::Debug + MinDist<Self, Dist = i64> + Sized {
    type Segment: MergeSegment<Point = Self>;

    /// Sort key for the alternating-axis bipartition; ties fall back to the
    /// stable sort's insertion order.
    fn sort_key(&self, vertical: bool) -> (i64, i64);
}

/// Merging segments: closed under merge, with nearest-point embedding.
pub trait MergeSegment: Clone {
    type Point;

    fn from_point(p: &Self::Point) -> Self;
    fn min_dist_with(&self, other: &Self) -> i64;
    fn merge_with(&self, other: &Self, alpha: i64) -> Self;
    fn nearest_point_to(&self, q: &Self::Point) -> Self::Point;
    fn upper_corner(&self) -> Self::Point;
}

impl MergePoint for Point2<i64> {
    type Segment = ManhattanArc<i64>;

    fn sort_key(&self, vertical: bool) -> (i64, i64) {
        if vertical {
            (self.x, self.y)
        } else {
            (self.y, self.x)
        }
    }
}

impl MergeSegment for ManhattanArc<i64> {
    type Point = Point2<i64>;

    fn from_point(p: &Self::Point) -> Self {
        ManhattanArc::from_point(p)
    }

    fn min_dist_with(&self, other: &Self) -> i64 {
        ManhattanArc::min_dist_with(self, other)
    }

    fn merge_with(&self, other: &Self, alpha: i64) -> Self {
        ManhattanArc::merge_with(self, other, alpha)
    }

    fn nearest_point_to(&self, q: &Self::Point) -> Self::Point {
        ManhattanArc::nearest_point_to(self, q)
    }

    fn upper_corner(&self) -> Self::Point {
        ManhattanArc::upper_corner(self)
    }
}

impl MergePoint for Point3<i64> {
    type Segment = ManhattanArc3D<i64>;

    fn sort_key(&self, vertical: bool) -> (i64, i64) {
        if vertical {
            (self.x.x, self.x.y)
        } else {
            (self.y, self.x.x)
        }
    }
}

impl MergeSegment for ManhattanArc3D<i64> {
    type Point = Point3<i64>;

    fn from_point(p: &Self::Point) -> Self {
        ManhattanArc3D::from_point(p)
    }

    fn min_dist_with(&self, other: &Self) -> i64 {
        ManhattanArc3D::min_dist_with(self, other)
    }

    fn merge_with(&self, other: &Self, alpha: i64) -> Self {
        ManhattanArc3D::merge_with(self, other, alpha)
    }

    fn nearest_point_to(&self, q: &Self::Point) -> Self::Point {
        ManhattanArc3D::nearest_point_to(self, q)
    }

    fn upper_corner(&self) -> Self::Point {
        ManhattanArc3D::upper_corner(self)
    }
}

/// Builds zero-skew clock trees with a configurable delay model and an
/// optional external source location.
#[derive(Clone, Debug)]
pub struct DmeBuilder<P, M> {
    pub model: M,
    pub source: Option<P>,
}

impl<P: MergePoint, M: DelayModel> DmeBuilder<P, M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            source: None,
        }
    }

    pub fn with_source(model: M, source: P) -> Self {
        Self {
            model,
            source: Some(source),
        }
    }

    /// Runs the full pipeline over `sinks`.
    pub fn build(&self, sinks: &[Sink<P>]) -> Result<ClockTree<P>, Error> {
        if sinks.is_empty() {
            return Err(Error::EmptyInput("no sinks provided"));
        }
        let mut nodes: Vec<ClockNode<P>> = sinks
            .iter()
            .map(|s| ClockNode::leaf(s.name.clone(), s.position.clone(), s.capacitance))
            .collect();
        let leaves: Vec<usize> = (0..nodes.len()).collect();
        let mut next_internal = 0;
        let root = build_partition(&mut nodes, leaves, false, &mut next_internal);
        debug!(sinks = sinks.len(), nodes = nodes.len(), "merge tree built");

        let mut segments: Vec<Option<P::Segment>> = vec![None; nodes.len()];
        self.compute_segment(&mut nodes, &mut segments, root);

        // top-down embedding
        match (&self.source, &segments[root]) {
            (Some(source), Some(seg)) => nodes[root].position = seg.nearest_point_to(source),
            (None, Some(seg)) => nodes[root].position = seg.upper_corner(),
            _ => {}
        }
        self.embed_children(&mut nodes, &segments, root);

        // final delays from the root down
        nodes[root].delay = 0.0;
        self.propagate_delays(&mut nodes, root);

        Ok(ClockTree { nodes, root })
    }

    fn compute_segment(
        &self,
        nodes: &mut [ClockNode<P>],
        segments: &mut [Option<P::Segment>],
        idx: usize,
    ) -> P::Segment {
        let (Some(left), Some(right)) = (nodes[idx].left, nodes[idx].right) else {
            let seg = P::Segment::from_point(&nodes[idx].position);
            segments[idx] = Some(seg.clone());
            return seg;
        };
        let left_seg = self.compute_segment(nodes, segments, left);
        let right_seg = self.compute_segment(nodes, segments, right);

        let distance = left_seg.min_dist_with(&right_seg);
        let tapping = self.model.tapping_point(
            BranchLoad {
                delay: nodes[left].delay,
                capacitance: nodes[left].capacitance,
            },
            BranchLoad {
                delay: nodes[right].delay,
                capacitance: nodes[right].capacitance,
            },
            distance,
        );
        nodes[left].wire_length = tapping.wire_left;
        nodes[left].need_elongation |= tapping.elongate_left;
        nodes[right].wire_length = tapping.wire_right;
        nodes[right].need_elongation |= tapping.elongate_right;
        nodes[idx].delay = tapping.delay_left;
        nodes[idx].capacitance = nodes[left].capacitance
            + nodes[right].capacitance
            + self.model.wire_capacitance(distance);

        let merged = left_seg.merge_with(&right_seg, tapping.wire_left);
        segments[idx] = Some(merged.clone());
        merged
    }

    fn embed_children(
        &self,
        nodes: &mut [ClockNode<P>],
        segments: &[Option<P::Segment>],
        idx: usize,
    ) {
        for child in [nodes[idx].left, nodes[idx].right].into_iter().flatten() {
            let parent_pos = nodes[idx].position.clone();
            if let Some(seg) = &segments[child] {
                nodes[child].position = seg.nearest_point_to(&parent_pos);
                nodes[child].wire_length = nodes[child].position.min_dist_with(&parent_pos);
            }
            self.embed_children(nodes, segments, child);
        }
    }

    fn propagate_delays(&self, nodes: &mut [ClockNode<P>], idx: usize) {
        for child in [nodes[idx].left, nodes[idx].right].into_iter().flatten() {
            let wire = self
                .model
                .wire_delay(nodes[child].wire_length, nodes[child].capacitance);
            nodes[child].delay = nodes[idx].delay + wire;
            self.propagate_delays(nodes, child);
        }
    }
}

/// Recursive bipartition: sort along the axis for this depth, split in half,
/// and parent the two sides.
fn build_partition<P: MergePoint>(
    nodes: &mut Vec<ClockNode<P>>,
    mut group: Vec<usize>,
    vertical: bool,
    next_internal: &mut usize,
) -> usize {
    if group.len() == 1 {
        return group[0];
    }
    group.sort_by_key(|&i| nodes[i].position.sort_key(vertical));
    let right_group = group.split_off(group.len() / 2);
    let left = build_partition(nodes, group, !vertical, next_internal);
    let right = build_partition(nodes, right_group, !vertical, next_internal);

    let parent = nodes.len();
    let placeholder = nodes[left].position.clone();
    let mut node = ClockNode::leaf(format!("n{}", *next_internal), placeholder, 0.0);
    *next_internal += 1;
    node.left = Some(left);
    node.right = Some(right);
    nodes.push(node);
    nodes[left].parent = Some(parent);
    nodes[right].parent = Some(parent);
    parent
}

#[cfg(test)]
mod tests {
    use super::delay::{ElmoreDelay, LinearDelay};
    use super::*;
    use crate::analysis;
    use crate::geometry::point::Point;
    use approx::assert_ulps_eq;

    fn sinks2(coords: &[(i64, i64)]) -> Vec<Sink<Point2<i64>>> {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Sink::new(format!("s{}", i + 1), Point::new(x, y), 1.0))
            .collect()
    }

    #[test]
    fn no_sinks_is_an_error() {
        let builder = DmeBuilder::<Point2<i64>, _>::new(LinearDelay::default());
        assert!(matches!(builder.build(&[]), Err(Error::EmptyInput(_))));
    }

    #[test]
    fn single_sink_is_its_own_tree() {
        let builder = DmeBuilder::new(LinearDelay::default());
        let tree = builder.build(&sinks2(&[(10, 20)])).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root().position, Point::new(10, 20));
        assert_ulps_eq!(tree.root().delay, 0.0);
    }

    #[test]
    fn two_sinks_with_source_balance_exactly() {
        let builder = DmeBuilder::with_source(LinearDelay::default(), Point::new(5, 0));
        let tree = builder.build(&sinks2(&[(0, 0), (10, 0)])).unwrap();

        assert_eq!(tree.root().position, Point::new(5, 0));
        assert_eq!(tree.total_wirelength(), 10);
        let report = analysis::skew(&tree);
        assert_ulps_eq!(report.skew, 0.0);
        for node in tree.sinks() {
            assert_eq!(node.wire_length, 5);
            assert_ulps_eq!(node.delay, 5.0);
        }
        assert!(!tree.needs_elongation());
    }

    #[test]
    fn four_sinks_have_zero_skew_under_the_linear_model() {
        let builder = DmeBuilder::new(LinearDelay::default());
        let tree = builder
            .build(&sinks2(&[(0, 0), (10, 0), (0, 10), (10, 10)]))
            .unwrap();
        assert_eq!(tree.sinks().count(), 4);
        assert!(!tree.needs_elongation());
        let report = analysis::skew(&tree);
        assert_ulps_eq!(report.skew, 0.0);
        for node in tree.sinks() {
            assert_ulps_eq!(node.delay, 10.0);
        }
        // structure: 3 internal nodes for 4 sinks
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn elmore_model_builds_and_accumulates_capacitance() {
        let builder = DmeBuilder::new(ElmoreDelay::new(0.1, 0.2));
        let sinks = sinks2(&[(10, 20), (30, 40), (50, 10)]);
        let tree = builder.build(&sinks).unwrap();
        assert_eq!(tree.len(), 5);
        // the root load covers all sink loads plus wiring
        assert!(tree.root().capacitance >= 3.0);
        let report = analysis::skew(&tree);
        assert!(report.max_delay >= report.min_delay);
    }

    #[test]
    fn three_sinks_in_3d() {
        let builder = DmeBuilder::new(LinearDelay::default());
        let sinks = vec![
            Sink::new("s1", Point3::xyz(0, 0, 0), 1.0),
            Sink::new("s2", Point3::xyz(10, 0, 0), 1.0),
            Sink::new("s3", Point3::xyz(5, 8, 0), 1.0),
        ];
        let tree = builder.build(&sinks).unwrap();
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.sinks().count(), 3);
        assert!(tree.total_wirelength() > 0);
    }

    #[test]
    fn clamped_merges_flag_elongation() {
        // the isolated sink accumulates so little delay that the final merge
        // cannot balance within its span
        let builder = DmeBuilder::new(LinearDelay::default());
        let tree = builder
            .build(&[
                Sink::new("alone", Point::new(0, 0), 1.0),
                Sink::new("pair_a", Point::new(0, 2), 1.0),
                Sink::new("pair_b", Point::new(100, 0), 1.0),
            ])
            .unwrap();
        assert!(tree.needs_elongation());
        let report = analysis::skew(&tree);
        assert!(report.skew >= 0.0);
    }
}
