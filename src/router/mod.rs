//! Geometry-aware global routing with rectangular keep-outs.
//!
//! The router orders terminals by descending L1 distance from the source, so
//! the longest net anchors the tree and creates Steiner opportunities for the
//! rest. Three variants share the insertion machinery:
//!
//! - [`GlobalRouter::route_simple`] attaches each terminal to the nearest
//!   node;
//! - [`GlobalRouter::route_with_steiners`] also considers splicing a Steiner
//!   point into an existing edge when that is strictly cheaper;
//! - [`GlobalRouter::route_with_constraints`] caps each net's source path at
//!   `round(worst_direct * alpha)`, falling back to a direct source
//!   attachment and recording nets that still violate the bound.
//!
//! A blocked attachment detours through a corner of the blocking keep-out:
//! among the corners whose two legs clear that region, the one minimising the
//! total L1 length wins, ties toward the lexicographically least corner. If
//! no corner clears (the terminal sits inside a region), the cheapest corner
//! still connects the net.

pub mod position;
pub mod tree;

use tracing::debug;

use crate::error::Error;

pub use position::Position;
pub use tree::{GlobalRoutingTree, NodeKind, RoutingNode, SOURCE_ID};

#[derive(Clone, Debug)]
pub struct GlobalRouter<P: Position> {
    pub tree: GlobalRoutingTree<P>,
    terminals: Vec<P>,
    keepouts: Vec<P::Region>,
    worst_wirelength: i64,
    /// Terminals whose realised wirelength exceeded the allowed bound.
    pub violations: Vec<String>,
}

/// How a terminal is about to join the tree.
enum Anchor<P> {
    Node(String),
    Edge { parent: String, child: String, at: P },
}

impl<P: Position> GlobalRouter<P> {
    pub fn new(source: P, terminals: Vec<P>) -> Result<Self, Error> {
        Self::with_keepouts(source, terminals, Vec::new())
    }

    pub fn with_keepouts(
        source: P,
        mut terminals: Vec<P>,
        keepouts: Vec<P::Region>,
    ) -> Result<Self, Error> {
        if terminals.is_empty() {
            return Err(Error::EmptyInput("router needs at least one terminal"));
        }
        terminals.sort_by_key(|t| std::cmp::Reverse(source.dist(t)));
        let worst_wirelength = source.dist(&terminals[0]);
        Ok(Self {
            tree: GlobalRoutingTree::new(source),
            terminals,
            keepouts,
            worst_wirelength,
            violations: Vec::new(),
        })
    }

    /// Terminals in routing order (descending distance from the source).
    pub fn terminal_positions(&self) -> &[P] {
        &self.terminals
    }

    /// Attaches every terminal to the nearest node in the growing tree.
    pub fn route_simple(&mut self) {
        let terminals = self.terminals.clone();
        for t in terminals {
            // insertion into a non-empty tree cannot fail
            let _ = self.tree.insert_terminal_node(t, None);
        }
    }

    /// Wirelength-driven routing: splice Steiner points into existing edges
    /// where that beats a direct attachment.
    pub fn route_with_steiners(&mut self) {
        let terminals = self.terminals.clone();
        for t in terminals {
            self.attach_terminal(t, None);
        }
    }

    /// Delay/wirelength-constrained routing: per-terminal source paths are
    /// capped at `round(worst_direct * alpha)`.
    pub fn route_with_constraints(&mut self, alpha: f64) {
        let allowed = (self.worst_wirelength as f64 * alpha).round() as i64;
        let terminals = self.terminals.clone();
        for t in terminals {
            self.attach_terminal(t, Some(allowed));
        }
    }

    fn attach_terminal(&mut self, t: P, allowed: Option<i64>) {
        let mut anchor = self.best_anchor(&t);
        if let Some(allowed) = allowed {
            if self.prospective_length(&anchor, &t) > allowed {
                // over budget: fall back to a direct wire from the source
                anchor = Anchor::Node(SOURCE_ID.to_string());
            }
        }

        let (parent_id, anchor_pos) = match anchor {
            Anchor::Node(id) => {
                let pos = self.tree.node(&id).map(|n| n.position.clone());
                (id, pos)
            }
            Anchor::Edge { parent, child, at } => {
                if at == t {
                    // the terminal itself lies on the edge span
                    let id = self
                        .tree
                        .insert_node_on_branch(NodeKind::Terminal, t, &parent, &child)
                        .expect("edge came from the tree");
                    self.check_violation(&id, allowed);
                    return;
                }
                let parent_pos = self.tree.node(&parent).map(|n| n.position.clone());
                let child_pos = self.tree.node(&child).map(|n| n.position.clone());
                if Some(&at) == parent_pos.as_ref() {
                    (parent, parent_pos)
                } else if Some(&at) == child_pos.as_ref() {
                    (child, child_pos)
                } else {
                    let id = self
                        .tree
                        .insert_node_on_branch(NodeKind::Steiner, at.clone(), &parent, &child)
                        .expect("edge came from the tree");
                    (id, Some(at))
                }
            }
        };
        let Some(anchor_pos) = anchor_pos else { return };

        let id = match self.detour_corner(&anchor_pos, &t) {
            Some(corner) => {
                debug!(?corner, "detouring blocked attachment around keep-out");
                let steiner = self
                    .tree
                    .insert_steiner_node(corner, Some(&parent_id))
                    .expect("anchor exists");
                self.tree
                    .insert_terminal_node(t, Some(&steiner))
                    .expect("steiner exists")
            }
            None => self
                .tree
                .insert_terminal_node(t, Some(&parent_id))
                .expect("anchor exists"),
        };
        self.check_violation(&id, allowed);
    }

    /// The cheapest way to reach `t`: the nearest node, or an edge splice
    /// when strictly cheaper.
    fn best_anchor(&self, t: &P) -> Anchor<P> {
        let nearest = self.tree.nearest_node_id(t);
        let direct = self
            .tree
            .node(&nearest)
            .map(|n| n.position.dist(t))
            .unwrap_or(i64::MAX);

        let mut best: Option<(i64, Anchor<P>)> = None;
        for (parent, child) in self.tree.edges() {
            let (Some(u), Some(v)) = (self.tree.node(&parent), self.tree.node(&child)) else {
                continue;
            };
            let at = P::nearest_on_span(&u.position, &v.position, t);
            let extra = at.dist(t);
            if best.as_ref().map_or(true, |(b, _)| extra < *b) {
                best = Some((extra, Anchor::Edge { parent, child, at }));
            }
        }
        match best {
            Some((extra, anchor)) if extra < direct => anchor,
            _ => Anchor::Node(nearest),
        }
    }

    /// Source-path length `t` would get when joined at `anchor`, including a
    /// keep-out detour if one would be inserted.
    fn prospective_length(&self, anchor: &Anchor<P>, t: &P) -> i64 {
        let (to_anchor, anchor_pos) = match anchor {
            Anchor::Node(id) => match self.tree.node(id) {
                Some(n) => (
                    self.tree.path_length(id).unwrap_or(0),
                    n.position.clone(),
                ),
                None => return i64::MAX,
            },
            Anchor::Edge { parent, at, .. } => match self.tree.node(parent) {
                Some(u) => (
                    self.tree.path_length(parent).unwrap_or(0) + u.position.dist(at),
                    at.clone(),
                ),
                None => return i64::MAX,
            },
        };
        let leg = match self.detour_corner(&anchor_pos, t) {
            Some(corner) => anchor_pos.dist(&corner) + corner.dist(t),
            None => anchor_pos.dist(t),
        };
        to_anchor + leg
    }

    /// If the straight attachment `from -> to` crosses a keep-out, the detour
    /// corner to route through.
    fn detour_corner(&self, from: &P, to: &P) -> Option<P> {
        let region = self.keepouts.iter().find(|&r| P::blocked(from, to, r))?;
        let corners = P::region_corners(region);
        let clear: Vec<&P> = corners
            .iter()
            .filter(|&c| !P::blocked(from, c, region) && !P::blocked(c, to, region))
            .collect();
        let pool: Vec<&P> = if clear.is_empty() {
            corners.iter().collect()
        } else {
            clear
        };
        pool.into_iter()
            .min_by_key(|c| (from.dist(c) + c.dist(to), (*c).clone()))
            .cloned()
    }

    fn check_violation(&mut self, id: &str, allowed: Option<i64>) {
        let Some(allowed) = allowed else { return };
        if self.tree.path_length(id).unwrap_or(0) > allowed {
            debug!(terminal = %id, "net exceeds its wirelength budget");
            self.violations.push(id.to_string());
        }
    }
}
