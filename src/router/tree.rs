//! The mutable routing tree: one SOURCE root, STEINER internals, TERMINAL
//! leaves.
//!
//! Nodes are addressed by monotonically increasing string identifiers per
//! kind (`steiner_1`, `terminal_1`, ...; the root is `source`), so no caller
//! ever holds a reference into the tree across mutations. Nearest-node
//! queries scan in insertion order, which makes tie-breaking deterministic.

use std::collections::HashMap;

use tracing::debug;

use crate::error::Error;
use super::position::Position;

/// Identifier of the unique root node.
pub const SOURCE_ID: &str = "source";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Source,
    Steiner,
    Terminal,
}

#[derive(Clone, Debug)]
pub struct RoutingNode<P> {
    pub id: String,
    pub kind: NodeKind,
    pub position: P,
    pub parent: Option<String>,
    pub children: Vec<String>,
    pub capacitance: f64,
    pub delay: f64,
}

impl<P> RoutingNode<P> {
    fn new(id: String, kind: NodeKind, position: P) -> Self {
        Self {
            id,
            kind,
            position,
            parent: None,
            children: Vec::new(),
            capacitance: 0.0,
            delay: 0.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GlobalRoutingTree<P> {
    nodes: HashMap<String, RoutingNode<P>>,
    order: Vec<String>,
    next_steiner: usize,
    next_terminal: usize,
}

impl<P: Position> GlobalRoutingTree<P> {
    pub fn new(source_position: P) -> Self {
        let source = RoutingNode::new(SOURCE_ID.to_string(), NodeKind::Source, source_position);
        let mut nodes = HashMap::new();
        nodes.insert(SOURCE_ID.to_string(), source);
        Self {
            nodes,
            order: vec![SOURCE_ID.to_string()],
            next_steiner: 1,
            next_terminal: 1,
        }
    }

    pub fn node(&self, id: &str) -> Option<&RoutingNode<P>> {
        self.nodes.get(id)
    }

    pub fn source(&self) -> &RoutingNode<P> {
        &self.nodes[SOURCE_ID]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node identifiers in insertion order.
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    fn require(&self, id: &str) -> Result<&RoutingNode<P>, Error> {
        self.nodes
            .get(id)
            .ok_or_else(|| Error::InvalidParent(id.to_string()))
    }

    fn attach(&mut self, parent_id: &str, child_id: &str) {
        if let Some(parent) = self.nodes.get_mut(parent_id) {
            parent.children.push(child_id.to_string());
        }
        if let Some(child) = self.nodes.get_mut(child_id) {
            child.parent = Some(parent_id.to_string());
        }
    }

    fn detach(&mut self, parent_id: &str, child_id: &str) {
        if let Some(parent) = self.nodes.get_mut(parent_id) {
            parent.children.retain(|c| c != child_id);
        }
        if let Some(child) = self.nodes.get_mut(child_id) {
            child.parent = None;
        }
    }

    /// Inserts a Steiner node; without an explicit parent it hangs off the
    /// source.
    pub fn insert_steiner_node(
        &mut self,
        position: P,
        parent: Option<&str>,
    ) -> Result<String, Error> {
        let parent_id = match parent {
            Some(p) => self.require(p)?.id.clone(),
            None => SOURCE_ID.to_string(),
        };
        let id = format!("steiner_{}", self.next_steiner);
        self.next_steiner += 1;
        self.nodes
            .insert(id.clone(), RoutingNode::new(id.clone(), NodeKind::Steiner, position));
        self.order.push(id.clone());
        self.attach(&parent_id, &id);
        Ok(id)
    }

    /// Inserts a terminal; without an explicit parent it attaches to the
    /// nearest existing node (ties to the earliest inserted).
    pub fn insert_terminal_node(
        &mut self,
        position: P,
        parent: Option<&str>,
    ) -> Result<String, Error> {
        let parent_id = match parent {
            Some(p) => self.require(p)?.id.clone(),
            None => self.nearest_node_id(&position),
        };
        let id = format!("terminal_{}", self.next_terminal);
        self.next_terminal += 1;
        self.nodes
            .insert(id.clone(), RoutingNode::new(id.clone(), NodeKind::Terminal, position));
        self.order.push(id.clone());
        self.attach(&parent_id, &id);
        Ok(id)
    }

    /// Splices a new node into the existing edge `start -> end`.
    pub fn insert_node_on_branch(
        &mut self,
        kind: NodeKind,
        position: P,
        start: &str,
        end: &str,
    ) -> Result<String, Error> {
        if kind == NodeKind::Source {
            return Err(Error::InvalidKind(kind));
        }
        self.require(start)?;
        let end_node = self.require(end)?;
        if end_node.parent.as_deref() != Some(start) {
            return Err(Error::InvalidParent(format!(
                "{end} is not a direct child of {start}"
            )));
        }
        let id = match kind {
            NodeKind::Steiner => {
                let id = format!("steiner_{}", self.next_steiner);
                self.next_steiner += 1;
                id
            }
            NodeKind::Terminal => {
                let id = format!("terminal_{}", self.next_terminal);
                self.next_terminal += 1;
                id
            }
            NodeKind::Source => unreachable!(),
        };
        self.nodes
            .insert(id.clone(), RoutingNode::new(id.clone(), kind, position));
        self.order.push(id.clone());
        self.detach(start, end);
        self.attach(start, &id);
        self.attach(&id, end);
        Ok(id)
    }

    /// Removes a childless non-source node, undoing its insertion.
    pub fn remove_leaf(&mut self, id: &str) -> Result<(), Error> {
        let node = self.require(id)?;
        if node.kind == NodeKind::Source {
            return Err(Error::InvalidKind(NodeKind::Source));
        }
        if !node.children.is_empty() {
            return Err(Error::InvalidParent(format!("{id} is not a leaf")));
        }
        let parent = node.parent.clone();
        if let Some(p) = parent {
            self.detach(&p, id);
        }
        self.nodes.remove(id);
        self.order.retain(|n| n != id);
        Ok(())
    }

    /// The id of the node nearest to `position`, insertion order breaking
    /// ties.
    pub fn nearest_node_id(&self, position: &P) -> String {
        let mut best_id = SOURCE_ID;
        let mut best = self.source().position.dist(position);
        for id in &self.order {
            let d = self.nodes[id].position.dist(position);
            if d < best {
                best = d;
                best_id = id;
            }
        }
        best_id.to_string()
    }

    /// Parent/child edges `(parent, child)` in child insertion order.
    pub fn edges(&self) -> Vec<(String, String)> {
        self.order
            .iter()
            .filter_map(|id| {
                let node = &self.nodes[id];
                node.parent.as_ref().map(|p| (p.clone(), id.clone()))
            })
            .collect()
    }

    /// Removes every Steiner node with exactly one child, reattaching the
    /// child to its grandparent; iterated to a fixed point.
    pub fn optimize_steiner_points(&mut self) {
        loop {
            let removable: Vec<String> = self
                .order
                .iter()
                .filter(|id| {
                    let node = &self.nodes[id.as_str()];
                    node.kind == NodeKind::Steiner
                        && node.children.len() == 1
                        && node.parent.is_some()
                })
                .cloned()
                .collect();
            if removable.is_empty() {
                return;
            }
            for id in removable {
                let node = &self.nodes[&id];
                let (Some(parent), Some(child)) =
                    (node.parent.clone(), node.children.first().cloned())
                else {
                    continue;
                };
                debug!(steiner = %id, "removing single-child steiner node");
                self.detach(&parent, &id);
                self.detach(&id, &child);
                self.attach(&parent, &child);
                self.nodes.remove(&id);
                self.order.retain(|n| n != &id);
            }
        }
    }

    /// The path from the source down to `id`, inclusive.
    pub fn find_path_to_source(&self, id: &str) -> Result<Vec<String>, Error> {
        self.require(id)?;
        let mut path = vec![id.to_string()];
        let mut cur = id.to_string();
        while let Some(parent) = self.nodes[&cur].parent.clone() {
            path.push(parent.clone());
            cur = parent;
        }
        path.reverse();
        Ok(path)
    }

    /// L1 length of the path from the source down to `id`.
    pub fn path_length(&self, id: &str) -> Result<i64, Error> {
        let path = self.find_path_to_source(id)?;
        Ok(path
            .windows(2)
            .map(|w| self.nodes[&w[0]].position.dist(&self.nodes[&w[1]].position))
            .sum())
    }

    /// Total L1 length over all parent/child edges.
    pub fn calculate_wirelength(&self) -> i64 {
        self.order
            .iter()
            .filter_map(|id| {
                let node = &self.nodes[id];
                let parent = node.parent.as_ref()?;
                Some(self.nodes[parent].position.dist(&node.position))
            })
            .sum()
    }

    pub fn terminals(&self) -> Vec<&RoutingNode<P>> {
        self.order
            .iter()
            .map(|id| &self.nodes[id])
            .filter(|n| n.kind == NodeKind::Terminal)
            .collect()
    }

    pub fn steiner_nodes(&self) -> Vec<&RoutingNode<P>> {
        self.order
            .iter()
            .map(|id| &self.nodes[id])
            .filter(|n| n.kind == NodeKind::Steiner)
            .collect()
    }

    /// Indented text dump of the tree, children in insertion order.
    pub fn format_structure(&self) -> String {
        let mut out = String::new();
        self.format_node(SOURCE_ID, 0, &mut out);
        out
    }

    fn format_node(&self, id: &str, level: usize, out: &mut String) {
        let node = &self.nodes[id];
        for _ in 0..level {
            out.push_str("  ");
        }
        out.push_str(&format!("{:?}({}, {:?})\n", node.kind, node.id, node.position));
        for child in &node.children {
            self.format_node(child, level + 1, out);
        }
    }
}
