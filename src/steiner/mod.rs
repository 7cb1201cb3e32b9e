//! Primal-dual Steiner forest on a unit grid.
//!
//! Cell `(r, c)` of an `H x W` grid is vertex `r * W + c`; edges join
//! 4-neighbours with unit weight. The growth phase raises a uniform dual
//! around every *active* component (one containing a terminal whose partner
//! sits elsewhere) by paying `delta* = min (weight - paid) / k` into each
//! eligible edge, adding the first fully paid edge to the forest. A
//! reverse-delete pass then drops every edge the remaining forest does not
//! need. The result costs at most `2 (1 - 1/k)` times the optimum.

pub mod union_find;

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::error::Error;

pub use union_find::UnionFind;

/// A terminal pair `((row, col), (row, col))` to be connected.
pub type TerminalPair = ((usize, usize), (usize, usize));

/// The pruned forest and its bookkeeping.
#[derive(Clone, Debug, PartialEq)]
pub struct SteinerForest {
    /// Kept edges `(u, v, weight)` in the order the growth phase added them.
    pub edges: Vec<(usize, usize, f64)>,
    pub total_cost: f64,
    /// First members of the input pairs.
    pub sources: BTreeSet<usize>,
    /// Second members of the input pairs.
    pub terminals: BTreeSet<usize>,
    /// Used vertices that are not terminals of any pair.
    pub steiner_nodes: BTreeSet<usize>,
}

/// All grid edges in row-major order, horizontal before vertical per cell.
fn grid_edges(height: usize, width: usize) -> Vec<(usize, usize, f64)> {
    let mut edges = Vec::new();
    for row in 0..height {
        for col in 0..width {
            let node = row * width + col;
            if col + 1 < width {
                edges.push((node, node + 1, 1.0));
            }
            if row + 1 < height {
                edges.push((node, node + width, 1.0));
            }
        }
    }
    edges
}

/// Computes an approximate Steiner forest connecting every pair on the grid.
pub fn steiner_forest_grid(
    height: usize,
    width: usize,
    pairs: &[TerminalPair],
) -> Result<SteinerForest, Error> {
    let n = height * width;
    let mut sources = BTreeSet::new();
    let mut terminals = BTreeSet::new();
    let mut partners: HashMap<usize, Vec<usize>> = HashMap::new();
    for &((sr, sc), (tr, tc)) in pairs {
        if sr >= height || sc >= width || tr >= height || tc >= width {
            return Err(Error::Infeasible);
        }
        let s = sr * width + sc;
        let t = tr * width + tc;
        sources.insert(s);
        terminals.insert(t);
        partners.entry(s).or_default().push(t);
        partners.entry(t).or_default().push(s);
    }
    let all_terminals: BTreeSet<usize> = sources.union(&terminals).copied().collect();

    let edges = grid_edges(height, width);
    let mut uf = UnionFind::new(n);
    let mut paid: HashMap<(usize, usize), f64> = HashMap::new();
    let mut forest: Vec<(usize, usize, f64)> = Vec::new();

    loop {
        // feasible once every pair shares a component
        let feasible = pairs.iter().all(|&((sr, sc), (tr, tc))| {
            uf.connected(sr * width + sc, tr * width + tc)
        });
        if feasible {
            break;
        }

        // components still owing duals: those holding a separated terminal
        let mut active: BTreeSet<usize> = BTreeSet::new();
        for &t in &all_terminals {
            let root = uf.find(t);
            if partners[&t].iter().any(|&p| uf.find(p) != root) {
                active.insert(root);
            }
        }

        // cheapest uniform raise over the eligible edges
        let mut min_delta = f64::INFINITY;
        let mut chosen: Option<(usize, usize, f64)> = None;
        for &(u, v, weight) in &edges {
            let (ru, rv) = (uf.find(u), uf.find(v));
            if ru == rv {
                continue;
            }
            let k = active.contains(&ru) as u32 + active.contains(&rv) as u32;
            if k == 0 {
                continue;
            }
            let key = (u.min(v), u.max(v));
            let paid_val = *paid.get(&key).unwrap_or(&0.0);
            if paid_val > weight {
                continue;
            }
            let delta = (weight - paid_val) / f64::from(k);
            if delta < min_delta {
                min_delta = delta;
                chosen = Some((u, v, weight));
            }
        }

        let Some((cu, cv, cw)) = chosen else {
            return Err(Error::Infeasible);
        };

        // pay every eligible edge, clamped at its weight
        for &(u, v, weight) in &edges {
            let (ru, rv) = (uf.find(u), uf.find(v));
            if ru == rv {
                continue;
            }
            let k = active.contains(&ru) as u32 + active.contains(&rv) as u32;
            if k == 0 {
                continue;
            }
            let key = (u.min(v), u.max(v));
            let entry = paid.entry(key).or_insert(0.0);
            *entry += min_delta * f64::from(k);
            if *entry > weight + 1e-6 {
                *entry = weight;
            }
        }

        let chosen_key = (cu.min(cv), cu.max(cv));
        if *paid.get(&chosen_key).unwrap_or(&0.0) >= cw - 1e-6 {
            debug!(edge = ?chosen_key, "edge fully paid, joining components");
            forest.push((cu, cv, cw));
            uf.union(cu, cv);
        }
    }

    // reverse delete: drop any edge the remaining forest can do without
    let mut kept = vec![true; forest.len()];
    for i in (0..forest.len()).rev() {
        let mut trial = UnionFind::new(n);
        for (j, &(u, v, _)) in forest.iter().enumerate() {
            if j != i && kept[j] {
                trial.union(u, v);
            }
        }
        let connected = pairs.iter().all(|&((sr, sc), (tr, tc))| {
            trial.connected(sr * width + sc, tr * width + tc)
        });
        if connected {
            kept[i] = false;
        }
    }
    let pruned: Vec<(usize, usize, f64)> = forest
        .into_iter()
        .zip(&kept)
        .filter_map(|(e, &keep)| keep.then_some(e))
        .collect();

    let total_cost = pruned.iter().map(|&(_, _, w)| w).sum();
    let used: BTreeSet<usize> = pruned
        .iter()
        .flat_map(|&(u, v, _)| [u, v])
        .collect();
    let steiner_nodes = used.difference(&all_terminals).copied().collect();

    Ok(SteinerForest {
        edges: pruned,
        total_cost,
        sources,
        terminals,
        steiner_nodes,
    })
}
