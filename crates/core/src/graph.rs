use std::collections::HashMap;

use common::error::Error;
use tracing::debug;

use crate::table::RateTable;

/// Index of a currency node inside a `RateGraph`.
pub type NodeId = usize;

/// Immutable directed rate graph in Compressed Sparse Row (CSR) form.
///
/// Outgoing edges of each node sit contiguously in memory:
/// - `node_pointers[u]..node_pointers[u+1]` → edges out of node `u`
/// - `edge_targets[i]` / `edge_weights[i]` → target and weight of edge `i`
/// - `edge_sources[i]` → source of edge `i`, an O(1) reverse lookup used
///   while tracing predecessor chains
///
/// Every weight is `-ln(rate)`, so a cycle whose weights sum below zero is
/// a round trip whose rate product exceeds one. The graph is read-only once
/// built; concurrent solver runs share it without locking.
#[derive(Debug, Clone)]
pub struct RateGraph {
    symbols: Vec<String>,
    ids: HashMap<String, NodeId>,
    node_pointers: Vec<usize>,
    edge_targets: Vec<NodeId>,
    edge_weights: Vec<f64>,
    edge_sources: Vec<NodeId>,
}

impl RateGraph {
    /// Builds the graph from a rate table.
    ///
    /// The vertex set is the union of the table's row and column keys, so a
    /// currency that only ever appears as a quote target still becomes a
    /// node. Diagonal cells are ignored and missing cells produce no edge.
    ///
    /// # Errors
    /// `Error::InvalidRate` for any cell that is zero, negative, or
    /// non-finite. The failure surfaces here, before any search runs, so a
    /// bad quote can never turn into a NaN or infinite weight.
    pub fn from_table(table: &RateTable) -> Result<Self, Error> {
        let symbols = table.currencies();
        let ids: HashMap<String, NodeId> = symbols
            .iter()
            .enumerate()
            .map(|(id, symbol)| (symbol.clone(), id))
            .collect();

        // Table iteration is sorted by (from, to), so edges arrive already
        // grouped by source node and the CSR build preserves that order.
        let mut edges: Vec<(NodeId, NodeId, f64)> = Vec::new();
        for (from, to, rate) in table.iter() {
            if from == to {
                continue;
            }
            if !rate.is_finite() || rate <= 0.0 {
                return Err(Error::InvalidRate {
                    from: from.to_string(),
                    to: to.to_string(),
                    rate,
                });
            }
            edges.push((ids[from], ids[to], rate));
        }

        let num_nodes = symbols.len();
        let mut node_pointers = vec![0usize; num_nodes + 1];
        for &(u, _, _) in &edges {
            node_pointers[u + 1] += 1;
        }
        for i in 1..=num_nodes {
            node_pointers[i] += node_pointers[i - 1];
        }

        let m = edges.len();
        let mut edge_targets = vec![0; m];
        let mut edge_weights = vec![0.0; m];
        let mut edge_sources = vec![0; m];
        let mut cursor = node_pointers.clone();
        for &(u, v, rate) in &edges {
            let pos = cursor[u];
            edge_targets[pos] = v;
            edge_weights[pos] = -rate.ln();
            edge_sources[pos] = u;
            cursor[u] += 1;
        }

        debug!(nodes = num_nodes, edges = m, "rate graph built");

        Ok(Self {
            symbols,
            ids,
            node_pointers,
            edge_targets,
            edge_weights,
            edge_sources,
        })
    }

    pub fn node_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_targets.len()
    }

    /// All currency codes, sorted; `symbols()[id]` is the code of node `id`.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn node_id(&self, symbol: &str) -> Option<NodeId> {
        self.ids.get(symbol).copied()
    }

    pub fn symbol(&self, node: NodeId) -> &str {
        &self.symbols[node]
    }

    /// Full edge iteration as `(source, target, weight)` in a fixed order.
    /// The solver's "first relaxable edge" determinism leans on this.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, f64)> {
        (0..self.edge_targets.len())
            .map(|i| (self.edge_sources[i], self.edge_targets[i], self.edge_weights[i]))
    }

    /// Outgoing edges of `node` as `(target, weight)`.
    pub fn outgoing(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64)> {
        let start = self.node_pointers[node];
        let end = self.node_pointers[node + 1];
        (start..end).map(|i| (self.edge_targets[i], self.edge_weights[i]))
    }

    /// Weight of the edge `from -> to`, if the graph has one.
    pub fn weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.outgoing(from)
            .find(|&(target, _)| target == to)
            .map(|(_, weight)| weight)
    }
}
