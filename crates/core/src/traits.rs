use common::{error::Error, types::Cycle};

use crate::graph::RateGraph;

/// A single-source negative-cycle search over a rate graph.
///
/// The sweep is generic over this seam so an alternative solver can satisfy
/// the same contract without touching aggregation or valuation.
pub trait CycleFinder {
    /// Finds one witness negative cycle reachable from `source`, or `None`
    /// once every edge is fully relaxed.
    ///
    /// # Errors
    /// `Error::NodeNotFound` when `source` is not a vertex of the graph.
    fn find_cycle(&self, graph: &RateGraph, source: &str) -> Result<Option<Cycle>, Error>;
}
