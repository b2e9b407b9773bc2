use common::{error::Error, types::Cycle};

use crate::graph::RateGraph;

/// Default threshold below which a detected gain is flagged as numerically
/// marginal. Detection compares floating-point sums of logarithms with
/// strict `<`, so a "negative" cycle can carry a gain arbitrarily close to
/// zero.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Valuation of one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Valuation {
    /// Net fractional gain from converting one unit of the starting
    /// currency around the full cycle: `exp(-total_weight) - 1`.
    pub fraction: f64,
    /// The gain sits below the caller's epsilon; treat it as noise, not as
    /// asserted profit.
    pub marginal: bool,
}

/// Sums the `-ln(rate)` weights along `cycle` and maps the total back to a
/// fraction. Pure: identical inputs always yield the identical fraction.
///
/// # Errors
/// `Error::MissingEdge` when the cycle uses an edge the graph lacks, which
/// means the cycle was recovered against a different graph.
pub fn evaluate(cycle: &Cycle, graph: &RateGraph, epsilon: f64) -> Result<Valuation, Error> {
    let mut total = 0.0;
    for (from, to) in cycle.edges() {
        let weight = graph
            .node_id(from)
            .zip(graph.node_id(to))
            .and_then(|(u, v)| graph.weight(u, v))
            .ok_or_else(|| Error::MissingEdge {
                from: from.to_string(),
                to: to.to_string(),
            })?;
        total += weight;
    }

    let fraction = (-total).exp() - 1.0;
    Ok(Valuation {
        fraction,
        marginal: fraction < epsilon,
    })
}
