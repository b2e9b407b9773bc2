use std::fmt;

use crate::error::Error;

/// A closed walk through the rate graph: the first and last currency are
/// equal and every consecutive pair is a directed edge.
///
/// Construction rotates the walk into canonical form (lexicographically
/// smallest currency first, direction preserved), so two cycles that differ
/// only by starting offset compare equal while a cycle and its reverse stay
/// distinct. Equality and hashing run over the canonical form, which is
/// what the sweep's deduplication relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cycle {
    /// Closed canonical sequence: `vertices[0] == vertices[last]`.
    vertices: Vec<String>,
}

impl Cycle {
    /// Builds a cycle from a closed vertex sequence (`first == last`).
    ///
    /// Returns `None` for open walks and for length-1 artifacts such as a
    /// self-loop recovered from a degenerate predecessor chain.
    pub fn from_closed_walk(walk: Vec<String>) -> Option<Self> {
        if walk.len() < 3 || walk.first() != walk.last() {
            return None;
        }

        let mut open = walk;
        open.pop();

        let pivot = open
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.cmp(b))
            .map(|(i, _)| i)?;
        open.rotate_left(pivot);

        let mut vertices = open;
        vertices.push(vertices[0].clone());
        Some(Cycle { vertices })
    }

    /// Closed vertex sequence in canonical rotation.
    pub fn vertices(&self) -> &[String] {
        &self.vertices
    }

    /// Number of conversions (edges) in the cycle.
    pub fn hop_count(&self) -> usize {
        self.vertices.len() - 1
    }

    /// Consecutive `(from, to)` pairs along the cycle.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vertices
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.vertices.join(" -> "))
    }
}

/// One deduplicated negative cycle together with its valuation.
#[derive(Debug, Clone, PartialEq)]
pub struct Opportunity {
    pub cycle: Cycle,
    /// Net fractional gain from converting one unit of the starting
    /// currency around the full cycle.
    pub fraction: f64,
    /// Set when the gain sits below the caller's epsilon: the detection
    /// compares floating-point sums with strict `<`, so a reported cycle
    /// can be noise rather than genuine profit.
    pub marginal: bool,
}

/// Enumerated result of a scan. "No arbitrage" is an ordinary value.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    NoArbitrage,
    /// Unique profitable cycles, most profitable first.
    ArbitrageFound(Vec<Opportunity>),
}

/// Everything a scan produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    pub outcome: Outcome,
    /// Per-seed `NodeNotFound` failures from a targeted sweep. The
    /// remaining seeds still ran and contributed to `outcome`.
    pub failed_seeds: Vec<Error>,
}
