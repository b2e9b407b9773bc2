use std::collections::{BTreeMap, BTreeSet};

/// A rectangular table of quoted exchange rates keyed by two currency-code
/// axes. Cell `(from, to)` holds "units of `to` obtainable per unit of
/// `from`".
///
/// Cells may be missing; a missing cell simply produces no edge downstream.
/// Rates are not assumed symmetric: `(from, to)` and the inverse of
/// `(to, from)` can differ because quotes carry a bid/ask spread.
///
/// The table itself does no validation. `RateGraph::from_table` is the
/// gate that rejects zero, negative, and non-finite rates.
///
/// Backed by `BTreeMap` so cell iteration (and therefore edge order in the
/// graph and the solver) is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateTable {
    cells: BTreeMap<String, BTreeMap<String, f64>>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the quoted rate for `(from, to)`, replacing any earlier quote.
    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>, rate: f64) {
        self.cells
            .entry(from.into())
            .or_default()
            .insert(to.into(), rate);
    }

    pub fn get(&self, from: &str, to: &str) -> Option<f64> {
        self.cells.get(from).and_then(|row| row.get(to)).copied()
    }

    /// Sorted union of the row and column keys.
    pub fn currencies(&self) -> Vec<String> {
        let mut set: BTreeSet<&str> = BTreeSet::new();
        for (from, row) in &self.cells {
            set.insert(from);
            for to in row.keys() {
                set.insert(to);
            }
        }
        set.into_iter().map(str::to_string).collect()
    }

    /// Defined cells as `(from, to, rate)`, sorted by both axes.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.cells.iter().flat_map(|(from, row)| {
            row.iter()
                .map(move |(to, &rate)| (from.as_str(), to.as_str(), rate))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
