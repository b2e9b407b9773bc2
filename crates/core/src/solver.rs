use common::{error::Error, types::Cycle};
use tracing::debug;

use crate::graph::{NodeId, RateGraph};
use crate::traits::CycleFinder;

/// Bellman-Ford with witness-cycle recovery.
///
/// A run owns its distance and predecessor vectors outright, reads nothing
/// but the shared immutable graph, and is therefore safe to execute from
/// many seeds concurrently.
///
/// Detection returns the *first* still-relaxable edge under the graph's
/// fixed edge order, which yields exactly one witness cycle per source, not
/// every cycle reachable from it.
pub struct BellmanFord;

impl BellmanFord {
    /// Walks predecessor pointers backward from `start`, recording the
    /// trail until some vertex repeats; the repeated vertex closes the
    /// cycle. The cyclic slice is reversed back into forward order.
    ///
    /// Degenerate recoveries (a broken predecessor chain, or a length-1
    /// artifact) come out as `None` rather than a fake cycle.
    fn recover_cycle(
        &self,
        graph: &RateGraph,
        start: NodeId,
        predecessor: &[Option<NodeId>],
    ) -> Option<Cycle> {
        let mut trail: Vec<NodeId> = Vec::new();
        let mut node = start;
        let closing = loop {
            trail.push(node);
            node = predecessor[node]?;
            if trail.contains(&node) {
                break node;
            }
        };

        let first = trail.iter().position(|&n| n == closing)?;
        trail.push(closing);

        let mut walk: Vec<String> = trail[first..]
            .iter()
            .map(|&n| graph.symbol(n).to_string())
            .collect();
        walk.reverse();

        Cycle::from_closed_walk(walk)
    }
}

impl CycleFinder for BellmanFord {
    fn find_cycle(&self, graph: &RateGraph, source: &str) -> Result<Option<Cycle>, Error> {
        let src = graph
            .node_id(source)
            .ok_or_else(|| Error::NodeNotFound(source.to_string()))?;

        let n = graph.node_count();
        let mut distance = vec![f64::INFINITY; n];
        let mut predecessor: Vec<Option<NodeId>> = vec![None; n];
        distance[src] = 0.0;

        // |V| - 1 full passes propagate every shortest simple-path distance
        // reachable from the source. An unreachable node keeps distance
        // +inf, and inf + w is never < inf for a finite w.
        for _ in 1..n {
            for (u, v, w) in graph.edges() {
                if distance[u] + w < distance[v] {
                    distance[v] = distance[u] + w;
                    predecessor[v] = Some(u);
                }
            }
        }

        // An edge that still relaxes proves a negative cycle is reachable
        // through its target.
        for (u, v, w) in graph.edges() {
            if distance[u] + w < distance[v] {
                debug!(
                    source,
                    via = graph.symbol(v),
                    "edge still relaxable after V-1 passes, recovering cycle"
                );
                return Ok(self.recover_cycle(graph, v, &predecessor));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RateTable;

    fn graph_from(cells: &[(&str, &str, f64)]) -> RateGraph {
        let mut table = RateTable::new();
        for &(from, to, rate) in cells {
            table.insert(from, to, rate);
        }
        RateGraph::from_table(&table).unwrap()
    }

    #[test]
    fn no_cycle_when_round_trip_loses_value() {
        // Product 0.00002 * 15 * 1600 = 0.48 < 1.
        let graph = graph_from(&[
            ("USDT", "BTC", 0.00002),
            ("BTC", "ETH", 15.0),
            ("ETH", "USDT", 1600.0),
        ]);

        for seed in ["USDT", "BTC", "ETH"] {
            assert_eq!(BellmanFord.find_cycle(&graph, seed).unwrap(), None);
        }
    }

    #[test]
    fn recovers_the_profitable_triangle() {
        // Product 0.00002 * 15 * 3500 = 1.05 > 1.
        let graph = graph_from(&[
            ("USDT", "BTC", 0.00002),
            ("BTC", "ETH", 15.0),
            ("ETH", "USDT", 3500.0),
        ]);

        let cycle = BellmanFord.find_cycle(&graph, "USDT").unwrap().unwrap();
        let expected: Vec<String> = ["BTC", "ETH", "USDT", "BTC"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(cycle.vertices(), expected.as_slice());

        // The weight sum along the witness is negative.
        let total: f64 = cycle
            .edges()
            .map(|(from, to)| {
                let u = graph.node_id(from).unwrap();
                let v = graph.node_id(to).unwrap();
                graph.weight(u, v).unwrap()
            })
            .sum();
        assert!(total < 0.0);
    }

    #[test]
    fn two_hop_spread_arbitrage_is_found() {
        // 1.10 * 0.95 = 1.045 > 1: crossing the spread still profits.
        let graph = graph_from(&[("EUR", "USD", 1.10), ("USD", "EUR", 0.95)]);

        let cycle = BellmanFord.find_cycle(&graph, "EUR").unwrap().unwrap();
        assert_eq!(cycle.hop_count(), 2);
    }

    #[test]
    fn missing_edge_is_never_fabricated() {
        // Same profitable triangle but BTC -> ETH removed: no path closes.
        let graph = graph_from(&[("USDT", "BTC", 0.00002), ("ETH", "USDT", 3500.0)]);

        for seed in ["USDT", "BTC", "ETH"] {
            assert_eq!(BellmanFord.find_cycle(&graph, seed).unwrap(), None);
        }
    }

    #[test]
    fn unknown_source_fails_with_node_not_found() {
        let graph = graph_from(&[("EUR", "USD", 1.08)]);

        let err = BellmanFord.find_cycle(&graph, "DOGE").unwrap_err();
        assert_eq!(err, Error::NodeNotFound("DOGE".into()));
    }

    #[test]
    fn cycle_unreachable_from_seed_is_still_reported_or_none() {
        // Disconnected profitable pair far from the seed's component.
        let graph = graph_from(&[
            ("AAA", "BBB", 1.0),
            ("EUR", "USD", 1.10),
            ("USD", "EUR", 0.95),
        ]);

        // From AAA the cycle is unreachable; the run must simply say none.
        assert_eq!(BellmanFord.find_cycle(&graph, "AAA").unwrap(), None);
        // From inside the component it is found.
        assert!(BellmanFord.find_cycle(&graph, "EUR").unwrap().is_some());
    }
}
