use std::cmp::Ordering;

use common::{
    error::Error,
    types::{Opportunity, Outcome, ScanReport},
};
use tracing::debug;

use crate::graph::RateGraph;
use crate::solver::BellmanFord;
use crate::sweep::{CancelToken, SeedPolicy, sweep};
use crate::table::RateTable;
use crate::valuation::{DEFAULT_EPSILON, evaluate};

/// Options for one scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub policy: SeedPolicy,
    /// Gains below this are flagged marginal rather than asserted
    /// profitable.
    pub epsilon: f64,
    pub cancel: CancelToken,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            policy: SeedPolicy::Exhaustive,
            epsilon: DEFAULT_EPSILON,
            cancel: CancelToken::new(),
        }
    }
}

/// Full pipeline over one rate table: graph construction, per-seed sweep,
/// rotation-invariant dedup, valuation.
///
/// Pure apart from tracing output; nothing persists between calls and
/// nothing is retried. Invalid rates fail construction before any solver
/// run starts, and the absence of arbitrage is a value, never an error.
pub fn find_arbitrage(table: &RateTable, options: &ScanOptions) -> Result<ScanReport, Error> {
    let graph = RateGraph::from_table(table)?;
    let swept = sweep(&graph, &BellmanFord, &options.policy, &options.cancel)?;

    let mut opportunities = Vec::with_capacity(swept.cycles.len());
    for cycle in swept.cycles {
        let valuation = evaluate(&cycle, &graph, options.epsilon)?;
        debug!(%cycle, fraction = valuation.fraction, "negative cycle valued");
        opportunities.push(Opportunity {
            cycle,
            fraction: valuation.fraction,
            marginal: valuation.marginal,
        });
    }

    // Most profitable first.
    opportunities.sort_by(|a, b| {
        b.fraction
            .partial_cmp(&a.fraction)
            .unwrap_or(Ordering::Equal)
    });

    let outcome = if opportunities.is_empty() {
        Outcome::NoArbitrage
    } else {
        Outcome::ArbitrageFound(opportunities)
    };

    Ok(ScanReport {
        outcome,
        failed_seeds: swept.failed_seeds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RateTable;

    fn table_from(cells: &[(&str, &str, f64)]) -> RateTable {
        let mut table = RateTable::new();
        for &(from, to, rate) in cells {
            table.insert(from, to, rate);
        }
        table
    }

    #[test]
    fn losing_round_trip_reports_no_arbitrage() {
        let table = table_from(&[
            ("USDT", "BTC", 0.00002),
            ("BTC", "ETH", 15.0),
            ("ETH", "USDT", 1600.0),
        ]);

        let report = find_arbitrage(&table, &ScanOptions::default()).unwrap();
        assert_eq!(report.outcome, Outcome::NoArbitrage);
        assert!(report.failed_seeds.is_empty());
    }

    #[test]
    fn profitable_triangle_is_reported_with_its_fraction() {
        let table = table_from(&[
            ("USDT", "BTC", 0.00002),
            ("BTC", "ETH", 15.0),
            ("ETH", "USDT", 3500.0),
        ]);

        let report = find_arbitrage(&table, &ScanOptions::default()).unwrap();
        let Outcome::ArbitrageFound(opportunities) = report.outcome else {
            panic!("expected arbitrage");
        };

        assert_eq!(opportunities.len(), 1);
        let opp = &opportunities[0];
        assert!((opp.fraction - 0.05).abs() < 1e-6);
        assert!(!opp.marginal);
        assert_eq!(opp.cycle.to_string(), "BTC -> ETH -> USDT -> BTC");
    }

    #[test]
    fn invalid_rate_fails_before_any_search() {
        for bad in [0.0, -1.0] {
            let table = table_from(&[
                ("USDT", "BTC", 0.00002),
                ("BTC", "ETH", bad),
                ("ETH", "USDT", 3500.0),
            ]);

            assert!(matches!(
                find_arbitrage(&table, &ScanOptions::default()),
                Err(Error::InvalidRate { .. })
            ));
        }
    }

    #[test]
    fn missing_cell_degrades_to_no_arbitrage() {
        // The profitable triangle minus its BTC -> ETH leg.
        let table = table_from(&[("USDT", "BTC", 0.00002), ("ETH", "USDT", 3500.0)]);

        let report = find_arbitrage(&table, &ScanOptions::default()).unwrap();
        assert_eq!(report.outcome, Outcome::NoArbitrage);
    }

    #[test]
    fn targeted_scan_reports_unknown_seed_and_still_finds_the_rest() {
        let table = table_from(&[
            ("USDT", "BTC", 0.00002),
            ("BTC", "ETH", 15.0),
            ("ETH", "USDT", 3500.0),
        ]);
        let options = ScanOptions {
            policy: SeedPolicy::Targeted(vec!["XRP".into(), "USDT".into()]),
            ..Default::default()
        };

        let report = find_arbitrage(&table, &options).unwrap();
        assert_eq!(report.failed_seeds, vec![Error::NodeNotFound("XRP".into())]);
        assert!(matches!(report.outcome, Outcome::ArbitrageFound(_)));
    }

    #[test]
    fn opportunities_come_out_most_profitable_first() {
        // Two disconnected profitable pairs with different gains.
        let table = table_from(&[
            ("AAA", "BBB", 1.10),
            ("BBB", "AAA", 1.00),
            ("CCC", "DDD", 1.50),
            ("DDD", "CCC", 1.00),
        ]);

        let report = find_arbitrage(&table, &ScanOptions::default()).unwrap();
        let Outcome::ArbitrageFound(opportunities) = report.outcome else {
            panic!("expected arbitrage");
        };

        assert_eq!(opportunities.len(), 2);
        assert!(opportunities[0].fraction >= opportunities[1].fraction);
        assert!((opportunities[0].fraction - 0.50).abs() < 1e-9);
    }
}
