use common::types::{Outcome, ScanReport};

/// Prints a scan report to stdout.
pub fn print_report(report: &ScanReport) {
    match &report.outcome {
        Outcome::NoArbitrage => {
            println!("No arbitrage opportunities");
        }
        Outcome::ArbitrageFound(opportunities) => {
            println!("ARBITRAGE FOUND");
            println!("{}", "=".repeat(15));
            for opp in opportunities {
                let tag = if opp.marginal { " (marginal)" } else { "" };
                println!("Path: {}", opp.cycle);
                println!("{:+.4}%{}\n", opp.fraction * 100.0, tag);
            }
        }
    }

    for failure in &report.failed_seeds {
        println!("Skipped seed: {}", failure);
    }
}
