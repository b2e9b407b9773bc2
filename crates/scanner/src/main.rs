mod config;
mod error;
mod report;
mod snapshot;

use std::env;
use std::process;

use tokio::time::{self, Duration};
use tracing_subscriber::EnvFilter;

use arb_scan_core::scan::{ScanOptions, find_arbitrage};
use arb_scan_core::sweep::SeedPolicy;

use error::Error;

enum Mode {
    Once(String),
    Watch(String),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mode = parse_args();
    let cfg = config::load_config().expect("Failed to load config");
    let options = scan_options(&cfg);

    match mode {
        Mode::Once(path) => {
            if let Err(e) = scan_once(&path, &options) {
                eprintln!("Scan failed: {}", e);
                process::exit(1);
            }
        }
        Mode::Watch(path) => watch(&path, &options, cfg.watch.interval_seconds).await,
    }
}

/// Parse command-line arguments to determine run mode
fn parse_args() -> Mode {
    let args: Vec<String> = env::args().collect();
    let mode = args
        .get(1)
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "once".to_string());

    let path = args
        .get(2)
        .cloned()
        .unwrap_or_else(|| "snapshot.csv".to_string());

    match mode.as_str() {
        "once" => Mode::Once(path),
        "watch" => Mode::Watch(path),
        _ => {
            eprintln!(
                "Usage: {} <once|watch> [path_to_snapshot]\n  - once: scan a snapshot and exit\n  - watch: re-scan the snapshot on an interval",
                args[0]
            );
            process::exit(1);
        }
    }
}

fn scan_options(cfg: &config::Config) -> ScanOptions {
    let policy = if cfg.scan.exhaustive || cfg.scan.seeds.is_empty() {
        SeedPolicy::Exhaustive
    } else {
        SeedPolicy::Targeted(cfg.scan.seeds.clone())
    };

    ScanOptions {
        policy,
        epsilon: cfg.scan.epsilon,
        ..Default::default()
    }
}

fn scan_once(path: &str, options: &ScanOptions) -> Result<(), Error> {
    let table = snapshot::load_snapshot(path)?;
    let report = find_arbitrage(&table, options)?;
    report::print_report(&report);
    Ok(())
}

/// Re-read and re-scan the snapshot on a fixed interval. A failed scan is
/// reported and the loop keeps going; the next tick may see a fixed file.
async fn watch(path: &str, options: &ScanOptions, interval_seconds: u64) {
    println!("Watching {} every {}s.", path, interval_seconds);

    let mut interval = time::interval(Duration::from_secs(interval_seconds));

    loop {
        interval.tick().await;
        if let Err(e) = scan_once(path, options) {
            eprintln!("Scan failed: {}. Continuing.", e);
        }
    }
}
