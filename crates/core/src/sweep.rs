use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use common::{error::Error, types::Cycle};
use tracing::{debug, warn};

use crate::graph::RateGraph;
use crate::traits::CycleFinder;

/// Which vertices to run the finder from.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedPolicy {
    /// One run per vertex. Surfaces every negative cycle that is the
    /// recovered witness of at least one seed, which is still not a formal
    /// enumeration of all negative cycles in the graph.
    Exhaustive,
    /// Runs only from the given currencies, intended for the
    /// high-liquidity codes that touch most of the graph.
    Targeted(Vec<String>),
}

/// Cooperative cancellation flag shared with a running sweep.
///
/// Exhaustive sweeps cost O(V) solver runs of O(V*E) each; a caller can
/// flip this token from another thread to abort one that has grown too
/// expensive. The sweep checks it between seeds and fails with
/// `Error::Cancelled`.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Deduplicated witnesses plus the seeds that could not run.
#[derive(Debug, Default)]
pub struct SweepResult {
    /// Unique witness cycles in seed order of first discovery.
    pub cycles: Vec<Cycle>,
    /// `NodeNotFound` per targeted seed absent from the graph. The other
    /// seeds still ran.
    pub failed_seeds: Vec<Error>,
}

/// Runs `finder` once per seed and deduplicates the witnesses by their
/// canonical rotation.
///
/// Seed runs are independent: each owns its distance and predecessor state
/// and only reads the shared immutable graph, so they fan out across the
/// rayon pool. The merge below is the single coordination point.
///
/// Targeted seeds are validated against the vertex set before any run
/// starts; absent ones are collected into `failed_seeds` instead of
/// aborting the sweep. An empty targeted list is `Error::EmptySeedList`.
pub fn sweep<F>(
    graph: &RateGraph,
    finder: &F,
    policy: &SeedPolicy,
    cancel: &CancelToken,
) -> Result<SweepResult, Error>
where
    F: CycleFinder + Sync,
{
    let mut failed_seeds = Vec::new();
    let seeds: Vec<&str> = match policy {
        SeedPolicy::Exhaustive => graph.symbols().iter().map(String::as_str).collect(),
        SeedPolicy::Targeted(list) => {
            if list.is_empty() {
                return Err(Error::EmptySeedList);
            }
            let mut valid = Vec::with_capacity(list.len());
            for seed in list {
                if graph.node_id(seed).is_some() {
                    valid.push(seed.as_str());
                } else {
                    warn!(seed = %seed, "seed not present in rate graph, skipping");
                    failed_seeds.push(Error::NodeNotFound(seed.clone()));
                }
            }
            valid
        }
    };

    let witnesses: Vec<Result<Option<Cycle>, Error>> = seeds
        .par_iter()
        .map(|seed| {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            finder.find_cycle(graph, seed)
        })
        .collect();

    let mut seen: HashSet<Cycle> = HashSet::new();
    let mut cycles = Vec::new();
    for witness in witnesses {
        if let Some(cycle) = witness? {
            if seen.insert(cycle.clone()) {
                cycles.push(cycle);
            }
        }
    }

    debug!(
        unique = cycles.len(),
        skipped = failed_seeds.len(),
        "seed sweep merged"
    );

    Ok(SweepResult {
        cycles,
        failed_seeds,
    })
}
