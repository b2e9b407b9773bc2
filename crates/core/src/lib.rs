pub mod graph;
pub mod scan;
pub mod solver;
pub mod sweep;
pub mod table;
pub mod traits;
pub mod valuation;

pub use common::{Cycle, Error, Opportunity, Outcome, ScanReport};
pub use graph::{NodeId, RateGraph};
pub use scan::{ScanOptions, find_arbitrage};
pub use solver::BellmanFord;
pub use sweep::{CancelToken, SeedPolicy, SweepResult, sweep};
pub use table::RateTable;
pub use valuation::{DEFAULT_EPSILON, Valuation, evaluate};
