pub mod error;
pub mod types;

pub use error::Error;
pub use types::{Cycle, Opportunity, Outcome, ScanReport};
