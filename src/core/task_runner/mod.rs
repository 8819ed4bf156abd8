//! Bounded task runner
//!
//! Caps how many generation and ledger tasks run at once and keeps counters
//! of active, completed and failed tasks.

mod runner;
mod types;


pub use runner::TaskRunner;
pub use types::TaskStats;
