pub mod report;
pub mod runner;

pub use report::{Outcome, RunRecord, RunResult};
pub use runner::RegressionRunner;
