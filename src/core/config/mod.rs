pub mod config;

pub use config::{HarnessConfig, PublishConfig, RunConfig, SnapshotConfig};
