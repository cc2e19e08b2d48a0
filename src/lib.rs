pub mod compare;
pub mod core;
pub mod producer;
pub mod publish;
pub mod runner;
pub mod sampler;
pub mod snapshot;

// Curated re-exports
pub use compare::{compare, Comparison};
pub use crate::core::config::{HarnessConfig, PublishConfig, RunConfig, SnapshotConfig};
pub use crate::core::error::{HarnessError, Result};
pub use producer::{FrameProducer, ScrollerScene};
pub use publish::{CommandPublisher, NoopPublisher, Publisher};
pub use runner::{Outcome, RegressionRunner, RunRecord, RunResult};
pub use sampler::FrameCadence;
pub use snapshot::{Identity, SnapshotStore};
