//! Artifact publishing for failing comparisons.
//!
//! Publishing is best-effort: a failure here degrades the failure message
//! (no reference locator) but never blocks reporting the distortion itself.

pub mod command;

use std::path::Path;

pub use command::CommandPublisher;

/// Black-box `publish(path) -> reference` collaborator. May be slow or fail.
pub trait Publisher {
    fn publish(&mut self, artifact: &Path) -> anyhow::Result<String>;
}

/// Publisher that drops every artifact. Useful where a failure report without
/// links is acceptable, and as a test stand-in.
pub struct NoopPublisher;

impl Publisher for NoopPublisher {
    fn publish(&mut self, _artifact: &Path) -> anyhow::Result<String> {
        anyhow::bail!("publishing disabled")
    }
}
