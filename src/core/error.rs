//! Error taxonomy for the harness.
//!
//! Comparison verdicts (unreadable image, dimension mismatch) are *not*
//! errors: they fail closed as comparison outcomes and flow through
//! `Comparison`. A missing baseline is not an error either; it selects the
//! baseline-creation path. Only conditions that abort a run live here.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Error, Debug)]
pub enum HarnessError {
    /// The frame producer crashed mid-run. Fatal, never retried.
    #[error("producer failed at tick {tick}: {source}")]
    Producer {
        tick: u64,
        #[source]
        source: anyhow::Error,
    },

    #[error("capture failed for {}: {source}", .path.display())]
    Capture {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no candidate recorded for '{identity}'; nothing to promote")]
    MissingCandidate { identity: String },

    /// Candidate naming kept colliding with existing baseline files even
    /// after suffix escalation. The snapshot directory needs manual cleanup.
    #[error("could not find a free candidate path for '{identity}'")]
    CandidateCollision { identity: String },
}
