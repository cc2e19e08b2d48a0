//! Structured run outcomes.
//!
//! The runner reports through a result value rather than by throwing across
//! component boundaries; a test framework translates a failing `RunResult`
//! into its native assertion mechanism.

use serde::Serialize;

use crate::snapshot::Identity;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Outcome {
    /// Baseline existed and the candidate stayed within tolerance.
    Passed,
    /// No baseline yet; this run established ground truth.
    FirstBaseline,
    /// Candidate exceeded tolerance (or comparison failed closed).
    Failed {
        distortion: f64,
        /// Publisher-provided locator, absent when publishing was off or failed.
        artifact: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRecord {
    pub identity: Identity,
    pub outcome: Outcome,
}

impl RunRecord {
    pub fn failure_message(&self) -> Option<String> {
        match &self.outcome {
            Outcome::Failed {
                distortion,
                artifact,
            } => {
                let mut msg = format!(
                    "Rendered images do not match. {:.2}% distortion after frame {}.",
                    distortion * 100.0,
                    self.identity
                );
                if let Some(reference) = artifact {
                    msg.push_str(&format!(" Uploaded artifact to {reference}."));
                }
                Some(msg)
            }
            _ => None,
        }
    }
}

/// Ordered per-identity outcomes of one run. The run fails overall iff any
/// entry is `Failed`.
#[derive(Debug, Default, Serialize)]
pub struct RunResult {
    pub records: Vec<RunRecord>,
}

impl RunResult {
    pub fn passed(&self) -> bool {
        !self
            .records
            .iter()
            .any(|r| matches!(r.outcome, Outcome::Failed { .. }))
    }

    pub fn failures(&self) -> impl Iterator<Item = &RunRecord> {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Failed { .. }))
    }

    pub fn failure_messages(&self) -> Vec<String> {
        self.failures()
            .filter_map(RunRecord::failure_message)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_format() {
        let record = RunRecord {
            identity: Identity::tick(8),
            outcome: Outcome::Failed {
                distortion: 0.2,
                artifact: Some("https://host/abc".into()),
            },
        };
        assert_eq!(
            record.failure_message().unwrap(),
            "Rendered images do not match. 20.00% distortion after frame 8. \
             Uploaded artifact to https://host/abc."
        );
    }

    #[test]
    fn failure_message_without_artifact() {
        let record = RunRecord {
            identity: Identity::from_case_name("bloom pass"),
            outcome: Outcome::Failed {
                distortion: 0.15,
                artifact: None,
            },
        };
        assert_eq!(
            record.failure_message().unwrap(),
            "Rendered images do not match. 15.00% distortion after frame BloomPass."
        );
    }

    #[test]
    fn passing_records_have_no_message() {
        let record = RunRecord {
            identity: Identity::tick(0),
            outcome: Outcome::Passed,
        };
        assert!(record.failure_message().is_none());
    }

    #[test]
    fn overall_verdict() {
        let mut result = RunResult::default();
        result.records.push(RunRecord {
            identity: Identity::tick(0),
            outcome: Outcome::FirstBaseline,
        });
        assert!(result.passed());
        result.records.push(RunRecord {
            identity: Identity::tick(4),
            outcome: Outcome::Failed {
                distortion: 0.3,
                artifact: None,
            },
        });
        assert!(!result.passed());
        assert_eq!(result.failures().count(), 1);
    }
}
