//! Orchestration of a sampled regression run.
//!
//! Drives the producer tick by tick, captures frames on observation ticks,
//! reconciles them against stored baselines and aggregates the outcomes.
//! Single-threaded and sequential; a producer failure aborts the run, and
//! flakiness is absorbed by the distortion tolerance, never by re-running.

use std::path::Path;

use tracing::{info, warn};

#[cfg(feature = "debug")]
use tracing::debug;

use crate::compare::differ::compare;
use crate::core::error::{HarnessError, Result};
use crate::producer::FrameProducer;
use crate::publish::Publisher;
use crate::runner::report::{Outcome, RunRecord, RunResult};
use crate::sampler::FrameCadence;
use crate::snapshot::store::exists;
use crate::snapshot::{Identity, SnapshotStore};

pub struct RegressionRunner {
    store: SnapshotStore,
    tolerance: f64,
    publisher: Option<Box<dyn Publisher>>,
}

impl RegressionRunner {
    pub fn new(store: SnapshotStore, tolerance: f64) -> Self {
        Self {
            store,
            tolerance,
            publisher: None,
        }
    }

    pub fn with_publisher(mut self, publisher: Box<dyn Publisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn store_mut(&mut self) -> &mut SnapshotStore {
        &mut self.store
    }

    /// Drive `producer` for `total_ticks` ticks, capturing a tick-identified
    /// snapshot at every observation point the cadence fires.
    pub fn run<P: FrameProducer>(
        &mut self,
        producer: &mut P,
        total_ticks: u64,
        cadence: &mut FrameCadence<P>,
    ) -> Result<RunResult> {
        let mut records = Vec::new();
        for tick in 0..total_ticks {
            if !producer.is_running() {
                info!("producer stopped at tick {tick}; ending run early");
                break;
            }
            producer
                .step()
                .map_err(|source| HarnessError::Producer { tick, source })?;
            #[cfg(feature = "debug")]
            debug!("tick {tick}/{total_ticks}");
            cadence.tick(tick, producer, |index, producer| {
                let record = self.observe(Identity::tick(index), producer)?;
                records.push(record);
                Ok(())
            })?;
        }

        let result = RunResult { records };
        let failed = result.failures().count();
        if failed > 0 {
            warn!(
                "run finished: {failed} of {} sampled frames failed",
                result.records.len()
            );
        } else {
            info!(
                "run finished: all {} sampled frames passed",
                result.records.len()
            );
        }
        Ok(result)
    }

    /// Single-shot, name-keyed verification of the producer's current frame.
    pub fn verify_case<P: FrameProducer>(
        &mut self,
        case_name: &str,
        producer: &mut P,
    ) -> Result<RunRecord> {
        self.observe(Identity::from_case_name(case_name), producer)
    }

    /// Per-identity lifecycle: `NoBaseline -> BaselineWritten` (terminal
    /// pass) or `BaselinePresent -> Compared -> {Passed | Failed}`.
    fn observe<P: FrameProducer>(
        &mut self,
        identity: Identity,
        producer: &mut P,
    ) -> Result<RunRecord> {
        let baseline = self.store.baseline_path(&identity);
        if !exists(&baseline) {
            self.store.capture(producer, &baseline)?;
            info!("baseline recorded for {identity}: {}", baseline.display());
            return Ok(RunRecord {
                identity,
                outcome: Outcome::FirstBaseline,
            });
        }

        let candidate = self.store.candidate_path(&identity)?;
        if let Err(e) = self.store.capture(producer, &candidate) {
            // don't leave a partial candidate behind on abort
            let _ = self.store.discard_candidate(&candidate);
            return Err(e);
        }
        let comparison = compare(&baseline, &candidate);

        let outcome = if comparison.exceeds(self.tolerance) {
            let distortion = comparison.distortion();
            warn!("{identity} differs from baseline: {comparison:?}");
            // Candidate must still be on disk while the publisher runs.
            let artifact = self.publish_artifact(&candidate);
            Outcome::Failed {
                distortion,
                artifact,
            }
        } else {
            Outcome::Passed
        };

        self.store.discard_candidate(&candidate)?;
        Ok(RunRecord { identity, outcome })
    }

    fn publish_artifact(&mut self, candidate: &Path) -> Option<String> {
        let publisher = self.publisher.as_mut()?;
        match publisher.publish(candidate) {
            Ok(reference) => {
                info!("published {} -> {reference}", candidate.display());
                Some(reference)
            }
            Err(e) => {
                warn!("artifact publish failed for {}: {e:#}", candidate.display());
                None
            }
        }
    }
}
