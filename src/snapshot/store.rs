//! On-disk layout and lifecycle for baseline/candidate image pairs.
//!
//! Baselines persist indefinitely at `<dir>/<stem>.png`. Candidates are
//! ephemeral: `<dir>/new_<stem>.png` for tick identities, `<dir>/<stem>_new.png`
//! for named ones, deleted after every comparison unless retention is
//! configured. The automatic run path never writes over an existing baseline.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::error::{HarnessError, Result};
use crate::producer::FrameProducer;
use crate::snapshot::identity::Identity;

/// True iff `path` denotes an existing regular file (symlinks resolved, so a
/// dangling link or a directory does not count).
pub fn exists(path: &Path) -> bool {
    path.is_file()
}

pub struct SnapshotStore {
    dir: PathBuf,
    keep_candidates: bool,
    /// Candidate files this store wrote, so path resolution can tell its own
    /// leftovers apart from foreign baselines with colliding stems.
    written: HashSet<PathBuf>,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            keep_candidates: false,
            written: HashSet::new(),
        }
    }

    pub fn with_keep_candidates(mut self, keep: bool) -> Self {
        self.keep_candidates = keep;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn baseline_path(&self, identity: &Identity) -> PathBuf {
        self.dir.join(format!("{}.png", identity.file_stem()))
    }

    fn conventional_candidate_stem(identity: &Identity) -> String {
        match identity {
            Identity::Tick(_) => format!("new_{}", identity.file_stem()),
            Identity::Named(stem) => format!("{stem}_new"),
        }
    }

    /// Resolve the candidate path for `identity`. If the conventional path is
    /// occupied by a file this run did not write (a baseline whose stem
    /// happens to collide), escalate with a further `_new` suffix instead of
    /// overwriting it.
    pub fn candidate_path(&self, identity: &Identity) -> Result<PathBuf> {
        let mut stem = Self::conventional_candidate_stem(identity);
        for _ in 0..8 {
            let path = self.dir.join(format!("{stem}.png"));
            if !exists(&path) || self.written.contains(&path) {
                return Ok(path);
            }
            debug!(
                "candidate path {} collides with an existing file; escalating",
                path.display()
            );
            stem.push_str("_new");
        }
        Err(HarnessError::CandidateCollision {
            identity: identity.file_stem(),
        })
    }

    /// Write the producer's current frame to `path`, creating the snapshot
    /// directory on demand. Overwrites unconditionally; callers guard the
    /// baseline slot.
    pub fn capture<P: FrameProducer + ?Sized>(
        &mut self,
        producer: &mut P,
        path: &Path,
    ) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|source| HarnessError::Io {
            path: self.dir.clone(),
            source,
        })?;
        producer
            .capture_frame(path)
            .map_err(|source| HarnessError::Capture {
                path: path.to_path_buf(),
                source,
            })?;
        self.written.insert(path.to_path_buf());
        Ok(())
    }

    /// Remove a candidate after its comparison, pass or fail. A no-op when
    /// candidate retention is configured or the file is already gone.
    pub fn discard_candidate(&mut self, path: &Path) -> Result<()> {
        if self.keep_candidates {
            debug!("retaining candidate {} (keepCandidates)", path.display());
            return Ok(());
        }
        self.written.remove(path);
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(HarnessError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Explicit manual accept: move the recorded candidate into the baseline
    /// slot. This is the only operation allowed to replace a baseline.
    pub fn promote(&mut self, identity: &Identity) -> Result<PathBuf> {
        let candidate = self
            .dir
            .join(format!("{}.png", Self::conventional_candidate_stem(identity)));
        if !exists(&candidate) {
            return Err(HarnessError::MissingCandidate {
                identity: identity.file_stem(),
            });
        }
        let baseline = self.baseline_path(identity);
        fs::rename(&candidate, &baseline).map_err(|source| HarnessError::Io {
            path: candidate.clone(),
            source,
        })?;
        self.written.remove(&candidate);
        info!("promoted {} -> {}", candidate.display(), baseline.display());
        Ok(baseline)
    }

    /// Sweep stray candidate files left behind by aborted runs. Returns the
    /// number of files removed.
    pub fn clean(&mut self) -> Result<usize> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(HarnessError::Io {
                    path: self.dir.clone(),
                    source,
                })
            }
        };
        let mut removed = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if !is_candidate_file(&path) {
                continue;
            }
            fs::remove_file(&path).map_err(|source| HarnessError::Io {
                path: path.clone(),
                source,
            })?;
            self.written.remove(&path);
            debug!("removed stray candidate {}", path.display());
            removed += 1;
        }
        Ok(removed)
    }
}

fn is_candidate_file(path: &Path) -> bool {
    if !exists(path) || path.extension().and_then(|e| e.to_str()) != Some("png") {
        return false;
    }
    match path.file_stem().and_then(|s| s.to_str()) {
        Some(stem) => stem.starts_with("new_") || stem.ends_with("_new"),
        None => false,
    }
}
