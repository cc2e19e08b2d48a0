use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SnapshotConfig {
    pub dir: PathBuf,
    /// Suppress candidate deletion after comparisons (debugging aid).
    #[serde(rename = "keepCandidates")]
    pub keep_candidates: bool,
}
impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("snapshots"),
            keep_candidates: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub ticks: u64,
    #[serde(rename = "captureInterval")]
    pub capture_interval: u64,
    /// RMSE distortion above this value fails a comparison. Absorbs
    /// antialiasing and float jitter; 0 demands pixel-identical output.
    pub tolerance: f64,
}
impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: 70,
            capture_interval: 4,
            tolerance: 0.1,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PublishConfig {
    pub enabled: bool,
    /// External command invoked as `<command...> <artifact-path>`; trimmed
    /// stdout is taken as the reference locator.
    pub command: String,
}
impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: String::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct HarnessConfig {
    pub snapshot: SnapshotConfig,
    pub run: RunConfig,
    pub publish: PublishConfig,
}

impl HarnessConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.run.ticks == 0 {
            w.push("run.ticks is 0; nothing will be sampled".into());
        }
        if self.run.capture_interval == 0 {
            w.push("run.captureInterval 0 -> treated as every tick".into());
        }
        if self.run.capture_interval > self.run.ticks && self.run.ticks > 1 {
            w.push(format!(
                "run.captureInterval {} exceeds run.ticks {}; only tick 0 is observed",
                self.run.capture_interval, self.run.ticks
            ));
        }
        if self.run.tolerance < 0.0 {
            w.push(format!(
                "run.tolerance {} negative -> every nonzero distortion fails",
                self.run.tolerance
            ));
        } else if self.run.tolerance >= 1.0 {
            w.push(format!(
                "run.tolerance {} at or above the metric ceiling; comparisons can never fail",
                self.run.tolerance
            ));
        }
        if self.publish.enabled && self.publish.command.trim().is_empty() {
            w.push("publish.enabled set but publish.command is empty".into());
        }
        if self.snapshot.keep_candidates {
            w.push("snapshot.keepCandidates set; candidate files will accumulate".into());
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_quiet() {
        assert!(HarnessConfig::default().validate().is_empty());
    }

    #[test]
    fn parses_partial_ron() {
        let cfg: HarnessConfig =
            ron::from_str(r#"(run: (ticks: 12, tolerance: 0.05), snapshot: (dir: "shots"))"#)
                .unwrap();
        assert_eq!(cfg.run.ticks, 12);
        assert_eq!(cfg.run.capture_interval, 4); // untouched default
        assert_eq!(cfg.snapshot.dir, PathBuf::from("shots"));
    }

    #[test]
    fn validate_flags_bad_values() {
        let mut cfg = HarnessConfig::default();
        cfg.run.ticks = 0;
        cfg.run.tolerance = 1.5;
        cfg.publish.enabled = true;
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.contains("run.ticks")));
        assert!(warnings.iter().any(|w| w.contains("metric ceiling")));
        assert!(warnings.iter().any(|w| w.contains("publish.command")));
    }

    #[test]
    fn load_missing_file_falls_back() {
        let (cfg, err) = HarnessConfig::load_or_default("does/not/exist.ron");
        assert_eq!(cfg, HarnessConfig::default());
        assert!(err.is_some());
    }
}
