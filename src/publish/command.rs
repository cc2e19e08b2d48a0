use std::path::Path;
use std::process::Command;

use anyhow::Context;

use super::Publisher;

/// Publishes by invoking an external command with the artifact path appended
/// as the final argument. The command's trimmed stdout is the reference
/// locator (an upload script printing a URL, typically).
pub struct CommandPublisher {
    program: String,
    args: Vec<String>,
}

impl CommandPublisher {
    /// Split `command_line` on whitespace into program + leading arguments.
    pub fn new(command_line: &str) -> Self {
        let mut parts = command_line.split_whitespace().map(String::from);
        let program = parts.next().unwrap_or_default();
        Self {
            program,
            args: parts.collect(),
        }
    }
}

impl Publisher for CommandPublisher {
    fn publish(&mut self, artifact: &Path) -> anyhow::Result<String> {
        if self.program.is_empty() {
            anyhow::bail!("empty publish command");
        }
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(artifact)
            .output()
            .with_context(|| format!("spawn publish command '{}'", self.program))?;
        if !output.status.success() {
            anyhow::bail!("publish command exited with {}", output.status);
        }
        let reference = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if reference.is_empty() {
            anyhow::bail!("publish command produced no locator");
        }
        Ok(reference)
    }
}
