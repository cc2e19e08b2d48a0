//! The opaque frame producer driven by the harness.

pub mod scroller;

use std::path::Path;

pub use scroller::ScrollerScene;

/// One stateful simulation/rendering pipeline, advanced tick by tick. The
/// harness never looks inside a producer; it only steps it, captures frames,
/// and checks the stop condition.
pub trait FrameProducer {
    /// Advance one simulation/render tick. An error is fatal for the run.
    fn step(&mut self) -> anyhow::Result<()>;

    /// Write the current framebuffer as a PNG at `path`.
    fn capture_frame(&mut self, path: &Path) -> anyhow::Result<()>;

    /// Stop condition, e.g. window-close. Checked before every tick.
    fn is_running(&self) -> bool;
}
