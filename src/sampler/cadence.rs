//! Periodic tick-based triggers.
//!
//! An entry registered with interval `n` fires on every tick where
//! `tick % n == 0`; tick 0 therefore fires every registered entry once.
//! Entries fire in registration order and nothing else reorders them, so a
//! fixed registration sequence and tick count always produces the same
//! invocation sequence.

use crate::core::error::Result;

type DriveAction<P> = Box<dyn FnMut(u64, &mut P)>;

enum Entry<P> {
    /// Capture/observation point; the runner decides what observing means.
    Observe,
    /// Arbitrary producer hook, e.g. forced input.
    Drive(DriveAction<P>),
}

pub struct FrameCadence<P> {
    entries: Vec<(u64, Entry<P>)>,
}

impl<P> FrameCadence<P> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register an observation point every `interval` ticks. Interval 0 is
    /// clamped to 1 (every tick).
    pub fn observe(&mut self, interval: u64) -> &mut Self {
        self.entries.push((interval.max(1), Entry::Observe));
        self
    }

    /// Register an arbitrary producer hook every `interval` ticks.
    pub fn drive<F>(&mut self, interval: u64, action: F) -> &mut Self
    where
        F: FnMut(u64, &mut P) + 'static,
    {
        self.entries.push((interval.max(1), Entry::Drive(Box::new(action))));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fire every entry whose interval divides `index`, in registration
    /// order. Observation entries are routed to `on_observe`.
    pub fn tick<F>(&mut self, index: u64, producer: &mut P, mut on_observe: F) -> Result<()>
    where
        F: FnMut(u64, &mut P) -> Result<()>,
    {
        for (interval, entry) in &mut self.entries {
            if index % *interval != 0 {
                continue;
            }
            match entry {
                Entry::Drive(action) => action(index, producer),
                Entry::Observe => on_observe(index, producer)?,
            }
        }
        Ok(())
    }
}

impl<P> Default for FrameCadence<P> {
    fn default() -> Self {
        Self::new()
    }
}
