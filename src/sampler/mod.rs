pub mod cadence;

pub use cadence::FrameCadence;
