//! In-memory adapters for tests and deterministic local wiring.

mod delay;

pub use delay::RecordingDelay;
