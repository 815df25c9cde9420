//! Port definitions for agent execution.
//!
//! Ports are the seams where external collaborators plug in: the
//! capability being wrapped, the way the framework waits, and where batch
//! progress is reported.

pub mod capability;
pub mod delay;
pub mod progress;

pub use capability::{Capability, CapabilityOutput, CapabilityResult};
pub use delay::Delay;
pub use progress::{BatchProgress, ProgressError, ProgressReporter, ProgressResult};
