//! Adapter implementations for agent execution ports.

pub mod delay;
pub mod function;
pub mod memory;
pub mod timeout;

pub use delay::TokioDelay;
pub use function::FnCapability;
pub use timeout::TimeoutCapability;
