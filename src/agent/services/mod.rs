//! Service layer for agent execution.
//!
//! - [`RetryingExecutor`] validates input and wraps one capability with
//!   bounded retries, exponential backoff and metrics.
//! - [`BatchOrchestrator`] fans items out to an executor in paced,
//!   concurrency-capped chunks.
//! - [`AgentRegistry`] maps `name:version` keys to capabilities.

pub mod batch;
pub mod executor;
pub mod registry;

pub use batch::{BatchItem, BatchOrchestrator, BatchOutcome};
pub use executor::RetryingExecutor;
pub use registry::{AgentRegistry, DynCapability, RegisteredAgent};
