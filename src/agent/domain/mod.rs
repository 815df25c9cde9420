//! Domain model for agent execution.
//!
//! Pure value types: agent identity, per-call context and results, running
//! metrics, retry and batch policies, and the per-call state machine. No
//! type here performs I/O or waits.

mod context;
mod descriptor;
mod error;
mod metrics;
pub(crate) mod millis;
mod name;
mod policy;
mod result;
mod state;

pub use context::ExecutionContext;
pub use descriptor::AgentDescriptor;
pub use error::{AgentDomainError, CapabilityError, InvalidTransition, PolicyError};
pub use metrics::AgentMetrics;
pub use name::{AgentName, AgentVersion};
pub use policy::{BatchPolicy, FailureClass, RetryPolicy};
pub use result::{ExecutionMetadata, ExecutionOutcome, ExecutionResult};
pub use state::{AttemptEvent, ExecutionState};
