//! Retrying agent execution for Lectern.
//!
//! An agent is a named, versioned capability (typically one LLM completion)
//! that is validated, retried and measured by the framework. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//!
//! Control flow for one call is validator, then retrying executor, then the
//! underlying capability. The batch orchestrator sits above the executor
//! and invokes it once per item.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
