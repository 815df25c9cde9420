//! Lectern: validated, retrying execution of AI agents.
//!
//! This crate wraps unreliable model calls in a small execution framework:
//! schema validation before any call, bounded retries with exponential
//! backoff, per-agent metrics, paced concurrent batch execution and a
//! registry of named, versioned agents.
//!
//! # Architecture
//!
//! Lectern follows hexagonal architecture principles:
//!
//! - **Domain**: Pure value types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for capabilities, waiting and
//!   progress reporting
//! - **Adapters**: Concrete implementations of ports (Tokio timers,
//!   closures, in-memory fakes)
//!
//! # Modules
//!
//! - [`validation`]: Declarative field rules and validation reports
//! - [`agent`]: Retrying executor, batch orchestrator and agent registry
//! - [`analysis`]: Paper analysis agents built on the executor
//! - [`config`]: JSON configuration for retry and batch policies

pub mod agent;
pub mod analysis;
pub mod config;
pub mod validation;
