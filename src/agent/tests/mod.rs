//! Unit tests for agent execution.

mod batch_tests;
mod support;
