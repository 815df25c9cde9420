//! Step definitions for agent execution BDD scenarios.

mod given;
mod then;
mod when;
pub mod world;
