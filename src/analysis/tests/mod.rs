//! Unit tests for paper analysis.
