//! # Policy Tests
//!
//! Organizes the per-policy and factory test modules.

/// Name-based construction, selector parsing, and configuration errors.
pub mod factory;
