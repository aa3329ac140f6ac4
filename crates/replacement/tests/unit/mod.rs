//! # Unit Tests
//!
//! Aggregates the unit-level test modules for the replacement engine.

/// Unit tests for the policy implementations and factory.
///
/// This module covers:
/// - Exact-LRU recency ordering, forced eviction, and allocation.
/// - Pseudo-LRU tree construction and victim selection.
/// - Name-based construction and configuration errors.
pub mod policies;
