//! Cache-line replacement policy engine.
//!
//! This crate implements the victim-selection logic for a set-associative cache
//! simulator. It tracks recency/usage state at the *way* granularity and decides
//! which way of a cache set should be reused next:
//! 1. **Contract:** A uniform operation set (`touch`, `set_to_erase`, `allocate`,
//!    `update`, `get_ways`) over a closed set of policies.
//! 2. **Exact LRU:** An arena-backed doubly-linked recency list with a
//!    way-to-slot index for O(1) splicing.
//! 3. **Pseudo-LRU:** A perfect binary tree of MRU direction bits, O(log ways)
//!    per operation.
//! 4. **Factory:** Name-based construction (`"LRU"`, `"Pseudo-LRU"`) for the
//!    simulator's configuration layer.
//!
//! The crate stores no cache line data and performs no I/O; the owning simulator
//! holds one policy instance per cache set.

/// Error types for construction and per-access operations.
pub mod error;
/// Replacement policy implementations and the name-based factory.
pub mod policies;

/// Classified error type; every fallible operation returns this.
pub use crate::error::{ErrorKind, ReplacementError};
/// Policy engine entry points; construct with `CachePolicy::create` or
/// `CachePolicy::new`.
pub use crate::policies::{CachePolicy, LruPolicy, PlruPolicy, PolicyKind};
