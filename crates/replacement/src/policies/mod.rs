//! Cache Replacement Policies.
//!
//! Implements the victim-selection algorithms for set-associative cache sets
//! and the factory that constructs one by name.
//!
//! # Policies
//!
//! - `Lru`: Exact Least Recently Used (full functional semantics).
//! - `PseudoLru`: Tree-based Pseudo-LRU (decision-only semantics).
//!
//! The policy set is fixed and exhaustively known, so the contract is realized
//! as the closed [`CachePolicy`] enum with match dispatch rather than an open
//! trait-object hierarchy: the factory stays trivial and callers get a
//! `Sized` value they can embed directly in a cache-set structure.

use core::fmt;
use core::str::FromStr;

use serde::Deserialize;

use crate::error::ReplacementError;

/// Exact Least Recently Used replacement policy.
pub mod lru;

/// Pseudo-LRU (tree-based) replacement policy.
pub mod plru;

pub use lru::LruPolicy;
pub use plru::PlruPolicy;

/// Replacement policy selector.
///
/// This is the configuration-facing name of a policy; the simulator's config
/// layer deserializes it directly. The serde names match the canonical strings
/// accepted by [`CachePolicy::create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PolicyKind {
    /// Exact Least Recently Used replacement.
    ///
    /// Tracks the full recency order of all ways and supports functional
    /// allocation bookkeeping (`allocate`, `set_to_erase`).
    #[default]
    #[serde(rename = "LRU")]
    Lru,
    /// Pseudo-LRU (tree-based) replacement.
    ///
    /// Approximates LRU with one direction bit per internal tree node.
    /// Decision-only: models victim selection for performance estimation and
    /// rejects functional bookkeeping operations.
    #[serde(rename = "Pseudo-LRU")]
    PseudoLru,
}

impl PolicyKind {
    /// Returns the canonical policy name, as accepted by [`CachePolicy::create`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lru => "LRU",
            Self::PseudoLru => "Pseudo-LRU",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = ReplacementError;

    /// Parses a canonical policy name. Matching is exact and case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LRU" => Ok(Self::Lru),
            "Pseudo-LRU" => Ok(Self::PseudoLru),
            other => Err(ReplacementError::UnknownPolicy(other.to_owned())),
        }
    }
}

/// A constructed replacement policy for one cache set.
///
/// All variants share the same operation contract; operations a variant does
/// not support fail with [`ReplacementError::Unsupported`] and never mutate
/// state. One instance tracks exactly one cache set and is not meant to be
/// shared across sets or threads.
#[derive(Debug, Clone)]
pub enum CachePolicy {
    /// Exact LRU state.
    Lru(LruPolicy),
    /// Pseudo-LRU tree state.
    PseudoLru(PlruPolicy),
}

impl CachePolicy {
    /// Constructs a policy from a parsed selector, sized to `ways`.
    ///
    /// # Errors
    ///
    /// Returns [`ReplacementError::ZeroWays`] when `ways == 0`, and
    /// [`ReplacementError::NotPowerOfTwo`] when Pseudo-LRU is selected with a
    /// way count that is not a power of two.
    pub fn new(kind: PolicyKind, ways: usize) -> Result<Self, ReplacementError> {
        match kind {
            PolicyKind::Lru => LruPolicy::new(ways).map(Self::Lru),
            PolicyKind::PseudoLru => PlruPolicy::new(ways).map(Self::PseudoLru),
        }
    }

    /// Constructs a policy from its canonical name, sized to `ways`.
    ///
    /// Recognized names are `"LRU"` and `"Pseudo-LRU"` (exact, case-sensitive).
    /// This is the entry point the cache-set simulator calls once at set
    /// construction time.
    ///
    /// # Errors
    ///
    /// Returns [`ReplacementError::UnknownPolicy`] for an unrecognized name,
    /// plus the construction errors documented on [`CachePolicy::new`].
    pub fn create(name: &str, ways: usize) -> Result<Self, ReplacementError> {
        Self::new(name.parse()?, ways)
    }

    /// Returns the selector for this policy.
    #[must_use]
    pub const fn kind(&self) -> PolicyKind {
        match self {
            Self::Lru(_) => PolicyKind::Lru,
            Self::PseudoLru(_) => PolicyKind::PseudoLru,
        }
    }

    /// Records that `way` was just accessed, promoting it to most recently
    /// used.
    ///
    /// Safe to call on a way that is already the MRU.
    ///
    /// # Errors
    ///
    /// Returns [`ReplacementError::UntrackedWay`] if `way` is not currently
    /// tracked.
    pub fn touch(&mut self, way: usize) -> Result<(), ReplacementError> {
        match self {
            Self::Lru(lru) => lru.touch(way),
            Self::PseudoLru(plru) => plru.touch(way),
        }
    }

    /// Marks `way` as the next victim without removing it from tracking.
    ///
    /// Used when the simulator wants to force a specific eviction candidate,
    /// e.g. an invalidated line.
    ///
    /// # Errors
    ///
    /// Returns [`ReplacementError::Unsupported`] for decision-only policies
    /// and [`ReplacementError::UntrackedWay`] if `way` is not currently
    /// tracked.
    pub fn set_to_erase(&mut self, way: usize) -> Result<(), ReplacementError> {
        match self {
            Self::Lru(lru) => lru.set_to_erase(way),
            Self::PseudoLru(_) => Err(ReplacementError::Unsupported {
                policy: PolicyKind::PseudoLru.name(),
                operation: "set_to_erase",
            }),
        }
    }

    /// Inserts or re-inserts `way` as freshly used, evicting the current LRU
    /// way first if the tracked set is full.
    ///
    /// # Errors
    ///
    /// Returns [`ReplacementError::Unsupported`] for decision-only policies.
    pub fn allocate(&mut self, way: usize) -> Result<(), ReplacementError> {
        match self {
            Self::Lru(lru) => {
                lru.allocate(way);
                Ok(())
            }
            Self::PseudoLru(_) => Err(ReplacementError::Unsupported {
                policy: PolicyKind::PseudoLru.name(),
                operation: "allocate",
            }),
        }
    }

    /// Selects and commits the next victim way.
    ///
    /// The returned way is immediately marked as just used, so consecutive
    /// calls walk through ways according to the policy's rules rather than
    /// repeating the same victim.
    pub fn update(&mut self) -> usize {
        match self {
            Self::Lru(lru) => lru.update(),
            Self::PseudoLru(plru) => plru.update(),
        }
    }

    /// Returns the fixed way count this policy was constructed with.
    #[must_use]
    pub const fn get_ways(&self) -> usize {
        match self {
            Self::Lru(lru) => lru.get_ways(),
            Self::PseudoLru(plru) => plru.get_ways(),
        }
    }
}
