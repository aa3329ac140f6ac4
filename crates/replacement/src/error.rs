//! Replacement engine error definitions.
//!
//! Every fallible operation in this crate returns [`ReplacementError`]. Errors
//! fall into three kinds, mirroring how the owning simulator reacts to them:
//! 1. **Configuration:** Rejected at construction time, never later (unknown
//!    policy name, zero ways, non-power-of-two ways for Pseudo-LRU).
//! 2. **Unsupported:** The policy models decision-only semantics and does not
//!    implement the requested operation.
//! 3. **Contract violation:** The caller referenced a way the policy does not
//!    track; a bug in the caller, not a recoverable runtime condition.
//!
//! Failed operations leave the policy state untouched; there is no partial
//! mutation and no recovery path inside this crate.

use thiserror::Error;

/// Broad classification of a [`ReplacementError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid construction parameters; raised only at construction time.
    Configuration,
    /// Operation not implemented by the selected policy.
    Unsupported,
    /// Caller referenced a way the policy does not track.
    ContractViolation,
}

/// Errors produced by policy construction and per-access operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReplacementError {
    /// The requested policy name is not recognized.
    ///
    /// The message enumerates the supported names so a misconfigured simulator
    /// run fails with an actionable diagnostic.
    #[error("\"{0}\" replacement policy is not defined; supported policies are: LRU, Pseudo-LRU")]
    UnknownPolicy(String),

    /// A policy was constructed with `ways == 0`.
    #[error("replacement policy requires at least one way")]
    ZeroWays,

    /// Pseudo-LRU was constructed with a way count that is not a power of two.
    ///
    /// The MRU-bit tree is a perfect binary tree, so the leaf count must be
    /// a power of two.
    #[error("number of ways must be a power of two for Pseudo-LRU, got {0}")]
    NotPowerOfTwo(usize),

    /// The operation is not implemented by the selected policy.
    ///
    /// Policies that model only the victim-selection decision (Pseudo-LRU)
    /// reject functional bookkeeping operations loudly rather than silently
    /// ignoring them.
    #[error("{operation} is not supported by the {policy} policy")]
    Unsupported {
        /// Canonical name of the policy that rejected the operation.
        policy: &'static str,
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// An operation referenced a way index the policy does not track.
    #[error("way {way} is not tracked by this policy ({ways} ways)")]
    UntrackedWay {
        /// The offending way index.
        way: usize,
        /// The policy's fixed way count.
        ways: usize,
    },
}

impl ReplacementError {
    /// Returns the broad classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownPolicy(_) | Self::ZeroWays | Self::NotPowerOfTwo(_) => {
                ErrorKind::Configuration
            }
            Self::Unsupported { .. } => ErrorKind::Unsupported,
            Self::UntrackedWay { .. } => ErrorKind::ContractViolation,
        }
    }
}
