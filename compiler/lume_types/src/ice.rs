//! Internal consistency errors.
//!
//! An ICE means an invariant of the type graph or of the unifier itself was
//! broken. It is never a statement about the user's program: the driver
//! must abort the current module's pass when it sees one.

use std::fmt;

use crate::{Idx, PackIdx, PackTag, Tag};

/// A fatal internal consistency violation.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[must_use]
pub enum InternalError {
    /// Nested descents exceeded [`TypeCheckLimits::recursion_limit`](crate::TypeCheckLimits).
    RecursionLimitExceeded {
        /// The configured ceiling.
        limit: usize,
    },

    /// A bound type survived resolution.
    UnresolvedBound {
        /// The offending node.
        node: Idx,
    },

    /// A bound pack survived resolution.
    UnresolvedBoundPack {
        /// The offending pack.
        pack: PackIdx,
    },

    /// A node did not have the shape its dispatch arm requires.
    UnexpectedShape {
        /// The offending node.
        node: Idx,
        /// The shape the dispatcher selected.
        expected: Tag,
        /// The shape actually stored.
        found: Tag,
    },

    /// A pack did not have the shape its dispatch arm requires.
    UnexpectedPackShape {
        /// The offending pack.
        pack: PackIdx,
        /// The shape the dispatcher selected.
        expected: PackTag,
        /// The shape actually stored.
        found: PackTag,
    },

    /// An attempt to bind a type that is not free.
    AlreadyBound {
        /// The node that was not free.
        node: Idx,
    },

    /// An attempt to bind a pack that is not free.
    AlreadyBoundPack {
        /// The pack that was not free.
        pack: PackIdx,
    },

    /// The occurs check was asked about a needle that is not a free pack.
    NeedleNotFree {
        /// The needle pack.
        needle: PackIdx,
    },

    /// A pack tail chain loops back on itself.
    CyclicPack {
        /// First pack seen twice.
        pack: PackIdx,
    },
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecursionLimitExceeded { limit } => {
                write!(f, "unifier recursion limit of {limit} exceeded")
            }
            Self::UnresolvedBound { node } => {
                write!(f, "bound type {node:?} survived resolution")
            }
            Self::UnresolvedBoundPack { pack } => {
                write!(f, "bound pack {pack:?} survived resolution")
            }
            Self::UnexpectedShape {
                node,
                expected,
                found,
            } => write!(f, "expected {node:?} to be a {expected}, found {found}"),
            Self::UnexpectedPackShape {
                pack,
                expected,
                found,
            } => write!(f, "expected {pack:?} to be a {expected} pack, found {found}"),
            Self::AlreadyBound { node } => write!(f, "cannot bind non-free type {node:?}"),
            Self::AlreadyBoundPack { pack } => write!(f, "cannot bind non-free pack {pack:?}"),
            Self::NeedleNotFree { needle } => {
                write!(f, "occurs check needle {needle:?} is not a free pack")
            }
            Self::CyclicPack { pack } => write!(f, "pack tail chain through {pack:?} is cyclic"),
        }
    }
}

impl std::error::Error for InternalError {}

/// Sink for internal errors raised while checking one module.
///
/// Every ICE passes through [`InternalErrorReporter::ice`] before it is
/// propagated, so it is logged exactly once at the point it was detected.
#[derive(Debug, Default)]
pub struct InternalErrorReporter {
    module: Option<String>,
    reported: usize,
}

impl InternalErrorReporter {
    /// Create a reporter with no module attribution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reporter that tags every ICE with a module name.
    pub fn for_module(module: impl Into<String>) -> Self {
        Self {
            module: Some(module.into()),
            reported: 0,
        }
    }

    /// Record and log an internal error, handing it back for propagation.
    pub fn ice(&mut self, error: InternalError) -> InternalError {
        self.reported += 1;
        tracing::error!(
            module = self.module.as_deref().unwrap_or("<anonymous>"),
            %error,
            "internal consistency error"
        );
        error
    }

    /// Number of internal errors reported so far.
    #[inline]
    pub fn reported(&self) -> usize {
        self.reported
    }

    /// Check if any internal error has been reported.
    #[inline]
    pub fn has_reported(&self) -> bool {
        self.reported > 0
    }
}

#[cfg(test)]
mod tests;
