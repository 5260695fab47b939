//! Recursion guard for the unifier's descents.
//!
//! Two bounds apply to every nested descent:
//!
//! - A depth counter compared against [`TypeCheckLimits::recursion_limit`](crate::TypeCheckLimits).
//!   Exceeding it is an internal error, never a `false` result.
//! - Native stack growth via `stacker`, so a generous configured limit cannot
//!   overflow the thread's stack before the counter trips.
//!
//! # Stack configuration
//!
//! - **Red zone**: 100KB. If less than this remains, the stack grows.
//! - **Growth size**: 1MB per growth.

use crate::InternalError;

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if it is nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack; call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Depth counter for one top-level unifier call.
#[derive(Debug)]
pub(crate) struct RecursionGuard {
    depth: usize,
    limit: usize,
}

impl RecursionGuard {
    pub(crate) fn new(limit: usize) -> Self {
        Self { depth: 0, limit }
    }

    /// Enter one level of nesting.
    pub(crate) fn enter(&mut self) -> Result<(), InternalError> {
        if self.depth >= self.limit {
            return Err(InternalError::RecursionLimitExceeded { limit: self.limit });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave one level of nesting.
    pub(crate) fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn reset(&mut self) {
        self.depth = 0;
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }
}
