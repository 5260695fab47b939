//! Type-check limits consulted by the unifier.

/// Default ceiling on nested unifier descents.
///
/// Matches the host checker's inference recursion limit.
pub const DEFAULT_RECURSION_LIMIT: usize = 165;

/// Budgets the driver hands to each unifier instance.
///
/// Wall-clock budgets are enforced by the driver between calls; the only
/// budget checked inside the recursion is the depth ceiling.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeCheckLimits {
    /// Maximum number of nested descents before the unifier aborts with an
    /// internal error.
    pub recursion_limit: usize,
}

impl TypeCheckLimits {
    /// Replace the recursion ceiling.
    #[must_use]
    pub const fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }
}

impl Default for TypeCheckLimits {
    fn default() -> Self {
        Self {
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}
