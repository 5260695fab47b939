//! Scope levels for generalization.
//!
//! A `Level` records how deeply nested the scope that owns a free variable
//! is. Higher levels are deeper (more local) scopes. Levels decide two
//! things:
//!
//! - Which side of a `free × free` pair gets bound: the deeper variable is
//!   bound to the shallower one, so the survivor can never outlive its scope.
//! - Which variables `generalize` may quantify: only those owned by exactly
//!   the scope being closed.
//!
//! When a free variable at level N is bound to a structure, free variables
//! inside that structure at levels deeper than N are lowered to N.

use std::fmt;

/// Scope nesting depth of a free variable.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Level(u16);

impl Level {
    /// Module-level scope.
    pub const ROOT: Self = Self(0);

    /// Maximum level (prevents overflow in deeply nested code).
    pub const MAX: Self = Self(u16::MAX - 1);

    /// Create a level from a raw value.
    #[inline]
    pub const fn from_raw(value: u16) -> Self {
        Self(value)
    }

    /// Get the raw level value.
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Get the next (deeper) level.
    ///
    /// Saturates at `MAX`.
    #[inline]
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1).min(Self::MAX.0))
    }

    /// Get the previous (shallower) level.
    ///
    /// Saturates at `ROOT`.
    #[inline]
    #[must_use]
    pub fn prev(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    /// Check if this level is strictly more local than `other`.
    #[inline]
    pub fn is_deeper_than(self, other: Self) -> bool {
        self > other
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ROOT => write!(f, "ROOT"),
            Self::MAX => write!(f, "MAX"),
            Self(n) => write!(f, "L{n}"),
        }
    }
}

/// The lexical scope the driver is currently checking.
///
/// Only the nesting level is visible to the unifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Scope {
    level: Level,
}

impl Scope {
    /// The module-level scope.
    pub const fn root() -> Self {
        Self { level: Level::ROOT }
    }

    /// A scope at an explicit level.
    pub const fn at(level: Level) -> Self {
        Self { level }
    }

    /// The scope's nesting level.
    #[inline]
    pub const fn level(self) -> Level {
        self.level
    }

    /// A scope nested directly inside this one.
    #[must_use]
    pub fn child(self) -> Self {
        Self {
            level: self.level.next(),
        }
    }

    /// The enclosing scope (the root scope is its own parent).
    #[must_use]
    pub fn parent(self) -> Self {
        Self {
            level: self.level.prev(),
        }
    }
}
