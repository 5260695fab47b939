//! Type and type-pack handles.
//!
//! `Idx` and `PackIdx` are 32-bit indices into a [`Pool`](crate::Pool).
//! Node identity is handle identity: two handles name the same node exactly
//! when their indices are equal, so every memo and visited set in the crate
//! is keyed on them.
//!
//! # Design (from Zig's `InternPool`)
//!
//! - Builtin singletons have fixed indices for O(1) lookup without a pool
//! - Handles are `Copy` and compare by index
//! - Binding rewrites the record behind a handle, never the handle itself

use std::fmt;

/// A 32-bit index into the pool's type table.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Builtin Types (indices 0-7) ===
    // Pre-interned at pool creation; persistent and never mutated.

    /// The `nil` type.
    pub const NIL: Self = Self(0);
    /// The `boolean` type.
    pub const BOOLEAN: Self = Self(1);
    /// The `number` type.
    pub const NUMBER: Self = Self(2);
    /// The `string` type.
    pub const STRING: Self = Self(3);
    /// The `thread` type (coroutines).
    pub const THREAD: Self = Self(4);
    /// The canonical `never` type (bottom, identity of unions).
    pub const NEVER: Self = Self(5);
    /// The canonical `unknown` type (top, identity of intersections).
    pub const UNKNOWN: Self = Self(6);
    /// The gradual `any` type.
    pub const ANY: Self = Self(7);

    /// Number of pre-interned builtin types.
    pub const BUILTIN_COUNT: u32 = 8;

    /// Create an index from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is one of the pre-interned builtins.
    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::BUILTIN_COUNT
    }

    /// Get the source-level name of a builtin, or `None` for dynamic nodes.
    #[inline]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("nil"),
            1 => Some("boolean"),
            2 => Some("number"),
            3 => Some("string"),
            4 => Some("thread"),
            5 => Some("never"),
            6 => Some("unknown"),
            7 => Some("any"),
            _ => None,
        }
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NIL => write!(f, "Idx::NIL"),
            Self::BOOLEAN => write!(f, "Idx::BOOLEAN"),
            Self::NUMBER => write!(f, "Idx::NUMBER"),
            Self::STRING => write!(f, "Idx::STRING"),
            Self::THREAD => write!(f, "Idx::THREAD"),
            Self::NEVER => write!(f, "Idx::NEVER"),
            Self::UNKNOWN => write!(f, "Idx::UNKNOWN"),
            Self::ANY => write!(f, "Idx::ANY"),
            _ => write!(f, "Idx({})", self.0),
        }
    }
}

impl fmt::Display for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "type#{}", self.0),
        }
    }
}

/// A 32-bit index into the pool's type-pack table.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct PackIdx(u32);

impl PackIdx {
    /// The empty pack `()`.
    pub const EMPTY: Self = Self(0);
    /// The variadic pack `...any`.
    pub const ANY_VARIADIC: Self = Self(1);

    /// Number of pre-interned builtin packs.
    pub const BUILTIN_COUNT: u32 = 2;

    /// Create a pack index from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is one of the pre-interned builtin packs.
    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::BUILTIN_COUNT
    }
}

impl fmt::Debug for PackIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::EMPTY => write!(f, "PackIdx::EMPTY"),
            Self::ANY_VARIADIC => write!(f, "PackIdx::ANY_VARIADIC"),
            _ => write!(f, "PackIdx({})", self.0),
        }
    }
}

impl fmt::Display for PackIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::EMPTY => f.write_str("()"),
            Self::ANY_VARIADIC => f.write_str("...any"),
            _ => write!(f, "pack#{}", self.0),
        }
    }
}

// Handles must stay 4 bytes; memo keys are pairs of them.
const _: () = assert!(std::mem::size_of::<Idx>() == 4);
const _: () = assert!(std::mem::size_of::<PackIdx>() == 4);

#[cfg(test)]
mod tests;
