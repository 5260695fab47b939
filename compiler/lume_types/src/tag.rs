//! Shape tags for tag-driven dispatch.
//!
//! Every node in the pool reports a `Tag` (types) or `PackTag` (packs).
//! The unifier matches on pairs of tags, so adding a shape here forces
//! every dispatch table to be revisited by the compiler.
//!
//! # Tag Categories
//!
//! - 0-15: Variables (free, bound, generic)
//! - 16-31: Leaves (primitives, top/bottom, classes)
//! - 32-47: Structural types (functions, tables, metatables)
//! - 48-63: Set operations (unions, intersections)

use std::fmt;

/// Type shape discriminant.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Tag {
    // === Variables (0-15) ===
    /// Unbound variable owned by a scope level.
    Free = 0,
    /// Forwarding pointer to another type.
    Bound = 1,
    /// Universally-quantified variable.
    Generic = 2,

    // === Leaves (16-31) ===
    /// Builtin primitive (`nil`, `number`, ...).
    Primitive = 16,
    /// Bottom type.
    Never = 17,
    /// Top type.
    Unknown = 18,
    /// Gradual escape hatch.
    Any = 19,
    /// Host-defined class.
    Class = 20,

    // === Structural (32-47) ===
    /// Function `(params) -> rets`.
    Function = 32,
    /// Table with props and an optional indexer.
    Table = 33,
    /// Table paired with its metatable.
    Metatable = 34,

    // === Set Operations (48-63) ===
    /// Union `A | B`.
    Union = 48,
    /// Intersection `A & B`.
    Intersection = 49,
}

impl Tag {
    /// Get the name of this tag as a static string.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Bound => "bound",
            Self::Generic => "generic",
            Self::Primitive => "primitive",
            Self::Never => "never",
            Self::Unknown => "unknown",
            Self::Any => "any",
            Self::Class => "class",
            Self::Function => "function",
            Self::Table => "table",
            Self::Metatable => "metatable",
            Self::Union => "union",
            Self::Intersection => "intersection",
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag::{}", self.name())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type-pack shape discriminant.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum PackTag {
    /// Fixed prefix with an optional tail pack.
    Fixed = 0,
    /// Unbounded repetition of one element type.
    Variadic = 1,
    /// Unbound pack variable.
    Free = 2,
    /// Forwarding pointer to another pack.
    Bound = 3,
    /// Universally-quantified pack variable.
    Generic = 4,
}

impl PackTag {
    /// Get the name of this tag as a static string.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Variadic => "variadic",
            Self::Free => "free",
            Self::Bound => "bound",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Debug for PackTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackTag::{}", self.name())
    }
}

impl fmt::Display for PackTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const _: () = assert!(std::mem::size_of::<Tag>() == 1);
