//! Pre-computed node metadata flags.
//!
//! `TypeFlags` are computed once at allocation time and cached, so walks can
//! skip subgraphs that cannot contain what they are looking for.
//!
//! The presence flags are conservative: binding a free node never clears
//! `HAS_FREE` on it or on anything built from it, and open tables carry
//! `HAS_FREE` from birth because unification may add free-bearing props to
//! them later. A clear bit is therefore a guarantee; a set bit is a hint.

use bitflags::bitflags;

bitflags! {
    /// Pre-computed node properties for O(1) queries.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u16 {
        // === Presence Flags (bits 0-7) ===

        /// May reach a free type or free pack.
        const HAS_FREE = 1 << 0;
        /// May reach a generic type or generic pack.
        const HAS_GENERIC = 1 << 1;

        // === Category Flags (bits 8-15) ===

        /// Pre-interned builtin; never mutated or generalized.
        const IS_PERSISTENT = 1 << 8;
    }
}

impl TypeFlags {
    /// Flags inherited by a parent from each of its children.
    pub const PROPAGATE_MASK: Self =
        Self::from_bits_truncate(Self::HAS_FREE.bits() | Self::HAS_GENERIC.bits());

    /// Check if the node may reach a free variable.
    #[inline]
    pub const fn has_free(self) -> bool {
        self.contains(Self::HAS_FREE)
    }

    /// Check if the node may reach a generic variable.
    #[inline]
    pub const fn has_generic(self) -> bool {
        self.contains(Self::HAS_GENERIC)
    }

    /// Check if the node may reach a free or generic variable.
    ///
    /// Generalization rewrites free nodes in place without touching their
    /// ancestors, so a subgraph reaching such a generic may carry only
    /// `HAS_FREE`.
    #[inline]
    pub const fn has_variable(self) -> bool {
        self.has_free() || self.has_generic()
    }

    /// Check if the node is a pre-interned builtin.
    #[inline]
    pub const fn is_persistent(self) -> bool {
        self.contains(Self::IS_PERSISTENT)
    }

    /// Keep only the bits a parent inherits from `child`.
    #[inline]
    pub const fn propagate_from(child: Self) -> Self {
        Self::from_bits_truncate(child.bits() & Self::PROPAGATE_MASK.bits())
    }

    /// Combine propagated flags from multiple children.
    #[inline]
    pub fn propagate_all(children: impl IntoIterator<Item = Self>) -> Self {
        children
            .into_iter()
            .fold(Self::empty(), |acc, child| acc | Self::propagate_from(child))
    }
}

impl Default for TypeFlags {
    fn default() -> Self {
        Self::empty()
    }
}
