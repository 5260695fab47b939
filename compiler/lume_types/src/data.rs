//! Node records stored behind [`Idx`] and [`PackIdx`] handles.
//!
//! Records are immutable after allocation except for three rewrites, all
//! performed by the unifier:
//! - `Free` becomes `Bound` (at most once per node)
//! - `Free` becomes `Generic` during generalization
//! - an `Open` table gains props (and possibly an indexer)

use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::{Idx, Level, Name, PackIdx, PackTag, Tag};

/// Members of a union or intersection, in declaration order.
pub type Members = SmallVec<[Idx; 4]>;

/// Fixed element prefix of a type pack.
pub type PackHead = SmallVec<[Idx; 4]>;

/// Builtin primitive kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PrimitiveKind {
    Nil,
    Boolean,
    Number,
    String,
    Thread,
}

impl PrimitiveKind {
    /// Source-level spelling.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Thread => "thread",
        }
    }
}

/// Whether a table may still gain props during inference.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum TableState {
    /// Shape still being inferred; unification may add props.
    #[default]
    Open,
    /// Shape fixed; missing props are left for the compatibility pass.
    Sealed,
}

/// Dynamic key/value access on a table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Indexer {
    pub key: Idx,
    pub value: Idx,
}

/// Table shape.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableData {
    /// Named props, unique by name.
    pub props: BTreeMap<Name, Idx>,
    pub indexer: Option<Indexer>,
    pub state: TableState,
}

impl TableData {
    /// Look up a prop by name.
    #[inline]
    pub fn prop(&self, name: Name) -> Option<Idx> {
        self.props.get(&name).copied()
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.state == TableState::Open
    }
}

/// Function signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionData {
    pub params: PackIdx,
    pub rets: PackIdx,
    /// Generic types quantified by this function, filled by `generalize`.
    pub generics: Vec<Idx>,
    /// Generic packs quantified by this function, filled by `generalize`.
    pub generic_packs: Vec<PackIdx>,
}

impl FunctionData {
    /// Check if generalization already attached quantifiers.
    #[inline]
    pub fn is_generalized(&self) -> bool {
        !self.generics.is_empty() || !self.generic_packs.is_empty()
    }
}

/// A type node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeData {
    /// Unbound variable owned by the scope at `level`.
    Free { level: Level },
    /// Forwarding pointer; follow before inspecting.
    Bound(Idx),
    /// Quantified variable.
    Generic { level: Level, name: Option<Name> },
    Primitive(PrimitiveKind),
    Never,
    Unknown,
    Any,
    Class { name: Name },
    Function(FunctionData),
    Table(TableData),
    Metatable { table: Idx, metatable: Idx },
    Union(Members),
    Intersection(Members),
}

impl TypeData {
    /// The dispatch tag for this record.
    pub const fn tag(&self) -> Tag {
        match self {
            Self::Free { .. } => Tag::Free,
            Self::Bound(_) => Tag::Bound,
            Self::Generic { .. } => Tag::Generic,
            Self::Primitive(_) => Tag::Primitive,
            Self::Never => Tag::Never,
            Self::Unknown => Tag::Unknown,
            Self::Any => Tag::Any,
            Self::Class { .. } => Tag::Class,
            Self::Function(_) => Tag::Function,
            Self::Table(_) => Tag::Table,
            Self::Metatable { .. } => Tag::Metatable,
            Self::Union(_) => Tag::Union,
            Self::Intersection(_) => Tag::Intersection,
        }
    }
}

/// A type-pack node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PackData {
    /// Known elements followed by an optional tail pack.
    Fixed {
        head: PackHead,
        tail: Option<PackIdx>,
    },
    /// Zero or more values of one type.
    Variadic(Idx),
    /// Unbound pack variable owned by the scope at `level`.
    Free { level: Level },
    /// Forwarding pointer; follow before inspecting.
    Bound(PackIdx),
    /// Quantified pack variable.
    Generic { level: Level, name: Option<Name> },
}

impl PackData {
    /// The dispatch tag for this record.
    pub const fn tag(&self) -> PackTag {
        match self {
            Self::Fixed { .. } => PackTag::Fixed,
            Self::Variadic(_) => PackTag::Variadic,
            Self::Free { .. } => PackTag::Free,
            Self::Bound(_) => PackTag::Bound,
            Self::Generic { .. } => PackTag::Generic,
        }
    }
}
