//! The type graph arena.
//!
//! `Pool` owns every type and type-pack record of one checking pass. Records
//! are addressed by [`Idx`]/[`PackIdx`] handles and never freed; the only
//! mutations are the rewrites documented on [`TypeData`].
//!
//! Builtins occupy the first indices (see [`Idx::NIL`] .. [`Idx::ANY`] and
//! [`PackIdx::EMPTY`]) and are flagged `IS_PERSISTENT`.

mod construct;
mod format;

use smallvec::SmallVec;

use crate::name::NameInterner;
use crate::{
    FunctionData, Idx, Indexer, Level, Name, PackData, PackIdx, PackTag, PrimitiveKind,
    TableData, Tag, TypeData, TypeFlags,
};

/// Direct children of a node, for graph walks.
#[derive(Debug, Default)]
pub(crate) struct Children {
    pub(crate) types: SmallVec<[Idx; 8]>,
    pub(crate) packs: SmallVec<[PackIdx; 2]>,
}

/// Arena of type and type-pack records.
#[derive(Clone, Debug)]
pub struct Pool {
    types: Vec<TypeData>,
    type_flags: Vec<TypeFlags>,
    packs: Vec<PackData>,
    pack_flags: Vec<TypeFlags>,
    names: NameInterner,
}

impl Pool {
    /// Create a pool holding only the builtins.
    pub fn new() -> Self {
        let mut pool = Self {
            types: Vec::with_capacity(256),
            type_flags: Vec::with_capacity(256),
            packs: Vec::with_capacity(64),
            pack_flags: Vec::with_capacity(64),
            names: NameInterner::default(),
        };

        let primitive = TypeFlags::IS_PERSISTENT;
        let builtins = [
            (Idx::NIL, TypeData::Primitive(PrimitiveKind::Nil), primitive),
            (
                Idx::BOOLEAN,
                TypeData::Primitive(PrimitiveKind::Boolean),
                primitive,
            ),
            (
                Idx::NUMBER,
                TypeData::Primitive(PrimitiveKind::Number),
                primitive,
            ),
            (
                Idx::STRING,
                TypeData::Primitive(PrimitiveKind::String),
                primitive,
            ),
            (
                Idx::THREAD,
                TypeData::Primitive(PrimitiveKind::Thread),
                primitive,
            ),
            (Idx::NEVER, TypeData::Never, TypeFlags::IS_PERSISTENT),
            (Idx::UNKNOWN, TypeData::Unknown, TypeFlags::IS_PERSISTENT),
            (Idx::ANY, TypeData::Any, TypeFlags::IS_PERSISTENT),
        ];
        for (expected, data, flags) in builtins {
            let idx = pool.push_type(data, flags);
            debug_assert_eq!(idx, expected);
        }

        let empty = pool.push_pack(
            PackData::Fixed {
                head: SmallVec::new(),
                tail: None,
            },
            TypeFlags::IS_PERSISTENT,
        );
        debug_assert_eq!(empty, PackIdx::EMPTY);
        let any_variadic = pool.push_pack(PackData::Variadic(Idx::ANY), TypeFlags::IS_PERSISTENT);
        debug_assert_eq!(any_variadic, PackIdx::ANY_VARIADIC);

        pool
    }

    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn push_type(&mut self, data: TypeData, flags: TypeFlags) -> Idx {
        let idx = Idx::from_raw(self.types.len() as u32);
        self.types.push(data);
        self.type_flags.push(flags);
        idx
    }

    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn push_pack(&mut self, data: PackData, flags: TypeFlags) -> PackIdx {
        let pack = PackIdx::from_raw(self.packs.len() as u32);
        self.packs.push(data);
        self.pack_flags.push(flags);
        pack
    }

    /// Number of type records, builtins included.
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always false: the builtins are allocated up front.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Number of pack records, builtins included.
    #[inline]
    pub fn pack_count(&self) -> usize {
        self.packs.len()
    }

    // ========================================
    // Inspection
    // ========================================

    /// The record behind `idx`, without following bound chains.
    #[inline]
    pub fn data(&self, idx: Idx) -> &TypeData {
        &self.types[idx.index()]
    }

    /// The record behind `pack`, without following bound chains.
    #[inline]
    pub fn pack_data(&self, pack: PackIdx) -> &PackData {
        &self.packs[pack.index()]
    }

    #[inline]
    pub fn tag(&self, idx: Idx) -> Tag {
        self.data(idx).tag()
    }

    #[inline]
    pub fn pack_tag(&self, pack: PackIdx) -> PackTag {
        self.pack_data(pack).tag()
    }

    #[inline]
    pub fn flags(&self, idx: Idx) -> TypeFlags {
        self.type_flags[idx.index()]
    }

    #[inline]
    pub fn pack_flags(&self, pack: PackIdx) -> TypeFlags {
        self.pack_flags[pack.index()]
    }

    /// Level of a free type, or `None` if the node is not free.
    pub fn free_level(&self, idx: Idx) -> Option<Level> {
        match self.data(idx) {
            TypeData::Free { level } => Some(*level),
            _ => None,
        }
    }

    /// Level of a free pack, or `None` if the pack is not free.
    pub fn free_pack_level(&self, pack: PackIdx) -> Option<Level> {
        match self.pack_data(pack) {
            PackData::Free { level } => Some(*level),
            _ => None,
        }
    }

    pub fn table(&self, idx: Idx) -> Option<&TableData> {
        match self.data(idx) {
            TypeData::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn function(&self, idx: Idx) -> Option<&FunctionData> {
        match self.data(idx) {
            TypeData::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Members of a union or intersection.
    pub fn members(&self, idx: Idx) -> Option<&[Idx]> {
        match self.data(idx) {
            TypeData::Union(members) | TypeData::Intersection(members) => Some(members),
            _ => None,
        }
    }

    /// `(table, metatable)` components of a metatable type.
    pub fn metatable_parts(&self, idx: Idx) -> Option<(Idx, Idx)> {
        match self.data(idx) {
            TypeData::Metatable { table, metatable } => Some((*table, *metatable)),
            _ => None,
        }
    }

    /// Element type of a variadic pack.
    pub fn variadic_elem(&self, pack: PackIdx) -> Option<Idx> {
        match self.pack_data(pack) {
            PackData::Variadic(elem) => Some(*elem),
            _ => None,
        }
    }

    /// Direct children of a type node.
    pub(crate) fn children(&self, idx: Idx) -> Children {
        let mut children = Children::default();
        match self.data(idx) {
            TypeData::Bound(target) => children.types.push(*target),
            TypeData::Function(function) => {
                children.packs.push(function.params);
                children.packs.push(function.rets);
            }
            TypeData::Table(table) => {
                children.types.extend(table.props.values().copied());
                if let Some(indexer) = table.indexer {
                    children.types.push(indexer.key);
                    children.types.push(indexer.value);
                }
            }
            TypeData::Metatable { table, metatable } => {
                children.types.push(*table);
                children.types.push(*metatable);
            }
            TypeData::Union(members) | TypeData::Intersection(members) => {
                children.types.extend(members.iter().copied());
            }
            TypeData::Free { .. }
            | TypeData::Generic { .. }
            | TypeData::Primitive(_)
            | TypeData::Never
            | TypeData::Unknown
            | TypeData::Any
            | TypeData::Class { .. } => {}
        }
        children
    }

    /// Direct children of a pack node.
    pub(crate) fn pack_children(&self, pack: PackIdx) -> Children {
        let mut children = Children::default();
        match self.pack_data(pack) {
            PackData::Fixed { head, tail } => {
                children.types.extend(head.iter().copied());
                children.packs.extend(*tail);
            }
            PackData::Variadic(elem) => children.types.push(*elem),
            PackData::Bound(target) => children.packs.push(*target),
            PackData::Free { .. } | PackData::Generic { .. } => {}
        }
        children
    }

    // ========================================
    // Resolution
    // ========================================

    /// Follow a bound chain without mutating it.
    pub fn follow(&self, idx: Idx) -> Idx {
        let mut current = idx;
        while let TypeData::Bound(target) = self.data(current) {
            current = *target;
        }
        current
    }

    /// Follow a pack bound chain without mutating it.
    pub fn follow_pack(&self, pack: PackIdx) -> PackIdx {
        let mut current = pack;
        while let PackData::Bound(target) = self.pack_data(current) {
            current = *target;
        }
        current
    }

    /// Follow a bound chain, pointing every link directly at the end.
    pub fn resolve(&mut self, idx: Idx) -> Idx {
        let root = self.follow(idx);
        let mut current = idx;
        while current != root {
            let TypeData::Bound(next) = self.types[current.index()] else {
                break;
            };
            self.types[current.index()] = TypeData::Bound(root);
            current = next;
        }
        root
    }

    /// Follow a pack bound chain, pointing every link directly at the end.
    pub fn resolve_pack(&mut self, pack: PackIdx) -> PackIdx {
        let root = self.follow_pack(pack);
        let mut current = pack;
        while current != root {
            let PackData::Bound(next) = self.packs[current.index()] else {
                break;
            };
            self.packs[current.index()] = PackData::Bound(root);
            current = next;
        }
        root
    }

    // ========================================
    // Names
    // ========================================

    /// Intern a name.
    pub fn name(&mut self, text: &str) -> Name {
        self.names.intern(text)
    }

    /// Spelling of an interned name.
    pub fn name_str(&self, name: Name) -> &str {
        self.names.lookup(name)
    }

    // ========================================
    // Mutation (unifier only)
    // ========================================

    /// Rewrite a free type into a forwarding pointer.
    pub(crate) fn bind_type(&mut self, var: Idx, target: Idx) {
        debug_assert_eq!(self.tag(var), Tag::Free);
        self.types[var.index()] = TypeData::Bound(target);
        let inherited = TypeFlags::propagate_from(self.flags(target));
        self.type_flags[var.index()] |= inherited;
    }

    /// Rewrite a free pack into a forwarding pointer.
    pub(crate) fn bind_pack(&mut self, var: PackIdx, target: PackIdx) {
        debug_assert_eq!(self.pack_tag(var), PackTag::Free);
        self.packs[var.index()] = PackData::Bound(target);
        let inherited = TypeFlags::propagate_from(self.pack_flags(target));
        self.pack_flags[var.index()] |= inherited;
    }

    pub(crate) fn set_free_level(&mut self, var: Idx, level: Level) {
        if let TypeData::Free { level: current } = &mut self.types[var.index()] {
            *current = level;
        }
    }

    pub(crate) fn set_free_pack_level(&mut self, var: PackIdx, level: Level) {
        if let PackData::Free { level: current } = &mut self.packs[var.index()] {
            *current = level;
        }
    }

    /// Turn a free type into a generic; returns false if it was not free.
    pub(crate) fn make_generic(&mut self, var: Idx) -> bool {
        let TypeData::Free { level } = self.types[var.index()] else {
            return false;
        };
        self.types[var.index()] = TypeData::Generic { level, name: None };
        self.type_flags[var.index()] |= TypeFlags::HAS_GENERIC;
        true
    }

    /// Turn a free pack into a generic; returns false if it was not free.
    pub(crate) fn make_generic_pack(&mut self, var: PackIdx) -> bool {
        let PackData::Free { level } = self.packs[var.index()] else {
            return false;
        };
        self.packs[var.index()] = PackData::Generic { level, name: None };
        self.pack_flags[var.index()] |= TypeFlags::HAS_GENERIC;
        true
    }

    /// Add a prop to a table. Callers check the table is open.
    pub(crate) fn insert_prop(&mut self, table: Idx, name: Name, ty: Idx) {
        let inherited = TypeFlags::propagate_from(self.flags(ty));
        if let TypeData::Table(data) = &mut self.types[table.index()] {
            data.props.insert(name, ty);
            self.type_flags[table.index()] |= inherited;
        }
    }

    /// Give an indexer to a table. Callers check the table is open.
    pub(crate) fn set_indexer(&mut self, table: Idx, indexer: Indexer) {
        let inherited =
            TypeFlags::propagate_all([self.flags(indexer.key), self.flags(indexer.value)]);
        if let TypeData::Table(data) = &mut self.types[table.index()] {
            data.indexer = Some(indexer);
            self.type_flags[table.index()] |= inherited;
        }
    }

    /// Record the quantifiers of a generalized function.
    pub(crate) fn set_function_generics(
        &mut self,
        function: Idx,
        generics: Vec<Idx>,
        generic_packs: Vec<PackIdx>,
    ) {
        if let TypeData::Function(data) = &mut self.types[function.index()] {
            data.generics = generics;
            data.generic_packs = generic_packs;
        }
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
