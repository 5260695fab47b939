//! Node construction helpers for the Pool.
//!
//! Every constructor computes the node's [`TypeFlags`] from its children at
//! allocation time.

use super::Pool;
use crate::data::{Members, PackHead};
use crate::{
    FunctionData, Idx, Indexer, Level, PackData, PackIdx, TableData, TableState, TypeData,
    TypeFlags,
};

impl Pool {
    // === Variables ===

    /// Allocate a free type owned by the scope at `level`.
    pub fn fresh_type(&mut self, level: Level) -> Idx {
        self.push_type(TypeData::Free { level }, TypeFlags::HAS_FREE)
    }

    /// Allocate a free pack owned by the scope at `level`.
    pub fn fresh_pack(&mut self, level: Level) -> PackIdx {
        self.push_pack(PackData::Free { level }, TypeFlags::HAS_FREE)
    }

    /// Allocate a generic type, optionally named.
    pub fn generic(&mut self, level: Level, name: Option<&str>) -> Idx {
        let name = name.map(|text| self.name(text));
        self.push_type(TypeData::Generic { level, name }, TypeFlags::HAS_GENERIC)
    }

    /// Allocate a generic pack, optionally named.
    pub fn generic_pack(&mut self, level: Level, name: Option<&str>) -> PackIdx {
        let name = name.map(|text| self.name(text));
        self.push_pack(PackData::Generic { level, name }, TypeFlags::HAS_GENERIC)
    }

    // === Leaves ===

    /// Allocate a host class type.
    pub fn class(&mut self, name: &str) -> Idx {
        let name = self.name(name);
        self.push_type(TypeData::Class { name }, TypeFlags::empty())
    }

    // === Structural ===

    /// Create a function type `(params) -> rets`.
    pub fn function_type(&mut self, params: PackIdx, rets: PackIdx) -> Idx {
        let flags = TypeFlags::propagate_all([self.pack_flags(params), self.pack_flags(rets)]);
        self.push_type(
            TypeData::Function(FunctionData {
                params,
                rets,
                generics: Vec::new(),
                generic_packs: Vec::new(),
            }),
            flags,
        )
    }

    /// Create a function type from fixed parameter and return lists.
    pub fn function_of(&mut self, params: &[Idx], rets: &[Idx]) -> Idx {
        let params = self.pack(params);
        let rets = self.pack(rets);
        self.function_type(params, rets)
    }

    /// Create a table type.
    ///
    /// Open tables are flagged `HAS_FREE` because unification may widen them.
    pub fn table_type(
        &mut self,
        props: &[(&str, Idx)],
        indexer: Option<Indexer>,
        state: TableState,
    ) -> Idx {
        let mut data = TableData {
            props: Default::default(),
            indexer,
            state,
        };
        let mut flags = TypeFlags::empty();
        if state == TableState::Open {
            flags |= TypeFlags::HAS_FREE;
        }
        for &(name, ty) in props {
            let name = self.name(name);
            data.props.insert(name, ty);
            flags |= TypeFlags::propagate_from(self.flags(ty));
        }
        if let Some(indexer) = indexer {
            flags |= TypeFlags::propagate_all([self.flags(indexer.key), self.flags(indexer.value)]);
        }
        self.push_type(TypeData::Table(data), flags)
    }

    /// Create an open table with the given props.
    pub fn open_table(&mut self, props: &[(&str, Idx)]) -> Idx {
        self.table_type(props, None, TableState::Open)
    }

    /// Create a sealed table with the given props.
    pub fn sealed_table(&mut self, props: &[(&str, Idx)]) -> Idx {
        self.table_type(props, None, TableState::Sealed)
    }

    /// Create a table-with-metatable type.
    pub fn metatable(&mut self, table: Idx, metatable: Idx) -> Idx {
        let flags = TypeFlags::propagate_all([self.flags(table), self.flags(metatable)]);
        self.push_type(TypeData::Metatable { table, metatable }, flags)
    }

    /// Allocate a union node without simplifying. See [`Pool::union`].
    pub(crate) fn alloc_union(&mut self, members: Members) -> Idx {
        let flags = self.set_operation_flags(&members);
        self.push_type(TypeData::Union(members), flags)
    }

    /// Allocate an intersection node without simplifying. See [`Pool::intersection`].
    pub(crate) fn alloc_intersection(&mut self, members: Members) -> Idx {
        let flags = self.set_operation_flags(&members);
        self.push_type(TypeData::Intersection(members), flags)
    }

    fn set_operation_flags(&self, members: &[Idx]) -> TypeFlags {
        TypeFlags::propagate_all(members.iter().map(|&member| self.flags(member)))
    }

    // === Packs ===

    /// Create a fixed pack with no tail. Empty input yields [`PackIdx::EMPTY`].
    pub fn pack(&mut self, head: &[Idx]) -> PackIdx {
        self.pack_with_tail(head, None)
    }

    /// Create a fixed pack followed by `tail`.
    ///
    /// An empty head collapses to the tail itself.
    pub fn pack_with_tail(&mut self, head: &[Idx], tail: Option<PackIdx>) -> PackIdx {
        if head.is_empty() {
            return tail.unwrap_or(PackIdx::EMPTY);
        }
        let mut flags =
            TypeFlags::propagate_all(head.iter().map(|&element| self.flags(element)));
        if let Some(tail) = tail {
            flags |= TypeFlags::propagate_from(self.pack_flags(tail));
        }
        self.push_pack(
            PackData::Fixed {
                head: PackHead::from_slice(head),
                tail,
            },
            flags,
        )
    }

    /// Create a variadic pack `...elem`.
    pub fn variadic(&mut self, elem: Idx) -> PackIdx {
        let flags = TypeFlags::propagate_from(self.flags(elem));
        self.push_pack(PackData::Variadic(elem), flags)
    }
}

#[cfg(test)]
mod tests;
