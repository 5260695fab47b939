//! Instantiation of generalized functions.
//!
//! A generalized function's quantifiers must not escape into the scope that
//! uses it. Before such a function is unified against a monomorphic one, its
//! signature is copied with every quantified generic replaced by a fresh free
//! variable owned by the current scope. Subgraphs that cannot reach a variable
//! (per [`TypeFlags::has_variable`](crate::TypeFlags::has_variable)) are
//! shared, not copied.

use rustc_hash::FxHashMap;

use super::UnifyEngine;
use crate::data::{Members, PackHead};
use crate::{Idx, InternalError, PackData, PackIdx, Tag, TypeData};

/// Replacements for quantified nodes and copies made so far.
#[derive(Default)]
struct Substitution {
    types: FxHashMap<Idx, Idx>,
    packs: FxHashMap<PackIdx, PackIdx>,
}

impl UnifyEngine<'_> {
    /// Copy a generalized function with fresh free variables for its generics.
    ///
    /// Returns `function` itself when it carries no quantifiers.
    pub(super) fn instantiate(&mut self, function: Idx) -> Result<Idx, InternalError> {
        let Some(data) = self.pool.function(function).cloned() else {
            return self.shape_error(function, Tag::Function);
        };
        if !data.is_generalized() {
            return Ok(function);
        }

        let mut subst = Substitution::default();
        for &generic in &data.generics {
            let fresh = self.fresh_type();
            subst.types.insert(self.pool.resolve(generic), fresh);
        }
        for &generic in &data.generic_packs {
            let fresh = self.fresh_pack();
            subst.packs.insert(self.pool.resolve_pack(generic), fresh);
        }

        let params = self.copy_pack(&mut subst, data.params)?;
        let rets = self.copy_pack(&mut subst, data.rets)?;
        let instance = self.pool.function_type(params, rets);
        tracing::trace!(
            function = %self.pool.display(function),
            instance = %self.pool.display(instance),
            "instantiate"
        );
        Ok(instance)
    }

    fn copy_type(&mut self, subst: &mut Substitution, ty: Idx) -> Result<Idx, InternalError> {
        let ty = self.pool.resolve(ty);
        if let Some(&copy) = subst.types.get(&ty) {
            return Ok(copy);
        }
        if !self.pool.flags(ty).has_variable() {
            return Ok(ty);
        }
        self.descend(|this| this.copy_type_data(subst, ty))
    }

    fn copy_type_data(&mut self, subst: &mut Substitution, ty: Idx) -> Result<Idx, InternalError> {
        let copy = match self.pool.data(ty).clone() {
            TypeData::Function(function) => {
                let params = self.copy_pack(subst, function.params)?;
                let rets = self.copy_pack(subst, function.rets)?;
                let copy = self.pool.function_type(params, rets);
                if function.is_generalized() {
                    self.pool
                        .set_function_generics(copy, function.generics, function.generic_packs);
                }
                copy
            }
            TypeData::Table(table) => {
                // Register the copy before its props so cycles close on it.
                let copy = self.pool.table_type(&[], None, table.state);
                subst.types.insert(ty, copy);
                for (name, prop) in table.props {
                    let prop = self.copy_type(subst, prop)?;
                    self.pool.insert_prop(copy, name, prop);
                }
                if let Some(mut indexer) = table.indexer {
                    indexer.key = self.copy_type(subst, indexer.key)?;
                    indexer.value = self.copy_type(subst, indexer.value)?;
                    self.pool.set_indexer(copy, indexer);
                }
                copy
            }
            TypeData::Metatable { table, metatable } => {
                let table = self.copy_type(subst, table)?;
                let metatable = self.copy_type(subst, metatable)?;
                self.pool.metatable(table, metatable)
            }
            TypeData::Union(members) => {
                let members = self.copy_members(subst, &members)?;
                self.pool.alloc_union(members)
            }
            TypeData::Intersection(members) => {
                let members = self.copy_members(subst, &members)?;
                self.pool.alloc_intersection(members)
            }
            TypeData::Bound(_) => return self.fail(InternalError::UnresolvedBound { node: ty }),
            // Generics quantified elsewhere stay shared.
            TypeData::Free { .. }
            | TypeData::Generic { .. }
            | TypeData::Primitive(_)
            | TypeData::Never
            | TypeData::Unknown
            | TypeData::Any
            | TypeData::Class { .. } => ty,
        };
        subst.types.insert(ty, copy);
        Ok(copy)
    }

    fn copy_members(
        &mut self,
        subst: &mut Substitution,
        members: &[Idx],
    ) -> Result<Members, InternalError> {
        members
            .iter()
            .map(|&member| self.copy_type(subst, member))
            .collect()
    }

    fn copy_pack(
        &mut self,
        subst: &mut Substitution,
        pack: PackIdx,
    ) -> Result<PackIdx, InternalError> {
        let pack = self.pool.resolve_pack(pack);
        if let Some(&copy) = subst.packs.get(&pack) {
            return Ok(copy);
        }
        if !self.pool.pack_flags(pack).has_variable() {
            return Ok(pack);
        }
        self.descend(|this| this.copy_pack_data(subst, pack))
    }

    fn copy_pack_data(
        &mut self,
        subst: &mut Substitution,
        pack: PackIdx,
    ) -> Result<PackIdx, InternalError> {
        let copy = match self.pool.pack_data(pack).clone() {
            PackData::Fixed { head, tail } => {
                let mut copied = PackHead::new();
                for elem in head {
                    copied.push(self.copy_type(subst, elem)?);
                }
                let tail = match tail {
                    Some(tail) => Some(self.copy_pack(subst, tail)?),
                    None => None,
                };
                self.pool.pack_with_tail(&copied, tail)
            }
            PackData::Variadic(elem) => {
                let elem = self.copy_type(subst, elem)?;
                self.pool.variadic(elem)
            }
            PackData::Bound(_) => {
                return self.fail(InternalError::UnresolvedBoundPack { pack });
            }
            PackData::Free { .. } | PackData::Generic { .. } => pack,
        };
        subst.packs.insert(pack, copy);
        Ok(copy)
    }
}
