//! Let-polymorphism: quantifying free variables when a scope closes.
//!
//! A free node owned by the current scope can no longer be constrained by
//! anything outside it, so it becomes a generic. Nodes owned by shallower
//! scopes stay free. A node owned by a deeper scope means that scope was
//! never generalized; the whole request is refused untouched.

use super::walk::FreeNodes;
use super::UnifyEngine;
use crate::{FunctionData, Idx, InternalError};

impl UnifyEngine<'_> {
    /// Generalize `ty` at the current scope level.
    ///
    /// Returns the resolved root, or `Ok(None)` if `ty` still reaches a free
    /// node owned by a deeper scope.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn generalize(&mut self, ty: Idx) -> Result<Option<Idx>, InternalError> {
        self.start();
        let result = self.generalize_root(ty);
        self.finish();
        result
    }

    fn generalize_root(&mut self, ty: Idx) -> Result<Option<Idx>, InternalError> {
        let root = self.pool.resolve(ty);
        let flags = self.pool.flags(root);
        if flags.is_persistent() || !flags.has_free() {
            return Ok(Some(root));
        }
        if self
            .pool
            .function(root)
            .is_some_and(FunctionData::is_generalized)
        {
            return Ok(Some(root));
        }

        let level = self.scope.level();
        let found = FreeNodes::collect(self.pool, &[root], &[]);
        if found.any_deeper_than(level) {
            tracing::debug!(root = %root, level = %level, "not ready to generalize");
            return Ok(None);
        }

        let mut generics = Vec::new();
        for &(var, owner) in &found.types {
            if owner != level {
                continue;
            }
            if !self.pool.make_generic(var) {
                return self.fail(InternalError::AlreadyBound { node: var });
            }
            generics.push(var);
        }
        let mut generic_packs = Vec::new();
        for &(pack, owner) in &found.packs {
            if owner != level {
                continue;
            }
            if !self.pool.make_generic_pack(pack) {
                return self.fail(InternalError::AlreadyBoundPack { pack });
            }
            generic_packs.push(pack);
        }

        tracing::debug!(
            root = %self.pool.display(root),
            generics = generics.len(),
            generic_packs = generic_packs.len(),
            "generalized"
        );

        let quantified = !generics.is_empty() || !generic_packs.is_empty();
        if quantified && self.pool.function(root).is_some() {
            self.pool.set_function_generics(root, generics, generic_packs);
        }
        Ok(Some(root))
    }
}
