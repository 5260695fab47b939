//! Subtype-directed unification.
//!
//! `unify(sub, super)` commits the claim `sub <: super` to the type graph:
//! free variables are bound, open tables are widened, and constraints are
//! pushed into function signatures, unions and packs.
//!
//! # Design
//!
//! Link-based unification (as in Gleam and Elm):
//! - Binding rewrites a `Free` node into a `Bound` link, no substitution map
//! - [`Pool::resolve`] compresses paths as it follows links
//! - Levels decide bind direction and what generalization may quantify
//!
//! The relation is directional. Concrete shapes that do not fit are accepted
//! without action; reporting them is left to a later compatibility pass.
//!
//! # Results
//!
//! - `Ok(true)`: the relation was committed (possibly leniently)
//! - `Ok(false)`: a pack occurs check failed somewhere in the descent
//! - `Err(InternalError)`: an invariant broke; abort the module
//!
//! # Usage
//!
//! ```ignore
//! let mut pool = Pool::new();
//! let mut ice = InternalErrorReporter::new();
//! let mut engine = UnifyEngine::new(&mut pool, &mut ice);
//!
//! let var = engine.fresh_type();
//! assert!(engine.unify(var, Idx::NUMBER)?);
//! assert_eq!(engine.resolve(var), Idx::NUMBER);
//! ```

mod generalize;
mod guard;
mod instantiate;
mod memo;
mod occurs;
mod packs;
mod walk;

pub use occurs::OccursCheckResult;

pub(crate) use guard::ensure_sufficient_stack;

use guard::RecursionGuard;
use memo::PairMemo;

use crate::{
    FunctionData, Idx, InternalError, InternalErrorReporter, Members, PackIdx, Pool, Scope, Tag,
    TypeCheckLimits, TypeData,
};

/// Unification engine over one [`Pool`].
///
/// Borrows the pool and the module's ICE reporter for its lifetime. The pair
/// memo and the recursion guard are cleared after every top-level call.
pub struct UnifyEngine<'a> {
    pool: &'a mut Pool,
    ice: &'a mut InternalErrorReporter,
    scope: Scope,
    limits: TypeCheckLimits,
    memo: PairMemo,
    guard: RecursionGuard,
}

impl<'a> UnifyEngine<'a> {
    /// Create an engine at the root scope with default limits.
    pub fn new(pool: &'a mut Pool, ice: &'a mut InternalErrorReporter) -> Self {
        let limits = TypeCheckLimits::default();
        Self {
            pool,
            ice,
            scope: Scope::root(),
            limits,
            memo: PairMemo::default(),
            guard: RecursionGuard::new(limits.recursion_limit),
        }
    }

    #[must_use]
    pub fn with_limits(mut self, limits: TypeCheckLimits) -> Self {
        self.limits = limits;
        self.guard = RecursionGuard::new(limits.recursion_limit);
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    // ========================================
    // Scopes
    // ========================================

    #[inline]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    #[inline]
    pub fn limits(&self) -> TypeCheckLimits {
        self.limits
    }

    /// Enter a nested scope (e.g. a function body).
    pub fn enter_scope(&mut self) {
        self.scope = self.scope.child();
    }

    /// Leave the current scope.
    pub fn exit_scope(&mut self) {
        self.scope = self.scope.parent();
    }

    /// Allocate a free type owned by the current scope.
    pub fn fresh_type(&mut self) -> Idx {
        self.pool.fresh_type(self.scope.level())
    }

    /// Allocate a free pack owned by the current scope.
    pub fn fresh_pack(&mut self) -> PackIdx {
        self.pool.fresh_pack(self.scope.level())
    }

    // ========================================
    // Pool access
    // ========================================

    #[inline]
    pub fn pool(&self) -> &Pool {
        self.pool
    }

    #[inline]
    pub fn pool_mut(&mut self) -> &mut Pool {
        self.pool
    }

    pub fn resolve(&mut self, idx: Idx) -> Idx {
        self.pool.resolve(idx)
    }

    pub fn resolve_pack(&mut self, pack: PackIdx) -> PackIdx {
        self.pool.resolve_pack(pack)
    }

    /// Simplifying union constructor. See [`Pool::mk_union`].
    pub fn mk_union(&mut self, left: Idx, right: Idx) -> Idx {
        self.pool.mk_union(left, right)
    }

    /// Simplifying intersection constructor. See [`Pool::mk_intersection`].
    pub fn mk_intersection(&mut self, left: Idx, right: Idx) -> Idx {
        self.pool.mk_intersection(left, right)
    }

    // ========================================
    // Entry points
    // ========================================

    /// Commit `sub <: sup` to the type graph.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn unify(&mut self, sub: Idx, sup: Idx) -> Result<bool, InternalError> {
        self.start();
        let result = self.unify_types(sub, sup);
        self.finish();
        result
    }

    fn start(&mut self) {
        debug_assert!(self.memo.is_empty());
        debug_assert_eq!(self.guard.depth(), 0);
    }

    fn finish(&mut self) {
        self.memo.clear();
        self.guard.reset();
    }

    /// Run one nested step under the recursion guard.
    fn descend<R>(
        &mut self,
        step: impl FnOnce(&mut Self) -> Result<R, InternalError>,
    ) -> Result<R, InternalError> {
        if let Err(error) = self.guard.enter() {
            return self.fail(error);
        }
        let result = ensure_sufficient_stack(|| step(self));
        self.guard.exit();
        result
    }

    /// Report an ICE and hand it back for propagation.
    fn fail<R>(&mut self, error: InternalError) -> Result<R, InternalError> {
        Err(self.ice.ice(error))
    }

    fn shape_error<R>(&mut self, node: Idx, expected: Tag) -> Result<R, InternalError> {
        let found = self.pool.tag(node);
        self.fail(InternalError::UnexpectedShape {
            node,
            expected,
            found,
        })
    }

    // ========================================
    // Types
    // ========================================

    fn unify_types(&mut self, sub: Idx, sup: Idx) -> Result<bool, InternalError> {
        let sub = self.pool.resolve(sub);
        let sup = self.pool.resolve(sup);
        if sub == sup {
            return Ok(true);
        }
        if !self.memo.insert_types(sub, sup) {
            return Ok(true);
        }
        self.descend(|this| this.dispatch(sub, sup))
    }

    fn dispatch(&mut self, sub: Idx, sup: Idx) -> Result<bool, InternalError> {
        let sub_tag = self.pool.tag(sub);
        let super_tag = self.pool.tag(sup);

        match (sub_tag, super_tag) {
            (Tag::Bound, _) => self.fail(InternalError::UnresolvedBound { node: sub }),
            (_, Tag::Bound) => self.fail(InternalError::UnresolvedBound { node: sup }),

            (Tag::Free, Tag::Free) => self.bind_free_pair(sub, sup),
            (Tag::Free, _) => self.bind_type(sub, sup),
            (_, Tag::Free) => self.bind_type(sup, sub),

            (Tag::Union, _) => self.unify_union_sub(sub, sup),
            (_, Tag::Union) => self.unify_union_super(sub, sup),
            (Tag::Intersection, _) => self.unify_intersection_sub(sub, sup),
            (_, Tag::Intersection) => self.unify_intersection_super(sub, sup),

            (Tag::Table, Tag::Table) => self.unify_tables(sub, sup),
            (Tag::Metatable, Tag::Metatable) => self.unify_metatables(sub, sup),
            (Tag::Function, Tag::Function) => self.unify_functions(sub, sup),

            (
                Tag::Generic
                | Tag::Primitive
                | Tag::Never
                | Tag::Unknown
                | Tag::Any
                | Tag::Class
                | Tag::Function
                | Tag::Table
                | Tag::Metatable,
                Tag::Generic
                | Tag::Primitive
                | Tag::Never
                | Tag::Unknown
                | Tag::Any
                | Tag::Class
                | Tag::Function
                | Tag::Table
                | Tag::Metatable,
            ) => {
                tracing::trace!(
                    sub = %self.pool.display(sub),
                    sup = %self.pool.display(sup),
                    "accepted without action"
                );
                Ok(true)
            }
        }
    }

    // === Binding ===

    /// Bind one of two free types: the deeper goes to the shallower, and on
    /// a tie `sup` goes to `sub`.
    fn bind_free_pair(&mut self, sub: Idx, sup: Idx) -> Result<bool, InternalError> {
        let (Some(sub_level), Some(super_level)) =
            (self.pool.free_level(sub), self.pool.free_level(sup))
        else {
            return self.shape_error(sub, Tag::Free);
        };
        if sub_level.is_deeper_than(super_level) {
            self.bind_type(sub, sup)
        } else {
            self.bind_type(sup, sub)
        }
    }

    fn bind_type(&mut self, var: Idx, target: Idx) -> Result<bool, InternalError> {
        let Some(level) = self.pool.free_level(var) else {
            return self.fail(InternalError::AlreadyBound { node: var });
        };
        self.adjust_levels(&[target], &[], level);
        tracing::trace!(
            var = %self.pool.display(var),
            target = %self.pool.display(target),
            "bind"
        );
        self.pool.bind_type(var, target);
        Ok(true)
    }

    // === Unions and intersections ===

    fn expect_members(&mut self, idx: Idx, expected: Tag) -> Result<Members, InternalError> {
        let members = match self.pool.data(idx) {
            TypeData::Union(members) if expected == Tag::Union => Some(members.clone()),
            TypeData::Intersection(members) if expected == Tag::Intersection => {
                Some(members.clone())
            }
            _ => None,
        };
        match members {
            Some(members) => Ok(members),
            None => self.shape_error(idx, expected),
        }
    }

    /// `A | B <: T` holds when every arm does. All arms are visited.
    fn unify_union_sub(&mut self, sub: Idx, sup: Idx) -> Result<bool, InternalError> {
        let mut result = true;
        for member in self.expect_members(sub, Tag::Union)? {
            result &= self.unify_types(member, sup)?;
        }
        Ok(result)
    }

    /// `T <: A | B` commits to the first arm that succeeds.
    fn unify_union_super(&mut self, sub: Idx, sup: Idx) -> Result<bool, InternalError> {
        for member in self.expect_members(sup, Tag::Union)? {
            if self.unify_types(sub, member)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// `A & B <: T` commits to the first arm that succeeds.
    fn unify_intersection_sub(&mut self, sub: Idx, sup: Idx) -> Result<bool, InternalError> {
        for member in self.expect_members(sub, Tag::Intersection)? {
            if self.unify_types(member, sup)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// `T <: A & B` holds when every arm does. All arms are visited.
    fn unify_intersection_super(&mut self, sub: Idx, sup: Idx) -> Result<bool, InternalError> {
        let mut result = true;
        for member in self.expect_members(sup, Tag::Intersection)? {
            result &= self.unify_types(sub, member)?;
        }
        Ok(result)
    }

    // === Structural ===

    fn unify_tables(&mut self, sub: Idx, sup: Idx) -> Result<bool, InternalError> {
        let Some(super_table) = self.pool.table(sup).cloned() else {
            return self.shape_error(sup, Tag::Table);
        };

        let mut result = true;
        for (&name, &super_prop) in &super_table.props {
            // Re-read each time: nested unification may have widened `sub`.
            let Some((sub_prop, sub_open)) = self
                .pool
                .table(sub)
                .map(|table| (table.prop(name), table.is_open()))
            else {
                return self.shape_error(sub, Tag::Table);
            };
            match sub_prop {
                Some(sub_prop) => result &= self.unify_types(sub_prop, super_prop)?,
                None if sub_open => {
                    tracing::trace!(
                        table = %sub,
                        prop = self.pool.name_str(name),
                        "widen open table"
                    );
                    self.pool.insert_prop(sub, name, super_prop);
                }
                None => {}
            }
        }

        let Some((sub_indexer, sub_open)) = self
            .pool
            .table(sub)
            .map(|table| (table.indexer, table.is_open()))
        else {
            return self.shape_error(sub, Tag::Table);
        };
        match (sub_indexer, super_table.indexer) {
            (Some(sub_indexer), Some(super_indexer)) => {
                result &= self.unify_types(sub_indexer.key, super_indexer.key)?;
                result &= self.unify_types(sub_indexer.value, super_indexer.value)?;
            }
            (None, Some(super_indexer)) if sub_open => {
                self.pool.set_indexer(sub, super_indexer);
            }
            _ => {}
        }

        Ok(result)
    }

    fn unify_metatables(&mut self, sub: Idx, sup: Idx) -> Result<bool, InternalError> {
        let Some((sub_table, sub_metatable)) = self.pool.metatable_parts(sub) else {
            return self.shape_error(sub, Tag::Metatable);
        };
        let Some((super_table, super_metatable)) = self.pool.metatable_parts(sup) else {
            return self.shape_error(sup, Tag::Metatable);
        };
        let tables = self.unify_types(sub_table, super_table)?;
        let metatables = self.unify_types(sub_metatable, super_metatable)?;
        Ok(tables && metatables)
    }

    fn unify_functions(&mut self, sub: Idx, sup: Idx) -> Result<bool, InternalError> {
        // A polymorphic sub is used at a fresh instance, never at its generics.
        let sub = if self.is_generalized(sub) && !self.is_generalized(sup) {
            self.instantiate(sub)?
        } else {
            sub
        };
        let Some((sub_params, sub_rets)) = self.pool.function(sub).map(|f| (f.params, f.rets))
        else {
            return self.shape_error(sub, Tag::Function);
        };
        let Some((super_params, super_rets)) =
            self.pool.function(sup).map(|f| (f.params, f.rets))
        else {
            return self.shape_error(sup, Tag::Function);
        };
        // Parameters are contravariant, returns covariant.
        let params = self.unify_pack_pair(super_params, sub_params)?;
        let rets = self.unify_pack_pair(sub_rets, super_rets)?;
        Ok(params && rets)
    }

    fn is_generalized(&self, function: Idx) -> bool {
        self.pool
            .function(function)
            .is_some_and(FunctionData::is_generalized)
    }
}
