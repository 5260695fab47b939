//! Type-pack unification.
//!
//! Packs are flattened into `(head, tail)` before fixed-length comparison, so
//! `(a, ...(b, ...c))` and `(a, b, ...c)` unify the same way. Elements of the
//! longer head that have no partner are matched against the shorter side's
//! tail.

use std::cmp::Ordering;

use rustc_hash::FxHashSet;

use super::{OccursCheckResult, UnifyEngine};
use crate::data::PackHead;
use crate::{Idx, InternalError, PackData, PackIdx, PackTag};

/// Which operand the leftover elements came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Side {
    Sub,
    Super,
}

impl UnifyEngine<'_> {
    /// Commit `sub <: sup` between two packs.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn unify_packs(&mut self, sub: PackIdx, sup: PackIdx) -> Result<bool, InternalError> {
        self.start();
        let result = self.unify_pack_pair(sub, sup);
        self.finish();
        result
    }

    pub(super) fn unify_pack_pair(
        &mut self,
        sub: PackIdx,
        sup: PackIdx,
    ) -> Result<bool, InternalError> {
        let sub = self.pool.resolve_pack(sub);
        let sup = self.pool.resolve_pack(sup);
        if sub == sup {
            return Ok(true);
        }
        if !self.memo.insert_packs(sub, sup) {
            return Ok(true);
        }
        self.descend(|this| this.dispatch_packs(sub, sup))
    }

    fn dispatch_packs(&mut self, sub: PackIdx, sup: PackIdx) -> Result<bool, InternalError> {
        match (self.pool.pack_tag(sub), self.pool.pack_tag(sup)) {
            (PackTag::Bound, _) => self.fail(InternalError::UnresolvedBoundPack { pack: sub }),
            (_, PackTag::Bound) => self.fail(InternalError::UnresolvedBoundPack { pack: sup }),

            (PackTag::Free, PackTag::Free) => self.bind_free_pack_pair(sub, sup),
            (PackTag::Free, _) => self.bind_pack(sub, sup),
            (_, PackTag::Free) => self.bind_pack(sup, sub),

            (PackTag::Variadic, PackTag::Variadic) => {
                let sub_elem = self.expect_variadic(sub)?;
                let super_elem = self.expect_variadic(sup)?;
                self.unify_types(sub_elem, super_elem)
            }
            (PackTag::Fixed, _) | (_, PackTag::Fixed) => self.unify_fixed_packs(sub, sup),

            (PackTag::Generic, _) | (_, PackTag::Generic) => Ok(true),
        }
    }

    // === Binding ===

    fn bind_free_pack_pair(&mut self, sub: PackIdx, sup: PackIdx) -> Result<bool, InternalError> {
        let (Some(sub_level), Some(super_level)) = (
            self.pool.free_pack_level(sub),
            self.pool.free_pack_level(sup),
        ) else {
            return self.pack_shape_error(sub, PackTag::Free);
        };
        if sub_level.is_deeper_than(super_level) {
            self.bind_pack(sub, sup)
        } else {
            self.bind_pack(sup, sub)
        }
    }

    /// Bind a free pack, unless that would make it contain itself.
    fn bind_pack(&mut self, var: PackIdx, target: PackIdx) -> Result<bool, InternalError> {
        let Some(level) = self.pool.free_pack_level(var) else {
            return self.fail(InternalError::AlreadyBoundPack { pack: var });
        };

        let mut seen = FxHashSet::default();
        if self.occurs_check(&mut seen, var, target)? == OccursCheckResult::Fail {
            tracing::trace!(
                pack = %self.pool.display_pack(var),
                target = %self.pool.display_pack(target),
                "occurs check failed"
            );
            return Ok(false);
        }

        self.adjust_levels(&[], &[target], level);
        tracing::trace!(
            pack = %self.pool.display_pack(var),
            target = %self.pool.display_pack(target),
            "bind pack"
        );
        self.pool.bind_pack(var, target);
        Ok(true)
    }

    // === Fixed packs ===

    fn unify_fixed_packs(&mut self, sub: PackIdx, sup: PackIdx) -> Result<bool, InternalError> {
        let (sub_head, sub_tail) = self.flatten_pack(sub)?;
        let (super_head, super_tail) = self.flatten_pack(sup)?;

        let mut result = true;
        for (&sub_elem, &super_elem) in sub_head.iter().zip(&super_head) {
            result &= self.unify_types(sub_elem, super_elem)?;
        }

        match sub_head.len().cmp(&super_head.len()) {
            Ordering::Equal => {
                if let (Some(sub_tail), Some(super_tail)) = (sub_tail, super_tail) {
                    result &= self.unify_pack_pair(sub_tail, super_tail)?;
                }
            }
            Ordering::Greater => {
                let leftover = &sub_head[super_head.len()..];
                result &= self.unify_leftover(leftover, Side::Sub, sub_tail, super_tail)?;
            }
            Ordering::Less => {
                let leftover = &super_head[sub_head.len()..];
                result &= self.unify_leftover(leftover, Side::Super, super_tail, sub_tail)?;
            }
        }

        Ok(result)
    }

    /// Match unpaired elements from the longer head against the other tail.
    fn unify_leftover(
        &mut self,
        leftover: &[Idx],
        side: Side,
        longer_tail: Option<PackIdx>,
        shorter_tail: Option<PackIdx>,
    ) -> Result<bool, InternalError> {
        let Some(tail) = shorter_tail else {
            return Ok(true);
        };

        match self.pool.pack_tag(tail) {
            PackTag::Variadic => {
                let elem = self.expect_variadic(tail)?;
                let mut result = true;
                for &ty in leftover {
                    result &= match side {
                        Side::Sub => self.unify_types(ty, elem)?,
                        Side::Super => self.unify_types(elem, ty)?,
                    };
                }
                // A free tail past the leftovers is still covered by the variadic.
                if let Some(longer_tail) = longer_tail {
                    let longer_tail = self.pool.resolve_pack(longer_tail);
                    if self.pool.pack_tag(longer_tail) == PackTag::Free {
                        result &= match side {
                            Side::Sub => self.unify_pack_pair(longer_tail, tail)?,
                            Side::Super => self.unify_pack_pair(tail, longer_tail)?,
                        };
                    }
                }
                Ok(result)
            }
            PackTag::Free => {
                let rest = self.pool.pack_with_tail(leftover, longer_tail);
                match side {
                    Side::Sub => self.unify_pack_pair(rest, tail),
                    Side::Super => self.unify_pack_pair(tail, rest),
                }
            }
            PackTag::Generic => Ok(true),
            PackTag::Bound => self.fail(InternalError::UnresolvedBoundPack { pack: tail }),
            PackTag::Fixed => self.pack_shape_error(tail, PackTag::Free),
        }
    }

    /// Concatenate the heads along a pack's tail chain.
    ///
    /// The returned tail, if any, is resolved and not `Fixed`.
    fn flatten_pack(
        &mut self,
        pack: PackIdx,
    ) -> Result<(PackHead, Option<PackIdx>), InternalError> {
        let mut head = PackHead::new();
        let mut seen = FxHashSet::default();
        let mut current = self.pool.resolve_pack(pack);

        loop {
            if !seen.insert(current) {
                return self.fail(InternalError::CyclicPack { pack: current });
            }
            let tail = match self.pool.pack_data(current) {
                PackData::Fixed { head: elems, tail } => {
                    head.extend_from_slice(elems);
                    *tail
                }
                _ => return Ok((head, Some(current))),
            };
            match tail {
                Some(next) => current = self.pool.resolve_pack(next),
                None => return Ok((head, None)),
            }
        }
    }

    fn expect_variadic(&mut self, pack: PackIdx) -> Result<Idx, InternalError> {
        match self.pool.variadic_elem(pack) {
            Some(elem) => Ok(elem),
            None => self.pack_shape_error(pack, PackTag::Variadic),
        }
    }

    fn pack_shape_error<R>(&mut self, pack: PackIdx, expected: PackTag) -> Result<R, InternalError> {
        let found = self.pool.pack_tag(pack);
        self.fail(InternalError::UnexpectedPackShape {
            pack,
            expected,
            found,
        })
    }
}
