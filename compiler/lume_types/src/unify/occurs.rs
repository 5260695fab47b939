//! Occurs check for type packs.
//!
//! Binding a free pack `p` to a pack whose tail chain reaches `p` would build
//! an infinite pack. The check walks `Bound` links and `Fixed` tails only;
//! element types cannot make a pack infinite.

use rustc_hash::FxHashSet;

use super::UnifyEngine;
use crate::{InternalError, PackData, PackIdx};

/// Outcome of an occurs check.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OccursCheckResult {
    /// The needle does not occur; binding is safe.
    Pass,
    /// The needle occurs in the haystack's tail chain.
    Fail,
}

impl UnifyEngine<'_> {
    /// Check whether the free pack `needle` occurs in `haystack`'s tail chain.
    ///
    /// `seen` carries visited packs across related checks; a pack already in
    /// it is not walked again.
    pub fn occurs_check(
        &mut self,
        seen: &mut FxHashSet<PackIdx>,
        needle: PackIdx,
        haystack: PackIdx,
    ) -> Result<OccursCheckResult, InternalError> {
        let needle = self.pool.resolve_pack(needle);
        if self.pool.free_pack_level(needle).is_none() {
            return self.fail(InternalError::NeedleNotFree { needle });
        }

        let mut current = haystack;
        loop {
            if current == needle {
                return Ok(OccursCheckResult::Fail);
            }
            if !seen.insert(current) {
                return Ok(OccursCheckResult::Pass);
            }
            match self.pool.pack_data(current) {
                PackData::Bound(next) => current = *next,
                PackData::Fixed {
                    tail: Some(next), ..
                } => current = *next,
                PackData::Fixed { tail: None, .. }
                | PackData::Variadic(_)
                | PackData::Free { .. }
                | PackData::Generic { .. } => return Ok(OccursCheckResult::Pass),
            }
        }
    }
}
