//! Pair memo for co-inductive unification.
//!
//! Records every resolved `(sub, super)` pair entered during one top-level
//! call. Re-entering a recorded pair succeeds immediately, which is what
//! lets recursive table types unify without descending forever.

use rustc_hash::FxHashSet;

use crate::{Idx, PackIdx};

#[derive(Debug, Default)]
pub(crate) struct PairMemo {
    types: FxHashSet<(Idx, Idx)>,
    packs: FxHashSet<(PackIdx, PackIdx)>,
}

impl PairMemo {
    /// Record a type pair; returns false if it was already recorded.
    pub(crate) fn insert_types(&mut self, sub: Idx, sup: Idx) -> bool {
        self.types.insert((sub, sup))
    }

    /// Record a pack pair; returns false if it was already recorded.
    pub(crate) fn insert_packs(&mut self, sub: PackIdx, sup: PackIdx) -> bool {
        self.packs.insert((sub, sup))
    }

    pub(crate) fn clear(&mut self) {
        self.types.clear();
        self.packs.clear();
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.types.is_empty() && self.packs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_are_ordered() {
        let mut memo = PairMemo::default();
        let a = Idx::from_raw(20);
        let b = Idx::from_raw(21);

        assert!(memo.insert_types(a, b));
        assert!(!memo.insert_types(a, b));
        // (b, a) is a different claim.
        assert!(memo.insert_types(b, a));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut memo = PairMemo::default();
        assert!(memo.insert_packs(PackIdx::EMPTY, PackIdx::ANY_VARIADIC));
        assert!(!memo.is_empty());

        memo.clear();
        assert!(memo.is_empty());
        assert!(memo.insert_packs(PackIdx::EMPTY, PackIdx::ANY_VARIADIC));
    }
}
