//! Free-node discovery and level adjustment.
//!
//! Both binding and generalization need the set of free nodes reachable from
//! a root. The walk follows every child edge (bound links included) and skips
//! subgraphs whose flags rule out free content.

use rustc_hash::FxHashSet;

use super::UnifyEngine;
use crate::{Idx, Level, PackIdx, Pool};

#[derive(Copy, Clone)]
enum Node {
    Type(Idx),
    Pack(PackIdx),
}

/// Free nodes reachable from a set of roots, in discovery order.
#[derive(Debug, Default)]
pub(super) struct FreeNodes {
    pub(super) types: Vec<(Idx, Level)>,
    pub(super) packs: Vec<(PackIdx, Level)>,
}

impl FreeNodes {
    pub(super) fn collect(pool: &Pool, types: &[Idx], packs: &[PackIdx]) -> Self {
        let mut found = Self::default();
        let mut seen_types = FxHashSet::default();
        let mut seen_packs = FxHashSet::default();

        let mut stack: Vec<Node> = Vec::with_capacity(types.len() + packs.len());
        stack.extend(packs.iter().rev().map(|&pack| Node::Pack(pack)));
        stack.extend(types.iter().rev().map(|&idx| Node::Type(idx)));

        while let Some(node) = stack.pop() {
            let children = match node {
                Node::Type(idx) => {
                    if !pool.flags(idx).has_free() || !seen_types.insert(idx) {
                        continue;
                    }
                    if let Some(level) = pool.free_level(idx) {
                        found.types.push((idx, level));
                        continue;
                    }
                    pool.children(idx)
                }
                Node::Pack(pack) => {
                    if !pool.pack_flags(pack).has_free() || !seen_packs.insert(pack) {
                        continue;
                    }
                    if let Some(level) = pool.free_pack_level(pack) {
                        found.packs.push((pack, level));
                        continue;
                    }
                    pool.pack_children(pack)
                }
            };
            // Reversed so the first child is visited first.
            stack.extend(children.packs.iter().rev().map(|&pack| Node::Pack(pack)));
            stack.extend(children.types.iter().rev().map(|&idx| Node::Type(idx)));
        }

        found
    }

    /// Check if any collected node is owned by a scope deeper than `level`.
    pub(super) fn any_deeper_than(&self, level: Level) -> bool {
        self.types.iter().any(|(_, owner)| owner.is_deeper_than(level))
            || self.packs.iter().any(|(_, owner)| owner.is_deeper_than(level))
    }
}

impl UnifyEngine<'_> {
    /// Lower every free node reachable from the roots to at most `level`.
    ///
    /// Run before a free node at `level` is bound, so nothing it now points
    /// at can be generalized by a deeper scope.
    pub(super) fn adjust_levels(&mut self, types: &[Idx], packs: &[PackIdx], level: Level) {
        let found = FreeNodes::collect(self.pool, types, packs);
        for (var, owner) in found.types {
            if owner.is_deeper_than(level) {
                tracing::trace!(var = %var, from = %owner, to = %level, "lower level");
                self.pool.set_free_level(var, level);
            }
        }
        for (var, owner) in found.packs {
            if owner.is_deeper_than(level) {
                tracing::trace!(pack = %var, from = %owner, to = %level, "lower pack level");
                self.pool.set_free_pack_level(var, level);
            }
        }
    }
}
