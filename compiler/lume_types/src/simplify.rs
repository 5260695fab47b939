//! Union and intersection simplification.
//!
//! Every union and intersection node is built through here, so the member
//! invariants hold for all of them:
//! - members of a nested set operation of the same kind are flattened in
//! - members are deduplicated by resolved identity
//! - `never` is dropped from unions and `unknown` from intersections
//! - `unknown` absorbs a union and `never` absorbs an intersection
//! - a single survivor is returned bare

use rustc_hash::FxHashSet;

use crate::data::Members;
use crate::unify::ensure_sufficient_stack;
use crate::{Idx, Pool, Tag};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum SetKind {
    Union,
    Intersection,
}

impl SetKind {
    /// Element removed from the set.
    const fn identity(self) -> Idx {
        match self {
            Self::Union => Idx::NEVER,
            Self::Intersection => Idx::UNKNOWN,
        }
    }

    /// Element that swallows the whole set.
    const fn absorbing(self) -> Idx {
        match self {
            Self::Union => Idx::UNKNOWN,
            Self::Intersection => Idx::NEVER,
        }
    }

    const fn tag(self) -> Tag {
        match self {
            Self::Union => Tag::Union,
            Self::Intersection => Tag::Intersection,
        }
    }
}

impl Pool {
    /// `simplify(left | right)`.
    pub fn mk_union(&mut self, left: Idx, right: Idx) -> Idx {
        self.simplify_set(SetKind::Union, &[left, right])
    }

    /// `simplify(left & right)`.
    pub fn mk_intersection(&mut self, left: Idx, right: Idx) -> Idx {
        self.simplify_set(SetKind::Intersection, &[left, right])
    }

    /// Simplified union of `members`; the empty union is `never`.
    pub fn union(&mut self, members: &[Idx]) -> Idx {
        self.simplify_set(SetKind::Union, members)
    }

    /// Simplified intersection of `members`; the empty intersection is `unknown`.
    pub fn intersection(&mut self, members: &[Idx]) -> Idx {
        self.simplify_set(SetKind::Intersection, members)
    }

    fn simplify_set(&mut self, kind: SetKind, inputs: &[Idx]) -> Idx {
        let mut operands = Members::new();
        for &input in inputs {
            let ty = self.follow(input);
            if ty == kind.absorbing() {
                return kind.absorbing();
            }
            if ty != kind.identity() && !operands.contains(&ty) {
                operands.push(ty);
            }
        }
        // A lone operand was itself built here; return it as is.
        if let [single] = operands[..] {
            return single;
        }

        let mut members = Members::new();
        let mut visited = FxHashSet::default();
        for &operand in &operands {
            if self.collect_members(kind, operand, &mut members, &mut visited) {
                return kind.absorbing();
            }
        }

        match members.len() {
            0 => kind.identity(),
            1 => members[0],
            _ => match kind {
                SetKind::Union => self.alloc_union(members),
                SetKind::Intersection => self.alloc_intersection(members),
            },
        }
    }

    /// Append the flattened members of `ty` to `out`.
    ///
    /// Returns true as soon as the absorbing element is reached.
    fn collect_members(
        &self,
        kind: SetKind,
        ty: Idx,
        out: &mut Members,
        visited: &mut FxHashSet<Idx>,
    ) -> bool {
        let ty = self.follow(ty);
        if ty == kind.absorbing() {
            return true;
        }
        if ty == kind.identity() {
            return false;
        }

        if self.tag(ty) == kind.tag() {
            // A member variable bound to its own enclosing set would loop.
            if !visited.insert(ty) {
                return false;
            }
            let members = self.members(ty).unwrap_or_default();
            return ensure_sufficient_stack(|| {
                members
                    .iter()
                    .any(|&member| self.collect_members(kind, member, out, visited))
            });
        }

        if !out.contains(&ty) {
            out.push(ty);
        }
        false
    }
}
