//! Debug rendering of types for log fields and test assertions.
//!
//! This is not the user-facing printer: free and generic variables render
//! with their handle and level so traces can be correlated.
//!
//! Cycles (tables that reach themselves) render as `<cycle>`.

use rustc_hash::FxHashSet;

use super::Pool;
use crate::{Idx, PackData, PackIdx, TableState, TypeData};

impl Pool {
    /// Render a type.
    pub fn display(&self, idx: Idx) -> String {
        let mut printer = Printer::new(self);
        printer.ty(idx);
        printer.out
    }

    /// Render a type pack.
    pub fn display_pack(&self, pack: PackIdx) -> String {
        let mut printer = Printer::new(self);
        printer.pack(pack);
        printer.out
    }
}

struct Printer<'a> {
    pool: &'a Pool,
    out: String,
    /// Nodes currently being printed (cycle detection).
    active: FxHashSet<Idx>,
}

impl<'a> Printer<'a> {
    fn new(pool: &'a Pool) -> Self {
        Self {
            pool,
            out: String::new(),
            active: FxHashSet::default(),
        }
    }

    fn ty(&mut self, idx: Idx) {
        let pool = self.pool;
        let idx = pool.follow(idx);
        if let Some(name) = idx.name() {
            self.out.push_str(name);
            return;
        }
        if !self.active.insert(idx) {
            self.out.push_str("<cycle>");
            return;
        }

        match pool.data(idx) {
            TypeData::Free { level } => {
                self.out.push_str(&format!("'t{}@{level}", idx.raw()));
            }
            TypeData::Generic { name, .. } => match name {
                Some(name) => self.out.push_str(pool.name_str(*name)),
                None => self.out.push_str(&format!("'g{}", idx.raw())),
            },
            TypeData::Primitive(kind) => self.out.push_str(kind.name()),
            TypeData::Never => self.out.push_str("never"),
            TypeData::Unknown => self.out.push_str("unknown"),
            TypeData::Any => self.out.push_str("any"),
            TypeData::Class { name } => self.out.push_str(pool.name_str(*name)),
            TypeData::Function(function) => {
                self.out.push('(');
                self.pack_elements(function.params);
                self.out.push_str(") -> ");
                self.returns(function.rets);
            }
            TypeData::Table(table) => {
                self.out.push('{');
                let mut first = true;
                for (&name, &prop) in &table.props {
                    if !first {
                        self.out.push_str(", ");
                    }
                    first = false;
                    self.out.push_str(pool.name_str(name));
                    self.out.push_str(": ");
                    self.ty(prop);
                }
                if let Some(indexer) = table.indexer {
                    if !first {
                        self.out.push_str(", ");
                    }
                    first = false;
                    self.out.push('[');
                    self.ty(indexer.key);
                    self.out.push_str("]: ");
                    self.ty(indexer.value);
                }
                if table.state == TableState::Open {
                    self.out.push_str(if first { ".." } else { ", .." });
                }
                self.out.push('}');
            }
            TypeData::Metatable { table, metatable } => {
                self.out.push_str("{ @metatable ");
                self.ty(*metatable);
                self.out.push_str(", ");
                self.ty(*table);
                self.out.push_str(" }");
            }
            TypeData::Union(members) => self.joined(members, " | "),
            TypeData::Intersection(members) => self.joined(members, " & "),
            TypeData::Bound(target) => self.ty(*target),
        }

        self.active.remove(&idx);
    }

    fn joined(&mut self, members: &[Idx], separator: &str) {
        for (i, &member) in members.iter().enumerate() {
            if i > 0 {
                self.out.push_str(separator);
            }
            self.ty(member);
        }
    }

    fn pack(&mut self, pack: PackIdx) {
        self.out.push('(');
        self.pack_elements(pack);
        self.out.push(')');
    }

    /// Single-value returns print bare, everything else parenthesized.
    fn returns(&mut self, pack: PackIdx) {
        let pool = self.pool;
        let pack = pool.follow_pack(pack);
        if let PackData::Fixed { head, tail: None } = pool.pack_data(pack) {
            if head.len() == 1 {
                self.ty(head[0]);
                return;
            }
        }
        self.pack(pack);
    }

    fn pack_elements(&mut self, pack: PackIdx) {
        let pool = self.pool;
        let mut current = Some(pack);
        let mut first = true;
        let mut seen = FxHashSet::default();
        while let Some(pack) = current {
            let pack = pool.follow_pack(pack);
            if !seen.insert(pack) {
                self.out.push_str(", <cycle>");
                return;
            }
            current = None;
            match pool.pack_data(pack) {
                PackData::Fixed { head, tail } => {
                    for &element in head {
                        if !first {
                            self.out.push_str(", ");
                        }
                        first = false;
                        self.ty(element);
                    }
                    current = *tail;
                }
                data => {
                    if !first {
                        self.out.push_str(", ");
                    }
                    first = false;
                    match data {
                        PackData::Variadic(elem) => {
                            self.out.push_str("...");
                            self.ty(*elem);
                        }
                        PackData::Free { level } => {
                            self.out.push_str(&format!("'p{}@{level}...", pack.raw()));
                        }
                        PackData::Generic { name: Some(name), .. } => {
                            self.out.push_str(pool.name_str(*name));
                            self.out.push_str("...");
                        }
                        PackData::Generic { name: None, .. } => {
                            self.out.push_str(&format!("'gp{}...", pack.raw()));
                        }
                        PackData::Fixed { .. } | PackData::Bound(_) => {}
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
