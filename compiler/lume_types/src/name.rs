//! Interned property, class, and generic names.

use rustc_hash::FxHashMap;

/// An interned name.
///
/// Names order by interning order, which keeps table walks deterministic
/// for a given sequence of pool operations.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// String table backing [`Name`].
#[derive(Clone, Debug, Default)]
pub(crate) struct NameInterner {
    map: FxHashMap<Box<str>, Name>,
    strings: Vec<Box<str>>,
}

impl NameInterner {
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn intern(&mut self, text: &str) -> Name {
        if let Some(&name) = self.map.get(text) {
            return name;
        }
        let name = Name(self.strings.len() as u32);
        self.strings.push(text.into());
        self.map.insert(text.into(), name);
        name
    }

    pub(crate) fn lookup(&self, name: Name) -> &str {
        self.strings
            .get(name.0 as usize)
            .map_or("<unknown name>", |text| &**text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_stable() {
        let mut names = NameInterner::default();
        let x = names.intern("x");
        let y = names.intern("y");

        assert_eq!(names.intern("x"), x);
        assert!(x < y);
        assert_eq!(names.lookup(y), "y");
        assert_eq!(names.lookup(Name(99)), "<unknown name>");
    }
}
