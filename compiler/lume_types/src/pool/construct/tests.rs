use pretty_assertions::assert_eq;

use crate::{Idx, Indexer, Level, PackData, PackIdx, Pool, TableState, Tag, TypeData};

#[test]
fn fresh_variables_carry_level() {
    let mut pool = Pool::new();
    let level = Level::from_raw(2);
    let var = pool.fresh_type(level);
    let pack = pool.fresh_pack(level);

    assert_eq!(pool.free_level(var), Some(level));
    assert_eq!(pool.free_pack_level(pack), Some(level));
    assert!(pool.flags(var).has_free());
    assert!(pool.pack_flags(pack).has_free());
}

#[test]
fn generics_are_named() {
    let mut pool = Pool::new();
    let generic = pool.generic(Level::ROOT, Some("T"));

    let TypeData::Generic {
        name: Some(name), ..
    } = *pool.data(generic)
    else {
        panic!("expected a named generic");
    };
    assert_eq!(pool.name_str(name), "T");
    assert!(pool.flags(generic).has_generic());
}

#[test]
fn function_flags_follow_packs() {
    let mut pool = Pool::new();
    let closed = pool.function_of(&[Idx::NUMBER], &[Idx::STRING]);
    assert!(!pool.flags(closed).has_free());

    let var = pool.fresh_type(Level::ROOT);
    let open = pool.function_of(&[], &[var]);
    assert!(pool.flags(open).has_free());
}

#[test]
fn open_tables_may_gain_free_content() {
    let mut pool = Pool::new();
    let open = pool.open_table(&[("x", Idx::NUMBER)]);
    let sealed = pool.sealed_table(&[("x", Idx::NUMBER)]);

    assert!(pool.flags(open).has_free());
    assert!(!pool.flags(sealed).has_free());
    assert_eq!(pool.table(sealed).map(|t| t.state), Some(TableState::Sealed));
}

#[test]
fn table_with_indexer() {
    let mut pool = Pool::new();
    let var = pool.fresh_type(Level::ROOT);
    let indexer = Indexer {
        key: Idx::STRING,
        value: var,
    };
    let table = pool.table_type(&[], Some(indexer), TableState::Sealed);

    assert_eq!(pool.table(table).and_then(|t| t.indexer), Some(indexer));
    assert!(pool.flags(table).has_free());
}

#[test]
fn metatable_parts() {
    let mut pool = Pool::new();
    let table = pool.sealed_table(&[]);
    let meta = pool.sealed_table(&[("__index", table)]);
    let ty = pool.metatable(table, meta);

    assert_eq!(pool.tag(ty), Tag::Metatable);
    assert_eq!(pool.metatable_parts(ty), Some((table, meta)));
}

#[test]
fn empty_pack_is_builtin() {
    let mut pool = Pool::new();
    let before = pool.pack_count();

    assert_eq!(pool.pack(&[]), PackIdx::EMPTY);
    assert_eq!(pool.pack_count(), before);
}

#[test]
fn empty_head_collapses_to_tail() {
    let mut pool = Pool::new();
    let tail = pool.variadic(Idx::NUMBER);

    assert_eq!(pool.pack_with_tail(&[], Some(tail)), tail);
}

#[test]
fn pack_with_tail_flags() {
    let mut pool = Pool::new();
    let tail = pool.fresh_pack(Level::ROOT);
    let pack = pool.pack_with_tail(&[Idx::NUMBER], Some(tail));

    assert_eq!(
        pool.pack_data(pack),
        &PackData::Fixed {
            head: [Idx::NUMBER].into_iter().collect(),
            tail: Some(tail),
        }
    );
    assert!(pool.pack_flags(pack).has_free());
}

#[test]
fn raw_set_nodes_keep_members() {
    let mut pool = Pool::new();
    let union = pool.alloc_union([Idx::NUMBER, Idx::STRING].into_iter().collect());
    let inter = pool.alloc_intersection([Idx::NUMBER].into_iter().collect());

    assert_eq!(pool.members(union), Some(&[Idx::NUMBER, Idx::STRING][..]));
    assert_eq!(pool.tag(inter), Tag::Intersection);
}
