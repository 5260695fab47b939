use pretty_assertions::assert_eq;

use crate::{Idx, Indexer, Level, PackData, PackIdx, PackTag, Pool, Tag, TypeData};

#[test]
fn builtins_at_fixed_indices() {
    let pool = Pool::new();

    assert_eq!(pool.len(), Idx::BUILTIN_COUNT as usize);
    assert_eq!(pool.pack_count(), PackIdx::BUILTIN_COUNT as usize);
    assert_eq!(pool.tag(Idx::NUMBER), Tag::Primitive);
    assert_eq!(pool.tag(Idx::NEVER), Tag::Never);
    assert_eq!(pool.tag(Idx::UNKNOWN), Tag::Unknown);
    assert_eq!(pool.tag(Idx::ANY), Tag::Any);
    assert_eq!(pool.pack_tag(PackIdx::EMPTY), PackTag::Fixed);
    assert_eq!(pool.variadic_elem(PackIdx::ANY_VARIADIC), Some(Idx::ANY));
}

#[test]
fn builtins_are_persistent() {
    let pool = Pool::new();

    for raw in 0..Idx::BUILTIN_COUNT {
        let flags = pool.flags(Idx::from_raw(raw));
        assert!(flags.is_persistent(), "{raw} should be persistent");
        assert!(!flags.has_free());
    }
    assert!(pool.pack_flags(PackIdx::EMPTY).is_persistent());
}

#[test]
fn resolve_compresses_chains() {
    let mut pool = Pool::new();
    let a = pool.fresh_type(Level::ROOT);
    let b = pool.fresh_type(Level::ROOT);
    let c = pool.fresh_type(Level::ROOT);
    pool.bind_type(a, b);
    pool.bind_type(b, c);
    pool.bind_type(c, Idx::STRING);

    // follow leaves the chain alone
    assert_eq!(pool.follow(a), Idx::STRING);
    assert_eq!(pool.data(a), &TypeData::Bound(b));

    assert_eq!(pool.resolve(a), Idx::STRING);
    assert_eq!(pool.data(a), &TypeData::Bound(Idx::STRING));
    assert_eq!(pool.data(b), &TypeData::Bound(Idx::STRING));
    assert_eq!(pool.data(c), &TypeData::Bound(Idx::STRING));
}

#[test]
fn resolve_pack_compresses_chains() {
    let mut pool = Pool::new();
    let a = pool.fresh_pack(Level::ROOT);
    let b = pool.fresh_pack(Level::ROOT);
    let fixed = pool.pack(&[Idx::NUMBER]);
    pool.bind_pack(a, b);
    pool.bind_pack(b, fixed);

    assert_eq!(pool.resolve_pack(a), fixed);
    assert_eq!(pool.pack_data(a), &PackData::Bound(fixed));
}

#[test]
fn resolve_of_unbound_is_identity() {
    let mut pool = Pool::new();
    let var = pool.fresh_type(Level::ROOT);

    assert_eq!(pool.resolve(var), var);
    assert_eq!(pool.resolve(Idx::NIL), Idx::NIL);
}

#[test]
fn binding_inherits_presence_flags() {
    let mut pool = Pool::new();
    let var = pool.fresh_type(Level::ROOT);
    let generic = pool.generic(Level::ROOT, Some("T"));
    pool.bind_type(var, generic);

    let flags = pool.flags(var);
    assert!(flags.has_free());
    assert!(flags.has_generic());
}

#[test]
fn make_generic_only_converts_free() {
    let mut pool = Pool::new();
    let level = Level::ROOT.next();
    let var = pool.fresh_type(level);

    assert!(pool.make_generic(var));
    assert_eq!(pool.data(var), &TypeData::Generic { level, name: None });
    assert!(pool.flags(var).has_generic());
    assert!(!pool.make_generic(var));
    assert!(!pool.make_generic(Idx::NUMBER));
}

#[test]
fn make_generic_pack_only_converts_free() {
    let mut pool = Pool::new();
    let pack = pool.fresh_pack(Level::ROOT);

    assert!(pool.make_generic_pack(pack));
    assert_eq!(pool.pack_tag(pack), PackTag::Generic);
    assert!(!pool.make_generic_pack(pack));
}

#[test]
fn set_free_level_ignores_non_free() {
    let mut pool = Pool::new();
    let var = pool.fresh_type(Level::from_raw(3));
    pool.set_free_level(var, Level::from_raw(1));
    pool.set_free_level(Idx::NUMBER, Level::from_raw(1));

    assert_eq!(pool.free_level(var), Some(Level::from_raw(1)));
    assert_eq!(pool.free_level(Idx::NUMBER), None);
}

#[test]
fn insert_prop_propagates_flags() {
    let mut pool = Pool::new();
    let table = pool.sealed_table(&[]);
    assert!(!pool.flags(table).has_generic());

    let generic = pool.generic(Level::ROOT, None);
    let name = pool.name("x");
    pool.insert_prop(table, name, generic);

    assert_eq!(pool.table(table).and_then(|t| t.prop(name)), Some(generic));
    assert!(pool.flags(table).has_generic());
}

#[test]
fn set_indexer_on_table() {
    let mut pool = Pool::new();
    let table = pool.open_table(&[]);
    let indexer = Indexer {
        key: Idx::NUMBER,
        value: Idx::STRING,
    };
    pool.set_indexer(table, indexer);

    assert_eq!(pool.table(table).and_then(|t| t.indexer), Some(indexer));
}

#[test]
fn children_of_structural_nodes() {
    let mut pool = Pool::new();
    let function = pool.function_of(&[Idx::NUMBER], &[Idx::STRING]);
    let data = pool.function(function).cloned();
    let Some(data) = data else {
        panic!("expected a function");
    };

    let children = pool.children(function);
    assert!(children.types.is_empty());
    assert_eq!(children.packs.as_slice(), &[data.params, data.rets]);

    let params = pool.pack_children(data.params);
    assert_eq!(params.types.as_slice(), &[Idx::NUMBER]);
    assert!(params.packs.is_empty());

    let table = pool.sealed_table(&[("x", Idx::BOOLEAN)]);
    let meta = pool.metatable(table, Idx::NIL);
    assert_eq!(pool.children(meta).types.as_slice(), &[table, Idx::NIL]);
    assert!(pool.children(Idx::NUMBER).types.is_empty());
}

#[test]
fn names_are_interned() {
    let mut pool = Pool::new();
    let a = pool.name("field");
    let b = pool.name("field");
    let c = pool.name("other");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(pool.name_str(c), "other");
}
