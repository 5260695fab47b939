use pretty_assertions::assert_eq;

use crate::{Idx, Indexer, Level, Pool, TableState};

#[test]
fn builtins_by_name() {
    let pool = Pool::new();

    assert_eq!(pool.display(Idx::NUMBER), "number");
    assert_eq!(pool.display(Idx::NEVER), "never");
    assert_eq!(pool.display_pack(crate::PackIdx::EMPTY), "()");
}

#[test]
fn variables_show_handle_and_level() {
    let mut pool = Pool::new();
    let var = pool.fresh_type(Level::from_raw(2));
    let generic = pool.generic(Level::ROOT, None);
    let named = pool.generic(Level::ROOT, Some("T"));

    assert_eq!(pool.display(var), format!("'t{}@L2", var.raw()));
    assert_eq!(pool.display(generic), format!("'g{}", generic.raw()));
    assert_eq!(pool.display(named), "T");
}

#[test]
fn bound_prints_target() {
    let mut pool = Pool::new();
    let var = pool.fresh_type(Level::ROOT);
    pool.bind_type(var, Idx::STRING);

    assert_eq!(pool.display(var), "string");
}

#[test]
fn functions() {
    let mut pool = Pool::new();
    let single = pool.function_of(&[Idx::NUMBER, Idx::STRING], &[Idx::BOOLEAN]);
    let multi = pool.function_of(&[], &[Idx::NUMBER, Idx::NIL]);
    let rest = pool.variadic(Idx::ANY);
    let params = pool.pack_with_tail(&[Idx::NUMBER], Some(rest));
    let variadic = pool.function_type(params, crate::PackIdx::EMPTY);

    assert_eq!(pool.display(single), "(number, string) -> boolean");
    assert_eq!(pool.display(multi), "() -> (number, nil)");
    assert_eq!(pool.display(variadic), "(number, ...any) -> ()");
}

#[test]
fn tables() {
    let mut pool = Pool::new();
    let sealed = pool.sealed_table(&[("x", Idx::NUMBER), ("y", Idx::STRING)]);
    let open = pool.open_table(&[("x", Idx::NUMBER)]);
    let empty_open = pool.open_table(&[]);
    let indexed = pool.table_type(
        &[],
        Some(Indexer {
            key: Idx::STRING,
            value: Idx::BOOLEAN,
        }),
        TableState::Sealed,
    );

    assert_eq!(pool.display(sealed), "{x: number, y: string}");
    assert_eq!(pool.display(open), "{x: number, ..}");
    assert_eq!(pool.display(empty_open), "{..}");
    assert_eq!(pool.display(indexed), "{[string]: boolean}");
}

#[test]
fn recursive_table_prints_cycle() {
    let mut pool = Pool::new();
    let var = pool.fresh_type(Level::ROOT);
    let node = pool.sealed_table(&[("next", var)]);
    pool.bind_type(var, node);

    assert_eq!(pool.display(node), "{next: <cycle>}");
}

#[test]
fn set_operations_and_metatables() {
    let mut pool = Pool::new();
    let union = pool.union(&[Idx::NUMBER, Idx::NIL]);
    let point = pool.class("Point");
    let inter = pool.intersection(&[point, Idx::STRING]);
    let table = pool.sealed_table(&[]);
    let meta = pool.metatable(table, point);

    assert_eq!(pool.display(union), "number | nil");
    assert_eq!(pool.display(inter), "Point & string");
    assert_eq!(pool.display(meta), "{ @metatable Point, {} }");
}

#[test]
fn pack_tails() {
    let mut pool = Pool::new();
    let free = pool.fresh_pack(Level::ROOT);
    let generic = pool.generic_pack(Level::ROOT, Some("A"));
    let with_free = pool.pack_with_tail(&[Idx::NUMBER], Some(free));
    let with_generic = pool.pack_with_tail(&[Idx::STRING], Some(generic));

    assert_eq!(
        pool.display_pack(with_free),
        format!("(number, 'p{}@ROOT...)", free.raw())
    );
    assert_eq!(pool.display_pack(with_generic), "(string, A...)");
}
