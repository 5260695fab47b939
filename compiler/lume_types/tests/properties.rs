//! Property-based tests for unification and simplification.
//!
//! Random type graphs are built from a small shape language and checked for:
//! 1. Absorption: `unknown | T = unknown`, `never | T = T`, and duals
//! 2. Idempotence: a second `unify(a, b)` changes nothing
//! 3. Bind direction: free/free binding depends only on levels and order

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use lume_types::{Idx, InternalErrorReporter, Level, Pool, TypeData, UnifyEngine};
use proptest::prelude::*;

/// Recipe for one type, built into a pool on demand.
#[derive(Clone, Debug)]
enum Shape {
    Builtin(u32),
    Free,
    Table {
        open: bool,
        props: Vec<(usize, Shape)>,
    },
    Function {
        params: Vec<Shape>,
        rets: Vec<Shape>,
    },
    Union(Vec<Shape>),
}

const PROP_NAMES: [&str; 4] = ["a", "b", "c", "d"];

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        (0..Idx::BUILTIN_COUNT).prop_map(Shape::Builtin),
        Just(Shape::Free),
    ];
    leaf.prop_recursive(4, 24, 4, |inner| {
        prop_oneof![
            (
                any::<bool>(),
                prop::collection::vec((0..PROP_NAMES.len(), inner.clone()), 0..4)
            )
                .prop_map(|(open, props)| Shape::Table { open, props }),
            (
                prop::collection::vec(inner.clone(), 0..3),
                prop::collection::vec(inner.clone(), 0..3)
            )
                .prop_map(|(params, rets)| Shape::Function { params, rets }),
            prop::collection::vec(inner, 1..4).prop_map(Shape::Union),
        ]
    })
}

fn build(pool: &mut Pool, shape: &Shape) -> Idx {
    match shape {
        Shape::Builtin(raw) => Idx::from_raw(*raw),
        Shape::Free => pool.fresh_type(Level::ROOT),
        Shape::Table { open, props } => {
            let props: Vec<(&str, Idx)> = props
                .iter()
                .map(|(name, shape)| (PROP_NAMES[*name], build(pool, shape)))
                .collect();
            if *open {
                pool.open_table(&props)
            } else {
                pool.sealed_table(&props)
            }
        }
        Shape::Function { params, rets } => {
            let params: Vec<Idx> = params.iter().map(|shape| build(pool, shape)).collect();
            let rets: Vec<Idx> = rets.iter().map(|shape| build(pool, shape)).collect();
            pool.function_of(&params, &rets)
        }
        Shape::Union(members) => {
            let members: Vec<Idx> = members.iter().map(|shape| build(pool, shape)).collect();
            pool.union(&members)
        }
    }
}

/// Every node's record, for whole-graph comparison.
///
/// Bound links are normalized to their chain's end so path compression does
/// not count as a change.
fn snapshot(pool: &Pool) -> Vec<TypeData> {
    (0..pool.len())
        .map(|raw| {
            let idx = Idx::from_raw(u32::try_from(raw).unwrap());
            match pool.data(idx) {
                TypeData::Bound(target) => TypeData::Bound(pool.follow(*target)),
                data => data.clone(),
            }
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 1000,
        ..ProptestConfig::default()
    })]

    /// Unknown swallows unions, never swallows intersections.
    #[test]
    fn prop_absorption(shape in shape_strategy()) {
        let mut pool = Pool::new();
        let ty = build(&mut pool, &shape);

        prop_assert_eq!(pool.mk_union(Idx::UNKNOWN, ty), Idx::UNKNOWN);
        prop_assert_eq!(pool.mk_intersection(Idx::NEVER, ty), Idx::NEVER);
        prop_assert_eq!(pool.mk_union(Idx::NEVER, ty), pool.follow(ty));
        prop_assert_eq!(pool.mk_intersection(Idx::UNKNOWN, ty), pool.follow(ty));
    }

    /// Repeating a unification changes nothing and reports the same result.
    #[test]
    fn prop_idempotence(sub in shape_strategy(), sup in shape_strategy()) {
        init_tracing();
        let mut pool = Pool::new();
        let sub = build(&mut pool, &sub);
        let sup = build(&mut pool, &sup);
        let mut ice = InternalErrorReporter::new();
        let mut engine = UnifyEngine::new(&mut pool, &mut ice);

        let first = engine.unify(sub, sup).unwrap();
        let before = snapshot(engine.pool());
        let packs = engine.pool().pack_count();

        let second = engine.unify(sub, sup).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(snapshot(engine.pool()), before);
        prop_assert_eq!(engine.pool().pack_count(), packs);
    }

    /// Free/free binding goes deeper-to-shallower, super-to-sub on ties.
    #[test]
    fn prop_bind_direction(sub_level in 0u16..4, super_level in 0u16..4) {
        let mut pool = Pool::new();
        let sub = pool.fresh_type(Level::from_raw(sub_level));
        let sup = pool.fresh_type(Level::from_raw(super_level));
        let mut ice = InternalErrorReporter::new();
        let mut engine = UnifyEngine::new(&mut pool, &mut ice);

        prop_assert!(engine.unify(sub, sup).unwrap());

        let (bound, root) = if sub_level > super_level { (sub, sup) } else { (sup, sub) };
        prop_assert_eq!(engine.pool().data(bound), &TypeData::Bound(root));
        let shallower = Level::from_raw(sub_level.min(super_level));
        prop_assert_eq!(engine.pool().free_level(root), Some(shallower));
    }
}
