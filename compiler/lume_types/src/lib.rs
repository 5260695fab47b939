//! Unification core for a gradual structural type checker.
//!
//! The checker's constraint solver hands this crate `sub <: super` claims.
//! [`UnifyEngine`] makes them hold where it can, by binding free type
//! variables and widening open tables in a shared type graph ([`Pool`]).
//!
//! # Type Graph
//!
//! Nodes live in a [`Pool`] arena and are addressed by [`Idx`] (types) and
//! [`PackIdx`] (type packs). Handles are `Copy` and compare by identity.
//! Builtins sit at fixed indices, so `Idx::NUMBER` needs no lookup.
//!
//! # Failure
//!
//! Unification never reports type errors. It returns `Ok(false)` only when a
//! pack occurs check fails, and [`InternalError`] when an invariant breaks.

mod data;
mod flags;
mod ice;
mod idx;
mod level;
mod limits;
mod name;
mod pool;
mod simplify;
mod tag;
mod unify;

pub use data::{
    FunctionData, Indexer, Members, PackData, PackHead, PrimitiveKind, TableData, TableState,
    TypeData,
};
pub use flags::TypeFlags;
pub use ice::{InternalError, InternalErrorReporter};
pub use idx::{Idx, PackIdx};
pub use level::{Level, Scope};
pub use limits::{TypeCheckLimits, DEFAULT_RECURSION_LIMIT};
pub use name::Name;
pub use pool::Pool;
pub use tag::{PackTag, Tag};
pub use unify::{OccursCheckResult, UnifyEngine};

