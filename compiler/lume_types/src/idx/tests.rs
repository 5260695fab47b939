use super::*;

#[test]
fn builtin_indices_are_correct() {
    assert_eq!(Idx::NIL.raw(), 0);
    assert_eq!(Idx::BOOLEAN.raw(), 1);
    assert_eq!(Idx::NUMBER.raw(), 2);
    assert_eq!(Idx::STRING.raw(), 3);
    assert_eq!(Idx::THREAD.raw(), 4);
    assert_eq!(Idx::NEVER.raw(), 5);
    assert_eq!(Idx::UNKNOWN.raw(), 6);
    assert_eq!(Idx::ANY.raw(), 7);
}

#[test]
fn builtin_check_works() {
    assert!(Idx::NIL.is_builtin());
    assert!(Idx::ANY.is_builtin());
    assert!(!Idx::from_raw(Idx::BUILTIN_COUNT).is_builtin());
    assert!(PackIdx::EMPTY.is_builtin());
    assert!(!PackIdx::from_raw(2).is_builtin());
}

#[test]
fn display_names() {
    assert_eq!(Idx::NUMBER.to_string(), "number");
    assert_eq!(Idx::UNKNOWN.to_string(), "unknown");
    assert_eq!(Idx::from_raw(40).to_string(), "type#40");
    assert_eq!(PackIdx::EMPTY.to_string(), "()");
    assert_eq!(PackIdx::from_raw(9).to_string(), "pack#9");
}

#[test]
fn debug_names() {
    assert_eq!(format!("{:?}", Idx::NEVER), "Idx::NEVER");
    assert_eq!(format!("{:?}", Idx::from_raw(12)), "Idx(12)");
    assert_eq!(format!("{:?}", PackIdx::ANY_VARIADIC), "PackIdx::ANY_VARIADIC");
}
