use super::*;

#[test]
fn reporter_counts_every_error() {
    let mut reporter = InternalErrorReporter::for_module("game.core");
    assert!(!reporter.has_reported());

    let error = reporter.ice(InternalError::RecursionLimitExceeded { limit: 4 });
    assert_eq!(error, InternalError::RecursionLimitExceeded { limit: 4 });
    let _ = reporter.ice(InternalError::CyclicPack {
        pack: PackIdx::from_raw(3),
    });

    assert_eq!(reporter.reported(), 2);
    assert!(reporter.has_reported());
}

#[test]
fn display_messages() {
    assert_eq!(
        InternalError::RecursionLimitExceeded { limit: 165 }.to_string(),
        "unifier recursion limit of 165 exceeded"
    );
    assert_eq!(
        InternalError::UnexpectedShape {
            node: Idx::from_raw(9),
            expected: Tag::Table,
            found: Tag::Function,
        }
        .to_string(),
        "expected Idx(9) to be a table, found function"
    );
    assert_eq!(
        InternalError::NeedleNotFree {
            needle: PackIdx::EMPTY
        }
        .to_string(),
        "occurs check needle PackIdx::EMPTY is not a free pack"
    );
}
