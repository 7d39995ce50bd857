//! Verdict assertions

pub use waterfall_hook::{ErrorCode, HookOutcome, Verdict};

/// Assert the invocation rolled back with `code` and reported no split
pub fn assert_rejected(outcome: &HookOutcome, code: ErrorCode) {
    assert_eq!(outcome.verdict, Verdict::Reject(code));
    assert!(!outcome.verdict.is_accept());
    assert_eq!(outcome.verdict.code(), code as i64);
    assert!(outcome.executed.is_none());
}
