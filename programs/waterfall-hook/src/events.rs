use crate::{
    constants::HASH_SIZE,
    errors::ErrorCode,
    state::{AllocationResult, Drops},
};

/// Terminal result of one invocation, handed to `accept` or `rollback`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Originating transaction is not a payment; nothing read or written
    Ignored,
    /// Split computed, state written and payments emitted
    Success,
    Reject(ErrorCode),
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        !matches!(self, Verdict::Reject(_))
    }

    pub fn code(&self) -> i64 {
        match self {
            Verdict::Ignored | Verdict::Success => 0,
            Verdict::Reject(err) => err.code(),
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Ignored => "Waterfall: Ignoring non-payment",
            Verdict::Success => "Waterfall: Success",
            Verdict::Reject(err) => err.message(),
        }
    }
}

impl From<ErrorCode> for Verdict {
    fn from(err: ErrorCode) -> Self {
        Verdict::Reject(err)
    }
}

/// Summary of a successful split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitExecuted {
    pub amount: Drops,
    pub to_investor: Drops,
    pub to_shipowner: Drops,
    pub recovered_before: Drops,
    pub recovered_after: Drops,
    pub target: Drops,
    pub investor_fully_recovered: bool,
    /// Hashes of emitted payments, investor leg first
    pub emitted: Vec<[u8; HASH_SIZE]>,
}

impl SplitExecuted {
    pub fn allocation(&self) -> AllocationResult {
        AllocationResult {
            to_investor: self.to_investor,
            to_shipowner: self.to_shipowner,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookOutcome {
    pub verdict: Verdict,
    /// Present only when `verdict` is `Success`
    pub executed: Option<SplitExecuted>,
}

impl HookOutcome {
    pub fn finished(verdict: Verdict) -> Self {
        Self { verdict, executed: None }
    }
}
