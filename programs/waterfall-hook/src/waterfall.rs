use crate::{
    constants::BPS_DENOMINATOR,
    state::{AllocationResult, Drops},
};

/// Drops the investor still needs before the target is met
pub fn remaining_to_target(recovered: Drops, target: Drops) -> Drops {
    target.saturating_sub(recovered)
}

/// Split `amount` between investor and shipowner.
/// Investor is paid up to what remains of the target, including an exact match;
/// the surplus goes to the shipowner.
pub fn split(amount: Drops, recovered: Drops, target: Drops) -> AllocationResult {
    let remaining = remaining_to_target(recovered, target);

    if amount >= remaining {
        AllocationResult {
            to_investor: remaining,
            to_shipowner: amount - remaining,
        }
    } else {
        AllocationResult {
            to_investor: amount,
            to_shipowner: 0,
        }
    }
}

/// Progress of the investor toward the recovery target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryProgress {
    pub recovered: Drops,
    pub target: Drops,
    pub remaining: Drops,
    /// Share of the target recovered, in basis points, capped at 10000
    pub recovered_bps: u16,
    pub is_fully_recovered: bool,
}

impl RecoveryProgress {
    pub fn new(recovered: Drops, target: Drops) -> Self {
        let recovered_bps = if target == 0 {
            BPS_DENOMINATOR
        } else {
            ((recovered as u128 * BPS_DENOMINATOR as u128) / target as u128)
                .min(BPS_DENOMINATOR as u128) as u64
        };

        Self {
            recovered,
            target,
            remaining: remaining_to_target(recovered, target),
            recovered_bps: recovered_bps as u16,
            is_fully_recovered: recovered >= target,
        }
    }
}
