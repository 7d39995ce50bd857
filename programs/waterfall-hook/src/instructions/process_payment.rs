use tracing::{debug, info, warn};

use crate::{
    amount::{self, DecodedAmount},
    config,
    constants::{GUARD_EMIT, GUARD_STAGES, HASH_SIZE, SF_AMOUNT, TT_PAYMENT},
    encoding::encode_payment,
    errors::{ErrorCode, HostError},
    events::{HookOutcome, SplitExecuted, Verdict},
    host::Host,
    require,
    state::{AllocationResult, Configuration, Drops, OutgoingPayment, RecoveryState},
    storage::{get_recovery_state, set_recovery_state},
    waterfall::{split, RecoveryProgress},
};

/// Controller state. Each stage carries what the next transition needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Start,
    TypeChecked,
    AmountValidated {
        amount: Drops,
    },
    ConfigLoaded {
        amount: Drops,
        config: Configuration,
    },
    Allocated {
        amount: Drops,
        config: Configuration,
        recovered: Drops,
        allocation: AllocationResult,
    },
    StateCommitted {
        amount: Drops,
        config: Configuration,
        recovered: Drops,
        allocation: AllocationResult,
    },
    PaymentsSubmitted(SplitExecuted),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Next(Stage),
    Done(HookOutcome),
}

impl Stage {
    /// Run one transition against the host.
    pub fn advance<H: Host>(self, host: &mut H) -> Transition {
        let result = match self {
            Stage::Start => check_type(host),
            Stage::TypeChecked => {
                validate_amount(host).map(|amount| Stage::AmountValidated { amount })
            }
            Stage::AmountValidated { amount } => {
                load_config(host).map(|config| Stage::ConfigLoaded { amount, config })
            }
            Stage::ConfigLoaded { amount, config } => Ok(allocate(host, amount, config)),
            Stage::Allocated { amount, config, recovered, allocation } => {
                commit_state(host, recovered, &allocation).map(|()| Stage::StateCommitted {
                    amount,
                    config,
                    recovered,
                    allocation,
                })
            }
            Stage::StateCommitted { amount, config, recovered, allocation } => {
                submit_payments(host, amount, &config, recovered, &allocation)
                    .map(Stage::PaymentsSubmitted)
            }
            Stage::PaymentsSubmitted(executed) => {
                info!(
                    amount = executed.amount,
                    to_investor = executed.to_investor,
                    to_shipowner = executed.to_shipowner,
                    recovered = executed.recovered_after,
                    target = executed.target,
                    fully_recovered = executed.investor_fully_recovered,
                    "waterfall split executed"
                );
                return Transition::Done(HookOutcome {
                    verdict: Verdict::Success,
                    executed: Some(executed),
                });
            }
        };

        match result {
            Ok(next) => {
                debug!(stage = ?next, "advanced");
                Transition::Next(next)
            }
            Err(verdict) => {
                if let Verdict::Reject(err) = verdict {
                    warn!(code = err.code(), reason = %err, "rejecting payment");
                }
                Transition::Done(HookOutcome::finished(verdict))
            }
        }
    }
}

/// Runs the controller from `Start` to a verdict.
pub fn handler<H: Host>(host: &mut H) -> HookOutcome {
    let (guard_id, max_iterations) = GUARD_STAGES;
    let mut stage = Stage::Start;
    loop {
        host.guard(guard_id, max_iterations);
        match stage.advance(host) {
            Transition::Next(next) => stage = next,
            Transition::Done(outcome) => return outcome,
        }
    }
}

fn check_type<H: Host>(host: &H) -> Result<Stage, Verdict> {
    let tx_type = host.otxn_type();
    if tx_type != TT_PAYMENT {
        debug!(tx_type, "not a payment, ignoring");
        return Err(Verdict::Ignored);
    }
    Ok(Stage::TypeChecked)
}

fn validate_amount<H: Host>(host: &H) -> Result<Drops, Verdict> {
    let decoded = match host.otxn_field(SF_AMOUNT) {
        Ok(raw) => amount::decode(&raw),
        Err(err) => {
            debug!(code = err.0, reason = err.name(), "amount field unreadable");
            DecodedAmount::Malformed
        }
    };
    decoded.positive_drops().ok_or_else(|| {
        debug!(?decoded, "amount is not a positive native value");
        Verdict::Reject(ErrorCode::InvalidAmount)
    })
}

fn load_config<H: Host>(host: &H) -> Result<Configuration, Verdict> {
    config::load(host).map_err(|err| Verdict::Reject(err.into()))
}

fn allocate<H: Host>(host: &H, amount: Drops, config: Configuration) -> Stage {
    let recovered = get_recovery_state(host).investor_recovered;
    let allocation = split(amount, recovered, config.investor_target);
    Stage::Allocated { amount, config, recovered, allocation }
}

fn commit_state<H: Host>(
    host: &mut H,
    recovered: Drops,
    allocation: &AllocationResult,
) -> Result<(), Verdict> {
    // to_investor is capped at target - recovered
    let state = RecoveryState {
        investor_recovered: recovered + allocation.to_investor,
    };
    set_recovery_state(host, &state).map_err(|err| {
        debug!(code = err.0, reason = err.name(), "state write failed");
        Verdict::Reject(ErrorCode::StateWriteFailed)
    })
}

fn submit_payments<H: Host>(
    host: &mut H,
    amount: Drops,
    config: &Configuration,
    recovered: Drops,
    allocation: &AllocationResult,
) -> Result<SplitExecuted, Verdict> {
    debug_assert_eq!(allocation.total(), amount);

    let mut payments = Vec::with_capacity(allocation.leg_count() as usize);
    if allocation.to_investor > 0 {
        payments.push(OutgoingPayment {
            destination: config.investor,
            amount: allocation.to_investor,
        });
    }
    if allocation.to_shipowner > 0 {
        payments.push(OutgoingPayment {
            destination: config.shipowner,
            amount: allocation.to_shipowner,
        });
    }

    let emitted = emit_all(host, &payments).map_err(Verdict::Reject)?;

    let recovered_after = recovered + allocation.to_investor;
    Ok(SplitExecuted {
        amount,
        to_investor: allocation.to_investor,
        to_shipowner: allocation.to_shipowner,
        recovered_before: recovered,
        recovered_after,
        target: config.investor_target,
        investor_fully_recovered: RecoveryProgress::new(recovered_after, config.investor_target)
            .is_fully_recovered,
        emitted,
    })
}

fn emit_all<H: Host>(
    host: &mut H,
    payments: &[OutgoingPayment],
) -> Result<Vec<[u8; HASH_SIZE]>, ErrorCode> {
    if payments.is_empty() {
        return Ok(Vec::new());
    }

    let emit_failed = |err: HostError| {
        debug!(code = err.0, reason = err.name(), "emission failed");
        ErrorCode::EmitFailed
    };

    host.etxn_reserve(payments.len() as u32).map_err(emit_failed)?;
    let source = host.hook_account().map_err(emit_failed)?;

    let (guard_id, max_iterations) = GUARD_EMIT;
    let mut hashes = Vec::with_capacity(payments.len());
    for payment in payments {
        host.guard(guard_id, max_iterations);
        require!(payment.amount > 0, ErrorCode::EmitFailed);
        let tx = encode_payment(&source, payment);
        let hash = host.emit(&tx).map_err(emit_failed)?;
        debug!(destination = %payment.destination, amount = payment.amount, "payment emitted");
        hashes.push(hash);
    }
    Ok(hashes)
}
