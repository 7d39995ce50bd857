//! Investor-priority payment waterfall, run as a ledger hook.
//!
//! Every incoming native payment to the hook account is split between two
//! beneficiaries: the investor is paid first until a cumulative recovery
//! target is met, and any surplus flows to the shipowner. Progress toward the
//! target is the only state kept between invocations.

pub mod amount;
pub mod config;
pub mod constants;
pub mod encoding;
pub mod errors;
pub mod events;
pub mod host;
pub mod instructions;
pub mod state;
pub mod storage;
pub mod waterfall;

#[cfg(all(target_arch = "wasm32", not(feature = "no-entrypoint")))]
mod entrypoint;

pub use errors::{AddressError, ConfigError, ErrorCode, HostError};
pub use events::{HookOutcome, SplitExecuted, Verdict};
pub use host::Host;
pub use config::HookDefinition;
pub use state::{AccountId, AllocationResult, Configuration, Drops, OutgoingPayment, RecoveryState};

/// Processes one originating transaction against `host`.
/// Ignores anything that is not a payment, otherwise splits the amount,
/// records investor progress and emits up to two payments.
pub fn process_transaction<H: Host>(host: &mut H) -> HookOutcome {
    instructions::process_payment::handler(host)
}
