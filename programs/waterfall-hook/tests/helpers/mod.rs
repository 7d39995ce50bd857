//! Test helpers for waterfall hook tests
//!
//! `MockHost` stands in for the ledger runtime: hook parameters, hook state
//! and emitted transactions live in memory, and any host call can be made to
//! fail. Byte builders for amount fields and emitted payments live in
//! `serialization`.

#![allow(dead_code)]

pub mod errors;
pub mod host;
pub mod serialization;

pub use errors::*;
pub use host::*;
pub use serialization::*;

use waterfall_hook::{AccountId, Configuration};

pub const HOOK_ACCOUNT: AccountId = AccountId([0xA0; 20]);
pub const INVESTOR: AccountId = AccountId([0x11; 20]);
pub const SHIPOWNER: AccountId = AccountId([0x22; 20]);

/// Configuration used unless a test says otherwise: target of 1000 drops
pub fn default_config() -> Configuration {
    Configuration {
        investor: INVESTOR,
        shipowner: SHIPOWNER,
        investor_target: 1000,
    }
}

/// Host with the default configuration installed, seeing a payment of `drops`
pub fn setup_payment(drops: u64) -> MockHost {
    MockHost::new()
        .with_config(&default_config())
        .with_payment(native_amount(drops))
}
