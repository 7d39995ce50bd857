//! The ledger runtime as seen from inside one hook invocation.
//!
//! Every side effect of the hook goes through [`Host`]. The runtime serializes
//! invocations per account and commits the state write and all emissions
//! together, or none of them, so implementations need no locking.

use crate::constants::HASH_SIZE;
use crate::errors::HostError;
use crate::state::AccountId;

pub trait Host {
    /// Loop guard. Called at the top of every loop body on the hook path;
    /// the runtime rejects modules with unguarded loops and aborts once a
    /// guard runs `max_iterations` times.
    fn guard(&self, id: u32, max_iterations: u32);

    /// Transaction type of the originating transaction.
    fn otxn_type(&self) -> u16;

    /// Serialized payload of a field of the originating transaction.
    fn otxn_field(&self, field_id: u32) -> Result<Vec<u8>, HostError>;

    /// Install-time parameter by raw name.
    fn hook_param(&self, name: &[u8]) -> Result<Vec<u8>, HostError>;

    /// Account the hook is installed on.
    fn hook_account(&self) -> Result<AccountId, HostError>;

    /// Read this hook's state under `key`. `DOESNT_EXIST` when absent.
    fn state(&self, key: &[u8]) -> Result<Vec<u8>, HostError>;

    fn state_set(&mut self, key: &[u8], value: &[u8]) -> Result<(), HostError>;

    /// Declare how many transactions this invocation will emit.
    fn etxn_reserve(&mut self, count: u32) -> Result<(), HostError>;

    /// Hand a serialized transaction to the host, returning its hash.
    fn emit(&mut self, tx: &[u8]) -> Result<[u8; HASH_SIZE], HostError>;
}
