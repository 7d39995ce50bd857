use tracing::debug;

use crate::{
    constants::{DROPS_SIZE, INVESTOR_RECOVERED_KEY},
    errors::HostError,
    host::Host,
    state::{Drops, RecoveryState},
};

/// Read a big-endian u64 under `key`.
/// Absent keys and values of any other length read as 0.
pub fn read_u64<H: Host>(host: &H, key: &[u8]) -> Drops {
    match host.state(key) {
        Ok(value) => match <[u8; DROPS_SIZE]>::try_from(value.as_slice()) {
            Ok(bytes) => u64::from_be_bytes(bytes),
            Err(_) => {
                debug!(len = value.len(), "unexpected state value length, reading as 0");
                0
            }
        },
        Err(err) => {
            debug!(code = err.0, reason = err.name(), "state read miss, reading as 0");
            0
        }
    }
}

pub fn write_u64<H: Host>(host: &mut H, key: &[u8], value: Drops) -> Result<(), HostError> {
    host.state_set(key, &value.to_be_bytes())
}

pub fn get_recovery_state<H: Host>(host: &H) -> RecoveryState {
    RecoveryState {
        investor_recovered: read_u64(host, INVESTOR_RECOVERED_KEY),
    }
}

pub fn set_recovery_state<H: Host>(host: &mut H, state: &RecoveryState) -> Result<(), HostError> {
    write_u64(host, INVESTOR_RECOVERED_KEY, state.investor_recovered)
}
