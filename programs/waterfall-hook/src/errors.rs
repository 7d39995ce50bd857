use std::fmt;

use thiserror::Error;

use crate::config::ConfigField;

/// Reject reasons. The discriminant is the code handed to `rollback`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i64)]
pub enum ErrorCode {
    InvalidAmount = 1,
    MissingInvestor = 2,
    MissingShipowner = 3,
    MissingTarget = 4,
    StateWriteFailed = 5,
    EmitFailed = 6,
}

impl ErrorCode {
    pub const fn code(self) -> i64 {
        self as i64
    }

    pub const fn message(self) -> &'static str {
        match self {
            ErrorCode::InvalidAmount => "Waterfall: Invalid amount",
            ErrorCode::MissingInvestor => "Waterfall: Missing investor",
            ErrorCode::MissingShipowner => "Waterfall: Missing shipowner",
            ErrorCode::MissingTarget => "Waterfall: Missing target",
            ErrorCode::StateWriteFailed => "Waterfall: State write failed",
            ErrorCode::EmitFailed => "Waterfall: Emit failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ErrorCode {}

impl From<ConfigError> for ErrorCode {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingField { field } => field.reject_code(),
        }
    }
}

/// Configuration could not be loaded from the hook parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Parameter absent or not exactly the expected length.
    #[error("missing or malformed hook parameter `{field}`")]
    MissingField { field: ConfigField },
}

/// A classic `r...` address that does not decode to an account id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address is not valid base58")]
    InvalidBase58,
    #[error("address decodes to {0} bytes, expected 25")]
    InvalidLength(usize),
    #[error("unexpected address version byte {0:#04x}")]
    InvalidVersion(u8),
    #[error("address checksum mismatch")]
    ChecksumMismatch,
}

/// Negative return code from a host API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("host call failed with code {0}")]
pub struct HostError(pub i64);

impl HostError {
    pub const OUT_OF_BOUNDS: HostError = HostError(-1);
    pub const INTERNAL_ERROR: HostError = HostError(-2);
    pub const TOO_BIG: HostError = HostError(-3);
    pub const TOO_SMALL: HostError = HostError(-4);
    pub const DOESNT_EXIST: HostError = HostError(-5);
    pub const NO_FREE_SLOTS: HostError = HostError(-6);
    pub const INVALID_ARGUMENT: HostError = HostError(-7);
    pub const ALREADY_SET: HostError = HostError(-8);
    pub const PREREQUISITE_NOT_MET: HostError = HostError(-9);
    pub const FEE_TOO_LARGE: HostError = HostError(-10);
    pub const EMISSION_FAILURE: HostError = HostError(-11);
    pub const TOO_MANY_NONCES: HostError = HostError(-12);
    pub const TOO_MANY_EMITTED_TXN: HostError = HostError(-13);
    pub const NOT_IMPLEMENTED: HostError = HostError(-14);
    pub const INVALID_ACCOUNT: HostError = HostError(-15);
    pub const GUARD_VIOLATION: HostError = HostError(-16);
    pub const INVALID_FIELD: HostError = HostError(-17);

    /// Interpret a raw host return value: negative is an error, anything else a length or count.
    pub fn check(ret: i64) -> Result<u64, HostError> {
        if ret < 0 {
            Err(HostError(ret))
        } else {
            Ok(ret as u64)
        }
    }

    pub fn name(&self) -> &'static str {
        match self.0 {
            -1 => "OUT_OF_BOUNDS",
            -2 => "INTERNAL_ERROR",
            -3 => "TOO_BIG",
            -4 => "TOO_SMALL",
            -5 => "DOESNT_EXIST",
            -6 => "NO_FREE_SLOTS",
            -7 => "INVALID_ARGUMENT",
            -8 => "ALREADY_SET",
            -9 => "PREREQUISITE_NOT_MET",
            -10 => "FEE_TOO_LARGE",
            -11 => "EMISSION_FAILURE",
            -12 => "TOO_MANY_NONCES",
            -13 => "TOO_MANY_EMITTED_TXN",
            -14 => "NOT_IMPLEMENTED",
            -15 => "INVALID_ACCOUNT",
            -16 => "GUARD_VIOLATION",
            -17 => "INVALID_FIELD",
            _ => "UNKNOWN",
        }
    }
}

/// Early-return with `Err($err.into())` unless `$cond` holds.
#[macro_export]
macro_rules! require {
    ($cond:expr, $err:expr $(,)?) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}
