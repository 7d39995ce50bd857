//! Native-currency amount field codec.

use crate::constants::{
    AMOUNT_MAGNITUDE_MASK, AMOUNT_POSITIVE_BIT, ISSUED_AMOUNT_SIZE, NATIVE_AMOUNT_SIZE,
};
use crate::state::Drops;

/// Outcome of decoding a serialized `Amount` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedAmount {
    /// 8-byte native amount, flag bits stripped
    Native(Drops),
    /// 48-byte issued-currency amount
    NonNative,
    /// Any other length
    Malformed,
}

impl DecodedAmount {
    /// Drops to split, if this is a positive native amount.
    pub fn positive_drops(self) -> Option<Drops> {
        match self {
            DecodedAmount::Native(drops) if drops > 0 => Some(drops),
            _ => None,
        }
    }
}

/// Decode a raw `Amount` field as the host serializes it.
pub fn decode(raw: &[u8]) -> DecodedAmount {
    match raw.len() {
        NATIVE_AMOUNT_SIZE => {
            let mut buf = [0u8; NATIVE_AMOUNT_SIZE];
            buf.copy_from_slice(raw);
            DecodedAmount::Native(u64::from_be_bytes(buf) & AMOUNT_MAGNITUDE_MASK)
        }
        ISSUED_AMOUNT_SIZE => DecodedAmount::NonNative,
        _ => DecodedAmount::Malformed,
    }
}

/// Encode drops as a positive native amount: not-native bit clear, positive bit set.
pub fn encode(drops: Drops) -> [u8; NATIVE_AMOUNT_SIZE] {
    ((drops & AMOUNT_MAGNITUDE_MASK) | AMOUNT_POSITIVE_BIT).to_be_bytes()
}
