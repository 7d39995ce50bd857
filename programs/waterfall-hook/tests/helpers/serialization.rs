//! Byte builders for host-facing fields
//!
//! Amounts are 8 bytes big-endian with bit 62 set for positive native values;
//! emitted payments follow the 56-byte layout in `waterfall_hook::encoding`.

use waterfall_hook::AccountId;

pub const POSITIVE_BIT: u64 = 0x4000_0000_0000_0000;

/// Native `Amount` field as the host serializes a positive value
pub fn native_amount(drops: u64) -> Vec<u8> {
    (drops | POSITIVE_BIT).to_be_bytes().to_vec()
}

/// 48-byte issued-currency `Amount` field (value, currency, issuer)
pub fn issued_amount() -> Vec<u8> {
    let mut data = vec![0u8; 48];
    // Not-native and positive bits, exponent and mantissa
    data[0..8].copy_from_slice(&0xD483_8D7E_A4C6_8000u64.to_be_bytes());
    // Currency code "USD"
    data[20..23].copy_from_slice(b"USD");
    // Issuer
    data[28..48].copy_from_slice(&[0x33; 20]);
    data
}

/// Fields of an emitted payment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmittedPayment {
    pub source: AccountId,
    pub destination: AccountId,
    pub drops: u64,
}

/// Parse an emitted payment, asserting every header on the way
pub fn parse_payment(tx: &[u8]) -> EmittedPayment {
    assert_eq!(tx.len(), 56, "emitted payment length");

    // TransactionType = Payment
    assert_eq!(&tx[0..3], &[0x12, 0x00, 0x00]);

    // Amount
    assert_eq!(tx[3], 0x61);
    let raw = u64::from_be_bytes(tx[4..12].try_into().unwrap());
    assert_eq!(raw & 0xC000_0000_0000_0000, POSITIVE_BIT, "native positive flags");

    // Account
    assert_eq!(&tx[12..14], &[0x81, 0x14]);
    let source = AccountId::from_slice(&tx[14..34]).unwrap();

    // Destination
    assert_eq!(&tx[34..36], &[0x83, 0x14]);
    let destination = AccountId::from_slice(&tx[36..56]).unwrap();

    EmittedPayment {
        source,
        destination,
        drops: raw & !POSITIVE_BIT,
    }
}
