//! Canonical binary form of the emitted native payment.
//!
//! Fields are written in ascending (type code, field code) order:
//!
//! | header        | payload                     |
//! |---------------|-----------------------------|
//! | `12`          | TransactionType, u16 BE (0) |
//! | `61`          | Amount, 8-byte native       |
//! | `81 14`       | Account, 20 bytes           |
//! | `83 14`       | Destination, 20 bytes       |

use crate::{
    amount,
    constants::{
        ACCOUNT_ID_SIZE, HEADER_ACCOUNT, HEADER_AMOUNT, HEADER_DESTINATION,
        HEADER_TRANSACTION_TYPE, PAYMENT_TX_SIZE, TT_PAYMENT,
    },
    state::{AccountId, OutgoingPayment},
};

/// Encode a payment of `payment.amount` drops from `source` to `payment.destination`.
/// Callers never pass a zero amount; zero legs are dropped before encoding.
pub fn encode_payment(source: &AccountId, payment: &OutgoingPayment) -> [u8; PAYMENT_TX_SIZE] {
    debug_assert!(payment.amount > 0, "zero-value payments are never encoded");

    let mut tx = [0u8; PAYMENT_TX_SIZE];
    let mut offset = 0;

    // TransactionType
    tx[offset] = HEADER_TRANSACTION_TYPE;
    tx[offset + 1..offset + 3].copy_from_slice(&TT_PAYMENT.to_be_bytes());
    offset += 3;

    // Amount
    tx[offset] = HEADER_AMOUNT;
    tx[offset + 1..offset + 9].copy_from_slice(&amount::encode(payment.amount));
    offset += 9;

    // Account
    offset = write_account(&mut tx, offset, HEADER_ACCOUNT, source);

    // Destination
    offset = write_account(&mut tx, offset, HEADER_DESTINATION, &payment.destination);

    debug_assert_eq!(offset, PAYMENT_TX_SIZE);
    tx
}

/// AccountID fields are length-prefixed; the prefix is always 20.
fn write_account(tx: &mut [u8], offset: usize, header: u8, account: &AccountId) -> usize {
    tx[offset] = header;
    tx[offset + 1] = ACCOUNT_ID_SIZE as u8;
    tx[offset + 2..offset + 2 + ACCOUNT_ID_SIZE].copy_from_slice(account.as_bytes());
    offset + 2 + ACCOUNT_ID_SIZE
}
