// Hook parameters (names as installed with SetHook)
pub const PARAM_INVESTOR_ADDRESS: &[u8] = b"investor_address";
pub const PARAM_SHIPOWNER_ADDRESS: &[u8] = b"shipowner_address";
pub const PARAM_INVESTOR_TARGET: &[u8] = b"investor_target";

// Hook state
// 18 bytes, no terminator. Deployed hooks already hold their counter under this key.
pub const INVESTOR_RECOVERED_KEY: &[u8] = b"investor_recovered";

// Installation
pub const HOOK_NAMESPACE: &str = "waterfall-finance-v1";
pub const HOOK_ON: u64 = 0x0000_0000_0000_0001;

// Sizes
pub const ACCOUNT_ID_SIZE: usize = 20;
pub const DROPS_SIZE: usize = 8;
pub const HASH_SIZE: usize = 32;
pub const NATIVE_AMOUNT_SIZE: usize = 8;
pub const ISSUED_AMOUNT_SIZE: usize = 48;

// Transaction types
pub const TT_PAYMENT: u16 = 0;

// Field ids as the host addresses them: (type code << 16) | field code
pub const SF_AMOUNT: u32 = 0x0006_0001;

// Serialized field headers, high nibble = type code, low nibble = field code
pub const HEADER_TRANSACTION_TYPE: u8 = 0x12; // UInt16, field 2
pub const HEADER_AMOUNT: u8 = 0x61; // Amount, field 1
pub const HEADER_ACCOUNT: u8 = 0x81; // AccountID, field 1
pub const HEADER_DESTINATION: u8 = 0x83; // AccountID, field 3

// Native amount flag bits
pub const AMOUNT_NOT_NATIVE_BIT: u64 = 0x8000_0000_0000_0000;
pub const AMOUNT_POSITIVE_BIT: u64 = 0x4000_0000_0000_0000;
pub const AMOUNT_MAGNITUDE_MASK: u64 = !(AMOUNT_NOT_NATIVE_BIT | AMOUNT_POSITIVE_BIT);

// Loop guards: (id, max iterations + 1). Ids are unique per guarded loop.
pub const GUARD_ENTRY: (u32, u32) = (1, 1);
// Start through PaymentsSubmitted is at most 7 transitions
pub const GUARD_STAGES: (u32, u32) = (2, 8);
// At most one investor leg and one shipowner leg
pub const GUARD_EMIT: (u32, u32) = (3, 3);

// Classic addresses: base58 (ripple alphabet) of version byte + account id + checksum
pub const ADDRESS_VERSION: u8 = 0x00;
pub const ADDRESS_CHECKSUM_SIZE: usize = 4;

// Emitted payment: type (1 + 2) + amount (1 + 8) + account (2 + 20) + destination (2 + 20)
pub const PAYMENT_TX_SIZE: usize = 3 + 1 + DROPS_SIZE + 2 * (2 + ACCOUNT_ID_SIZE); // 56 bytes

// Basis points
pub const BPS_DENOMINATOR: u64 = 10_000;

const _: () = assert!(INVESTOR_RECOVERED_KEY.len() == 18);
const _: () = assert!(INVESTOR_RECOVERED_KEY.len() <= HASH_SIZE);
const _: () = assert!(PAYMENT_TX_SIZE == 56);
const _: () = assert!(AMOUNT_MAGNITUDE_MASK == 0x3FFF_FFFF_FFFF_FFFF);
