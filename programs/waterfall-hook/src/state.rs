use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::{
    constants::{ACCOUNT_ID_SIZE, ADDRESS_CHECKSUM_SIZE, ADDRESS_VERSION},
    errors::AddressError,
};

/// Smallest unit of the native currency.
pub type Drops = u64;

/// 20-byte ledger account identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AccountId(pub [u8; ACCOUNT_ID_SIZE]);

impl AccountId {
    pub const fn new(bytes: [u8; ACCOUNT_ID_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns None unless `bytes` is exactly 20 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; ACCOUNT_ID_SIZE]>::try_from(bytes).ok().map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; ACCOUNT_ID_SIZE] {
        &self.0
    }

    /// Decode a classic `r...` address.
    pub fn from_address(address: &str) -> Result<Self, AddressError> {
        let decoded = bs58::decode(address)
            .with_alphabet(bs58::Alphabet::RIPPLE)
            .into_vec()
            .map_err(|_| AddressError::InvalidBase58)?;
        if decoded.len() != 1 + ACCOUNT_ID_SIZE + ADDRESS_CHECKSUM_SIZE {
            return Err(AddressError::InvalidLength(decoded.len()));
        }

        let (payload, checksum) = decoded.split_at(1 + ACCOUNT_ID_SIZE);
        if payload[0] != ADDRESS_VERSION {
            return Err(AddressError::InvalidVersion(payload[0]));
        }
        if checksum != address_checksum(payload) {
            return Err(AddressError::ChecksumMismatch);
        }

        let mut bytes = [0u8; ACCOUNT_ID_SIZE];
        bytes.copy_from_slice(&payload[1..]);
        Ok(Self::new(bytes))
    }

    /// Render as a classic `r...` address.
    pub fn to_address(&self) -> String {
        let mut raw = Vec::with_capacity(1 + ACCOUNT_ID_SIZE + ADDRESS_CHECKSUM_SIZE);
        raw.push(ADDRESS_VERSION);
        raw.extend_from_slice(&self.0);
        let checksum = address_checksum(&raw);
        raw.extend_from_slice(&checksum);
        bs58::encode(raw).with_alphabet(bs58::Alphabet::RIPPLE).into_string()
    }
}

/// First four bytes of SHA-256(SHA-256(payload))
fn address_checksum(payload: &[u8]) -> [u8; ADDRESS_CHECKSUM_SIZE] {
    let digest = Sha256::digest(Sha256::digest(payload));
    let mut checksum = [0u8; ADDRESS_CHECKSUM_SIZE];
    checksum.copy_from_slice(&digest[..ADDRESS_CHECKSUM_SIZE]);
    checksum
}

impl AsRef<[u8]> for AccountId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({self})")
    }
}

impl FromStr for AccountId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; ACCOUNT_ID_SIZE];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

/// Fixed per-invocation configuration read from the hook parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    /// Senior beneficiary, paid first
    pub investor: AccountId,
    /// Junior beneficiary, receives the surplus
    pub shipowner: AccountId,
    /// Cumulative drops the investor must recover before any surplus flows
    pub investor_target: Drops,
}

/// The only cross-invocation state: drops paid to the investor so far.
/// Never decreases, never pushed past the target by this hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecoveryState {
    pub investor_recovered: Drops,
}

/// Split of one incoming amount. `to_investor + to_shipowner` equals the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AllocationResult {
    pub to_investor: Drops,
    pub to_shipowner: Drops,
}

impl AllocationResult {
    pub fn total(&self) -> Drops {
        self.to_investor + self.to_shipowner
    }

    /// Number of outgoing payments this split needs (zero legs are never emitted).
    pub fn leg_count(&self) -> u32 {
        (self.to_investor > 0) as u32 + (self.to_shipowner > 0) as u32
    }
}

/// Outgoing native payment handed to the host for emission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutgoingPayment {
    pub destination: AccountId,
    pub amount: Drops,
}
