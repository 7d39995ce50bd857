use std::fmt;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::{
    constants::{
        ACCOUNT_ID_SIZE, DROPS_SIZE, HOOK_NAMESPACE, HOOK_ON, PARAM_INVESTOR_ADDRESS,
        PARAM_INVESTOR_TARGET, PARAM_SHIPOWNER_ADDRESS,
    },
    errors::{AddressError, ConfigError, ErrorCode},
    host::Host,
    require,
    state::{AccountId, Configuration, Drops},
};

/// One hook parameter the configuration is assembled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    InvestorAddress,
    ShipownerAddress,
    InvestorTarget,
}

impl ConfigField {
    /// Load order, which is also the order rejects are reported in.
    pub const ALL: [ConfigField; 3] = [
        ConfigField::InvestorAddress,
        ConfigField::ShipownerAddress,
        ConfigField::InvestorTarget,
    ];

    pub const fn param_name(self) -> &'static [u8] {
        match self {
            ConfigField::InvestorAddress => PARAM_INVESTOR_ADDRESS,
            ConfigField::ShipownerAddress => PARAM_SHIPOWNER_ADDRESS,
            ConfigField::InvestorTarget => PARAM_INVESTOR_TARGET,
        }
    }

    pub const fn expected_len(self) -> usize {
        match self {
            ConfigField::InvestorAddress | ConfigField::ShipownerAddress => ACCOUNT_ID_SIZE,
            ConfigField::InvestorTarget => DROPS_SIZE,
        }
    }

    pub const fn reject_code(self) -> ErrorCode {
        match self {
            ConfigField::InvestorAddress => ErrorCode::MissingInvestor,
            ConfigField::ShipownerAddress => ErrorCode::MissingShipowner,
            ConfigField::InvestorTarget => ErrorCode::MissingTarget,
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Parameter names are ASCII constants
        f.write_str(std::str::from_utf8(self.param_name()).unwrap_or("?"))
    }
}

/// Read one parameter, insisting on its exact length.
pub fn read_field<H: Host>(host: &H, field: ConfigField) -> Result<Vec<u8>, ConfigError> {
    let missing = ConfigError::MissingField { field };
    let value = host.hook_param(field.param_name()).map_err(|err| {
        debug!(%field, code = err.0, "hook parameter unavailable");
        missing
    })?;
    require!(value.len() == field.expected_len(), missing);
    Ok(value)
}

pub fn load_investor<H: Host>(host: &H) -> Result<AccountId, ConfigError> {
    load_account(host, ConfigField::InvestorAddress)
}

pub fn load_shipowner<H: Host>(host: &H) -> Result<AccountId, ConfigError> {
    load_account(host, ConfigField::ShipownerAddress)
}

pub fn load_investor_target<H: Host>(host: &H) -> Result<Drops, ConfigError> {
    let value = read_field(host, ConfigField::InvestorTarget)?;
    let bytes: [u8; DROPS_SIZE] = value
        .as_slice()
        .try_into()
        .map_err(|_| ConfigError::MissingField { field: ConfigField::InvestorTarget })?;
    Ok(u64::from_be_bytes(bytes))
}

fn load_account<H: Host>(host: &H, field: ConfigField) -> Result<AccountId, ConfigError> {
    let value = read_field(host, field)?;
    AccountId::from_slice(&value).ok_or(ConfigError::MissingField { field })
}

/// Load the full configuration. Fails on the first missing field, never defaults.
pub fn load<H: Host>(host: &H) -> Result<Configuration, ConfigError> {
    Ok(Configuration {
        investor: load_investor(host)?,
        shipowner: load_shipowner(host)?,
        investor_target: load_investor_target(host)?,
    })
}

/// Hex fields of the SetHook `Hook` object that installs this hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookDefinition {
    /// 64-bit trigger mask
    pub hook_on: String,
    /// SHA-256 of the namespace name; the ledger field is a 256-bit hash
    pub hook_namespace: String,
    /// `(HookParameterName, HookParameterValue)` pairs
    pub hook_parameters: Vec<(String, String)>,
}

impl Configuration {
    /// Build from classic `r...` addresses, as operators write them.
    pub fn from_addresses(
        investor: &str,
        shipowner: &str,
        investor_target: Drops,
    ) -> Result<Self, AddressError> {
        Ok(Self {
            investor: AccountId::from_address(investor)?,
            shipowner: AccountId::from_address(shipowner)?,
            investor_target,
        })
    }

    /// `(name, value)` pairs to install with the hook, in load order.
    pub fn hook_parameters(&self) -> [(&'static [u8], Vec<u8>); 3] {
        [
            (PARAM_INVESTOR_ADDRESS, self.investor.0.to_vec()),
            (PARAM_SHIPOWNER_ADDRESS, self.shipowner.0.to_vec()),
            (PARAM_INVESTOR_TARGET, self.investor_target.to_be_bytes().to_vec()),
        ]
    }

    /// Upper-case hex `(HookParameterName, HookParameterValue)` pairs for a SetHook transaction.
    pub fn hook_parameters_hex(&self) -> Vec<(String, String)> {
        self.hook_parameters()
            .iter()
            .map(|(name, value)| (hex::encode_upper(name), hex::encode_upper(value)))
            .collect()
    }

    pub fn hook_definition(&self) -> HookDefinition {
        HookDefinition {
            hook_on: format!("{HOOK_ON:016X}"),
            hook_namespace: hex::encode_upper(Sha256::digest(HOOK_NAMESPACE.as_bytes())),
            hook_parameters: self.hook_parameters_hex(),
        }
    }
}
