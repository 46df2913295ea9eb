//! State definitions for the HTLC contract

use common::{Asset, ExtendedAsset};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary, Timestamp};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:gxc-htlc";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Account opening inbound locks
pub const DEFAULT_VAULT: &str = "gxc.vault";

/// Length of a foreign recipient address
pub const ADDRESS_BYTES: usize = 20;

#[cw_serde]
pub struct Config {
    pub token: Addr,
    pub vault: String,
}

/// Who receives the value once the preimage is revealed
#[cw_serde]
pub enum Recipient {
    /// Local account, paid by issuing the value
    Name(String),
    /// Address on the other chain; the escrow is retired here
    Address(HexBinary),
}

impl std::fmt::Display for Recipient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recipient::Name(name) => f.write_str(name),
            Recipient::Address(address) => write!(f, "0x{}", address.to_hex()),
        }
    }
}

#[cw_serde]
pub struct Lock {
    pub recipient: Recipient,
    pub value: ExtendedAsset,
    pub hashlock: HexBinary,
    pub timelock: Timestamp,
}

/// Issuer constraints on locks of one token
#[cw_serde]
pub struct TokenConfig {
    pub min_amount: Asset,
    pub min_duration: u64,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// (owner, contract_name) -> lock
pub const LOCKS: Map<(&str, &str), Lock> = Map::new("locks");

/// (issuer, symbol code) -> constraints
pub const TOKEN_CONFIGS: Map<(&str, &str), TokenConfig> = Map::new("token_configs");
