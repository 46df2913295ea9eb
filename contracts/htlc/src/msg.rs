//! Message types for the HTLC contract

use common::{ExtendedAsset, ExtendedSymbolCode};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, HexBinary, Timestamp};

pub use crate::state::Recipient;

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    pub token: String,
    /// Defaults to `gxc.vault`
    pub vault: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Lock `value` until `timelock` behind `hashlock`
    #[serde(rename = "newcontract")]
    NewContract {
        owner: String,
        contract_name: String,
        recipient: Recipient,
        value: ExtendedAsset,
        hashlock: HexBinary,
        timelock: Timestamp,
    },

    /// Release a lock with the preimage of its hashlock; callable by anyone
    Withdraw {
        owner: String,
        contract_name: String,
        preimage: HexBinary,
    },

    /// Return an expired lock to its owner
    Refund {
        owner: String,
        contract_name: String,
    },

    /// Set the minimum amount and duration for locks of a token (issuer only)
    #[serde(rename = "setconfig")]
    SetConfig {
        min_amount: ExtendedAsset,
        min_duration: u64,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(Option<LockResponse>)]
    Lock {
        owner: String,
        contract_name: String,
    },

    #[returns(Option<TokenConfigResponse>)]
    TokenConfig { symbol: ExtendedSymbolCode },
}

#[cw_serde]
pub struct ConfigResponse {
    pub token: Addr,
    pub vault: String,
}

#[cw_serde]
pub struct LockResponse {
    pub owner: String,
    pub contract_name: String,
    pub recipient: Recipient,
    pub value: ExtendedAsset,
    pub hashlock: HexBinary,
    pub timelock: Timestamp,
}

#[cw_serde]
pub struct TokenConfigResponse {
    pub min_amount: ExtendedAsset,
    pub min_duration: u64,
}
