use common::{ExtendedAsset, ExtendedSymbolCode, Opt};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

pub use crate::state::Rate;

#[cw_serde]
pub struct InstantiateMsg {
    pub token: String,
    pub account: String,
    pub system_issuer: String,
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// Escrow `underlying` from the partner and create the `derivative` token.
    /// The partner must have approved this contract for `underlying`.
    Mint {
        derivative: ExtendedAsset,
        underlying: ExtendedAsset,
        opts: Vec<Opt>,
    },

    /// Redeem `value` derivative tokens of `owner` for underlying. The owner
    /// must have approved this contract for `value`.
    Claim { owner: String, value: ExtendedAsset },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(Option<ReserveResponse>)]
    Reserve { symbol: ExtendedSymbolCode },
}

#[cw_serde]
pub struct ConfigResponse {
    pub token: Addr,
    pub account: Addr,
    pub system_issuer: String,
}

#[cw_serde]
pub struct ReserveResponse {
    pub derivative: ExtendedAsset,
    pub underlying: ExtendedAsset,
    pub rate: Rate,
}
