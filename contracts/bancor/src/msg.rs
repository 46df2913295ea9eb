use common::{ExtendedAsset, ExtendedSymbol, ExtendedSymbolCode};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Decimal};

pub use crate::fee::Charge;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

#[cw_serde]
pub struct InstantiateMsg {
    /// Token engine contract
    pub token: String,
    /// Reserve contract consulted for fixed redemption rates
    pub reserve: Option<String>,
}

#[cw_serde]
pub struct MigrateMsg {}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    /// Convert between the connected token and a smart token. Exactly one of
    /// `from` / `to` carries a positive amount; the other names the target.
    /// The sender must have approved this contract for what it pays.
    Convert {
        sender: String,
        from: ExtendedAsset,
        to: ExtendedAsset,
    },

    /// Set the market admin and the connected token, once
    Init {
        admin: String,
        connected: ExtendedSymbol,
    },

    /// Open a pool for `smart`, seeded with `balance` taken from the admin
    Connect {
        smart: ExtendedSymbol,
        balance: ExtendedAsset,
        weight: Decimal,
    },

    /// Set the market charge, or the policy of `smart`; `rate == -1`
    /// deletes the policy
    #[serde(rename = "setcharge")]
    SetCharge {
        rate: i16,
        fixed: Option<ExtendedAsset>,
        smart: Option<ExtendedSymbol>,
    },

    #[serde(rename = "setadmin")]
    SetAdmin { admin: String },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(Option<ConnectorResponse>)]
    Connector { smart: ExtendedSymbolCode },

    /// Pools ordered by smart issuer and code
    #[returns(ConnectorsResponse)]
    Connectors {
        start_after: Option<ExtendedSymbolCode>,
        limit: Option<u32>,
    },

    #[returns(Option<ChargePolicyResponse>)]
    ChargePolicy { smart: ExtendedSymbolCode },

    /// What `Convert` would take and give right now
    #[returns(SimulateResponse)]
    Simulate {
        from: ExtendedAsset,
        to: ExtendedAsset,
    },
}

// ============================================================================
// Response Types
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub token: Addr,
    pub reserve: Option<Addr>,
    /// Unset until `init`
    pub admin: Option<String>,
    pub connected: Option<ExtendedSymbol>,
    pub charge: Option<Charge>,
}

#[cw_serde]
pub struct ConnectorResponse {
    pub smart: ExtendedSymbol,
    pub balance: ExtendedAsset,
    pub weight: Decimal,
}

#[cw_serde]
pub struct ConnectorsResponse {
    pub connectors: Vec<ConnectorResponse>,
}

#[cw_serde]
pub struct ChargePolicyResponse {
    pub smart: ExtendedSymbol,
    pub charge: Charge,
}

#[cw_serde]
pub struct SimulateResponse {
    /// Taken from the sender, fee included on buys
    pub pay: ExtendedAsset,
    /// Delivered to the sender, fee excluded on sells
    pub receive: ExtendedAsset,
    /// Sent to the market admin
    pub fee: ExtendedAsset,
    /// Priced by the reserve rate instead of the curve
    pub via_reserve: bool,
}
