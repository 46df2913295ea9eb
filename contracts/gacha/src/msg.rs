//! Message types for the gacha contract

use common::{Asset, ExtendedAsset};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, HexBinary, Timestamp};

pub use crate::state::{Grade, SchemeName};

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    /// Token engine paying budgets and rewards
    pub token: String,
    /// Account registry holding the partner flags
    pub account: String,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Schemes
    // ========================================================================
    /// Create a scheme, escrowing its budget from the scheme's root account
    Open {
        scheme: SchemeName,
        grades: Vec<Grade>,
        budget: ExtendedAsset,
        expiration: Timestamp,
        precision: Option<u8>,
        deadline_sec: Option<u64>,
    },

    /// Remove an expired scheme and refund what it did not pay out
    Close { scheme: SchemeName },

    // ========================================================================
    // Draws
    // ========================================================================
    /// Hand a draw to `to`, committing the drawer's seed hash
    Issue {
        to: String,
        scheme: SchemeName,
        dseedhash: HexBinary,
        id: Option<u64>,
    },

    /// Reveal the owner's seed, starting the resolution deadline
    #[serde(rename = "setoseed")]
    SetOseed { id: u64, oseed: HexBinary },

    /// Reveal the drawer's seed and pay out the draw
    #[serde(rename = "setdseed")]
    SetDseed { id: u64, dseed: HexBinary },

    /// Raincheck every draw past its deadline; self-call only
    Resolve {},
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(Option<SchemeResponse>)]
    Scheme { scheme: SchemeName },

    #[returns(Option<DrawResponse>)]
    Draw { id: u64 },

    /// Draws held by `owner`, by id
    #[returns(DrawsResponse)]
    DrawsByOwner {
        owner: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    /// Armed resolution timer and the soonest deadline
    #[returns(ScheduleResponse)]
    Schedule {},
}

// ============================================================================
// Response Types
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub token: Addr,
    pub account: Addr,
}

#[cw_serde]
pub struct SchemeResponse {
    pub scheme: SchemeName,
    pub grades: Vec<Grade>,
    pub budget: ExtendedAsset,
    pub expiration: Timestamp,
    pub precision: u8,
    pub deadline_sec: u64,
    pub out: Asset,
    pub out_count: Vec<u32>,
    pub issued: u32,
    pub unresolved: u32,
}

#[cw_serde]
pub struct DrawResponse {
    pub id: u64,
    pub owner: String,
    pub scheme: SchemeName,
    pub dseedhash: HexBinary,
    pub oseed: Option<HexBinary>,
    pub deadline: Option<Timestamp>,
}

#[cw_serde]
pub struct DrawsResponse {
    pub draws: Vec<DrawResponse>,
}

#[cw_serde]
pub struct ScheduleResponse {
    /// When the resolve timer fires, in seconds
    pub due: Option<u64>,
    /// Earliest deadline among seeded draws
    pub next_deadline: Option<u64>,
}
