//! Message types for the token contract
//!
//! Action names keep the short ledger spelling on the wire (`setopts`,
//! `pushwithdraw`, ...), so clients written against the ledger ABI keep
//! working.

use common::{Asset, ExtendedAsset, ExtendedSymbolCode, Opt};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Timestamp};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Account acting with the token contract's own authority
    pub admin: String,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Token Lifecycle
    // ========================================================================
    /// Create a token or raise its max supply
    Mint { value: ExtendedAsset, opts: Vec<Opt> },

    /// Move tokens; `from == gxc.null` issues, `to == gxc.null` retires
    Transfer {
        from: String,
        to: String,
        value: ExtendedAsset,
        memo: String,
    },

    /// Destroy tokens, lowering supply and max supply
    Burn {
        owner: String,
        value: ExtendedAsset,
        memo: String,
    },

    /// Change the mutable token options
    #[serde(rename = "setopts")]
    SetOpts {
        symbol: ExtendedSymbolCode,
        opts: Vec<Opt>,
    },

    /// Change per-holder options (`frozen`, `whitelist`)
    #[serde(rename = "setacntsopts")]
    SetAccountsOpts {
        accounts: Vec<String>,
        symbol: ExtendedSymbolCode,
        opts: Vec<Opt>,
    },

    // ========================================================================
    // Holder Rows
    // ========================================================================
    Open {
        owner: String,
        symbol: ExtendedSymbolCode,
        payer: Option<String>,
    },

    Close {
        owner: String,
        symbol: ExtendedSymbolCode,
    },

    /// Lock spendable balance into the recallable deposit
    Deposit { owner: String, value: ExtendedAsset },

    /// Request moving deposit back to balance after the token's delay
    #[serde(rename = "pushwithdraw")]
    PushWithdraw { owner: String, value: ExtendedAsset },

    /// Cancel a pending withdrawal request
    #[serde(rename = "popwithdraw")]
    PopWithdraw {
        owner: String,
        symbol: ExtendedSymbolCode,
    },

    /// Finalize every due withdrawal request of `owner`
    #[serde(rename = "clrwithdraws")]
    ClearWithdraws { owner: String },

    /// Set, update or (with a zero amount) revoke an allowance
    Approve {
        owner: String,
        spender: String,
        value: ExtendedAsset,
        count: Option<u32>,
    },

    // ========================================================================
    // Code Links
    // ========================================================================
    /// Let contract `code` act with `account`'s authority
    LinkCode { account: String, code: String },

    UnlinkCode { account: String, code: String },
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(StatResponse)]
    Stat { symbol: ExtendedSymbolCode },

    #[returns(Option<AccountResponse>)]
    Account {
        owner: String,
        symbol: ExtendedSymbolCode,
    },

    /// Rows held by `owner`, by symbol
    #[returns(AccountsResponse)]
    Accounts {
        owner: String,
        start_after: Option<ExtendedSymbolCode>,
        limit: Option<u32>,
    },

    #[returns(Option<WithdrawResponse>)]
    WithdrawRequest {
        owner: String,
        symbol: ExtendedSymbolCode,
    },

    /// Requests of `owner`, by symbol
    #[returns(WithdrawsResponse)]
    WithdrawRequests {
        owner: String,
        start_after: Option<ExtendedSymbolCode>,
        limit: Option<u32>,
    },

    #[returns(Option<AllowanceResponse>)]
    Allowance {
        owner: String,
        spender: String,
        symbol: ExtendedSymbolCode,
    },

    #[returns(LinkedCodesResponse)]
    LinkedCodes {
        account: String,
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Armed finalize timers, by owner
    #[returns(SchedulesResponse)]
    Schedules {
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

// ============================================================================
// Response Types
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
}

#[cw_serde]
pub struct StatResponse {
    pub supply: Asset,
    pub max_supply: Asset,
    pub issuer: String,
    pub opts: u32,
    pub withdraw_min_amount: Option<Asset>,
    pub withdraw_delay_sec: Option<u64>,
}

#[cw_serde]
pub struct AccountResponse {
    pub owner: String,
    pub symbol: ExtendedSymbolCode,
    pub balance: Asset,
    pub deposit: Option<Asset>,
    pub frozen: bool,
    pub whitelist: bool,
}

#[cw_serde]
pub struct AccountsResponse {
    pub accounts: Vec<AccountResponse>,
}

#[cw_serde]
pub struct WithdrawResponse {
    pub owner: String,
    pub symbol: ExtendedSymbolCode,
    pub quantity: Asset,
    pub scheduled_time: Timestamp,
}

#[cw_serde]
pub struct WithdrawsResponse {
    pub requests: Vec<WithdrawResponse>,
}

#[cw_serde]
pub struct AllowanceResponse {
    pub owner: String,
    pub spender: String,
    pub symbol: ExtendedSymbolCode,
    pub quantity: Asset,
    pub count: Option<u32>,
}

#[cw_serde]
pub struct LinkedCodesResponse {
    pub account: String,
    pub codes: Vec<String>,
}

#[cw_serde]
pub struct ScheduleEntry {
    pub owner: String,
    pub due: u64,
}

#[cw_serde]
pub struct SchedulesResponse {
    pub schedules: Vec<ScheduleEntry>,
}
