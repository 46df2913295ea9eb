//! State definitions for the token contract
//!
//! Token metadata is keyed by `(issuer, code)`. Per-holder rows, withdrawal
//! requests and allowances are keyed by the holder plus the extended symbol
//! code string (`CODE@issuer`), so one holder can carry the same code from
//! several issuers.

use common::deferred::Deferred;
use common::{Asset, Symbol};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};
use cw_storage_plus::{Index, IndexList, IndexedMap, Item, Map, MultiIndex};

/// Contract name for migration
pub const CONTRACT_NAME: &str = "crates.io:gxc-token";
/// Contract version for migration
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Withdraw delay applied to recallable tokens that do not set one (24 hours)
pub const DEFAULT_WITHDRAW_DELAY_SEC: u64 = 24 * 60 * 60;

/// Longest accepted memo in bytes
pub const MAX_MEMO_BYTES: usize = 256;

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Account acting with the token contract's own authority
    pub admin: Addr,
}

// ============================================================================
// Token Metadata
// ============================================================================

/// Token-level switches, stored as bits of `TokenStat::opts`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenOption {
    Mintable,
    Recallable,
    Freezable,
    Pausable,
    Paused,
    Whitelistable,
    WhitelistOn,
    Floatable,
}

impl TokenOption {
    pub fn bit(self) -> u32 {
        1 << (self as u32)
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let opt = match key {
            "mintable" => Self::Mintable,
            "recallable" => Self::Recallable,
            "freezable" => Self::Freezable,
            "pausable" => Self::Pausable,
            "paused" => Self::Paused,
            "whitelistable" => Self::Whitelistable,
            "whitelist_on" => Self::WhitelistOn,
            "floatable" => Self::Floatable,
            _ => return None,
        };
        Some(opt)
    }

    /// Only these may change after the token was created.
    pub fn is_mutable(self) -> bool {
        matches!(self, Self::Paused | Self::WhitelistOn)
    }
}

/// Options a freshly minted token starts with
pub const DEFAULT_TOKEN_OPTS: u32 = 0b111;

/// Supply and configuration of one token
#[cw_serde]
pub struct TokenStat {
    pub supply: Asset,
    pub max_supply: Asset,
    pub issuer: String,
    /// Bitmask of `TokenOption`
    pub opts: u32,
    pub withdraw_min_amount: Option<Asset>,
    pub withdraw_delay_sec: Option<u64>,
}

impl TokenStat {
    pub fn new(max_supply: Asset, issuer: String) -> Self {
        Self {
            supply: Asset::zero(max_supply.symbol.clone()),
            max_supply,
            issuer,
            opts: DEFAULT_TOKEN_OPTS,
            withdraw_min_amount: None,
            withdraw_delay_sec: None,
        }
    }

    pub fn has(&self, opt: TokenOption) -> bool {
        self.opts & opt.bit() != 0
    }

    pub fn set(&mut self, opt: TokenOption, value: bool) {
        if value {
            self.opts |= opt.bit();
        } else {
            self.opts &= !opt.bit();
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.supply.symbol
    }
}

// ============================================================================
// Holder State
// ============================================================================

/// Balance row of one holder for one token
#[cw_serde]
pub struct TokenAccount {
    /// Spendable amount
    pub balance: Asset,
    /// Amount locked by the issuer, present only for recallable tokens
    pub deposit: Option<Asset>,
    pub issuer: String,
    pub frozen: bool,
    pub whitelist: bool,
}

impl TokenAccount {
    /// Rows without funds or flags are not worth keeping.
    pub fn is_disposable(&self) -> bool {
        !self.frozen
            && !self.whitelist
            && self.balance.amount == 0
            && self.deposit.as_ref().map_or(true, |d| d.amount == 0)
    }
}

/// Pending withdrawal of deposited tokens back to the spendable balance
#[cw_serde]
pub struct WithdrawRequest {
    pub owner: String,
    pub quantity: Asset,
    pub issuer: String,
    pub scheduled_time: Timestamp,
}

/// Amount `spender` may move out of `owner`'s balance
#[cw_serde]
pub struct Allowance {
    pub quantity: Asset,
    pub issuer: String,
    /// Remaining number of spends, unlimited when unset
    pub count: Option<u32>,
}

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

/// (issuer, code) -> token stat
pub const STATS: Map<(&str, &str), TokenStat> = Map::new("stats");

/// (owner, CODE@issuer) -> balance row
pub const ACCOUNTS: Map<(&str, &str), TokenAccount> = Map::new("accounts");

/// (owner, spender, CODE@issuer) -> allowance
pub const ALLOWANCES: Map<(&str, &str, &str), Allowance> = Map::new("allowances");

/// (account, code) -> linked; `code` may act with `account`'s authority
pub const LINKED_CODES: Map<(&str, &str), bool> = Map::new("linked_codes");

/// One finalize timer per owner with pending withdrawals
pub const WITHDRAW_TIMERS: Deferred = Deferred::new("withdraw_timers", "withdraw_timers_due");

pub struct WithdrawIndexes<'a> {
    /// (owner, scheduled seconds) for earliest-first scans per owner
    pub schedule: MultiIndex<'a, (String, u64), WithdrawRequest, (String, String)>,
}

impl<'a> IndexList<WithdrawRequest> for WithdrawIndexes<'a> {
    fn get_indexes(&'_ self) -> Box<dyn Iterator<Item = &'_ dyn Index<WithdrawRequest>> + '_> {
        let v: Vec<&dyn Index<WithdrawRequest>> = vec![&self.schedule];
        Box::new(v.into_iter())
    }
}

/// (owner, CODE@issuer) -> withdrawal request
pub fn withdraws<'a>() -> IndexedMap<'a, (&'a str, &'a str), WithdrawRequest, WithdrawIndexes<'a>>
{
    let indexes = WithdrawIndexes {
        schedule: MultiIndex::new(
            |_pk, req| (req.owner.clone(), req.scheduled_time.seconds()),
            "withdraws",
            "withdraws__schedule",
        ),
    };
    IndexedMap::new("withdraws", indexes)
}
