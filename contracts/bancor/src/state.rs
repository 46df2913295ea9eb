//! State definitions for the bancor contract

use common::{Asset, ExtendedSymbol};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Decimal};
use cw_storage_plus::{Item, Map};

use crate::fee::Charge;

pub const CONTRACT_NAME: &str = "crates.io:gxc-bancor";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed at instantiate
#[cw_serde]
pub struct Config {
    /// Account holding the contract's own authority (init, setadmin)
    pub owner: Addr,
    /// Token engine moving every asset
    pub token: Addr,
    /// Reserve offering a fixed redemption rate for some smart tokens
    pub reserve: Option<Addr>,
}

/// Market settings written by `init`
#[cw_serde]
pub struct Market {
    /// Manages connectors and charges, receives conversion fees
    pub admin: String,
    /// Token every connector is priced against
    pub connected: ExtendedSymbol,
    /// Charge applied when a smart token has no policy of its own
    pub charge: Charge,
}

/// Bonding curve pool of one smart token
#[cw_serde]
pub struct Connector {
    pub smart: ExtendedSymbol,
    /// Connected tokens held for this pool
    pub balance: Asset,
    pub weight: Decimal,
}

pub const CONFIG: Item<Config> = Item::new("config");

pub const MARKET: Item<Market> = Item::new("market");

/// (smart issuer, code) -> connector
pub const CONNECTORS: Map<(&str, &str), Connector> = Map::new("connectors");
