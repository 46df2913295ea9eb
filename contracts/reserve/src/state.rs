//! State definitions for the reserve contract

use common::{Asset, ExtendedAsset};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdError, StdResult, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:gxc-reserve";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Options a partner may pass on to the derivative token
pub const ALLOWED_OPTS: [&str; 2] = ["withdraw_min_amount", "withdraw_delay_sec"];

#[cw_serde]
pub struct Config {
    /// Token engine minting and burning derivatives
    pub token: Addr,
    /// Account registry deciding who is a partner
    pub account: Addr,
    /// Issuer of the system token accepted as underlying
    pub system_issuer: String,
}

/// Underlying atoms paid per derivative atom, kept as an exact fraction.
#[cw_serde]
#[derive(Copy)]
pub struct Rate {
    pub underlying: i64,
    pub derivative: i64,
}

impl Rate {
    /// Underlying atoms for `amount` derivative atoms, rounded down.
    pub fn underlying_for(&self, amount: i64) -> StdResult<i64> {
        let out = Uint128::from(amount.unsigned_abs())
            .checked_multiply_ratio(self.underlying.unsigned_abs(), self.derivative.unsigned_abs())
            .map_err(|err| StdError::generic_err(err.to_string()))?;
        i64::try_from(out.u128()).map_err(|err| StdError::generic_err(err.to_string()))
    }

    /// Whether this rate pays more than `paid` atoms for `amount` atoms.
    pub fn beats(&self, paid: i64, amount: i64) -> bool {
        i128::from(self.underlying) * i128::from(amount)
            > i128::from(paid) * i128::from(self.derivative)
    }
}

#[cw_serde]
pub struct Reserve {
    /// Derivative still outstanding
    pub derivative: ExtendedAsset,
    /// Escrow still held
    pub underlying: Asset,
    pub rate: Rate,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// (derivative issuer, code) -> reserve
pub const RESERVES: Map<(&str, &str), Reserve> = Map::new("reserves");
