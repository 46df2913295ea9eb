//! Conversion fees
//!
//! A charge is a permyriad `rate` plus a `fixed` amount of the connected
//! token. Policies stored per smart token override the market-wide charge.
//!
//! With `p = 10000 / rate`:
//!
//! | Side            | Fee on `v`                                       |
//! |-----------------|--------------------------------------------------|
//! | paid amount     | `ceil(v / p) + fixed`                            |
//! | net amount      | `floor((v + fixed) * p / (p - 1) + 0.9) - v + fixed` |
//!
//! A charge with zero rate and zero fixed amount is exempt. Any other charge
//! takes at least one atom.

use common::{Asset, ExtendedSymbol, Symbol};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdError, StdResult, Storage};
use cw_storage_plus::Map;

use crate::error::ContractError;
use crate::state::Market;

/// Permyriad denominator (10000 = 100%)
pub const RATE_DENOMINATOR: u16 = 10000;

// ============================================================================
// Data Structures
// ============================================================================

#[cw_serde]
pub struct Charge {
    /// Permyriad of the converted amount
    pub rate: u16,
    /// Flat amount of the connected token added to every fee
    pub fixed: Asset,
}

impl Charge {
    pub fn free(connected: Symbol) -> Self {
        Self {
            rate: 0,
            fixed: Asset::zero(connected),
        }
    }

    pub fn is_exempted(&self) -> bool {
        self.rate == 0 && self.fixed.amount == 0
    }

    /// Fee taken out of `amount` paid in.
    pub fn fee_on(&self, amount: i64) -> Result<i64, ContractError> {
        let mut fee = 0i128;
        if self.rate != 0 {
            let p = i128::from(RATE_DENOMINATOR / self.rate);
            fee = (i128::from(amount) + p - 1) / p;
        }
        to_fee(fee + i128::from(self.fixed.amount))
    }

    /// Fee to add on top of `amount` so that `amount` is left after charging.
    pub fn fee_for(&self, amount: i64) -> Result<i64, ContractError> {
        let mut fee = 0i128;
        if self.rate != 0 {
            let p = i128::from(RATE_DENOMINATOR / self.rate);
            if p < 2 {
                return Err(ContractError::RateTooHigh);
            }
            let gross = i128::from(amount) + i128::from(self.fixed.amount);
            fee = (gross * p * 10 + 9 * (p - 1)) / (10 * (p - 1)) - i128::from(amount);
        }
        to_fee(fee + i128::from(self.fixed.amount))
    }
}

fn to_fee(fee: i128) -> Result<i64, ContractError> {
    i64::try_from(fee).map_err(|_| StdError::generic_err("conversion fee out of range").into())
}

#[cw_serde]
pub struct ChargePolicy {
    pub smart: ExtendedSymbol,
    pub charge: Charge,
}

// ============================================================================
// Storage
// ============================================================================

/// (smart issuer, code) -> charge overriding the market's
pub const CHARGES: Map<(&str, &str), ChargePolicy> = Map::new("charges");

// ============================================================================
// Fee Calculation
// ============================================================================

/// Charge in effect for conversions of `smart`.
pub fn charge_for(storage: &dyn Storage, market: &Market, smart: &ExtendedSymbol) -> StdResult<Charge> {
    let policy = CHARGES.may_load(storage, (smart.contract.as_str(), smart.symbol.code.as_str()))?;
    Ok(policy.map_or_else(|| market.charge.clone(), |policy| policy.charge))
}

/// Fee for converting `amount`. `required` grosses the fee up so that
/// `amount` is what remains.
pub fn conversion_fee(charge: &Charge, amount: i64, required: bool) -> Result<i64, ContractError> {
    if charge.is_exempted() {
        return Ok(0);
    }
    let fee = if required {
        charge.fee_for(amount)?
    } else {
        charge.fee_on(amount)?
    };
    Ok(fee.max(1))
}
