//! Conversion planning
//!
//! `quote` works out every amount a conversion moves without touching
//! storage, so `convert` and the `Simulate` query agree by construction.
//! Amounts the sender pays are rounded up and amounts the pool gives are
//! rounded down.
//!
//! A smart token backed by the reserve is never priced below the reserve
//! rate: whenever the rate pays more per smart token than the curve, the
//! conversion runs at the rate instead. On sells this only applies when the
//! reserve pays out in the connected token, and the sold tokens are then
//! redeemed at the reserve rather than retired.

use common::{Asset, ExtendedAsset, ExtendedSymbol};
use cosmwasm_std::{Decimal, Deps, StdError};
use gxc_reserve::msg::{QueryMsg as ReserveQueryMsg, Rate, ReserveResponse};
use gxc_token::msg::{QueryMsg as TokenQueryMsg, StatResponse};

use crate::error::ContractError;
use crate::fee::{charge_for, conversion_fee, Charge};
use crate::math::{self, Converted, Ratio};
use crate::state::{Config, Connector, Market, CONNECTORS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

/// Everything one conversion moves
#[derive(Clone, Debug, PartialEq)]
pub struct Quote {
    pub side: Side,
    /// Connector with its balance already updated
    pub connector: Connector,
    pub pay: ExtendedAsset,
    pub receive: ExtendedAsset,
    pub fee: ExtendedAsset,
    pub via_reserve: bool,
}

impl Quote {
    /// Sold smart tokens go to the reserve instead of being retired.
    pub fn redeems_at_reserve(&self) -> bool {
        self.side == Side::Sell && self.via_reserve
    }
}

/// Curve state a conversion runs against
#[derive(Clone, Copy, Debug)]
struct Pool {
    supply: i64,
    balance: i64,
    weight: Decimal,
}

/// Atomic amounts of one conversion
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Plan {
    pay: i64,
    receive: i64,
    fee: i64,
    /// Change of the connector balance
    pool_delta: i64,
    via_reserve: bool,
}

pub fn quote(
    deps: Deps,
    config: &Config,
    market: &Market,
    from: &ExtendedAsset,
    to: &ExtendedAsset,
) -> Result<Quote, ContractError> {
    let (paid, wanted) = (from.quantity.amount, to.quantity.amount);
    if paid < 0 || wanted < 0 || (paid > 0) == (wanted > 0) {
        return Err(ContractError::AmbiguousConversion);
    }

    let side = if from.extended_symbol() == market.connected {
        Side::Buy
    } else {
        Side::Sell
    };
    let smart = match side {
        Side::Buy => to,
        Side::Sell => from,
    };
    let mut connector = CONNECTORS
        .may_load(
            deps.storage,
            (smart.contract.as_str(), smart.quantity.symbol.code.as_str()),
        )?
        .ok_or(ContractError::ConnectorNotFound)?;
    if smart.extended_symbol() != connector.smart {
        return Err(ContractError::TargetMismatch);
    }
    if side == Side::Sell && to.extended_symbol() != market.connected {
        return Err(ContractError::TargetMismatch);
    }

    let charge = charge_for(deps.storage, market, &connector.smart)?;
    let pool = Pool {
        supply: smart_supply(deps, config, &connector.smart)?,
        balance: connector.balance.amount,
        weight: connector.weight,
    };
    let reserve = reserve_of(deps, config, &connector.smart)?;

    let plan = match side {
        Side::Buy => {
            let rate = reserve.map(|reserve| reserve.rate);
            if paid > 0 {
                buy(&pool, &charge, rate, paid)?
            } else {
                buy_exact(&pool, &charge, rate, wanted)?
            }
        }
        Side::Sell => {
            let rate = reserve
                .filter(|reserve| reserve.underlying.extended_symbol() == market.connected)
                .map(|reserve| reserve.rate);
            if paid > 0 {
                sell(&pool, &charge, rate, paid)?
            } else {
                sell_exact(&pool, &charge, rate, wanted)?
            }
        }
    };

    connector.balance = connector
        .balance
        .checked_add(&connector.balance.with_amount(plan.pool_delta))?;
    let fee = ExtendedAsset::new(
        Asset::new(plan.fee, market.connected.symbol.clone()),
        market.connected.contract.clone(),
    );

    Ok(Quote {
        side,
        connector,
        pay: from.with_amount(plan.pay),
        receive: to.with_amount(plan.receive),
        fee,
        via_reserve: plan.via_reserve,
    })
}

/// Circulating supply of a smart token.
pub fn smart_supply(deps: Deps, config: &Config, smart: &ExtendedSymbol) -> Result<i64, ContractError> {
    let stat: StatResponse = deps
        .querier
        .query_wasm_smart(&config.token, &TokenQueryMsg::Stat { symbol: smart.code() })
        .map_err(|_| ContractError::SmartNotIssued)?;
    if stat.supply.symbol != smart.symbol {
        return Err(ContractError::SymbolPrecisionMismatch);
    }
    if stat.supply.amount <= 0 {
        return Err(ContractError::SmartNotIssued);
    }
    Ok(stat.supply.amount)
}

fn reserve_of(
    deps: Deps,
    config: &Config,
    smart: &ExtendedSymbol,
) -> Result<Option<ReserveResponse>, ContractError> {
    let Some(reserve) = &config.reserve else {
        return Ok(None);
    };
    let found: Option<ReserveResponse> = deps
        .querier
        .query_wasm_smart(reserve, &ReserveQueryMsg::Reserve { symbol: smart.code() })?;
    Ok(found.filter(|found| found.rate.underlying > 0 && found.rate.derivative > 0))
}

// ============================================================================
// Directions
// ============================================================================

/// Spend `paid` connected tokens, fee included.
fn buy(pool: &Pool, charge: &Charge, rate: Option<Rate>, paid: i64) -> Result<Plan, ContractError> {
    let mut fee = conversion_fee(charge, paid, false)?;
    let after = paid - fee;
    if after <= 0 {
        return Err(ContractError::NotEnoughAfterFee);
    }

    let mut issued = math::to_smart(pool.supply, pool.balance, after, pool.weight)?;
    if issued.value <= 0 {
        return Err(ContractError::NotEnoughForConversion);
    }

    let mut via_reserve = false;
    if let Some(rate) = rate.filter(|rate| rate.beats(issued.delta, issued.value)) {
        let value = math::floor_ratio(after, rate.derivative, rate.underlying)?;
        if value <= 0 {
            return Err(ContractError::NotEnoughForConversion);
        }
        let ratio = Ratio::new(
            math::product(value, rate.underlying)?,
            math::product(after, rate.derivative)?,
        );
        issued = Converted {
            value,
            delta: ratio.consumed(after)?,
            ratio,
        };
        via_reserve = true;
    }

    // only charge for the part of the payment actually converted
    if after > issued.delta {
        fee = issued.ratio.consumed(fee)?;
    }

    Ok(Plan {
        pay: issued.delta + fee,
        receive: issued.value,
        fee,
        pool_delta: issued.delta,
        via_reserve,
    })
}

/// Get exactly `wanted` smart tokens.
fn buy_exact(pool: &Pool, charge: &Charge, rate: Option<Rate>, wanted: i64) -> Result<Plan, ContractError> {
    let mut cost = math::exact_smart_cost(pool.supply, pool.balance, wanted, pool.weight)?;
    let mut via_reserve = false;
    if let Some(rate) = rate.filter(|rate| rate.beats(cost, wanted)) {
        cost = math::ceil_ratio(wanted, rate.underlying, rate.derivative)?;
        via_reserve = true;
    }
    if cost <= 0 {
        return Err(ContractError::NotEnoughForConversion);
    }
    let fee = conversion_fee(charge, cost, true)?;

    Ok(Plan {
        pay: cost + fee,
        receive: wanted,
        fee,
        pool_delta: cost,
        via_reserve,
    })
}

/// Sell `sold` smart tokens; the fee comes out of the payout.
fn sell(pool: &Pool, charge: &Charge, rate: Option<Rate>, sold: i64) -> Result<Plan, ContractError> {
    let mut out = math::from_smart(pool.supply, pool.balance, sold, pool.weight)?;
    let mut via_reserve = false;
    if let Some(rate) = rate.filter(|rate| rate.beats(out.delta, sold)) {
        let value = rate.underlying_for(sold)?;
        let ratio = Ratio::new(
            math::product(value, rate.derivative)?,
            math::product(sold, rate.underlying)?,
        );
        out = Converted {
            value,
            delta: value,
            ratio,
        };
        via_reserve = true;
    }

    let fee = conversion_fee(charge, out.value, false)?;
    let after = out.value - fee;
    if after <= 0 {
        return Err(ContractError::NotEnoughAfterFee);
    }

    Ok(Plan {
        pay: out.ratio.consumed(sold)?,
        receive: after,
        fee,
        pool_delta: if via_reserve { 0 } else { -out.delta },
        via_reserve,
    })
}

/// Receive exactly `wanted` connected tokens after the fee.
///
/// The smart input is the true inverse of the sell curve,
/// `dS = S(1 - (1 - x/C)^w)` with `x = wanted + fee`, not the forward
/// smart-token formula evaluated at `x`, so the quote agrees with a plain
/// sell of the same input.
fn sell_exact(pool: &Pool, charge: &Charge, rate: Option<Rate>, wanted: i64) -> Result<Plan, ContractError> {
    let fee = conversion_fee(charge, wanted, true)?;
    let payout = wanted
        .checked_add(fee)
        .ok_or_else(|| StdError::generic_err("addition overflow"))?;
    if payout >= pool.balance {
        return Err(ContractError::ConnectorBalanceNotEnough);
    }

    let mut sold = math::exact_smart_input(pool.supply, pool.balance, payout, pool.weight)?;
    let mut via_reserve = false;
    if let Some(rate) = rate.filter(|rate| rate.beats(payout, sold)) {
        sold = math::ceil_ratio(payout, rate.derivative, rate.underlying)?;
        via_reserve = true;
    }

    Ok(Plan {
        pay: sold,
        receive: wanted,
        fee,
        pool_delta: if via_reserve { 0 } else { -payout },
        via_reserve,
    })
}
