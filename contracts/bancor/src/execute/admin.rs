//! Market setup handlers

use common::{ExtendedAsset, ExtendedSymbol};
use cosmwasm_std::{Decimal, DepsMut, Env, MessageInfo, Response};

use crate::error::ContractError;
use crate::fee::{Charge, ChargePolicy, CHARGES, RATE_DENOMINATOR};
use crate::quote::smart_supply;
use crate::state::{Connector, Market, CONFIG, CONNECTORS, MARKET};

use super::token_transfer;

fn require_owner(deps: &DepsMut, info: &MessageInfo) -> Result<(), ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::MissingAuthority {
            account: config.owner.to_string(),
        });
    }
    Ok(())
}

fn require_admin(market: &Market, info: &MessageInfo) -> Result<(), ContractError> {
    if info.sender.as_str() != market.admin {
        return Err(ContractError::MissingAuthority {
            account: market.admin.clone(),
        });
    }
    Ok(())
}

pub fn execute_init(
    deps: DepsMut,
    info: MessageInfo,
    admin: String,
    connected: ExtendedSymbol,
) -> Result<Response, ContractError> {
    require_owner(&deps, &info)?;
    if MARKET.exists(deps.storage) {
        return Err(ContractError::AlreadyInitialized);
    }
    let admin = deps.api.addr_validate(&admin)?.to_string();

    MARKET.save(
        deps.storage,
        &Market {
            admin: admin.clone(),
            charge: Charge::free(connected.symbol.clone()),
            connected: connected.clone(),
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "init")
        .add_attribute("admin", admin)
        .add_attribute("connected", connected.to_string()))
}

pub fn execute_set_admin(deps: DepsMut, info: MessageInfo, admin: String) -> Result<Response, ContractError> {
    require_owner(&deps, &info)?;
    let mut market = MARKET
        .may_load(deps.storage)?
        .ok_or(ContractError::AdminBeforeInit)?;
    market.admin = deps.api.addr_validate(&admin)?.to_string();
    MARKET.save(deps.storage, &market)?;

    Ok(Response::new()
        .add_attribute("action", "setadmin")
        .add_attribute("admin", market.admin))
}

// ============================================================================
// Connectors
// ============================================================================

/// Open a pool. The admin must have approved this contract for `balance`.
pub fn execute_connect(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    smart: ExtendedSymbol,
    balance: ExtendedAsset,
    weight: Decimal,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let market = MARKET
        .may_load(deps.storage)?
        .ok_or(ContractError::NotInitialized)?;
    if balance.extended_symbol() != market.connected {
        return Err(ContractError::BalanceNotConnected);
    }
    require_admin(&market, &info)?;

    if weight.is_zero() || weight > Decimal::one() {
        return Err(ContractError::InvalidWeight);
    }
    if balance.quantity.amount <= 0 {
        return Err(ContractError::NotPositive);
    }

    let key = (smart.contract.as_str(), smart.symbol.code.as_str());
    if CONNECTORS.has(deps.storage, key) {
        return Err(ContractError::ExistingConnector);
    }
    smart_supply(deps.as_ref(), &config, &smart)?;

    CONNECTORS.save(
        deps.storage,
        key,
        &Connector {
            smart: smart.clone(),
            balance: balance.quantity.clone(),
            weight,
        },
    )?;

    let transfer = token_transfer(
        &config.token,
        &market.admin,
        env.contract.address.as_str(),
        &balance,
        "bancor connector",
    )?;

    Ok(Response::new()
        .add_message(transfer)
        .add_attribute("action", "connect")
        .add_attribute("smart", smart.to_string())
        .add_attribute("balance", balance.to_string())
        .add_attribute("weight", weight.to_string()))
}

// ============================================================================
// Charges
// ============================================================================

pub fn execute_set_charge(
    deps: DepsMut,
    info: MessageInfo,
    rate: i16,
    fixed: Option<ExtendedAsset>,
    smart: Option<ExtendedSymbol>,
) -> Result<Response, ContractError> {
    let mut market = MARKET
        .may_load(deps.storage)?
        .ok_or(ContractError::ChargeBeforeInit)?;
    if let Some(fixed) = &fixed {
        if fixed.extended_symbol() != market.connected {
            return Err(ContractError::FeeNotConnected);
        }
    }
    require_admin(&market, &info)?;

    let res = Response::new()
        .add_attribute("action", "setcharge")
        .add_attribute("rate", rate.to_string());

    let Some(smart) = smart else {
        market.charge.rate = checked_rate(rate)?;
        if let Some(fixed) = fixed {
            market.charge.fixed = fixed.quantity;
        }
        MARKET.save(deps.storage, &market)?;
        return Ok(res.add_attribute("fixed", market.charge.fixed.to_string()));
    };

    let key = (smart.contract.as_str(), smart.symbol.code.as_str());
    if rate == -1 {
        if !CHARGES.has(deps.storage, key) {
            return Err(ContractError::ChargePolicyNotFound);
        }
        CHARGES.remove(deps.storage, key);
        return Ok(res
            .add_attribute("smart", smart.to_string())
            .add_attribute("deleted", "true"));
    }

    let rate = checked_rate(rate)?;
    let policy = match CHARGES.may_load(deps.storage, key)? {
        Some(mut policy) => {
            policy.charge.rate = rate;
            if let Some(fixed) = fixed {
                policy.charge.fixed = fixed.quantity;
            }
            policy
        }
        None => ChargePolicy {
            smart: smart.clone(),
            charge: Charge {
                rate,
                fixed: fixed.map_or_else(
                    || Charge::free(market.connected.symbol.clone()).fixed,
                    |fixed| fixed.quantity,
                ),
            },
        },
    };
    CHARGES.save(deps.storage, key, &policy)?;

    Ok(res
        .add_attribute("smart", smart.to_string())
        .add_attribute("fixed", policy.charge.fixed.to_string()))
}

fn checked_rate(rate: i16) -> Result<u16, ContractError> {
    u16::try_from(rate)
        .ok()
        .filter(|rate| *rate <= RATE_DENOMINATOR)
        .ok_or(ContractError::InvalidRate)
}
