//! Deposit and delayed withdrawal handlers.
//!
//! A withdrawal moves the amount out of the holder's deposit into the token
//! contract's own balance right away and records a request. Once the token's
//! delay has passed, the finalize step pays the escrow back to the holder's
//! spendable balance (or back into the deposit when the holder got frozen in
//! the meantime). Each owner has at most one armed timer, always set to the
//! earliest of their requests.

use common::deferred;
use common::{ExtendedAsset, ExtendedSymbolCode};
use cosmwasm_std::{DepsMut, Env, Event, Order, Response, StdResult, Storage};

use crate::auth::Actor;
use crate::error::ContractError;
use crate::helpers::{check_asset_is_valid, check_symbol, load_stat};
use crate::ledger::{AccountBook, Touch};
use crate::msg::ExecuteMsg;
use crate::state::{
    withdraws, TokenOption, WithdrawRequest, DEFAULT_WITHDRAW_DELAY_SEC, WITHDRAW_TIMERS,
};

pub fn withdrawn_event(owner: &str, value: &ExtendedAsset) -> Event {
    Event::new("withdraw")
        .add_attribute("owner", owner)
        .add_attribute("value", value.to_string())
}

pub fn reverted_event(owner: &str, value: &ExtendedAsset) -> Event {
    Event::new("revtwithdraw")
        .add_attribute("owner", owner)
        .add_attribute("value", value.to_string())
}

// ============================================================================
// Deposit
// ============================================================================

/// Lock part of the spendable balance of a recallable token.
pub fn execute_deposit(
    deps: DepsMut,
    actor: &Actor,
    owner: String,
    value: ExtendedAsset,
) -> Result<Response, ContractError> {
    check_asset_is_valid(&value, false)?;
    actor.require_auth(deps.storage, &owner)?;
    let symbol = value.code();
    let stat = load_stat(deps.storage, &symbol)?;
    check_symbol(&stat, &value.quantity)?;
    if !stat.has(TokenOption::Recallable) {
        return Err(ContractError::NotSupportedToken);
    }

    let can_open = actor.has_vauth(deps.storage, &stat.issuer);
    let book = AccountBook::new(&stat, &symbol, actor.code(), can_open);
    book.sub_balance(deps.storage, &owner, &value.quantity, Touch::keep())?;
    book.add_deposit(deps.storage, &owner, &value.quantity, Touch::NONE)?;

    Ok(Response::new()
        .add_attribute("action", "deposit")
        .add_attribute("owner", owner)
        .add_attribute("value", value.to_string()))
}

// ============================================================================
// Withdrawal Requests
// ============================================================================

pub fn execute_push_withdraw(
    deps: DepsMut,
    env: &Env,
    actor: &Actor,
    owner: String,
    value: ExtendedAsset,
) -> Result<Response, ContractError> {
    check_asset_is_valid(&value, false)?;
    actor.require_auth(deps.storage, &owner)?;
    let symbol = value.code();
    let stat = load_stat(deps.storage, &symbol)?;
    check_symbol(&stat, &value.quantity)?;
    if !stat.has(TokenOption::Recallable) {
        return Err(ContractError::NotSupportedToken);
    }
    let min_amount = stat.withdraw_min_amount.as_ref().map_or(0, |min| min.amount);
    if value.quantity.amount < min_amount {
        return Err(ContractError::WithdrawTooSmall);
    }

    let key = symbol.to_string();
    let scheduled_time = env
        .block
        .time
        .plus_seconds(stat.withdraw_delay_sec.unwrap_or(DEFAULT_WITHDRAW_DELAY_SEC));
    let req = match withdraws().may_load(deps.storage, (owner.as_str(), key.as_str()))? {
        Some(mut req) => {
            req.quantity = req.quantity.checked_add(&value.quantity)?;
            req.scheduled_time = scheduled_time;
            req
        }
        None => WithdrawRequest {
            owner: owner.clone(),
            quantity: value.quantity.clone(),
            issuer: stat.issuer.clone(),
            scheduled_time,
        },
    };
    withdraws().save(deps.storage, (owner.as_str(), key.as_str()), &req)?;

    let book = AccountBook::new(&stat, &symbol, actor.code(), false);
    book.sub_deposit(deps.storage, &owner, &value.quantity, Touch::keep())?;
    book.add_balance(deps.storage, actor.code(), &value.quantity, Touch::NONE)?;

    let events = refresh_schedule(deps.storage, env, actor, &owner)?;

    Ok(Response::new()
        .add_events(events)
        .add_attribute("action", "pushwithdraw")
        .add_attribute("owner", owner)
        .add_attribute("value", value.to_string())
        .add_attribute("scheduled_time", req.scheduled_time.seconds().to_string()))
}

/// Cancel a request and put its amount back into the deposit.
pub fn execute_pop_withdraw(
    deps: DepsMut,
    env: &Env,
    actor: &Actor,
    owner: String,
    symbol: ExtendedSymbolCode,
) -> Result<Response, ContractError> {
    actor.require_auth(deps.storage, &owner)?;
    let key = symbol.to_string();
    let req = withdraws()
        .may_load(deps.storage, (owner.as_str(), key.as_str()))?
        .ok_or(ContractError::WithdrawRequestNotFound)?;
    let stat = load_stat(deps.storage, &symbol)?;

    let book = AccountBook::new(&stat, &symbol, actor.code(), false);
    book.sub_balance(deps.storage, actor.code(), &req.quantity, Touch::NONE)?;
    book.add_deposit(deps.storage, &owner, &req.quantity, Touch::NONE)?;
    withdraws().remove(deps.storage, (owner.as_str(), key.as_str()))?;

    let events = refresh_schedule(deps.storage, env, actor, &owner)?;
    let value = ExtendedAsset::new(req.quantity, req.issuer);

    Ok(Response::new()
        .add_event(reverted_event(&owner, &value))
        .add_events(events)
        .add_attribute("action", "popwithdraw")
        .add_attribute("owner", owner)
        .add_attribute("value", value.to_string()))
}

/// Finalize the due requests of `owner`. Runs as the deferred self-call, or
/// directly by the owner.
pub fn execute_clear_withdraws(
    deps: DepsMut,
    env: &Env,
    actor: &Actor,
    owner: String,
) -> Result<Response, ContractError> {
    let is_self = actor.sender == actor.contract;
    if !is_self && !actor.has_auth(deps.storage, &owner) {
        return Err(ContractError::MissingAuthority { account: owner });
    }
    if earliest_request(deps.storage, &owner)?.is_none() {
        return Err(ContractError::WithdrawRequestsNotFound);
    }

    let events = clear_due(deps.storage, env, actor, &owner)?;

    Ok(Response::new()
        .add_events(events)
        .add_attribute("action", "clrwithdraws")
        .add_attribute("owner", owner))
}

/// Fire the finalize call of every owner whose timer expired.
pub fn sudo_tick(deps: DepsMut, env: Env) -> Result<Response, ContractError> {
    let owners = WITHDRAW_TIMERS.take_due(deps.storage, env.block.time)?;
    let calls = owners
        .iter()
        .map(|owner| {
            deferred::fire(
                &env.contract.address,
                &ExecuteMsg::ClearWithdraws {
                    owner: owner.clone(),
                },
            )
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(Response::new()
        .add_submessages(calls)
        .add_attribute("action", "tick")
        .add_attribute("fired", owners.len().to_string()))
}

// ============================================================================
// Scheduling
// ============================================================================

/// Re-arm the owner's timer for their earliest request, finalizing right
/// away when that one is already due.
pub fn refresh_schedule(
    storage: &mut dyn Storage,
    env: &Env,
    actor: &Actor,
    owner: &str,
) -> Result<Vec<Event>, ContractError> {
    WITHDRAW_TIMERS.cancel(storage, owner)?;
    match earliest_request(storage, owner)? {
        Some(req) if req.scheduled_time <= env.block.time => clear_due(storage, env, actor, owner),
        Some(req) => {
            WITHDRAW_TIMERS.arm(storage, owner, req.scheduled_time)?;
            Ok(vec![])
        }
        None => Ok(vec![]),
    }
}

fn clear_due(
    storage: &mut dyn Storage,
    env: &Env,
    actor: &Actor,
    owner: &str,
) -> Result<Vec<Event>, ContractError> {
    let mut events = vec![];
    while let Some(req) = earliest_request(storage, owner)? {
        if req.scheduled_time > env.block.time {
            break;
        }
        let symbol = ExtendedSymbolCode::new(req.quantity.symbol.code.clone(), req.issuer.clone());
        let stat = load_stat(storage, &symbol)?;
        let book = AccountBook::new(
            &stat,
            &symbol,
            actor.code(),
            actor.has_vauth(storage, &stat.issuer),
        );
        let value = ExtendedAsset::new(req.quantity.clone(), req.issuer.clone());

        book.sub_balance(storage, actor.code(), &req.quantity, Touch::NONE)?;
        let frozen = book.load(storage, owner)?.map_or(false, |row| row.frozen);
        if frozen {
            book.add_deposit(storage, owner, &req.quantity, Touch::skip_validation())?;
            events.push(reverted_event(owner, &value));
        } else {
            book.add_balance(storage, owner, &req.quantity, Touch::NONE)?;
            events.push(withdrawn_event(owner, &value));
        }
        withdraws().remove(storage, (owner, symbol.to_string().as_str()))?;
    }

    WITHDRAW_TIMERS.cancel(storage, owner)?;
    if let Some(next) = earliest_request(storage, owner)? {
        WITHDRAW_TIMERS.arm(storage, owner, next.scheduled_time)?;
    }
    Ok(events)
}

fn earliest_request(storage: &dyn Storage, owner: &str) -> StdResult<Option<WithdrawRequest>> {
    withdraws()
        .idx
        .schedule
        .sub_prefix(owner.to_string())
        .range(storage, None, None, Order::Ascending)
        .next()
        .transpose()
        .map(|entry| entry.map(|(_, req)| req))
}
