//! Value movement handlers.
//!
//! This module handles:
//! - Transfer, which dispatches to issue / retire / plain transfer around the
//!   null account
//! - Burn
//! - Allowances

use common::name::is_null;
use common::{basename, Asset, ExtendedAsset};
use cosmwasm_std::{DepsMut, Env, Response, Storage};

use crate::auth::Actor;
use crate::error::ContractError;
use crate::helpers::{check_account_exists, check_asset_is_valid, check_symbol, load_stat, save_stat};
use crate::ledger::{AccountBook, Touch};
use crate::state::{withdraws, Allowance, TokenOption, TokenStat, ALLOWANCES, MAX_MEMO_BYTES};

use super::withdraw::{refresh_schedule, reverted_event};

fn check_memo(memo: &str) -> Result<(), ContractError> {
    if memo.len() > MAX_MEMO_BYTES {
        return Err(ContractError::MemoTooLong);
    }
    Ok(())
}

// ============================================================================
// Transfer
// ============================================================================

pub fn execute_transfer(
    deps: DepsMut,
    env: &Env,
    actor: &Actor,
    from: String,
    to: String,
    value: ExtendedAsset,
    memo: String,
) -> Result<Response, ContractError> {
    check_memo(&memo)?;
    if from == to {
        return Err(ContractError::TransferToSelf);
    }
    check_account_exists(deps.api, &to, "to")?;

    let mut stat = load_stat(deps.storage, &value.code())?;

    let res = if is_null(&from) {
        issue(deps.storage, actor, &mut stat, &to, &value)?
    } else if is_null(&to) {
        retire(deps.storage, actor, &mut stat, &from, &value)?
    } else {
        transfer(deps.storage, env, actor, &stat, &from, &to, &value)?
    };

    Ok(res
        .add_attribute("from", from)
        .add_attribute("to", to)
        .add_attribute("value", value.to_string())
        .add_attribute("memo", memo))
}

/// Put new tokens into circulation, up to the max supply.
fn issue(
    storage: &mut dyn Storage,
    actor: &Actor,
    stat: &mut TokenStat,
    to: &str,
    value: &ExtendedAsset,
) -> Result<Response, ContractError> {
    actor.require_vauth(storage, &value.contract)?;
    check_asset_is_valid(value, false)?;
    check_symbol(stat, &value.quantity)?;
    if value.quantity.amount > stat.max_supply.amount - stat.supply.amount {
        return Err(ContractError::ExceedsAvailableSupply);
    }

    stat.supply = stat.supply.checked_add(&value.quantity)?;
    save_stat(storage, stat)?;

    let book = AccountBook::new(stat, &value.code(), actor.code(), true);
    if stat.has(TokenOption::Recallable) && to != basename(&value.contract) {
        book.add_deposit(storage, to, &value.quantity, Touch::NONE)?;
    } else {
        book.add_balance(storage, to, &value.quantity, Touch::NONE)?;
    }

    Ok(Response::new().add_attribute("action", "issue"))
}

/// Take tokens out of circulation. The issuer may recall them from a
/// holder's deposit of a recallable token.
fn retire(
    storage: &mut dyn Storage,
    actor: &Actor,
    stat: &mut TokenStat,
    from: &str,
    value: &ExtendedAsset,
) -> Result<Response, ContractError> {
    check_asset_is_valid(value, false)?;
    check_symbol(stat, &value.quantity)?;

    let is_recall = if actor.has_auth(storage, from) {
        false
    } else if stat.has(TokenOption::Recallable) && actor.has_vauth(storage, &value.contract) {
        true
    } else {
        return Err(ContractError::MissingRequiredAuthority);
    };

    stat.supply = stat.supply.checked_sub(&value.quantity)?;
    save_stat(storage, stat)?;

    let book = AccountBook::new(stat, &value.code(), actor.code(), false);
    if is_recall {
        book.sub_deposit(storage, from, &value.quantity, Touch::NONE)?;
    } else {
        book.sub_balance(storage, from, &value.quantity, Touch::NONE)?;
    }

    Ok(Response::new()
        .add_attribute("action", "retire")
        .add_attribute("recall", is_recall.to_string()))
}

/// Move tokens between holders, by the owner, by an allowed spender, or by
/// the issuer out of a recallable deposit.
fn transfer(
    storage: &mut dyn Storage,
    env: &Env,
    actor: &Actor,
    stat: &TokenStat,
    from: &str,
    to: &str,
    value: &ExtendedAsset,
) -> Result<Response, ContractError> {
    check_asset_is_valid(value, false)?;
    check_symbol(stat, &value.quantity)?;

    let root = basename(&value.contract);
    let is_party = |name: &str| name == root || name == actor.code();
    if stat.has(TokenOption::Paused) && !is_party(from) && !is_party(to) {
        return Err(ContractError::TokenPaused);
    }

    let symbol = value.code();
    let key = symbol.to_string();
    let mut is_recall = false;
    let mut is_allowed = false;
    if !actor.has_auth(storage, from) {
        // Allowance is checked before recall. A code holding both an
        // allowance from `from` and the issuer's authority (bancor taking a
        // recallable smart token it issued) spends the allowance, so the
        // holder's balance is debited instead of their deposit.
        if actor.has_auth(storage, to) {
            is_allowed = ALLOWANCES.has(storage, (from, to, key.as_str()));
        }
        if !is_allowed
            && stat.has(TokenOption::Recallable)
            && actor.has_vauth(storage, &value.contract)
        {
            is_recall = true;
        }
        if !is_recall && !is_allowed {
            return Err(ContractError::MissingRequiredAuthority);
        }
    }

    let book = AccountBook::new(
        stat,
        &symbol,
        actor.code(),
        actor.has_vauth(storage, &value.contract),
    );
    let mut res = Response::new().add_attribute("action", "transfer");

    if is_allowed {
        spend_allowance(storage, from, to, &key, &value.quantity)?;
    }

    if !is_recall {
        book.sub_balance(storage, from, &value.quantity, Touch::NONE)?;
    } else {
        let row = book.load(storage, from)?;
        let deposit = row
            .as_ref()
            .and_then(|row| row.deposit.clone())
            .unwrap_or_else(|| Asset::zero(stat.symbol().clone()));

        if deposit.amount >= value.quantity.amount {
            book.sub_deposit(storage, from, &value.quantity, Touch::NONE)?;
        } else {
            // the deposit falls short, so cancel part of the pending withdrawal
            let leftover = value.quantity.checked_sub(&deposit)?;
            let mut req = withdraws()
                .may_load(storage, (from, key.as_str()))?
                .ok_or(ContractError::NoWithdrawRequestToRevert)?;
            if req.quantity.amount < leftover.amount {
                return Err(ContractError::InsufficientWithdrawRequest);
            }
            if req.quantity.amount > leftover.amount {
                req.quantity = req.quantity.checked_sub(&leftover)?;
                withdraws().save(storage, (from, key.as_str()), &req)?;
            } else {
                withdraws().remove(storage, (from, key.as_str()))?;
                res = res.add_events(refresh_schedule(storage, env, actor, from)?);
            }

            book.sub_balance(storage, actor.code(), &leftover, Touch::NONE)?;
            if row.is_some() {
                book.sub_deposit(storage, from, &deposit, Touch::NONE)?;
            }
            res = res.add_event(reverted_event(
                from,
                &ExtendedAsset::new(leftover, value.contract.clone()),
            ));
        }
    }

    book.add_balance(storage, to, &value.quantity, Touch::NONE)?;

    Ok(res.add_attribute("recall", is_recall.to_string()))
}

// ============================================================================
// Burn
// ============================================================================

/// Destroy tokens held by the issuer root or by the token contract.
pub fn execute_burn(
    deps: DepsMut,
    actor: &Actor,
    owner: String,
    value: ExtendedAsset,
    memo: String,
) -> Result<Response, ContractError> {
    check_memo(&memo)?;
    let mut stat = load_stat(deps.storage, &value.code())?;

    let by_issuer =
        owner == basename(&value.contract) && actor.has_vauth(deps.storage, &value.contract);
    let by_contract = owner == actor.code() && actor.has_auth(deps.storage, actor.code());
    if !by_issuer && !by_contract {
        return Err(ContractError::MissingRequiredAuthority);
    }
    check_asset_is_valid(&value, false)?;
    check_symbol(&stat, &value.quantity)?;

    stat.supply = stat.supply.checked_sub(&value.quantity)?;
    stat.max_supply = stat.max_supply.checked_sub(&value.quantity)?;
    save_stat(deps.storage, &stat)?;

    AccountBook::new(&stat, &value.code(), actor.code(), false).sub_balance(
        deps.storage,
        &owner,
        &value.quantity,
        Touch::NONE,
    )?;

    Ok(Response::new()
        .add_attribute("action", "burn")
        .add_attribute("owner", owner)
        .add_attribute("value", value.to_string())
        .add_attribute("max_supply", stat.max_supply.to_string()))
}

// ============================================================================
// Allowances
// ============================================================================

pub fn execute_approve(
    deps: DepsMut,
    actor: &Actor,
    owner: String,
    spender: String,
    value: ExtendedAsset,
    count: Option<u32>,
) -> Result<Response, ContractError> {
    check_asset_is_valid(&value, true)?;
    // `None` is unlimited use; a zero count would never allow a spend
    if count == Some(0) {
        return Err(ContractError::ZeroAllowanceCount);
    }
    actor.require_auth(deps.storage, &owner)?;
    check_account_exists(deps.api, &spender, "spender")?;
    let stat = load_stat(deps.storage, &value.code())?;
    check_symbol(&stat, &value.quantity)?;

    let key = value.code().to_string();
    let map_key = (owner.as_str(), spender.as_str(), key.as_str());
    match ALLOWANCES.may_load(deps.storage, map_key)? {
        None if value.quantity.amount == 0 => return Err(ContractError::AllowanceNotFound),
        Some(_) if value.quantity.amount == 0 => ALLOWANCES.remove(deps.storage, map_key),
        _ => ALLOWANCES.save(
            deps.storage,
            map_key,
            &Allowance {
                quantity: value.quantity.clone(),
                issuer: value.contract.clone(),
                count,
            },
        )?,
    }

    Ok(Response::new()
        .add_attribute("action", "approve")
        .add_attribute("owner", owner)
        .add_attribute("spender", spender)
        .add_attribute("value", value.to_string()))
}

fn spend_allowance(
    storage: &mut dyn Storage,
    owner: &str,
    spender: &str,
    key: &str,
    value: &Asset,
) -> Result<(), ContractError> {
    let mut allowance = ALLOWANCES
        .may_load(storage, (owner, spender, key))?
        .ok_or(ContractError::AllowanceNotFound)?;
    if allowance.quantity.amount < value.amount {
        return Err(ContractError::AllowanceExceeded);
    }
    allowance.quantity = allowance.quantity.checked_sub(value)?;
    if let Some(count) = allowance.count.as_mut() {
        *count = count.saturating_sub(1);
    }

    if allowance.quantity.amount == 0 || allowance.count == Some(0) {
        ALLOWANCES.remove(storage, (owner, spender, key));
    } else {
        ALLOWANCES.save(storage, (owner, spender, key), &allowance)?;
    }
    Ok(())
}
