//! Holder row and code link handlers.

use common::ExtendedSymbolCode;
use cosmwasm_std::{DepsMut, Response};

use crate::auth::Actor;
use crate::error::ContractError;
use crate::helpers::{check_account_exists, load_stat};
use crate::ledger::AccountBook;
use crate::state::{TokenOption, ACCOUNTS, LINKED_CODES};

// ============================================================================
// Open / Close
// ============================================================================

/// Create an empty row for `owner`, paid for by `payer` (the owner when
/// unset). Opening an existing row is a no-op.
pub fn execute_open(
    deps: DepsMut,
    actor: &Actor,
    owner: String,
    symbol: ExtendedSymbolCode,
    payer: Option<String>,
) -> Result<Response, ContractError> {
    let stat = load_stat(deps.storage, &symbol)?;
    check_account_exists(deps.api, &owner, "owner")?;
    let payer = payer.unwrap_or_else(|| owner.clone());
    actor.require_auth(deps.storage, &payer)?;

    let book = AccountBook::new(&stat, &symbol, actor.code(), false);
    let created = book.load(deps.storage, &owner)?.is_none();
    if created {
        let mut row = book.new_row();
        row.whitelist = stat.has(TokenOption::Whitelistable)
            && (actor.has_vauth(deps.storage, &stat.issuer) || owner == actor.code());
        ACCOUNTS.save(
            deps.storage,
            (owner.as_str(), symbol.to_string().as_str()),
            &row,
        )?;
    }

    Ok(Response::new()
        .add_attribute("action", "open")
        .add_attribute("owner", owner)
        .add_attribute("symbol", symbol.to_string())
        .add_attribute("created", created.to_string()))
}

pub fn execute_close(
    deps: DepsMut,
    actor: &Actor,
    owner: String,
    symbol: ExtendedSymbolCode,
) -> Result<Response, ContractError> {
    actor.require_auth(deps.storage, &owner)?;
    let key = symbol.to_string();
    let row = ACCOUNTS
        .may_load(deps.storage, (owner.as_str(), key.as_str()))?
        .ok_or(ContractError::AccountBalanceNotFound)?;
    let empty_deposit = row.deposit.as_ref().map_or(true, |d| d.amount == 0);
    if row.balance.amount != 0 || !empty_deposit {
        return Err(ContractError::CloseNonZeroBalance);
    }
    ACCOUNTS.remove(deps.storage, (owner.as_str(), key.as_str()));

    Ok(Response::new()
        .add_attribute("action", "close")
        .add_attribute("owner", owner)
        .add_attribute("symbol", key))
}

// ============================================================================
// Code Links
// ============================================================================

/// Let contract `code` act with `account`'s authority.
pub fn execute_link_code(
    deps: DepsMut,
    actor: &Actor,
    account: String,
    code: String,
) -> Result<Response, ContractError> {
    actor.require_direct_auth(&account)?;
    let code = deps.api.addr_validate(&code)?;
    LINKED_CODES.save(deps.storage, (account.as_str(), code.as_str()), &true)?;

    Ok(Response::new()
        .add_attribute("action", "link_code")
        .add_attribute("account", account)
        .add_attribute("code", code))
}

pub fn execute_unlink_code(
    deps: DepsMut,
    actor: &Actor,
    account: String,
    code: String,
) -> Result<Response, ContractError> {
    actor.require_direct_auth(&account)?;
    LINKED_CODES.remove(deps.storage, (account.as_str(), code.as_str()));

    Ok(Response::new()
        .add_attribute("action", "unlink_code")
        .add_attribute("account", account)
        .add_attribute("code", code))
}
