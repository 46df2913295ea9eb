//! GXC Token Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers
//! - `ledger` - Holder row bookkeeping shared by the handlers

use common::deferred::{self, SudoMsg};
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::auth::Actor;
use crate::error::ContractError;
use crate::execute::{
    execute_approve, execute_burn, execute_clear_withdraws, execute_close, execute_deposit,
    execute_link_code, execute_mint, execute_open, execute_pop_withdraw, execute_push_withdraw,
    execute_set_accounts_opts, execute_set_opts, execute_transfer, execute_unlink_code, sudo_tick,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_account, query_accounts, query_allowance, query_config, query_linked_codes,
    query_schedules, query_stat, query_withdraw_request, query_withdraw_requests,
};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    CONFIG.save(
        deps.storage,
        &Config {
            admin: admin.clone(),
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", admin))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let actor = Actor::new(&info.sender, &env.contract.address, &config.admin);

    match msg {
        // Token lifecycle
        ExecuteMsg::Mint { value, opts } => execute_mint(deps, &actor, value, opts),
        ExecuteMsg::Transfer {
            from,
            to,
            value,
            memo,
        } => execute_transfer(deps, &env, &actor, from, to, value, memo),
        ExecuteMsg::Burn { owner, value, memo } => execute_burn(deps, &actor, owner, value, memo),
        ExecuteMsg::SetOpts { symbol, opts } => execute_set_opts(deps, &actor, symbol, opts),
        ExecuteMsg::SetAccountsOpts {
            accounts,
            symbol,
            opts,
        } => execute_set_accounts_opts(deps, &actor, accounts, symbol, opts),

        // Holder rows
        ExecuteMsg::Open {
            owner,
            symbol,
            payer,
        } => execute_open(deps, &actor, owner, symbol, payer),
        ExecuteMsg::Close { owner, symbol } => execute_close(deps, &actor, owner, symbol),
        ExecuteMsg::Deposit { owner, value } => execute_deposit(deps, &actor, owner, value),
        ExecuteMsg::PushWithdraw { owner, value } => {
            execute_push_withdraw(deps, &env, &actor, owner, value)
        }
        ExecuteMsg::PopWithdraw { owner, symbol } => {
            execute_pop_withdraw(deps, &env, &actor, owner, symbol)
        }
        ExecuteMsg::ClearWithdraws { owner } => execute_clear_withdraws(deps, &env, &actor, owner),
        ExecuteMsg::Approve {
            owner,
            spender,
            value,
            count,
        } => execute_approve(deps, &actor, owner, spender, value, count),

        // Code links
        ExecuteMsg::LinkCode { account, code } => execute_link_code(deps, &actor, account, code),
        ExecuteMsg::UnlinkCode { account, code } => {
            execute_unlink_code(deps, &actor, account, code)
        }
    }
}

// ============================================================================
// Sudo & Reply
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn sudo(deps: DepsMut, env: Env, msg: SudoMsg) -> Result<Response, ContractError> {
    match msg {
        SudoMsg::Tick {} => sudo_tick(deps, env),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    Ok(deferred::handle_reply(msg)?)
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Stat { symbol } => to_json_binary(&query_stat(deps, symbol)?),
        QueryMsg::Account { owner, symbol } => {
            to_json_binary(&query_account(deps, owner, symbol)?)
        }
        QueryMsg::Accounts {
            owner,
            start_after,
            limit,
        } => to_json_binary(&query_accounts(deps, owner, start_after, limit)?),
        QueryMsg::WithdrawRequest { owner, symbol } => {
            to_json_binary(&query_withdraw_request(deps, owner, symbol)?)
        }
        QueryMsg::WithdrawRequests {
            owner,
            start_after,
            limit,
        } => to_json_binary(&query_withdraw_requests(deps, owner, start_after, limit)?),
        QueryMsg::Allowance {
            owner,
            spender,
            symbol,
        } => to_json_binary(&query_allowance(deps, owner, spender, symbol)?),
        QueryMsg::LinkedCodes {
            account,
            start_after,
            limit,
        } => to_json_binary(&query_linked_codes(deps, account, start_after, limit)?),
        QueryMsg::Schedules { start_after, limit } => {
            to_json_binary(&query_schedules(deps, start_after, limit)?)
        }
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
