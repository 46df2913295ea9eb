//! GXC Gacha Contract - Entry Points

use common::{deferred, SudoMsg};
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_close, execute_issue, execute_open, execute_resolve, execute_set_dseed,
    execute_set_oseed, sudo_tick,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_draw, query_draws_by_owner, query_schedule, query_scheme,
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

    let config = Config {
        token: deps.api.addr_validate(&msg.token)?,
        account: deps.api.addr_validate(&msg.account)?,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("token", config.token)
        .add_attribute("account", config.account))
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
    match msg {
        ExecuteMsg::Open {
            scheme,
            grades,
            budget,
            expiration,
            precision,
            deadline_sec,
        } => execute_open(
            deps,
            env,
            info,
            scheme,
            grades,
            budget,
            expiration,
            precision,
            deadline_sec,
        ),
        ExecuteMsg::Close { scheme } => execute_close(deps, env, info, scheme),
        ExecuteMsg::Issue {
            to,
            scheme,
            dseedhash,
            id,
        } => execute_issue(deps, env, info, to, scheme, dseedhash, id),
        ExecuteMsg::SetOseed { id, oseed } => execute_set_oseed(deps, env, info, id, oseed),
        ExecuteMsg::SetDseed { id, dseed } => execute_set_dseed(deps, env, info, id, dseed),
        ExecuteMsg::Resolve {} => execute_resolve(deps, env, info),
    }
}

// ============================================================================
// Sudo & Reply
// ============================================================================

/// Chain hook driving the deadline timer
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
        QueryMsg::Scheme { scheme } => to_json_binary(&query_scheme(deps, scheme)?),
        QueryMsg::Draw { id } => to_json_binary(&query_draw(deps, id)?),
        QueryMsg::DrawsByOwner {
            owner,
            start_after,
            limit,
        } => to_json_binary(&query_draws_by_owner(deps, owner, start_after, limit)?),
        QueryMsg::Schedule {} => to_json_binary(&query_schedule(deps)?),
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
