//! GXC Bancor Contract - Entry Points

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_connect, execute_convert, execute_init, execute_set_admin, execute_set_charge,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_charge_policy, query_config, query_connector, query_connectors, query_simulate,
};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        owner: info.sender,
        token: deps.api.addr_validate(&msg.token)?,
        reserve: msg
            .reserve
            .map(|reserve| deps.api.addr_validate(&reserve))
            .transpose()?,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner)
        .add_attribute("token", config.token))
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
        ExecuteMsg::Convert { sender, from, to } => execute_convert(deps, env, info, sender, from, to),
        ExecuteMsg::Init { admin, connected } => execute_init(deps, info, admin, connected),
        ExecuteMsg::Connect {
            smart,
            balance,
            weight,
        } => execute_connect(deps, env, info, smart, balance, weight),
        ExecuteMsg::SetCharge { rate, fixed, smart } => {
            execute_set_charge(deps, info, rate, fixed, smart)
        }
        ExecuteMsg::SetAdmin { admin } => execute_set_admin(deps, info, admin),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Connector { smart } => to_json_binary(&query_connector(deps, smart)?),
        QueryMsg::Connectors { start_after, limit } => {
            to_json_binary(&query_connectors(deps, start_after, limit)?)
        }
        QueryMsg::ChargePolicy { smart } => to_json_binary(&query_charge_policy(deps, smart)?),
        QueryMsg::Simulate { from, to } => to_json_binary(&query_simulate(deps, from, to)?),
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
