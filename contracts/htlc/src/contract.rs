//! GXC HTLC Contract - Entry Points and Handlers

use common::hash::checksum256;
use common::{has_vauth, sha256, ExtendedAsset, ExtendedSymbolCode, NULL_ACCOUNT};
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, CosmosMsg, Deps, DepsMut, Env, HexBinary, MessageInfo,
    Response, StdResult, Storage, Timestamp, WasmMsg,
};
use cw2::set_contract_version;
use gxc_token::msg::ExecuteMsg as TokenMsg;

use crate::error::ContractError;
use crate::msg::{
    ConfigResponse, ExecuteMsg, InstantiateMsg, LockResponse, MigrateMsg, QueryMsg,
    TokenConfigResponse,
};
use crate::state::{
    Config, Lock, Recipient, TokenConfig, ADDRESS_BYTES, CONFIG, CONTRACT_NAME,
    CONTRACT_VERSION, DEFAULT_VAULT, LOCKS, TOKEN_CONFIGS,
};

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
        vault: msg.vault.unwrap_or_else(|| DEFAULT_VAULT.to_string()),
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("token", config.token)
        .add_attribute("vault", config.vault))
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
        ExecuteMsg::NewContract {
            owner,
            contract_name,
            recipient,
            value,
            hashlock,
            timelock,
        } => execute_new_contract(
            deps,
            env,
            info,
            owner,
            contract_name,
            recipient,
            value,
            hashlock,
            timelock,
        ),
        ExecuteMsg::Withdraw {
            owner,
            contract_name,
            preimage,
        } => execute_withdraw(deps, env, owner, contract_name, preimage),
        ExecuteMsg::Refund {
            owner,
            contract_name,
        } => execute_refund(deps, env, owner, contract_name),
        ExecuteMsg::SetConfig {
            min_amount,
            min_duration,
        } => execute_set_config(deps, info, min_amount, min_duration),
    }
}

fn token_transfer(
    config: &Config,
    from: &str,
    to: &str,
    value: ExtendedAsset,
    memo: String,
) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.token.to_string(),
        msg: to_json_binary(&TokenMsg::Transfer {
            from: from.to_string(),
            to: to.to_string(),
            value,
            memo,
        })?,
        funds: vec![],
    }))
}

fn memo(verb: &str, party: &str, contract_name: &str) -> String {
    if contract_name.is_empty() {
        format!("htlc {} {}", verb, party)
    } else {
        format!("htlc {} {}: {}", verb, party, contract_name)
    }
}

fn load_lock(storage: &dyn Storage, owner: &str, contract_name: &str) -> Result<Lock, ContractError> {
    LOCKS
        .may_load(storage, (owner, contract_name))?
        .ok_or(ContractError::ContractNotFound)
}

#[allow(clippy::too_many_arguments)]
pub fn execute_new_contract(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    owner: String,
    contract_name: String,
    recipient: Recipient,
    value: ExtendedAsset,
    hashlock: HexBinary,
    timelock: Timestamp,
) -> Result<Response, ContractError> {
    if info.sender.as_str() != owner {
        return Err(ContractError::MissingRequiredAuthority);
    }
    let config = CONFIG.load(deps.storage)?;
    let is_vault = owner == config.vault;

    // only the vault locks for local accounts
    match &recipient {
        Recipient::Name(name) if is_vault => {
            deps.api
                .addr_validate(name)
                .map_err(|_| ContractError::InvalidRecipient)?;
        }
        Recipient::Address(address) if address.len() == ADDRESS_BYTES => {}
        _ => return Err(ContractError::InvalidRecipient),
    }
    checksum256(&hashlock)?;
    if value.quantity.amount <= 0 {
        return Err(ContractError::NonPositiveQuantity);
    }

    let key = (owner.as_str(), contract_name.as_str());
    if LOCKS.has(deps.storage, key) {
        return Err(ContractError::ExistingContract);
    }

    let constraint = if is_vault {
        None
    } else {
        TOKEN_CONFIGS.may_load(
            deps.storage,
            (value.contract.as_str(), value.quantity.symbol.code.as_str()),
        )?
    };
    let (min_amount, min_duration) =
        constraint.map_or((0, 0), |c| (c.min_amount.amount, c.min_duration));
    if value.quantity.amount < min_amount {
        return Err(ContractError::AmountNotEnough);
    }
    if timelock < env.block.time.plus_seconds(min_duration) {
        return Err(ContractError::TimelockTooSoon);
    }

    LOCKS.save(
        deps.storage,
        key,
        &Lock {
            recipient: recipient.clone(),
            value: value.clone(),
            hashlock,
            timelock,
        },
    )?;

    let mut res = Response::new();
    if !is_vault {
        res = res.add_message(token_transfer(
            &config,
            &owner,
            env.contract.address.as_str(),
            value.clone(),
            memo("created by", &owner, &contract_name),
        )?);
    }

    Ok(res
        .add_attribute("action", "newcontract")
        .add_attribute("owner", owner)
        .add_attribute("contract_name", contract_name)
        .add_attribute("recipient", recipient.to_string())
        .add_attribute("value", value.to_string())
        .add_attribute("timelock", timelock.seconds().to_string()))
}

pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    owner: String,
    contract_name: String,
    preimage: HexBinary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let lock = load_lock(deps.storage, &owner, &contract_name)?;
    if lock.timelock < env.block.time {
        return Err(ContractError::Expired);
    }
    let preimage = checksum256(&preimage)?;
    if sha256(&preimage) != checksum256(&lock.hashlock)? {
        return Err(ContractError::InvalidPreimage);
    }
    LOCKS.remove(deps.storage, (owner.as_str(), contract_name.as_str()));

    let note = memo("processed from", &owner, &contract_name);
    let payout = match &lock.recipient {
        Recipient::Name(name) => token_transfer(&config, NULL_ACCOUNT, name, lock.value.clone(), note)?,
        Recipient::Address(_) => token_transfer(
            &config,
            env.contract.address.as_str(),
            NULL_ACCOUNT,
            lock.value.clone(),
            note,
        )?,
    };

    Ok(Response::new()
        .add_message(payout)
        .add_attribute("action", "withdraw")
        .add_attribute("owner", owner)
        .add_attribute("contract_name", contract_name)
        .add_attribute("recipient", lock.recipient.to_string())
        .add_attribute("value", lock.value.to_string()))
}

pub fn execute_refund(
    deps: DepsMut,
    env: Env,
    owner: String,
    contract_name: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let lock = load_lock(deps.storage, &owner, &contract_name)?;
    if lock.timelock >= env.block.time {
        return Err(ContractError::NotExpired);
    }
    LOCKS.remove(deps.storage, (owner.as_str(), contract_name.as_str()));

    // vault locks hold no escrow
    let mut res = Response::new();
    if owner != config.vault {
        res = res.add_message(token_transfer(
            &config,
            env.contract.address.as_str(),
            &owner,
            lock.value.clone(),
            memo("refunded from", &lock.recipient.to_string(), &contract_name),
        )?);
    }

    Ok(res
        .add_attribute("action", "refund")
        .add_attribute("owner", owner)
        .add_attribute("contract_name", contract_name)
        .add_attribute("value", lock.value.to_string()))
}

pub fn execute_set_config(
    deps: DepsMut,
    info: MessageInfo,
    min_amount: ExtendedAsset,
    min_duration: u64,
) -> Result<Response, ContractError> {
    if !has_vauth(&info.sender, &min_amount.contract) {
        return Err(ContractError::MissingRequiredAuthority);
    }
    if min_amount.quantity.amount < 0 {
        return Err(ContractError::NegativeQuantity);
    }

    TOKEN_CONFIGS.save(
        deps.storage,
        (
            min_amount.contract.as_str(),
            min_amount.quantity.symbol.code.as_str(),
        ),
        &TokenConfig {
            min_amount: min_amount.quantity.clone(),
            min_duration,
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "setconfig")
        .add_attribute("min_amount", min_amount.to_string())
        .add_attribute("min_duration", min_duration.to_string()))
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Lock {
            owner,
            contract_name,
        } => to_json_binary(&query_lock(deps, owner, contract_name)?),
        QueryMsg::TokenConfig { symbol } => to_json_binary(&query_token_config(deps, symbol)?),
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        token: config.token,
        vault: config.vault,
    })
}

fn query_lock(deps: Deps, owner: String, contract_name: String) -> StdResult<Option<LockResponse>> {
    let lock = LOCKS.may_load(deps.storage, (owner.as_str(), contract_name.as_str()))?;
    Ok(lock.map(|lock| LockResponse {
        owner,
        contract_name,
        recipient: lock.recipient,
        value: lock.value,
        hashlock: lock.hashlock,
        timelock: lock.timelock,
    }))
}

fn query_token_config(
    deps: Deps,
    symbol: ExtendedSymbolCode,
) -> StdResult<Option<TokenConfigResponse>> {
    let config = TOKEN_CONFIGS.may_load(deps.storage, (symbol.contract.as_str(), symbol.code.as_str()))?;
    Ok(config.map(|config| TokenConfigResponse {
        min_amount: ExtendedAsset::new(config.min_amount, symbol.contract),
        min_duration: config.min_duration,
    }))
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
