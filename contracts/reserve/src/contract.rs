//! GXC Reserve Contract - Entry Points and Handlers

use common::{basename, has_vauth, ExtendedAsset, ExtendedSymbolCode, Opt};
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Response,
    StdResult, WasmMsg,
};
use cw2::set_contract_version;
use gxc_account::msg::{IsPartnerResponse, QueryMsg as AccountQueryMsg};
use gxc_token::msg::ExecuteMsg as TokenMsg;

use crate::error::ContractError;
use crate::msg::{
    ConfigResponse, ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, ReserveResponse,
};
use crate::state::{
    Config, Rate, Reserve, ALLOWED_OPTS, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, RESERVES,
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
        account: deps.api.addr_validate(&msg.account)?,
        system_issuer: msg.system_issuer,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("token", config.token)
        .add_attribute("system_issuer", config.system_issuer))
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
        ExecuteMsg::Mint {
            derivative,
            underlying,
            opts,
        } => execute_mint(deps, env, info, derivative, underlying, opts),
        ExecuteMsg::Claim { owner, value } => execute_claim(deps, env, info, owner, value),
    }
}

fn token_msg(config: &Config, msg: &TokenMsg) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.token.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }))
}

fn token_transfer(
    config: &Config,
    from: &str,
    to: &str,
    value: ExtendedAsset,
    memo: &str,
) -> StdResult<CosmosMsg> {
    token_msg(
        config,
        &TokenMsg::Transfer {
            from: from.to_string(),
            to: to.to_string(),
            value,
            memo: memo.to_string(),
        },
    )
}

pub fn execute_mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    derivative: ExtendedAsset,
    underlying: ExtendedAsset,
    opts: Vec<Opt>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let partner = basename(&derivative.contract).to_string();
    if !has_vauth(&info.sender, &derivative.contract) {
        return Err(ContractError::MissingAuthority { account: partner });
    }

    let partner_check: IsPartnerResponse = deps.querier.query_wasm_smart(
        &config.account,
        &AccountQueryMsg::IsPartner {
            name: partner.clone(),
        },
    )?;
    if !partner_check.is_partner {
        return Err(ContractError::NotPartner);
    }

    if let Some(opt) = opts.iter().find(|opt| !ALLOWED_OPTS.contains(&opt.key.as_str())) {
        return Err(ContractError::OptionNotAllowed {
            key: opt.key.clone(),
        });
    }
    if underlying.contract != config.system_issuer {
        return Err(ContractError::NotSystemToken);
    }
    if derivative.quantity.amount <= 0 || underlying.quantity.amount <= 0 {
        return Err(ContractError::InvalidQuantity);
    }

    let key = (
        derivative.contract.as_str(),
        derivative.quantity.symbol.code.as_str(),
    );
    if RESERVES.has(deps.storage, key) {
        return Err(ContractError::AdditionalIssuance);
    }
    let reserve = Reserve {
        derivative: derivative.clone(),
        underlying: underlying.quantity.clone(),
        rate: Rate {
            underlying: underlying.quantity.amount,
            derivative: derivative.quantity.amount,
        },
    };
    RESERVES.save(deps.storage, key, &reserve)?;

    let self_addr = env.contract.address.to_string();
    let messages = vec![
        token_transfer(&config, &partner, &self_addr, underlying.clone(), "deposit in reserve")?,
        token_msg(
            &config,
            &TokenMsg::Mint {
                value: derivative.clone(),
                opts,
            },
        )?,
    ];

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "mint")
        .add_attribute("derivative", derivative.to_string())
        .add_attribute("underlying", underlying.to_string()))
}

pub fn execute_claim(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    owner: String,
    value: ExtendedAsset,
) -> Result<Response, ContractError> {
    if value.quantity.amount <= 0 {
        return Err(ContractError::InvalidQuantity);
    }
    if info.sender.as_str() != owner {
        return Err(ContractError::MissingAuthority { account: owner });
    }

    let config = CONFIG.load(deps.storage)?;
    let key = (value.contract.as_str(), value.quantity.symbol.code.as_str());
    let mut reserve = RESERVES
        .may_load(deps.storage, key)?
        .ok_or(ContractError::ReserveNotFound)?;

    let claimed = reserve
        .underlying
        .with_amount(reserve.rate.underlying_for(value.quantity.amount)?);
    reserve.derivative.quantity = reserve.derivative.quantity.checked_sub(&value.quantity)?;
    reserve.underlying = reserve.underlying.checked_sub(&claimed)?;
    RESERVES.save(deps.storage, key, &reserve)?;

    let self_addr = env.contract.address.to_string();
    let token_addr = config.token.to_string();
    let mut messages = vec![
        token_transfer(&config, &owner, &self_addr, value.clone(), "claim reserve")?,
        token_transfer(&config, &self_addr, &token_addr, value.clone(), "claim reserve")?,
    ];
    if claimed.amount > 0 {
        messages.push(token_transfer(
            &config,
            &self_addr,
            &owner,
            ExtendedAsset::new(claimed.clone(), config.system_issuer.clone()),
            "claim reserve",
        )?);
    }
    messages.push(token_msg(
        &config,
        &TokenMsg::Burn {
            owner: token_addr.clone(),
            value: value.clone(),
            memo: "claim reserve".to_string(),
        },
    )?);

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "claim")
        .add_attribute("owner", owner)
        .add_attribute("value", value.to_string())
        .add_attribute("claimed", claimed.to_string()))
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Reserve { symbol } => to_json_binary(&query_reserve(deps, symbol)?),
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        token: config.token,
        account: config.account,
        system_issuer: config.system_issuer,
    })
}

fn query_reserve(deps: Deps, symbol: ExtendedSymbolCode) -> StdResult<Option<ReserveResponse>> {
    let config = CONFIG.load(deps.storage)?;
    let reserve = RESERVES.may_load(deps.storage, (symbol.contract.as_str(), symbol.code.as_str()))?;
    Ok(reserve.map(|reserve| ReserveResponse {
        derivative: reserve.derivative,
        underlying: ExtendedAsset::new(reserve.underlying, config.system_issuer),
        rate: reserve.rate,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_rounds_down() {
        // 1000.0000 GXC behind 500.00 DRV: 20 atoms per derivative atom
        let rate = Rate {
            underlying: 10_000_000,
            derivative: 50_000,
        };
        assert_eq!(rate.underlying_for(3).unwrap(), 600);

        let rate = Rate {
            underlying: 10,
            derivative: 3,
        };
        assert_eq!(rate.underlying_for(2).unwrap(), 6);
        assert!(rate.beats(6, 2));
        assert!(!rate.beats(7, 2));
    }
}
