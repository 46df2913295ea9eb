//! Query handlers for the bancor contract.

use common::{ExtendedAsset, ExtendedSymbolCode};
use cosmwasm_std::{Deps, Order, StdError, StdResult};
use cw_storage_plus::Bound;

use crate::fee::CHARGES;
use crate::msg::{
    ChargePolicyResponse, ConfigResponse, ConnectorResponse, ConnectorsResponse, SimulateResponse,
};
use crate::quote::quote;
use crate::state::{Connector, CONFIG, CONNECTORS, MARKET};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    let market = MARKET.may_load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        token: config.token,
        reserve: config.reserve,
        admin: market.as_ref().map(|market| market.admin.clone()),
        connected: market.as_ref().map(|market| market.connected.clone()),
        charge: market.map(|market| market.charge),
    })
}

fn connector_response(connector: Connector, deps: Deps) -> StdResult<ConnectorResponse> {
    let market = MARKET.load(deps.storage)?;
    Ok(ConnectorResponse {
        smart: connector.smart,
        balance: ExtendedAsset::new(connector.balance, market.connected.contract),
        weight: connector.weight,
    })
}

pub fn query_connector(deps: Deps, smart: ExtendedSymbolCode) -> StdResult<Option<ConnectorResponse>> {
    CONNECTORS
        .may_load(deps.storage, (smart.contract.as_str(), smart.code.as_str()))?
        .map(|connector| connector_response(connector, deps))
        .transpose()
}

/// Pools ordered by smart issuer and code, one page after `start_after`.
pub fn query_connectors(
    deps: Deps,
    start_after: Option<ExtendedSymbolCode>,
    limit: Option<u32>,
) -> StdResult<ConnectorsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after
        .as_ref()
        .map(|smart| Bound::exclusive((smart.contract.as_str(), smart.code.as_str())));
    let connectors = CONNECTORS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.and_then(|(_, connector)| connector_response(connector, deps)))
        .collect::<StdResult<Vec<_>>>()?;
    Ok(ConnectorsResponse { connectors })
}

pub fn query_charge_policy(
    deps: Deps,
    smart: ExtendedSymbolCode,
) -> StdResult<Option<ChargePolicyResponse>> {
    let policy = CHARGES.may_load(deps.storage, (smart.contract.as_str(), smart.code.as_str()))?;
    Ok(policy.map(|policy| ChargePolicyResponse {
        smart: policy.smart,
        charge: policy.charge,
    }))
}

pub fn query_simulate(deps: Deps, from: ExtendedAsset, to: ExtendedAsset) -> StdResult<SimulateResponse> {
    let config = CONFIG.load(deps.storage)?;
    let market = MARKET
        .may_load(deps.storage)?
        .ok_or_else(|| StdError::generic_err("contract not initialized"))?;
    let quote = quote(deps, &config, &market, &from, &to)
        .map_err(|err| StdError::generic_err(err.to_string()))?;

    Ok(SimulateResponse {
        pay: quote.pay,
        receive: quote.receive,
        fee: quote.fee,
        via_reserve: quote.via_reserve,
    })
}
