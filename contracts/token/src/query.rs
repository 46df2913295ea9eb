//! Query handlers for the token contract.

use common::ExtendedSymbolCode;
use cosmwasm_std::{Deps, Order, StdResult};
use cw_storage_plus::Bound;

use crate::helpers::load_stat;
use crate::msg::{
    AccountResponse, AccountsResponse, AllowanceResponse, ConfigResponse, LinkedCodesResponse,
    ScheduleEntry, SchedulesResponse, StatResponse, WithdrawResponse, WithdrawsResponse,
};
use crate::state::{
    withdraws, TokenAccount, WithdrawRequest, ACCOUNTS, ALLOWANCES, CONFIG, LINKED_CODES,
    WITHDRAW_TIMERS,
};

// Pagination defaults
const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

fn clamp(limit: Option<u32>) -> usize {
    limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize
}

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
    })
}

pub fn query_stat(deps: Deps, symbol: ExtendedSymbolCode) -> StdResult<StatResponse> {
    let stat = load_stat(deps.storage, &symbol)
        .map_err(|err| cosmwasm_std::StdError::not_found(err.to_string()))?;
    Ok(StatResponse {
        supply: stat.supply,
        max_supply: stat.max_supply,
        issuer: stat.issuer,
        opts: stat.opts,
        withdraw_min_amount: stat.withdraw_min_amount,
        withdraw_delay_sec: stat.withdraw_delay_sec,
    })
}

fn account_response(owner: String, symbol: ExtendedSymbolCode, row: TokenAccount) -> AccountResponse {
    AccountResponse {
        owner,
        symbol,
        balance: row.balance,
        deposit: row.deposit,
        frozen: row.frozen,
        whitelist: row.whitelist,
    }
}

pub fn query_account(
    deps: Deps,
    owner: String,
    symbol: ExtendedSymbolCode,
) -> StdResult<Option<AccountResponse>> {
    let row = ACCOUNTS.may_load(deps.storage, (owner.as_str(), symbol.to_string().as_str()))?;
    Ok(row.map(|row| account_response(owner, symbol, row)))
}

/// Rows held by `owner`, paginated by symbol.
pub fn query_accounts(
    deps: Deps,
    owner: String,
    start_after: Option<ExtendedSymbolCode>,
    limit: Option<u32>,
) -> StdResult<AccountsResponse> {
    let start_key = start_after.map(|symbol| symbol.to_string());
    let start = start_key.as_deref().map(Bound::exclusive);
    let accounts = ACCOUNTS
        .prefix(owner.as_str())
        .range(deps.storage, start, None, Order::Ascending)
        .take(clamp(limit))
        .map(|item| {
            let (key, row) = item?;
            Ok(account_response(owner.clone(), key.parse()?, row))
        })
        .collect::<StdResult<Vec<_>>>()?;
    Ok(AccountsResponse { accounts })
}

fn withdraw_response(req: WithdrawRequest) -> WithdrawResponse {
    WithdrawResponse {
        symbol: ExtendedSymbolCode::new(req.quantity.symbol.code.clone(), req.issuer),
        owner: req.owner,
        quantity: req.quantity,
        scheduled_time: req.scheduled_time,
    }
}

pub fn query_withdraw_request(
    deps: Deps,
    owner: String,
    symbol: ExtendedSymbolCode,
) -> StdResult<Option<WithdrawResponse>> {
    let req = withdraws().may_load(deps.storage, (owner.as_str(), symbol.to_string().as_str()))?;
    Ok(req.map(withdraw_response))
}

/// Requests of `owner`, paginated by symbol.
pub fn query_withdraw_requests(
    deps: Deps,
    owner: String,
    start_after: Option<ExtendedSymbolCode>,
    limit: Option<u32>,
) -> StdResult<WithdrawsResponse> {
    let start_key = start_after.map(|symbol| symbol.to_string());
    let start = start_key.as_deref().map(Bound::exclusive);
    let requests = withdraws()
        .prefix(owner.as_str())
        .range(deps.storage, start, None, Order::Ascending)
        .take(clamp(limit))
        .map(|item| item.map(|(_, req)| withdraw_response(req)))
        .collect::<StdResult<Vec<_>>>()?;
    Ok(WithdrawsResponse { requests })
}

pub fn query_allowance(
    deps: Deps,
    owner: String,
    spender: String,
    symbol: ExtendedSymbolCode,
) -> StdResult<Option<AllowanceResponse>> {
    let key = symbol.to_string();
    let allowance = ALLOWANCES.may_load(
        deps.storage,
        (owner.as_str(), spender.as_str(), key.as_str()),
    )?;
    Ok(allowance.map(|allowance| AllowanceResponse {
        owner,
        spender,
        symbol,
        quantity: allowance.quantity,
        count: allowance.count,
    }))
}

pub fn query_linked_codes(
    deps: Deps,
    account: String,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<LinkedCodesResponse> {
    let start = start_after.as_deref().map(Bound::exclusive);
    let codes = LINKED_CODES
        .prefix(account.as_str())
        .keys(deps.storage, start, None, Order::Ascending)
        .take(clamp(limit))
        .collect::<StdResult<Vec<_>>>()?;
    Ok(LinkedCodesResponse { account, codes })
}

/// Armed finalize timers, paginated by owner.
pub fn query_schedules(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<SchedulesResponse> {
    let schedules = WITHDRAW_TIMERS
        .pending(deps.storage, start_after.as_deref(), clamp(limit))?
        .into_iter()
        .map(|(owner, due)| ScheduleEntry { owner, due })
        .collect();
    Ok(SchedulesResponse { schedules })
}
