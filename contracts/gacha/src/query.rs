//! Query handlers for the gacha contract

use cosmwasm_std::{Deps, Order, StdResult};
use cw_storage_plus::Bound;

use crate::execute::next_seeded;
use crate::msg::{
    ConfigResponse, DrawResponse, DrawsResponse, ScheduleResponse, SchemeResponse,
};
use crate::state::{draws, Draw, SchemeName, CONFIG, RESOLVE_SCOPE, RESOLVE_TIMER, SCHEMES};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        token: config.token,
        account: config.account,
    })
}

pub fn query_scheme(deps: Deps, scheme: SchemeName) -> StdResult<Option<SchemeResponse>> {
    let entry = SCHEMES.may_load(deps.storage, (scheme.contract.as_str(), scheme.name.as_str()))?;
    Ok(entry.map(|entry| SchemeResponse {
        scheme: entry.id(),
        grades: entry.grades,
        budget: entry.budget,
        expiration: entry.expiration,
        precision: entry.precision,
        deadline_sec: entry.deadline_sec,
        out: entry.out,
        out_count: entry.out_count,
        issued: entry.issued,
        unresolved: entry.unresolved,
    }))
}

pub fn query_draw(deps: Deps, id: u64) -> StdResult<Option<DrawResponse>> {
    Ok(draws().may_load(deps.storage, id)?.map(to_response))
}

/// Draws of `owner`, paginated by id.
pub fn query_draws_by_owner(
    deps: Deps,
    owner: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<DrawsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let draws = draws()
        .idx
        .owner
        .prefix(owner)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, draw)| to_response(draw)))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(DrawsResponse { draws })
}

pub fn query_schedule(deps: Deps) -> StdResult<ScheduleResponse> {
    Ok(ScheduleResponse {
        due: RESOLVE_TIMER.due_at(deps.storage, RESOLVE_SCOPE)?,
        next_deadline: next_seeded(deps.storage)?
            .and_then(|draw| draw.deadline)
            .map(|deadline| deadline.seconds()),
    })
}

fn to_response(draw: Draw) -> DrawResponse {
    DrawResponse {
        id: draw.id,
        owner: draw.owner,
        scheme: draw.scheme,
        dseedhash: draw.dseedhash,
        oseed: draw.oseed,
        deadline: draw.deadline,
    }
}
