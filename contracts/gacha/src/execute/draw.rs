//! Draw lifecycle.
//!
//! A draw is issued with the drawer's seed hash, seeded when its owner
//! reveals the oseed, and resolved either by the drawer revealing the dseed
//! or, once the deadline passes, by a raincheck. One contract-wide timer
//! stays armed for the soonest deadline among seeded draws.

use common::hash::checksum256;
use common::{deferred, has_vauth, sha256, ExtendedAsset};
use cosmwasm_std::{
    CosmosMsg, DepsMut, Env, Event, HexBinary, MessageInfo, Order, Response, StdResult, Storage,
};

use crate::drbg;
use crate::error::ContractError;
use crate::msg::ExecuteMsg;
use crate::state::{
    draws, Config, Draw, Scheme, SchemeName, CONFIG, RESOLVE_SCOPE, RESOLVE_TIMER, SCHEMES,
};

use super::{require_vauth, token_transfer};

/// Token movements and notifications produced by resolving draws
#[derive(Default)]
pub struct Settlement {
    messages: Vec<CosmosMsg>,
    events: Vec<Event>,
}

impl Settlement {
    fn merge(&mut self, other: Settlement) {
        self.messages.extend(other.messages);
        self.events.extend(other.events);
    }

    fn apply(self, res: Response) -> Response {
        res.add_messages(self.messages).add_events(self.events)
    }
}

/// Default draw id: leading 8 bytes of `sha256(contract ‖ name ‖ dseedhash)`.
pub fn draw_id(scheme: &SchemeName, dseedhash: &[u8; 32]) -> u64 {
    let mut data = Vec::with_capacity(scheme.contract.len() + scheme.name.len() + 32);
    data.extend_from_slice(scheme.contract.as_bytes());
    data.extend_from_slice(scheme.name.as_bytes());
    data.extend_from_slice(dseedhash);
    let hash = sha256(&data);
    let mut head = [0u8; 8];
    head.copy_from_slice(&hash[..8]);
    u64::from_be_bytes(head)
}

fn load_scheme(storage: &dyn Storage, scheme: &SchemeName) -> Result<Scheme, ContractError> {
    SCHEMES
        .may_load(storage, (scheme.contract.as_str(), scheme.name.as_str()))?
        .ok_or(ContractError::SchemeNotFound)
}

fn save_scheme(storage: &mut dyn Storage, scheme: &Scheme) -> StdResult<()> {
    SCHEMES.save(storage, (scheme.contract.as_str(), scheme.name.as_str()), scheme)
}

fn load_draw(storage: &dyn Storage, id: u64) -> Result<Draw, ContractError> {
    draws()
        .may_load(storage, id)?
        .ok_or(ContractError::DrawNotFound)
}

// ============================================================================
// Issue & Reveal
// ============================================================================

pub fn execute_issue(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    to: String,
    scheme: SchemeName,
    dseedhash: HexBinary,
    id: Option<u64>,
) -> Result<Response, ContractError> {
    require_vauth(&info, &scheme.contract)?;
    deps.api.addr_validate(&to)?;
    let mut entry = load_scheme(deps.storage, &scheme)?;
    if entry.expiration <= env.block.time {
        return Err(ContractError::SchemeExpired);
    }
    if entry.out.amount >= entry.budget.quantity.amount {
        return Err(ContractError::BudgetExhausted);
    }

    let commitment = checksum256(&dseedhash)?;
    let id = id.unwrap_or_else(|| draw_id(&scheme, &commitment));
    if draws().has(deps.storage, id) {
        return Err(ContractError::ExistingDraw);
    }

    draws().save(
        deps.storage,
        id,
        &Draw {
            id,
            owner: to.clone(),
            scheme: scheme.clone(),
            dseedhash,
            oseed: None,
            deadline: None,
        },
    )?;
    entry.issued += 1;
    save_scheme(deps.storage, &entry)?;

    Ok(Response::new()
        .add_attribute("action", "issue")
        .add_attribute("to", to)
        .add_attribute("scheme", scheme.to_string())
        .add_attribute("id", id.to_string()))
}

pub fn execute_set_oseed(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    id: u64,
    oseed: HexBinary,
) -> Result<Response, ContractError> {
    let mut draw = load_draw(deps.storage, id)?;
    if info.sender.as_str() != draw.owner {
        return Err(ContractError::MissingRequiredAuthority);
    }
    if draw.oseed.is_some() {
        return Err(ContractError::OseedAlreadySet);
    }
    checksum256(&oseed)?;

    let mut entry = load_scheme(deps.storage, &draw.scheme)?;
    let deadline = env.block.time.plus_seconds(entry.deadline_sec);
    draw.oseed = Some(oseed);
    draw.deadline = Some(deadline);
    draws().save(deps.storage, id, &draw)?;
    entry.unresolved += 1;
    save_scheme(deps.storage, &entry)?;

    let config = CONFIG.load(deps.storage)?;
    let settlement = refresh_schedule(deps.storage, &env, &config)?;

    Ok(settlement.apply(
        Response::new()
            .add_attribute("action", "setoseed")
            .add_attribute("id", id.to_string())
            .add_attribute("deadline", deadline.seconds().to_string()),
    ))
}

/// Reveal the drawer's seed. Only the scheme's root (or the contract
/// itself) may resolve a draw early.
pub fn execute_set_dseed(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    id: u64,
    dseed: HexBinary,
) -> Result<Response, ContractError> {
    let draw = load_draw(deps.storage, id)?;
    let is_self = info.sender == env.contract.address;
    if !is_self && !has_vauth(&info.sender, &draw.scheme.contract) {
        return Err(ContractError::MissingRequiredAuthority);
    }
    let dseed = checksum256(&dseed)?;

    let config = CONFIG.load(deps.storage)?;
    let mut settlement = settle(deps.storage, &env, &config, draw, Some(&dseed))?;
    settlement.merge(refresh_schedule(deps.storage, &env, &config)?);

    Ok(settlement.apply(
        Response::new()
            .add_attribute("action", "setdseed")
            .add_attribute("id", id.to_string()),
    ))
}

// ============================================================================
// Resolution
// ============================================================================

/// Score a draw and pay its grade. Without a dseed the draw rainchecks.
fn settle(
    storage: &mut dyn Storage,
    env: &Env,
    config: &Config,
    draw: Draw,
    dseed: Option<&[u8; 32]>,
) -> Result<Settlement, ContractError> {
    let mut scheme = load_scheme(storage, &draw.scheme)?;

    let score = match dseed {
        Some(dseed) => {
            let oseed = draw.oseed.as_ref().ok_or(ContractError::OseedNotSet)?;
            let oseed = checksum256(oseed)?;
            if sha256(dseed) != checksum256(&draw.dseedhash)? {
                return Err(ContractError::HashMismatch);
            }
            Some(drbg::score(dseed, &oseed, scheme.precision))
        }
        None => None,
    };

    let grade = score.and_then(|score| {
        scheme
            .grades
            .iter()
            .zip(&scheme.out_count)
            .position(|(grade, paid)| score >= grade.score && grade.has_room(*paid))
    });
    let score_attr = score.map_or_else(|| "-1".to_string(), |score| score.to_string());

    let mut settlement = Settlement::default();
    match grade {
        Some(index) => {
            let reward = scheme.grades[index].reward.clone();
            scheme.out = scheme.out.checked_add(&reward)?;
            if scheme.out.amount > scheme.budget.quantity.amount {
                return Err(ContractError::BudgetExceeded);
            }
            scheme.out_count[index] += 1;

            let value = ExtendedAsset::new(reward, scheme.budget.contract.clone());
            settlement.events.push(
                Event::new("winreward")
                    .add_attribute("owner", &draw.owner)
                    .add_attribute("id", draw.id.to_string())
                    .add_attribute("score", score_attr)
                    .add_attribute("value", value.to_string()),
            );
            settlement.messages.push(token_transfer(
                &config.token,
                env.contract.address.as_str(),
                &draw.owner,
                value,
                "gacha reward",
            )?);
        }
        None => {
            settlement.events.push(
                Event::new("raincheck")
                    .add_attribute("owner", &draw.owner)
                    .add_attribute("id", draw.id.to_string())
                    .add_attribute("score", score_attr),
            );
        }
    }

    if draw.oseed.is_some() {
        scheme.unresolved = scheme.unresolved.saturating_sub(1);
    }
    save_scheme(storage, &scheme)?;
    draws().remove(storage, draw.id)?;
    Ok(settlement)
}

/// Raincheck every seeded draw whose deadline passed. Runs as the deferred
/// self-call.
pub fn execute_resolve(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    if info.sender != env.contract.address {
        return Err(ContractError::MissingRequiredAuthority);
    }
    let config = CONFIG.load(deps.storage)?;
    let settlement = resolve_due(deps.storage, &env, &config)?;

    Ok(settlement.apply(Response::new().add_attribute("action", "resolve")))
}

/// Fire the resolve call once its timer expired.
pub fn sudo_tick(deps: DepsMut, env: Env) -> Result<Response, ContractError> {
    let due = RESOLVE_TIMER.take_due(deps.storage, env.block.time)?;
    let calls = due
        .iter()
        .map(|_| deferred::fire(&env.contract.address, &ExecuteMsg::Resolve {}))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(Response::new()
        .add_submessages(calls)
        .add_attribute("action", "tick")
        .add_attribute("fired", due.len().to_string()))
}

// ============================================================================
// Scheduling
// ============================================================================

/// Re-arm the timer for the soonest deadline, resolving right away when it
/// already passed.
pub fn refresh_schedule(
    storage: &mut dyn Storage,
    env: &Env,
    config: &Config,
) -> Result<Settlement, ContractError> {
    RESOLVE_TIMER.cancel(storage, RESOLVE_SCOPE)?;
    match next_seeded(storage)?.and_then(|draw| draw.deadline) {
        Some(deadline) if deadline <= env.block.time => resolve_due(storage, env, config),
        Some(deadline) => {
            RESOLVE_TIMER.arm(storage, RESOLVE_SCOPE, deadline)?;
            Ok(Settlement::default())
        }
        None => Ok(Settlement::default()),
    }
}

fn resolve_due(
    storage: &mut dyn Storage,
    env: &Env,
    config: &Config,
) -> Result<Settlement, ContractError> {
    let mut settlement = Settlement::default();
    while let Some(draw) = next_seeded(storage)? {
        if draw.deadline.map_or(true, |deadline| deadline > env.block.time) {
            break;
        }
        settlement.merge(settle(storage, env, config, draw, None)?);
    }

    RESOLVE_TIMER.cancel(storage, RESOLVE_SCOPE)?;
    if let Some(deadline) = next_seeded(storage)?.and_then(|draw| draw.deadline) {
        RESOLVE_TIMER.arm(storage, RESOLVE_SCOPE, deadline)?;
    }
    Ok(settlement)
}

/// Seeded draw with the soonest deadline.
pub fn next_seeded(storage: &dyn Storage) -> StdResult<Option<Draw>> {
    let first = draws()
        .idx
        .deadline
        .range(storage, None, None, Order::Ascending)
        .next()
        .transpose()?;
    Ok(first
        .map(|(_, draw)| draw)
        .filter(|draw| draw.deadline.is_some()))
}
