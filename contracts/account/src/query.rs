use cosmwasm_std::{Deps, StdResult};

use crate::msg::{AccountResponse, ConfigResponse, IsPartnerResponse};
use crate::state::{accounts, AccountInfo, CONFIG};

fn to_response(info: AccountInfo) -> AccountResponse {
    AccountResponse {
        name: info.name,
        nickname: info.nickname,
        is_partner: info.is_partner,
    }
}

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
    })
}

pub fn query_account(deps: Deps, name: String) -> StdResult<Option<AccountResponse>> {
    Ok(accounts().may_load(deps.storage, &name)?.map(to_response))
}

pub fn query_is_partner(deps: Deps, name: String) -> StdResult<IsPartnerResponse> {
    let is_partner = accounts()
        .may_load(deps.storage, &name)?
        .map_or(false, |info| info.is_partner);
    Ok(IsPartnerResponse { is_partner })
}

pub fn query_by_nickname(deps: Deps, nickname: String) -> StdResult<Option<AccountResponse>> {
    let found = accounts().idx.nickname.item(deps.storage, nickname)?;
    Ok(found.map(|(_, info)| to_response(info)))
}
