//! Execute handlers for the account registry

use cosmwasm_std::{DepsMut, Env, MessageInfo, Response};

use crate::error::ContractError;
use crate::state::{accounts, AccountInfo, CONFIG, MAX_NICKNAME_LEN, MIN_NICKNAME_LEN};

/// Latin letters, digits and Hangul syllables.
pub fn is_valid_nickname(nickname: &str) -> bool {
    !nickname.is_empty()
        && nickname
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ('\u{AC00}'..='\u{D7AF}').contains(&c))
}

pub fn execute_set_nick(
    deps: DepsMut,
    info: MessageInfo,
    name: String,
    nickname: String,
) -> Result<Response, ContractError> {
    if nickname.len() < MIN_NICKNAME_LEN || nickname.len() > MAX_NICKNAME_LEN {
        return Err(ContractError::InvalidNicknameLength);
    }
    if !is_valid_nickname(&nickname) {
        return Err(ContractError::InvalidNicknameChar);
    }

    let config = CONFIG.load(deps.storage)?;
    let by_admin = info.sender == config.admin;
    if !by_admin && info.sender.as_str() != name {
        return Err(ContractError::MissingRequiredAuthority);
    }

    let taken = accounts()
        .idx
        .nickname
        .item(deps.storage, nickname.clone())?
        .is_some();
    if taken {
        return Err(ContractError::NicknameTaken);
    }

    let info = match accounts().may_load(deps.storage, &name)? {
        None => AccountInfo {
            name: name.clone(),
            nickname: nickname.clone(),
            is_partner: false,
        },
        Some(existing) => {
            if !by_admin {
                return Err(ContractError::NicknameChangeNotSupported);
            }
            AccountInfo {
                nickname: nickname.clone(),
                ..existing
            }
        }
    };
    accounts().save(deps.storage, &name, &info)?;

    Ok(Response::new()
        .add_attribute("action", "setnick")
        .add_attribute("name", name)
        .add_attribute("nickname", nickname))
}

pub fn execute_set_partner(
    deps: DepsMut,
    info: MessageInfo,
    name: String,
    value: bool,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::MissingRequiredAuthority);
    }

    let mut account = accounts()
        .may_load(deps.storage, &name)?
        .ok_or(ContractError::NotRegistered)?;
    if account.is_partner == value {
        return Err(ContractError::AlreadySet);
    }
    account.is_partner = value;
    accounts().save(deps.storage, &name, &account)?;

    Ok(Response::new()
        .add_attribute("action", "setpartner")
        .add_attribute("name", name)
        .add_attribute("is_partner", value.to_string()))
}

/// Check a service auth token: 16 characters whose last 8 are the hex
/// expiry time in seconds.
pub fn authenticate(
    env: &Env,
    info: &MessageInfo,
    name: &str,
    auth_token: &str,
) -> Result<(), ContractError> {
    if auth_token.len() != 16 || !auth_token.is_char_boundary(8) {
        return Err(ContractError::InvalidAuthToken);
    }
    if info.sender.as_str() != name {
        return Err(ContractError::MissingRequiredAuthority);
    }

    let expiration = hex::decode(&auth_token[8..])
        .ok()
        .and_then(|raw| <[u8; 4]>::try_from(raw).ok())
        .map_or(0, u32::from_be_bytes);
    if env.block.time.seconds() > u64::from(expiration) {
        return Err(ContractError::AuthTokenExpired);
    }
    Ok(())
}

pub fn execute_connect(
    env: Env,
    info: MessageInfo,
    name: String,
    service: String,
    auth_token: String,
    action: &str,
) -> Result<Response, ContractError> {
    authenticate(&env, &info, &name, &auth_token)?;

    Ok(Response::new()
        .add_attribute("action", action)
        .add_attribute("name", name)
        .add_attribute("service", service))
}
