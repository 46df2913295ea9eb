//! Token lifecycle handlers.
//!
//! This module handles:
//! - Minting (token creation and max supply increase)
//! - Token and holder option changes

use common::{Asset, ExtendedAsset, ExtendedSymbolCode, Opt};
use cosmwasm_std::{DepsMut, Response};

use crate::auth::Actor;
use crate::error::ContractError;
use crate::helpers::{check_asset_is_valid, check_symbol, load_stat, save_stat};
use crate::state::{TokenOption, TokenStat, ACCOUNTS, DEFAULT_WITHDRAW_DELAY_SEC, STATS};

// ============================================================================
// Mint
// ============================================================================

/// Create a token, or raise the max supply of a mintable one.
pub fn execute_mint(
    deps: DepsMut,
    actor: &Actor,
    value: ExtendedAsset,
    opts: Vec<Opt>,
) -> Result<Response, ContractError> {
    actor.require_auth(deps.storage, actor.code())?;
    check_asset_is_valid(&value, false)?;

    let existing = STATS.may_load(deps.storage, (value.contract.as_str(), value.quantity.symbol.code.as_str()))?;
    let init = existing.is_none();
    let stat = match existing {
        None => {
            let mut stat = TokenStat::new(value.quantity.clone(), value.contract.clone());
            apply_opts(&mut stat, &opts, true)?;
            stat
        }
        Some(mut stat) => {
            if !stat.has(TokenOption::Mintable) {
                return Err(ContractError::AdditionalMintNotAllowed);
            }
            check_symbol(&stat, &value.quantity)?;
            stat.max_supply = stat.max_supply.checked_add(&value.quantity)?;
            apply_opts(&mut stat, &opts, false)?;
            stat
        }
    };
    save_stat(deps.storage, &stat)?;

    Ok(Response::new()
        .add_attribute("action", "mint")
        .add_attribute("value", value.to_string())
        .add_attribute("max_supply", stat.max_supply.to_string())
        .add_attribute("created", init.to_string()))
}

// ============================================================================
// Options
// ============================================================================

pub fn execute_set_opts(
    deps: DepsMut,
    actor: &Actor,
    symbol: ExtendedSymbolCode,
    opts: Vec<Opt>,
) -> Result<Response, ContractError> {
    let mut stat = load_stat(deps.storage, &symbol)?;
    if opts.is_empty() {
        return Err(ContractError::NoOptionChanges);
    }
    actor.require_vauth(deps.storage, &stat.issuer)?;

    apply_opts(&mut stat, &opts, false)?;
    save_stat(deps.storage, &stat)?;

    Ok(Response::new()
        .add_attribute("action", "setopts")
        .add_attribute("symbol", symbol.to_string())
        .add_attribute("opts", stat.opts.to_string()))
}

pub fn execute_set_accounts_opts(
    deps: DepsMut,
    actor: &Actor,
    accounts: Vec<String>,
    symbol: ExtendedSymbolCode,
    opts: Vec<Opt>,
) -> Result<Response, ContractError> {
    let stat = load_stat(deps.storage, &symbol)?;
    if opts.is_empty() {
        return Err(ContractError::NoOptionChanges);
    }
    actor.require_vauth(deps.storage, &stat.issuer)?;

    let key = symbol.to_string();
    for owner in &accounts {
        let mut row = ACCOUNTS
            .may_load(deps.storage, (owner.as_str(), key.as_str()))?
            .ok_or(ContractError::AccountBalanceNotFound)?;
        for opt in &opts {
            let flag = match opt.key.as_str() {
                "frozen" => {
                    if !stat.has(TokenOption::Freezable) {
                        return Err(ContractError::NotFreezable);
                    }
                    &mut row.frozen
                }
                "whitelist" => {
                    if !stat.has(TokenOption::Whitelistable) {
                        return Err(ContractError::NotWhitelistable);
                    }
                    &mut row.whitelist
                }
                _ => {
                    return Err(ContractError::UnknownOption {
                        key: opt.key.clone(),
                    })
                }
            };
            let value = opt.as_bool()?;
            if *flag == value {
                return Err(ContractError::OptionUnchanged);
            }
            *flag = value;
        }
        ACCOUNTS.save(deps.storage, (owner.as_str(), key.as_str()), &row)?;
    }

    Ok(Response::new()
        .add_attribute("action", "setacntsopts")
        .add_attribute("symbol", key)
        .add_attribute("accounts", accounts.join(",")))
}

/// Apply `opts` to a token; `init` is set while the token is being created,
/// the only time creation-only options may be given.
pub fn apply_opts(stat: &mut TokenStat, opts: &[Opt], init: bool) -> Result<(), ContractError> {
    for opt in opts {
        if let Some(flag) = TokenOption::from_key(&opt.key) {
            if !init && !flag.is_mutable() {
                return Err(ContractError::ImmutableOption {
                    key: opt.key.clone(),
                });
            }
            stat.set(flag, opt.as_bool()?);
            continue;
        }
        match opt.key.as_str() {
            "withdraw_min_amount" | "withdraw_delay_sec" if !init => {
                return Err(ContractError::ImmutableOption {
                    key: opt.key.clone(),
                });
            }
            "withdraw_min_amount" => {
                let amount = opt.as_i64()?;
                if amount < 0 {
                    return Err(ContractError::Negative);
                }
                stat.withdraw_min_amount = Some(Asset::new(amount, stat.symbol().clone()));
            }
            "withdraw_delay_sec" => {
                stat.withdraw_delay_sec = Some(opt.as_u64()?);
            }
            _ => {
                return Err(ContractError::UnknownOption {
                    key: opt.key.clone(),
                })
            }
        }
    }

    if stat.has(TokenOption::Recallable) {
        let zero = Asset::zero(stat.symbol().clone());
        stat.withdraw_min_amount.get_or_insert(zero);
        stat.withdraw_delay_sec.get_or_insert(DEFAULT_WITHDRAW_DELAY_SEC);
    } else if stat.withdraw_min_amount.is_some() || stat.withdraw_delay_sec.is_some() {
        return Err(ContractError::WithdrawOptionsOnNonRecallable);
    }
    if stat.has(TokenOption::Floatable) && !stat.has(TokenOption::Recallable) {
        return Err(ContractError::FloatableNotAllowed);
    }
    if !init && stat.has(TokenOption::Paused) && !stat.has(TokenOption::Pausable) {
        return Err(ContractError::PausedNotAllowed);
    }
    if stat.has(TokenOption::WhitelistOn) && !stat.has(TokenOption::Whitelistable) {
        return Err(ContractError::WhitelistNotAllowed);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_stat() -> TokenStat {
        TokenStat::new("1000.000 HOBL".parse().unwrap(), "conr2d".to_string())
    }

    #[test]
    fn test_recallable_defaults() {
        let mut stat = new_stat();
        apply_opts(&mut stat, &[], true).unwrap();
        assert_eq!(stat.opts, 0b111);
        assert_eq!(stat.withdraw_min_amount.unwrap().to_string(), "0.000 HOBL");
        assert_eq!(stat.withdraw_delay_sec, Some(86_400));
    }

    #[test]
    fn test_creation_only_options() {
        let mut stat = new_stat();
        apply_opts(&mut stat, &[Opt::flag("recallable", false)], true).unwrap();
        assert_eq!(stat.opts, TokenOption::Mintable.bit() | TokenOption::Freezable.bit());

        assert_eq!(
            apply_opts(&mut stat, &[Opt::flag("mintable", false)], false).unwrap_err(),
            ContractError::ImmutableOption {
                key: "mintable".to_string()
            }
        );
        assert_eq!(
            apply_opts(&mut stat, &[Opt::flag("burnable", true)], true).unwrap_err(),
            ContractError::UnknownOption {
                key: "burnable".to_string()
            }
        );
    }

    #[test]
    fn test_option_constraints() {
        let mut stat = new_stat();
        let err = apply_opts(
            &mut stat,
            &[
                Opt::flag("recallable", false),
                Opt::seconds("withdraw_delay_sec", 10),
            ],
            true,
        )
        .unwrap_err();
        assert_eq!(err, ContractError::WithdrawOptionsOnNonRecallable);

        let mut stat = new_stat();
        let err = apply_opts(
            &mut stat,
            &[Opt::flag("recallable", false), Opt::flag("floatable", true)],
            true,
        )
        .unwrap_err();
        assert_eq!(err, ContractError::FloatableNotAllowed);

        // paused may be set at creation without pausable, but not later
        let mut stat = new_stat();
        apply_opts(&mut stat, &[Opt::flag("paused", true)], true).unwrap();
        assert_eq!(
            apply_opts(&mut stat, &[Opt::flag("paused", true)], false).unwrap_err(),
            ContractError::PausedNotAllowed
        );

        let mut stat = new_stat();
        assert_eq!(
            apply_opts(&mut stat, &[Opt::flag("whitelist_on", true)], true).unwrap_err(),
            ContractError::WhitelistNotAllowed
        );
    }
}
