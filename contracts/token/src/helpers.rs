//! Shared validation used by the execute handlers

use common::name::is_null;
use common::{Asset, ExtendedAsset, ExtendedSymbolCode};
use cosmwasm_std::{Api, Storage};

use crate::error::ContractError;
use crate::state::{TokenStat, STATS};

pub fn load_stat(storage: &dyn Storage, symbol: &ExtendedSymbolCode) -> Result<TokenStat, ContractError> {
    STATS
        .may_load(storage, (symbol.contract.as_str(), symbol.code.as_str()))?
        .ok_or(ContractError::TokenNotFound)
}

pub fn save_stat(storage: &mut dyn Storage, stat: &TokenStat) -> Result<(), ContractError> {
    STATS.save(storage, (stat.issuer.as_str(), stat.symbol().code.as_str()), stat)?;
    Ok(())
}

/// Symbol must be well formed and the amount within range; `zeroable`
/// permits a zero amount.
pub fn check_asset_is_valid(value: &ExtendedAsset, zeroable: bool) -> Result<(), ContractError> {
    let quantity = &value.quantity;
    if !quantity.symbol.is_valid() {
        return Err(ContractError::InvalidSymbol {
            code: quantity.symbol.code.clone(),
        });
    }
    if !quantity.is_amount_within_range() {
        return Err(ContractError::InvalidQuantity);
    }
    if zeroable {
        if quantity.amount < 0 {
            return Err(ContractError::Negative);
        }
    } else if quantity.amount <= 0 {
        return Err(ContractError::NotPositive);
    }
    Ok(())
}

pub fn check_symbol(stat: &TokenStat, value: &Asset) -> Result<(), ContractError> {
    if &value.symbol != stat.symbol() {
        return Err(ContractError::SymbolPrecisionMismatch);
    }
    Ok(())
}

/// Names must belong to an existing account; the null sentinel always does.
pub fn check_account_exists(api: &dyn Api, name: &str, field: &str) -> Result<(), ContractError> {
    if is_null(name) || api.addr_validate(name).is_ok() {
        return Ok(());
    }
    Err(ContractError::AccountNotExist {
        field: field.to_string(),
    })
}
