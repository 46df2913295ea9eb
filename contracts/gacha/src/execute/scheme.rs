use common::{basename, Asset, ExtendedAsset};
use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, Timestamp};
use gxc_account::msg::{IsPartnerResponse, QueryMsg as AccountQuery};

use crate::drbg::MAX_PRECISION;
use crate::error::ContractError;
use crate::state::{
    Grade, Scheme, SchemeName, CONFIG, DEFAULT_DEADLINE_SEC, DEFAULT_PRECISION, SCHEMES,
};

use super::{require_vauth, token_transfer};

// ============================================================================
// Open
// ============================================================================

#[allow(clippy::too_many_arguments)]
pub fn execute_open(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    scheme: SchemeName,
    grades: Vec<Grade>,
    budget: ExtendedAsset,
    expiration: Timestamp,
    precision: Option<u8>,
    deadline_sec: Option<u64>,
) -> Result<Response, ContractError> {
    require_vauth(&info, &scheme.contract)?;
    let config = CONFIG.load(deps.storage)?;
    let root = basename(&scheme.contract).to_string();

    let partner: IsPartnerResponse = deps.querier.query_wasm_smart(
        &config.account,
        &AccountQuery::IsPartner { name: root.clone() },
    )?;
    if !partner.is_partner {
        return Err(ContractError::NotPartner);
    }

    let key = (scheme.contract.as_str(), scheme.name.as_str());
    if SCHEMES.has(deps.storage, key) {
        return Err(ContractError::ExistingScheme);
    }
    check_grades(&grades, &budget)?;
    let precision = precision.unwrap_or(DEFAULT_PRECISION);
    if precision > MAX_PRECISION {
        return Err(ContractError::PrecisionTooLarge);
    }

    let out_count = vec![0; grades.len()];
    let entry = Scheme {
        contract: scheme.contract.clone(),
        name: scheme.name.clone(),
        grades,
        budget: budget.clone(),
        expiration,
        precision,
        deadline_sec: deadline_sec.unwrap_or(DEFAULT_DEADLINE_SEC),
        out: Asset::zero(budget.quantity.symbol.clone()),
        out_count,
        issued: 0,
        unresolved: 0,
    };
    SCHEMES.save(deps.storage, key, &entry)?;

    let escrow = token_transfer(
        &config.token,
        &root,
        env.contract.address.as_str(),
        budget.clone(),
        "open gacha scheme",
    )?;

    Ok(Response::new()
        .add_message(escrow)
        .add_attribute("action", "open")
        .add_attribute("scheme", scheme.to_string())
        .add_attribute("budget", budget.to_string())
        .add_attribute("expiration", expiration.seconds().to_string()))
}

fn check_grades(grades: &[Grade], budget: &ExtendedAsset) -> Result<(), ContractError> {
    if budget.quantity.amount <= 0 {
        return Err(ContractError::NonPositiveQuantity);
    }
    if grades.is_empty() {
        return Err(ContractError::NoGrades);
    }
    if grades.windows(2).any(|pair| pair[0].score <= pair[1].score) {
        return Err(ContractError::UnsortedGrades);
    }
    for grade in grades {
        if grade.reward.symbol != budget.quantity.symbol {
            return Err(ContractError::RewardSymbolMismatch);
        }
        if grade.reward.amount <= 0 {
            return Err(ContractError::NonPositiveQuantity);
        }
    }
    Ok(())
}

// ============================================================================
// Close
// ============================================================================

pub fn execute_close(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    scheme: SchemeName,
) -> Result<Response, ContractError> {
    require_vauth(&info, &scheme.contract)?;
    let config = CONFIG.load(deps.storage)?;
    let key = (scheme.contract.as_str(), scheme.name.as_str());
    let entry = SCHEMES
        .may_load(deps.storage, key)?
        .ok_or(ContractError::SchemeNotFound)?;

    if entry.expiration >= env.block.time {
        return Err(ContractError::NotExpired);
    }
    if entry.unresolved > 0 {
        return Err(ContractError::UnresolvedRemains);
    }
    SCHEMES.remove(deps.storage, key);

    let refund = entry.budget.quantity.checked_sub(&entry.out)?;
    let mut res = Response::new();
    if refund.amount > 0 {
        res = res.add_message(token_transfer(
            &config.token,
            env.contract.address.as_str(),
            basename(&scheme.contract),
            ExtendedAsset::new(refund.clone(), entry.budget.contract.clone()),
            "close gacha scheme",
        )?);
    }

    Ok(res
        .add_attribute("action", "close")
        .add_attribute("scheme", scheme.to_string())
        .add_attribute("refund", refund.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(reward: &str, score: u32) -> Grade {
        Grade {
            reward: reward.parse().unwrap(),
            score,
            limit: None,
        }
    }

    #[test]
    fn test_check_grades() {
        let budget: ExtendedAsset = "100.00 ENC@eun2ce".parse().unwrap();
        let sorted = vec![grade("50.00 ENC", 200), grade("1.00 ENC", 10)];
        assert!(check_grades(&sorted, &budget).is_ok());

        let ties = vec![grade("50.00 ENC", 10), grade("1.00 ENC", 10)];
        assert_eq!(
            check_grades(&ties, &budget).unwrap_err(),
            ContractError::UnsortedGrades
        );
        assert_eq!(
            check_grades(&[grade("1.000 HOBL", 1)], &budget).unwrap_err(),
            ContractError::RewardSymbolMismatch
        );
        assert_eq!(
            check_grades(&[grade("0.00 ENC", 1)], &budget).unwrap_err(),
            ContractError::NonPositiveQuantity
        );
        assert_eq!(
            check_grades(&[], &budget).unwrap_err(),
            ContractError::NoGrades
        );
    }
}
