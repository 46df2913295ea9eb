//! Conversion handler
//!
//! The contract escrows what the sender pays, then settles through the token
//! engine:
//!
//! - buy: fee to the admin, smart tokens issued to the issuer root and
//!   handed to the sender (the root must have linked this contract)
//! - sell: smart tokens retired, or redeemed at the reserve when priced by
//!   the reserve rate, then payout and fee

use common::{basename, ExtendedAsset, NULL_ACCOUNT};
use cosmwasm_std::{DepsMut, Env, MessageInfo, Response};
use gxc_reserve::msg::ExecuteMsg as ReserveMsg;
use gxc_token::msg::ExecuteMsg as TokenMsg;

use crate::error::ContractError;
use crate::quote::{quote, Side};
use crate::state::{CONFIG, CONNECTORS, MARKET};

use super::{token_transfer, wasm_execute};

const MEMO: &str = "bancor conversion";
const FEE_MEMO: &str = "conversion fee";

pub fn execute_convert(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    sender: String,
    from: ExtendedAsset,
    to: ExtendedAsset,
) -> Result<Response, ContractError> {
    if info.sender.as_str() != sender {
        return Err(ContractError::MissingAuthority { account: sender });
    }
    let config = CONFIG.load(deps.storage)?;
    let market = MARKET
        .may_load(deps.storage)?
        .ok_or(ContractError::NotInitialized)?;

    let quote = quote(deps.as_ref(), &config, &market, &from, &to)?;
    let smart = &quote.connector.smart;
    CONNECTORS.save(
        deps.storage,
        (smart.contract.as_str(), smart.symbol.code.as_str()),
        &quote.connector,
    )?;

    let token = &config.token;
    let this = env.contract.address.as_str();
    let mut messages = vec![token_transfer(token, &sender, this, &quote.pay, MEMO)?];

    match quote.side {
        Side::Buy => {
            if quote.fee.quantity.amount > 0 {
                messages.push(token_transfer(token, this, &market.admin, &quote.fee, FEE_MEMO)?);
            }
            let root = basename(&quote.receive.contract);
            messages.push(token_transfer(token, NULL_ACCOUNT, root, &quote.receive, MEMO)?);
            messages.push(token_transfer(token, root, &sender, &quote.receive, MEMO)?);
        }
        Side::Sell => {
            match (&config.reserve, quote.redeems_at_reserve()) {
                (Some(reserve), true) => {
                    messages.push(wasm_execute(
                        token,
                        &TokenMsg::Approve {
                            owner: this.to_string(),
                            spender: reserve.to_string(),
                            value: quote.pay.clone(),
                            count: None,
                        },
                    )?);
                    messages.push(wasm_execute(
                        reserve,
                        &ReserveMsg::Claim {
                            owner: this.to_string(),
                            value: quote.pay.clone(),
                        },
                    )?);
                }
                _ => messages.push(token_transfer(token, this, NULL_ACCOUNT, &quote.pay, MEMO)?),
            }
            messages.push(token_transfer(token, this, &sender, &quote.receive, MEMO)?);
            if quote.fee.quantity.amount > 0 {
                messages.push(token_transfer(token, this, &market.admin, &quote.fee, FEE_MEMO)?);
            }
        }
    }

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "convert")
        .add_attribute("sender", sender)
        .add_attribute("pay", quote.pay.to_string())
        .add_attribute("receive", quote.receive.to_string())
        .add_attribute("fee", quote.fee.to_string())
        .add_attribute("via_reserve", quote.via_reserve.to_string())
        .add_attribute("balance", quote.connector.balance.to_string()))
}
