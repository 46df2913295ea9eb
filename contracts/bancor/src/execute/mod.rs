//! Execute handlers for the bancor contract.
//!
//! - `admin` - Market setup, connectors and charges
//! - `convert` - Conversions between the connected token and smart tokens

mod admin;
mod convert;

pub use admin::*;
pub use convert::*;

use common::ExtendedAsset;
use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, StdResult, WasmMsg};
use gxc_token::msg::ExecuteMsg as TokenMsg;

fn wasm_execute<T: serde::Serialize>(contract: &Addr, msg: &T) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: contract.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }))
}

fn token_transfer(
    token: &Addr,
    from: &str,
    to: &str,
    value: &ExtendedAsset,
    memo: &str,
) -> StdResult<CosmosMsg> {
    wasm_execute(
        token,
        &TokenMsg::Transfer {
            from: from.to_string(),
            to: to.to_string(),
            value: value.clone(),
            memo: memo.to_string(),
        },
    )
}
