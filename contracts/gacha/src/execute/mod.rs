//! Execute handlers for the gacha contract.
//!
//! - `scheme` - Opening and closing schemes
//! - `draw` - Draw lifecycle, resolution and the deadline timer

mod draw;
mod scheme;

pub use draw::*;
pub use scheme::*;

use common::{has_vauth, ExtendedAsset};
use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, MessageInfo, StdResult, WasmMsg};
use gxc_token::msg::ExecuteMsg as TokenMsg;

use crate::error::ContractError;

fn require_vauth(info: &MessageInfo, name: &str) -> Result<(), ContractError> {
    if !has_vauth(&info.sender, name) {
        return Err(ContractError::MissingRequiredAuthority);
    }
    Ok(())
}

fn token_transfer(
    token: &Addr,
    from: &str,
    to: &str,
    value: ExtendedAsset,
    memo: &str,
) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&TokenMsg::Transfer {
            from: from.to_string(),
            to: to.to_string(),
            value,
            memo: memo.to_string(),
        })?,
        funds: vec![],
    }))
}
