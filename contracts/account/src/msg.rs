use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// Register or (admin only) change an account's nickname
    #[serde(rename = "setnick")]
    SetNick { name: String, nickname: String },

    /// Flag or unflag a registered account as partner (admin only)
    #[serde(rename = "setpartner")]
    SetPartner { name: String, value: bool },

    /// Link an external service with a service-issued auth token
    Connect {
        name: String,
        service: String,
        auth_token: String,
    },

    /// Sign in to an external service
    Signin {
        name: String,
        service: String,
        auth_token: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(Option<AccountResponse>)]
    Account { name: String },

    #[returns(IsPartnerResponse)]
    IsPartner { name: String },

    #[returns(Option<AccountResponse>)]
    ByNickname { nickname: String },
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
}

#[cw_serde]
pub struct AccountResponse {
    pub name: String,
    pub nickname: String,
    pub is_partner: bool,
}

#[cw_serde]
pub struct IsPartnerResponse {
    pub is_partner: bool,
}
