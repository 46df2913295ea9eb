use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("missing authority of {account}")]
    MissingAuthority { account: String },

    #[error("only partner account can use reserve")]
    NotPartner,

    #[error("not allowed to set option `{key}`")]
    OptionNotAllowed { key: String },

    #[error("underlying asset should be system token")]
    NotSystemToken,

    #[error("additional issuance not supported yet")]
    AdditionalIssuance,

    #[error("underlying asset not found")]
    ReserveNotFound,

    #[error("invalid quantity")]
    InvalidQuantity,
}
