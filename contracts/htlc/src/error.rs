use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("missing required authority")]
    MissingRequiredAuthority,

    #[error("invalid recipient")]
    InvalidRecipient,

    #[error("existing contract name")]
    ExistingContract,

    #[error("contract not found")]
    ContractNotFound,

    #[error("must be positive quantity")]
    NonPositiveQuantity,

    #[error("must not be negative quantity")]
    NegativeQuantity,

    #[error("specified amount is not enough")]
    AmountNotEnough,

    #[error("the expiration time should be in the future")]
    TimelockTooSoon,

    #[error("contract is expired")]
    Expired,

    #[error("contract not expired")]
    NotExpired,

    #[error("invalid preimage")]
    InvalidPreimage,
}
