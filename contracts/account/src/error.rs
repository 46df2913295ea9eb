use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("missing required authority")]
    MissingRequiredAuthority,

    #[error("nickname has invalid length")]
    InvalidNicknameLength,

    #[error("nickname contains invalid character")]
    InvalidNicknameChar,

    #[error("nickname already taken")]
    NicknameTaken,

    #[error("changing nickname not supported yet")]
    NicknameChangeNotSupported,

    #[error("not registered account")]
    NotRegistered,

    #[error("already set given value")]
    AlreadySet,

    #[error("auth token has invalid length")]
    InvalidAuthToken,

    #[error("auth token is expired")]
    AuthTokenExpired,
}
