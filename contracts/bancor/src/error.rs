use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("missing authority of {account}")]
    MissingAuthority { account: String },

    // ========================================================================
    // Setup Errors
    // ========================================================================

    #[error("contract not initialized")]
    NotInitialized,

    #[error("already initialized")]
    AlreadyInitialized,

    #[error("initialize contract before setting charge")]
    ChargeBeforeInit,

    #[error("initialize contract before setting owner")]
    AdminBeforeInit,

    #[error("existing connector")]
    ExistingConnector,

    #[error("connector not exists")]
    ConnectorNotFound,

    #[error("balance should be paid by connected token")]
    BalanceNotConnected,

    #[error("weight should be in the range of (0, 1]")]
    InvalidWeight,

    #[error("smart token should be issued before connecting")]
    SmartNotIssued,

    #[error("symbol precision mismatch")]
    SymbolPrecisionMismatch,

    #[error("must be positive quantity")]
    NotPositive,

    // ========================================================================
    // Charge Errors
    // ========================================================================

    #[error("represent conversion fee in connected token")]
    FeeNotConnected,

    #[error("rate needs to be in the range of 0-10000 (permyriad)")]
    InvalidRate,

    #[error("no charge policy to be deleted")]
    ChargePolicyNotFound,

    #[error("conversion fee rate is too high")]
    RateTooHigh,

    // ========================================================================
    // Conversion Errors
    // ========================================================================

    #[error("Either `from` or `to` should be positive")]
    AmbiguousConversion,

    #[error("conversion target does not match the connector")]
    TargetMismatch,

    #[error("paid token not enough after charging fee")]
    NotEnoughAfterFee,

    #[error("paid token not enough for conversion")]
    NotEnoughForConversion,

    #[error("connector balance not enough")]
    ConnectorBalanceNotEnough,
}
