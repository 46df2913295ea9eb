use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("missing required authority")]
    MissingRequiredAuthority,

    // ========================================================================
    // Scheme Errors
    // ========================================================================

    #[error("only partner account can create scheme")]
    NotPartner,

    #[error("existing scheme name")]
    ExistingScheme,

    #[error("scheme not found")]
    SchemeNotFound,

    #[error("grades should be sorted in descending order by score")]
    UnsortedGrades,

    #[error("at least one grade is required")]
    NoGrades,

    #[error("reward should be paid by budget token")]
    RewardSymbolMismatch,

    #[error("precision cannot exceed 4 bytes")]
    PrecisionTooLarge,

    #[error("must be positive quantity")]
    NonPositiveQuantity,

    #[error("not expired gacha cannot be closed")]
    NotExpired,

    #[error("unresolved gacha remains")]
    UnresolvedRemains,

    #[error("scheme expired")]
    SchemeExpired,

    #[error("budget exhausted")]
    BudgetExhausted,

    #[error("budget exceeded")]
    BudgetExceeded,

    // ========================================================================
    // Draw Errors
    // ========================================================================

    #[error("existing gacha")]
    ExistingDraw,

    #[error("gacha not found")]
    DrawNotFound,

    #[error("oseed is already set")]
    OseedAlreadySet,

    #[error("oseed is not set")]
    OseedNotSet,

    #[error("hash mismatch")]
    HashMismatch,
}
