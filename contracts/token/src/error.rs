//! Error types for the token contract
//!
//! Display strings are stable and asserted on by clients.

use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("missing authority of {account}")]
    MissingAuthority { account: String },

    #[error("missing required authority")]
    MissingRequiredAuthority,

    #[error("`{field}` account does not exist")]
    AccountNotExist { field: String },

    // ========================================================================
    // Asset Errors
    // ========================================================================

    #[error("invalid symbol name `{code}`")]
    InvalidSymbol { code: String },

    #[error("invalid quantity")]
    InvalidQuantity,

    #[error("must be positive quantity")]
    NotPositive,

    #[error("must not be negative quantity")]
    Negative,

    #[error("symbol precision mismatch")]
    SymbolPrecisionMismatch,

    #[error("memo has more than 256 bytes")]
    MemoTooLong,

    // ========================================================================
    // Token Errors
    // ========================================================================

    #[error("token not found")]
    TokenNotFound,

    #[error("not allowed additional mint")]
    AdditionalMintNotAllowed,

    #[error("quantity exceeds available supply")]
    ExceedsAvailableSupply,

    #[error("token is paused")]
    TokenPaused,

    #[error("not supported token")]
    NotSupportedToken,

    #[error("cannot transfer to self")]
    TransferToSelf,

    // ========================================================================
    // Option Errors
    // ========================================================================

    #[error("no changes on options")]
    NoOptionChanges,

    #[error("unknown option `{key}`")]
    UnknownOption { key: String },

    #[error("not allowed to change the option `{key}`")]
    ImmutableOption { key: String },

    #[error("option already has given value")]
    OptionUnchanged,

    #[error("non-recallable token can't have withdraw options")]
    WithdrawOptionsOnNonRecallable,

    #[error("not allowed to set floatable")]
    FloatableNotAllowed,

    #[error("not allowed to set paused")]
    PausedNotAllowed,

    #[error("not allowed to set whitelist")]
    WhitelistNotAllowed,

    #[error("not configured to freeze account")]
    NotFreezable,

    #[error("not configured to whitelist account")]
    NotWhitelistable,

    // ========================================================================
    // Account Errors
    // ========================================================================

    #[error("overdrawn balance")]
    OverdrawnBalance,

    #[error("overdrawn deposit")]
    OverdrawnDeposit,

    #[error("account is frozen")]
    AccountFrozen,

    #[error("not whitelisted account")]
    NotWhitelisted,

    #[error("required to open balance manually")]
    BalanceNotOpened,

    #[error("required to open deposit manually")]
    DepositNotOpened,

    #[error("account balance doesn't exist")]
    AccountBalanceNotFound,

    #[error("cannot close non-zero balance")]
    CloseNonZeroBalance,

    // ========================================================================
    // Withdrawal Errors
    // ========================================================================

    #[error("withdraw amount is too small")]
    WithdrawTooSmall,

    #[error("withdrawal request not found")]
    WithdrawRequestNotFound,

    #[error("withdrawal requests not found")]
    WithdrawRequestsNotFound,

    #[error("overdrawn deposit, but no withdrawal request")]
    NoWithdrawRequestToRevert,

    #[error("overdrawn deposit, but not enough withdrawal requested amount")]
    InsufficientWithdrawRequest,

    // ========================================================================
    // Allowance Errors
    // ========================================================================

    #[error("allowance not found")]
    AllowanceNotFound,

    #[error("try transfering more than allowed")]
    AllowanceExceeded,

    #[error("allowance count must be positive")]
    ZeroAllowanceCount,
}
