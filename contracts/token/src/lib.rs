//! GXC Token Contract - Fungible Token Engine
//!
//! Tokens are identified by `(issuer, code)` and carry options that decide
//! what their issuer may do with them.
//!
//! # Issuance
//! 1. `Mint` (token contract authority) creates the token or raises its max supply
//! 2. `Transfer` from `gxc.null` issues up to the max supply (issuer root authority)
//! 3. `Transfer` to `gxc.null` retires, `Burn` also lowers the max supply
//!
//! # Recallable Tokens
//! - Tokens issued to holders land in a deposit the issuer may recall
//! - Holders withdraw deposit into balance through a delayed request
//! - Due requests are finalized by a deferred self-call driven by `sudo(Tick)`
//!
//! # Holder Controls
//! - Freezing, whitelisting and pausing per token
//! - Allowances for third-party spending
//! - Code links letting other contracts act for an account

pub mod auth;
pub mod contract;
pub mod error;
mod execute;
mod helpers;
pub mod ledger;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
