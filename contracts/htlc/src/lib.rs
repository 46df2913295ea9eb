//! GXC HTLC Contract - Hash Time Locked Transfers
//!
//! Outbound swaps lock tokens for a foreign 20-byte address; revealing the
//! preimage before the timelock retires them here while the other chain pays
//! out. Inbound swaps are opened by the vault for a local account and issue
//! the tokens on withdrawal. Locks that run out refund their owner.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
