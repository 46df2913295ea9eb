//! GXC Account Registry
//!
//! Keeps the profile of an account: a unique nickname and the partner flag
//! other contracts consult before letting an account issue through them.

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
