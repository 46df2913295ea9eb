//! GXC Reserve Contract
//!
//! A partner escrows system tokens here and gets a derivative token minted
//! against them. Holders of the derivative can claim the escrow back at the
//! rate fixed at issuance; claimed derivative tokens are burned.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
