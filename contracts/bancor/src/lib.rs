//! GXC Bancor Contract - Bonding Curve Market
//!
//! Every smart token gets a connector pool holding the connected token. The
//! price follows `S * ((1 + dC / C)^w - 1)` for buys and its inverse for
//! sells, where `w` is the connector weight.
//!
//! # Setup
//! 1. Instantiate with the token engine (and optionally the reserve)
//! 2. `Init` sets the market admin and the connected token
//! 3. The smart token issuer links this contract to its root account
//! 4. `Connect` seeds a pool from the admin's balance
//!
//! # Conversions
//! Holders approve this contract for what they pay and call `Convert`.
//! Conversion fees go to the admin; `SetCharge` tunes them per smart token.

pub mod contract;
pub mod error;
mod execute;
pub mod fee;
pub mod math;
pub mod msg;
mod query;
pub mod quote;
pub mod state;

pub use crate::error::ContractError;
