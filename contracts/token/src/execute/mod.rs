//! Execute handlers for the token contract.
//!
//! This module contains all execute message handlers, organized by category:
//! - `token` - Mint and option changes
//! - `transfer` - Issue, retire, transfer, burn and allowances
//! - `account` - Holder rows and code links
//! - `withdraw` - Deposits and the delayed withdrawal cycle

mod account;
mod token;
mod transfer;
mod withdraw;

pub use account::*;
pub use token::*;
pub use transfer::*;
pub use withdraw::*;
