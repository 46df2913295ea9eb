//! GXC Gacha Contract - Commit-Reveal Prize Draws
//!
//! A partner opens a scheme with a budget and a ladder of grades. Each draw
//! it issues commits to the drawer's seed hash; the draw owner reveals an
//! oseed, and the drawer's seed (dseed) then picks the grade through a
//! Hash_DRBG keyed by both seeds. Draws whose dseed is not revealed before
//! the deadline resolve as rainchecks.
//!
//! # Setup
//! 1. Instantiate with the token engine and the account registry
//! 2. The scheme's root account approves this contract for the budget
//! 3. `Open` escrows the budget
//!
//! The chain calls `sudo(Tick {})` every block to drive deadlines.

pub mod contract;
pub mod drbg;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
