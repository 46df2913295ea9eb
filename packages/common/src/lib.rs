//! Common - Shared Types and Utilities for GXC Ledger Contracts
//!
//! This package provides the asset representation, account naming rules,
//! token option encoding and deferred-call scheduling used across the
//! token, bancor, gacha, reserve and HTLC contracts.

pub mod asset;
pub mod deferred;
pub mod hash;
pub mod name;
pub mod opt;

pub use asset::{Asset, ExtendedAsset, ExtendedSymbol, ExtendedSymbolCode, Symbol};
pub use deferred::{Deferred, SudoMsg, DEFERRED_REPLY_ID};
pub use hash::sha256;
pub use name::{basename, has_vauth, NULL_ACCOUNT};
pub use opt::Opt;
