//! Authority checks
//!
//! The sender holds the authority of a name when it is that name, or when it
//! is a code the name has linked. The token contract's own authority is also
//! held by its admin, and by codes the admin linked for the contract.

use common::basename;
use cosmwasm_std::{Addr, Storage};

use crate::error::ContractError;
use crate::state::LINKED_CODES;

pub struct Actor<'a> {
    pub sender: &'a Addr,
    pub contract: &'a Addr,
    pub admin: &'a Addr,
}

impl<'a> Actor<'a> {
    pub fn new(sender: &'a Addr, contract: &'a Addr, admin: &'a Addr) -> Self {
        Self {
            sender,
            contract,
            admin,
        }
    }

    /// Name of the token contract itself
    pub fn code(&self) -> &str {
        self.contract.as_str()
    }

    pub fn has_auth(&self, storage: &dyn Storage, name: &str) -> bool {
        let sender = self.sender.as_str();
        if sender == name {
            return true;
        }
        if name == self.code() && self.sender == self.admin {
            return true;
        }
        LINKED_CODES.has(storage, (name, sender))
    }

    /// Authority over the root account of `name`
    pub fn has_vauth(&self, storage: &dyn Storage, name: &str) -> bool {
        self.has_auth(storage, basename(name))
    }

    pub fn require_auth(&self, storage: &dyn Storage, name: &str) -> Result<(), ContractError> {
        if !self.has_auth(storage, name) {
            return Err(ContractError::MissingAuthority {
                account: name.to_string(),
            });
        }
        Ok(())
    }

    pub fn require_vauth(&self, storage: &dyn Storage, name: &str) -> Result<(), ContractError> {
        self.require_auth(storage, basename(name))
    }

    /// Direct authority only; linked codes cannot link further codes.
    pub fn require_direct_auth(&self, name: &str) -> Result<(), ContractError> {
        let direct = self.sender.as_str() == name || (name == self.code() && self.sender == self.admin);
        if !direct {
            return Err(ContractError::MissingAuthority {
                account: name.to_string(),
            });
        }
        Ok(())
    }
}
