//! State definitions for the account registry

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::{Index, IndexList, IndexedMap, Item, UniqueIndex};

pub const CONTRACT_NAME: &str = "crates.io:gxc-account";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nickname length bounds in bytes
pub const MIN_NICKNAME_LEN: usize = 6;
pub const MAX_NICKNAME_LEN: usize = 24;

#[cw_serde]
pub struct Config {
    /// System account, may assign and change any nickname
    pub admin: Addr,
}

#[cw_serde]
pub struct AccountInfo {
    pub name: String,
    pub nickname: String,
    pub is_partner: bool,
}

pub const CONFIG: Item<Config> = Item::new("config");

pub struct AccountIndexes<'a> {
    pub nickname: UniqueIndex<'a, String, AccountInfo, String>,
}

impl<'a> IndexList<AccountInfo> for AccountIndexes<'a> {
    fn get_indexes(&'_ self) -> Box<dyn Iterator<Item = &'_ dyn Index<AccountInfo>> + '_> {
        let v: Vec<&dyn Index<AccountInfo>> = vec![&self.nickname];
        Box::new(v.into_iter())
    }
}

/// name -> profile, unique by nickname
pub fn accounts<'a>() -> IndexedMap<'a, &'a str, AccountInfo, AccountIndexes<'a>> {
    let indexes = AccountIndexes {
        nickname: UniqueIndex::new(|acc| acc.nickname.clone(), "accounts__nickname"),
    };
    IndexedMap::new("accounts", indexes)
}
