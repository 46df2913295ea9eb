//! State definitions for the gacha contract

use common::{Asset, Deferred, ExtendedAsset};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary, Timestamp};
use cw_storage_plus::{Index, IndexList, IndexedMap, Item, Map, MultiIndex};

pub const CONTRACT_NAME: &str = "crates.io:gxc-gacha";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Time a seeded draw waits for its dseed before it rainchecks (7 days)
pub const DEFAULT_DEADLINE_SEC: u64 = 7 * 24 * 60 * 60;

/// Score width in bytes when a scheme does not set one
pub const DEFAULT_PRECISION: u8 = 1;

#[cw_serde]
pub struct Config {
    /// Token engine paying budgets and rewards
    pub token: Addr,
    /// Registry deciding who may open schemes
    pub account: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Scheme identity: `name` scoped by the account that runs it
#[cw_serde]
pub struct SchemeName {
    pub contract: String,
    pub name: String,
}

impl std::fmt::Display for SchemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.name, self.contract)
    }
}

#[cw_serde]
pub struct Grade {
    pub reward: Asset,
    /// Lowest score winning this grade
    pub score: u32,
    /// Most rewards this grade pays out; zero or none is uncapped
    pub limit: Option<u32>,
}

impl Grade {
    pub fn has_room(&self, paid: u32) -> bool {
        match self.limit {
            None | Some(0) => true,
            Some(limit) => paid < limit,
        }
    }
}

#[cw_serde]
pub struct Scheme {
    pub contract: String,
    pub name: String,
    /// Ordered by score, highest first
    pub grades: Vec<Grade>,
    pub budget: ExtendedAsset,
    pub expiration: Timestamp,
    pub precision: u8,
    pub deadline_sec: u64,
    /// Rewards paid so far
    pub out: Asset,
    /// Rewards paid per grade
    pub out_count: Vec<u32>,
    pub issued: u32,
    /// Seeded draws waiting for resolution
    pub unresolved: u32,
}

impl Scheme {
    pub fn id(&self) -> SchemeName {
        SchemeName {
            contract: self.contract.clone(),
            name: self.name.clone(),
        }
    }
}

/// (contract, name) -> scheme
pub const SCHEMES: Map<(&str, &str), Scheme> = Map::new("schemes");

// ============================================================================
// Draws
// ============================================================================

#[cw_serde]
pub struct Draw {
    pub id: u64,
    pub owner: String,
    pub scheme: SchemeName,
    /// sha256 commitment of the drawer's seed
    pub dseedhash: HexBinary,
    /// Operator seed, revealed by the owner
    pub oseed: Option<HexBinary>,
    /// Set together with `oseed`
    pub deadline: Option<Timestamp>,
}

impl Draw {
    /// Ordering key for resolution; unseeded draws sort last.
    pub fn deadline_key(&self) -> u64 {
        self.deadline.map_or(u64::MAX, |deadline| deadline.seconds())
    }
}

pub struct DrawIndexes<'a> {
    pub owner: MultiIndex<'a, String, Draw, u64>,
    pub deadline: MultiIndex<'a, u64, Draw, u64>,
}

impl<'a> IndexList<Draw> for DrawIndexes<'a> {
    fn get_indexes(&'_ self) -> Box<dyn Iterator<Item = &'_ dyn Index<Draw>> + '_> {
        let v: Vec<&dyn Index<Draw>> = vec![&self.owner, &self.deadline];
        Box::new(v.into_iter())
    }
}

/// id -> draw
pub fn draws<'a>() -> IndexedMap<'a, u64, Draw, DrawIndexes<'a>> {
    let indexes = DrawIndexes {
        owner: MultiIndex::new(|_pk, draw| draw.owner.clone(), "draws", "draws__owner"),
        deadline: MultiIndex::new(|_pk, draw| draw.deadline_key(), "draws", "draws__deadline"),
    };
    IndexedMap::new("draws", indexes)
}

/// Single timer driving deadline resolution
pub const RESOLVE_TIMER: Deferred = Deferred::new("timers", "timers_due");
pub const RESOLVE_SCOPE: &str = "resolve";
