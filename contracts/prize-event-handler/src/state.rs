use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};
use prize_events_common::types::{Award, EventStatus};

pub const CONFIG: Item<Config> = Item::new("config");
pub const REGISTRY: Item<RegistryState> = Item::new("registry");
pub const PRIZE_EVENTS: Map<u64, PrizeEvent> = Map::new("prize_events");

/// Voter allow-list, one key per (event, voter). Only written for
/// restricted events.
pub const EVENT_VOTERS: Map<(u64, &Addr), ()> = Map::new("event_voters");

/// Accumulated vote weight per (event, participant).
pub const TALLIES: Map<(u64, &Addr), Uint128> = Map::new("tallies");

/// Claimable prize per (participant, denom), summed across events.
/// Entries are removed rather than stored as zero once claimed.
pub const CLAIMS: Map<(&Addr, &str), Uint128> = Map::new("claims");

/// Prize funds held per denom, from setup until claimed.
pub const ESCROW: Map<&str, Uint128> = Map::new("escrow");

/// Payment-denom revenue from vote token sales not yet withdrawn.
pub const SALE_PROCEEDS: Item<Uint128> = Item::new("sale_proceeds");

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    /// Token Factory denom: "factory/{this_contract}/{subdenom}"
    pub vote_denom: String,
    /// Denom accepted when buying vote tokens
    pub payment_denom: String,
    /// Payment amount per unit of vote weight
    pub vote_unit_price: Uint128,
}

#[cw_serde]
pub struct RegistryState {
    pub next_event_id: u64,
    pub total_events_closed: u64,
    pub total_votes_cast: u64,
    pub total_weight_burned: Uint128,
}

#[cw_serde]
pub struct PrizeEvent {
    pub id: u64,
    pub organizer: Addr,
    pub prize_amount: Uint128,
    pub prize_denom: String,
    /// Opaque deadline marker supplied by the organizer; not enforced
    pub reference_block: u64,
    pub winners_distribution: Vec<u32>,
    pub participants: Vec<Addr>,
    /// True when a voter allow-list was supplied at setup
    pub restricted_voting: bool,
    pub status: EventStatus,
    pub created_at: Timestamp,
    pub closed_at: Option<Timestamp>,
    /// Credited shares, written once at close
    pub awards: Vec<Award>,
    /// Rounding residue left in escrow at close
    pub undistributed: Uint128,
}

impl PrizeEvent {
    pub fn is_open(&self) -> bool {
        self.status == EventStatus::Open
    }
}

/// Carried as submessage payload so a failed claim transfer can be reported.
#[cw_serde]
pub struct PendingClaim {
    pub recipient: Addr,
    pub denom: String,
    pub amount: Uint128,
}
