use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};

/// Lifecycle of a prize event. Transitions Open → Closed exactly once.
#[cw_serde]
pub enum EventStatus {
    Open,
    Closed,
}

/// A participant's accumulated vote weight within one event.
#[cw_serde]
pub struct Standing {
    pub participant: Addr,
    pub weight: Uint128,
}

/// One credited share of a prize, produced when an event closes.
#[cw_serde]
pub struct Award {
    /// 0-indexed position in the ranking
    pub rank: u32,
    pub participant: Addr,
    pub percentage: u32,
    pub amount: Uint128,
}
