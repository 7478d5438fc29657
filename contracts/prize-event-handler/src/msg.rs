use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};
use prize_events_common::types::Standing;

use crate::state::{Config, PrizeEvent, RegistryState};

#[cw_serde]
pub struct InstantiateMsg {
    /// Subdenom for the Token Factory vote token, e.g. "vote"
    pub vote_subdenom: String,
    /// Denom accepted when buying vote tokens
    pub payment_denom: String,
    /// Payment amount per unit of vote weight
    pub vote_unit_price: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Create a prize event. Send exactly `prize_amount` of `prize_denom`.
    SetupEvent {
        prize_amount: Uint128,
        prize_denom: String,
        reference_block: u64,
        /// Percentages per rank, must sum to 100
        winners_distribution: Vec<u32>,
        /// Empty list means anyone may vote
        voters: Vec<String>,
        participants: Vec<String>,
    },
    /// Spend `weight` vote tokens on a participant. Send the vote tokens.
    Vote {
        event_id: u64,
        participant: String,
        weight: Uint128,
    },
    /// Close an event and credit the winners. Organizer only.
    CloseEvent { event_id: u64 },
    /// Withdraw everything the sender can claim in `denom`.
    ClaimPrize { denom: String },
    /// Buy vote tokens with the payment denom.
    PurchaseVotingTokens {},
    /// Update configuration. Admin only.
    UpdateConfig { admin: Option<String> },
    /// Withdraw vote token sale revenue. Admin only.
    WithdrawSaleProceeds {
        amount: Option<Uint128>,
        recipient: Option<String>,
    },
}

/// Grouped arguments of `ExecuteMsg::SetupEvent`.
pub struct SetupEventParams {
    pub prize_amount: Uint128,
    pub prize_denom: String,
    pub reference_block: u64,
    pub winners_distribution: Vec<u32>,
    pub voters: Vec<String>,
    pub participants: Vec<String>,
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(RegistryState)]
    RegistryState {},
    #[returns(PrizeEvent)]
    Event { event_id: u64 },
    #[returns(EventsResponse)]
    Events {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    #[returns(Uint128)]
    TallyFor { event_id: u64, participant: String },
    #[returns(StandingsResponse)]
    Standings { event_id: u64 },
    #[returns(Uint128)]
    ClaimBalance { participant: String, denom: String },
    #[returns(ClaimsResponse)]
    Claims {
        participant: String,
        start_after: Option<String>,
        limit: Option<u32>,
    },
    /// Voter allow-list of an event. Empty with `restricted: false` means
    /// anyone may vote.
    #[returns(EventVotersResponse)]
    EventVoters {
        event_id: u64,
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(bool)]
    CanVote { event_id: u64, address: String },
    #[returns(Uint128)]
    Escrow { denom: String },
    #[returns(Uint128)]
    VoteBalance { address: String },
    #[returns(SaleQuoteResponse)]
    SaleQuote { payment: Uint128 },
}

#[cw_serde]
pub struct EventsResponse {
    pub events: Vec<PrizeEvent>,
}

#[cw_serde]
pub struct StandingsResponse {
    pub event_id: u64,
    pub closed: bool,
    pub standings: Vec<Standing>,
}

#[cw_serde]
pub struct ClaimEntry {
    pub denom: String,
    pub amount: Uint128,
}

#[cw_serde]
pub struct ClaimsResponse {
    pub participant: String,
    pub claims: Vec<ClaimEntry>,
}

#[cw_serde]
pub struct EventVotersResponse {
    pub event_id: u64,
    pub restricted: bool,
    pub voters: Vec<Addr>,
}

#[cw_serde]
pub struct SaleQuoteResponse {
    pub minted_weight: Uint128,
    pub cost: Uint128,
    pub refund: Uint128,
}

/// Data attached to a successful `ClaimPrize` response.
#[cw_serde]
pub struct ClaimResponse {
    pub denom: String,
    pub amount: Uint128,
}
