use cosmwasm_std::{to_json_binary, Binary, Deps, Order, StdError, StdResult, Uint128};
use cw_storage_plus::Bound;

use crate::distribution::ranked_standings;
use crate::error::ContractError;
use crate::execute::quote_purchase;
use crate::ledger;
use crate::msg::{
    ClaimEntry, ClaimsResponse, EventVotersResponse, EventsResponse, StandingsResponse,
};
use crate::state::{
    PrizeEvent, CLAIMS, CONFIG, ESCROW, EVENT_VOTERS, PRIZE_EVENTS, REGISTRY, TALLIES,
};

fn load_event(deps: Deps, event_id: u64) -> StdResult<PrizeEvent> {
    PRIZE_EVENTS
        .may_load(deps.storage, event_id)?
        .ok_or_else(|| {
            StdError::generic_err(ContractError::NotAValidEvent { event_id }.to_string())
        })
}

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_registry_state(deps: Deps) -> StdResult<Binary> {
    let state = REGISTRY.load(deps.storage)?;
    to_json_binary(&state)
}

pub fn query_event(deps: Deps, event_id: u64) -> StdResult<Binary> {
    let event = load_event(deps, event_id)?;
    to_json_binary(&event)
}

pub fn query_events(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(20).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let events: Vec<_> = PRIZE_EVENTS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(_, event)| event)
        .collect();

    to_json_binary(&EventsResponse { events })
}

pub fn query_tally_for(deps: Deps, event_id: u64, participant: String) -> StdResult<Binary> {
    load_event(deps, event_id)?;
    let addr = deps.api.addr_validate(&participant)?;
    let tally = TALLIES
        .may_load(deps.storage, (event_id, &addr))?
        .unwrap_or_default();
    to_json_binary(&tally)
}

pub fn query_standings(deps: Deps, event_id: u64) -> StdResult<Binary> {
    let event = load_event(deps, event_id)?;
    let standings = ranked_standings(deps.storage, &event)?;
    to_json_binary(&StandingsResponse {
        event_id,
        closed: !event.is_open(),
        standings,
    })
}

pub fn query_claim_balance(deps: Deps, participant: String, denom: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&participant)?;
    let balance = CLAIMS
        .may_load(deps.storage, (&addr, denom.as_str()))?
        .unwrap_or_default();
    to_json_binary(&balance)
}

pub fn query_claims(
    deps: Deps,
    participant: String,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&participant)?;
    let limit = limit.unwrap_or(20).min(100) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    let claims: Vec<ClaimEntry> = CLAIMS
        .prefix(&addr)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .map(|(denom, amount)| ClaimEntry { denom, amount })
        .collect();

    to_json_binary(&ClaimsResponse {
        participant,
        claims,
    })
}

pub fn query_event_voters(
    deps: Deps,
    event_id: u64,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let event = load_event(deps, event_id)?;
    let limit = limit.unwrap_or(20).min(100) as usize;
    let start_addr = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let start = start_addr.as_ref().map(Bound::exclusive);

    let voters: Vec<_> = EVENT_VOTERS
        .prefix(event_id)
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .filter_map(|r| r.ok())
        .collect();

    to_json_binary(&EventVotersResponse {
        event_id,
        restricted: event.restricted_voting,
        voters,
    })
}

/// Whether `address` passes the voter check of an open event.
pub fn query_can_vote(deps: Deps, event_id: u64, address: String) -> StdResult<Binary> {
    let event = load_event(deps, event_id)?;
    let addr = deps.api.addr_validate(&address)?;
    let allowed = event.is_open()
        && (!event.restricted_voting || EVENT_VOTERS.has(deps.storage, (event_id, &addr)));
    to_json_binary(&allowed)
}

pub fn query_escrow(deps: Deps, denom: String) -> StdResult<Binary> {
    let held = ESCROW
        .may_load(deps.storage, &denom)?
        .unwrap_or(Uint128::zero());
    to_json_binary(&held)
}

pub fn query_vote_balance(deps: Deps, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let config = CONFIG.load(deps.storage)?;
    let balance = ledger::balance_of(&deps.querier, &addr, &config.vote_denom)?;
    to_json_binary(&balance)
}

pub fn query_sale_quote(deps: Deps, payment: Uint128) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let quote = quote_purchase(payment, config.vote_unit_price)?;
    to_json_binary(&quote)
}
