//! Integration tests for the prize event handler.
//!
//! These tests drive the contract through its `instantiate` / `execute` /
//! `query` entry points using `cosmwasm_std::testing` mocks, covering the
//! whole lifecycle of an event: funding, voting, closing and claiming.
//!
//! Run:
//! ```bash
//! cargo test -p prize-events-integration-tests
//! ```

use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env, MockApi, MockQuerier};
use cosmwasm_std::{from_json, Addr, Coin, MemoryStorage, OwnedDeps, Uint128};
use prize_event_handler::contract::{execute, instantiate, query};
use prize_event_handler::msg::{
    ClaimResponse, ClaimsResponse, EventsResponse, ExecuteMsg, InstantiateMsg, QueryMsg,
    StandingsResponse,
};
use prize_event_handler::state::{Config, PrizeEvent, RegistryState};
use prize_events_common::types::EventStatus;

type Deps = OwnedDeps<MemoryStorage, MockApi, MockQuerier>;

// ─── Constants ───

const ONE: u128 = 1_000_000_000_000_000_000;
const USDT: &str = "peggy0xusdt";
const PAYMENT: &str = "inj";

// ─── Helpers ───

fn setup_handler(deps: &mut Deps) -> Config {
    let admin = deps.api.addr_make("admin");
    let info = message_info(&admin, &[]);
    let msg = InstantiateMsg {
        vote_subdenom: "vote".to_string(),
        payment_denom: PAYMENT.to_string(),
        vote_unit_price: Uint128::new(ONE / 100),
    };
    instantiate(deps.as_mut(), mock_env(), info, msg).unwrap();
    query_as(deps, QueryMsg::Config {})
}

fn query_as<T: serde::de::DeserializeOwned>(deps: &Deps, msg: QueryMsg) -> T {
    from_json(query(deps.as_ref(), mock_env(), msg).unwrap()).unwrap()
}

fn create_event(
    deps: &mut Deps,
    organizer: &Addr,
    prize: u128,
    denom: &str,
    distribution: Vec<u32>,
    voters: &[&Addr],
    participants: &[&Addr],
) -> u64 {
    let info = message_info(organizer, &[Coin::new(prize, denom)]);
    let res = execute(
        deps.as_mut(),
        mock_env(),
        info,
        ExecuteMsg::SetupEvent {
            prize_amount: Uint128::new(prize),
            prize_denom: denom.to_string(),
            reference_block: 1_234_567,
            winners_distribution: distribution,
            voters: voters.iter().map(|v| v.to_string()).collect(),
            participants: participants.iter().map(|p| p.to_string()).collect(),
        },
    )
    .unwrap();
    from_json(res.data.unwrap()).unwrap()
}

fn vote(
    deps: &mut Deps,
    config: &Config,
    voter: &Addr,
    event_id: u64,
    participant: &Addr,
    weight: u128,
) {
    let info = message_info(voter, &[Coin::new(weight, &config.vote_denom)]);
    execute(
        deps.as_mut(),
        mock_env(),
        info,
        ExecuteMsg::Vote {
            event_id,
            participant: participant.to_string(),
            weight: Uint128::new(weight),
        },
    )
    .unwrap();
}

fn close(deps: &mut Deps, organizer: &Addr, event_id: u64) {
    let info = message_info(organizer, &[]);
    execute(
        deps.as_mut(),
        mock_env(),
        info,
        ExecuteMsg::CloseEvent { event_id },
    )
    .unwrap();
}

fn claim(deps: &mut Deps, participant: &Addr, denom: &str) -> Uint128 {
    let info = message_info(participant, &[]);
    let res = execute(
        deps.as_mut(),
        mock_env(),
        info,
        ExecuteMsg::ClaimPrize {
            denom: denom.to_string(),
        },
    )
    .unwrap();
    let data: ClaimResponse = from_json(res.data.unwrap()).unwrap();
    data.amount
}

fn claim_balance(deps: &Deps, participant: &Addr, denom: &str) -> Uint128 {
    query_as(
        deps,
        QueryMsg::ClaimBalance {
            participant: participant.to_string(),
            denom: denom.to_string(),
        },
    )
}

fn escrow(deps: &Deps, denom: &str) -> Uint128 {
    query_as(
        deps,
        QueryMsg::Escrow {
            denom: denom.to_string(),
        },
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_full_event_lifecycle() {
    // Fund an event, buy vote weight, vote 50/10/10, close and claim.
    let mut deps = mock_dependencies();
    let config = setup_handler(&mut deps);

    let organizer = deps.api.addr_make("organizer");
    let voter1 = deps.api.addr_make("voter1");
    let voter2 = deps.api.addr_make("voter2");
    let p1 = deps.api.addr_make("participant1");
    let p2 = deps.api.addr_make("participant2");
    let p3 = deps.api.addr_make("participant3");

    // 1. Voters buy weight from the sale
    let info = message_info(&voter1, &[Coin::new(ONE, PAYMENT)]);
    let res = execute(
        deps.as_mut(),
        mock_env(),
        info,
        ExecuteMsg::PurchaseVotingTokens {},
    )
    .unwrap();
    assert_eq!(res.messages.len(), 1); // mint only

    // 2. Organizer escrows 1 USDT over three participants
    let event_id = create_event(
        &mut deps,
        &organizer,
        ONE,
        USDT,
        vec![50, 30, 20],
        &[&voter1, &voter2],
        &[&p1, &p2, &p3],
    );
    assert_eq!(event_id, 0);
    assert_eq!(escrow(&deps, USDT), Uint128::new(ONE));

    // 3. Votes
    vote(&mut deps, &config, &voter1, event_id, &p1, 30);
    vote(&mut deps, &config, &voter2, event_id, &p1, 20);
    vote(&mut deps, &config, &voter1, event_id, &p2, 10);
    vote(&mut deps, &config, &voter2, event_id, &p3, 10);

    let tally: Uint128 = query_as(
        &deps,
        QueryMsg::TallyFor {
            event_id,
            participant: p1.to_string(),
        },
    );
    assert_eq!(tally, Uint128::new(50));

    // 4. Close
    close(&mut deps, &organizer, event_id);

    let event: PrizeEvent = query_as(&deps, QueryMsg::Event { event_id });
    assert_eq!(event.status, EventStatus::Closed);
    assert_eq!(event.undistributed, Uint128::zero());

    let standings: StandingsResponse = query_as(&deps, QueryMsg::Standings { event_id });
    assert!(standings.closed);
    assert_eq!(standings.standings[0].participant, p1);

    // 5. Claims: 0.5 / 0.3 / 0.2, with the p2/p3 tie broken by address
    let (second, third) = if p2.as_str() < p3.as_str() {
        (&p2, &p3)
    } else {
        (&p3, &p2)
    };
    assert_eq!(claim_balance(&deps, &p1, USDT), Uint128::new(ONE / 2));
    assert_eq!(claim_balance(&deps, second, USDT), Uint128::new(ONE / 100 * 30));
    assert_eq!(claim_balance(&deps, third, USDT), Uint128::new(ONE / 100 * 20));

    assert_eq!(claim(&mut deps, &p1, USDT), Uint128::new(ONE / 2));
    let rest = claim(&mut deps, &p2, USDT) + claim(&mut deps, &p3, USDT);
    assert_eq!(rest, Uint128::new(ONE / 2));

    // Everything paid out, a second claim pays nothing
    assert_eq!(escrow(&deps, USDT), Uint128::zero());
    assert_eq!(claim(&mut deps, &p1, USDT), Uint128::zero());
    assert_eq!(claim_balance(&deps, &p1, USDT), Uint128::zero());

    let registry: RegistryState = query_as(&deps, QueryMsg::RegistryState {});
    assert_eq!(registry.next_event_id, 1);
    assert_eq!(registry.total_events_closed, 1);
    assert_eq!(registry.total_votes_cast, 4);
    assert_eq!(registry.total_weight_burned, Uint128::new(70));
}

#[test]
fn test_rounding_residue_stays_in_escrow() {
    // 10 units split 34/33/33 pays 3/3/3 and leaves 1 behind.
    let mut deps = mock_dependencies();
    let config = setup_handler(&mut deps);

    let organizer = deps.api.addr_make("organizer");
    let voter = deps.api.addr_make("voter1");
    let p1 = deps.api.addr_make("participant1");
    let p2 = deps.api.addr_make("participant2");
    let p3 = deps.api.addr_make("participant3");

    let event_id = create_event(
        &mut deps,
        &organizer,
        10,
        USDT,
        vec![34, 33, 33],
        &[],
        &[&p1, &p2, &p3],
    );
    vote(&mut deps, &config, &voter, event_id, &p3, 3);
    vote(&mut deps, &config, &voter, event_id, &p2, 2);
    vote(&mut deps, &config, &voter, event_id, &p1, 1);
    close(&mut deps, &organizer, event_id);

    let event: PrizeEvent = query_as(&deps, QueryMsg::Event { event_id });
    assert_eq!(event.awards.len(), 3);
    assert_eq!(event.awards[0].participant, p3);
    assert!(event.awards.iter().all(|a| a.amount == Uint128::new(3)));
    assert_eq!(event.undistributed, Uint128::new(1));

    for p in [&p1, &p2, &p3] {
        assert_eq!(claim(&mut deps, p, USDT), Uint128::new(3));
    }
    assert_eq!(escrow(&deps, USDT), Uint128::new(1));
}

#[test]
fn test_claims_accumulate_across_events() {
    // A participant winning several events claims one combined balance per denom.
    let mut deps = mock_dependencies();
    let config = setup_handler(&mut deps);

    let organizer = deps.api.addr_make("organizer");
    let voter = deps.api.addr_make("voter1");
    let p1 = deps.api.addr_make("participant1");
    let p2 = deps.api.addr_make("participant2");

    let first = create_event(&mut deps, &organizer, 100, USDT, vec![100], &[], &[&p1, &p2]);
    let second = create_event(&mut deps, &organizer, 60, USDT, vec![100], &[], &[&p1, &p2]);
    let third = create_event(&mut deps, &organizer, 7, PAYMENT, vec![100], &[], &[&p1]);

    for event_id in [first, second, third] {
        vote(&mut deps, &config, &voter, event_id, &p1, 1);
        close(&mut deps, &organizer, event_id);
    }

    let claims: ClaimsResponse = query_as(
        &deps,
        QueryMsg::Claims {
            participant: p1.to_string(),
            start_after: None,
            limit: None,
        },
    );
    assert_eq!(claims.claims.len(), 2);
    let usdt = claims.claims.iter().find(|c| c.denom == USDT).unwrap();
    assert_eq!(usdt.amount, Uint128::new(160));
    let inj = claims.claims.iter().find(|c| c.denom == PAYMENT).unwrap();
    assert_eq!(inj.amount, Uint128::new(7));

    // Claiming one denom leaves the other untouched
    assert_eq!(claim(&mut deps, &p1, USDT), Uint128::new(160));
    assert_eq!(claim_balance(&deps, &p1, PAYMENT), Uint128::new(7));
    assert_eq!(claim_balance(&deps, &p2, USDT), Uint128::zero());
}

#[test]
fn test_events_pagination() {
    let mut deps = mock_dependencies();
    setup_handler(&mut deps);

    let organizer = deps.api.addr_make("organizer");
    let p1 = deps.api.addr_make("participant1");
    for _ in 0..5 {
        create_event(&mut deps, &organizer, 10, USDT, vec![100], &[], &[&p1]);
    }

    let page: EventsResponse = query_as(
        &deps,
        QueryMsg::Events {
            start_after: None,
            limit: Some(2),
        },
    );
    assert_eq!(
        page.events.iter().map(|e| e.id).collect::<Vec<_>>(),
        vec![0, 1]
    );

    let page: EventsResponse = query_as(
        &deps,
        QueryMsg::Events {
            start_after: Some(1),
            limit: None,
        },
    );
    assert_eq!(
        page.events.iter().map(|e| e.id).collect::<Vec<_>>(),
        vec![2, 3, 4]
    );
    assert_eq!(escrow(&deps, USDT), Uint128::new(50));
}
