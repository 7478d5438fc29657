use cosmwasm_std::{
    from_json, to_json_binary, DepsMut, Env, Event, MessageInfo, Reply, StdError, StdResult,
    SubMsg, SubMsgResult, Uint128,
};
use injective_cosmwasm::InjectiveMsgWrapper;
use prize_events_common::schedule::validate_schedule;
use prize_events_common::types::EventStatus;

use crate::distribution;
use crate::error::ContractError;
use crate::ledger;
use crate::msg::{ClaimResponse, SaleQuoteResponse, SetupEventParams};
use crate::state::{
    PendingClaim, PrizeEvent, CLAIMS, CONFIG, ESCROW, EVENT_VOTERS, PRIZE_EVENTS, REGISTRY,
    SALE_PROCEEDS, TALLIES,
};

type ContractResponse = cosmwasm_std::Response<InjectiveMsgWrapper>;

/// Participants accepted per `SetupEvent`.
pub const MAX_PARTICIPANTS: usize = 10;

pub const CLAIM_TRANSFER_REPLY_ID: u64 = 1;

/// Create a prize event and escrow its prize. Anyone can call.
/// The prize must be attached to the message; any surplus is sent back.
pub fn setup_event(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    params: SetupEventParams,
) -> Result<ContractResponse, ContractError> {
    let SetupEventParams {
        prize_amount,
        prize_denom,
        reference_block,
        winners_distribution,
        voters,
        participants,
    } = params;

    if participants.len() > MAX_PARTICIPANTS {
        return Err(ContractError::TooManyParticipants {
            count: participants.len(),
            max: MAX_PARTICIPANTS,
        });
    }

    validate_schedule(&winners_distribution, participants.len())?;

    let mut participant_addrs = Vec::with_capacity(participants.len());
    for participant in &participants {
        let addr = deps.api.addr_validate(participant)?;
        if participant_addrs.contains(&addr) {
            return Err(ContractError::DuplicateParticipant {
                address: participant.clone(),
            });
        }
        participant_addrs.push(addr);
    }

    let voter_addrs = voters
        .iter()
        .map(|voter| deps.api.addr_validate(voter))
        .collect::<StdResult<Vec<_>>>()?;

    if prize_amount.is_zero() {
        return Err(ContractError::ZeroAmount {
            field: "prize_amount".to_string(),
        });
    }

    let surplus = ledger::debit(&info.funds, &prize_denom, prize_amount)?;

    let mut registry = REGISTRY.load(deps.storage)?;
    let event_id = registry.next_event_id;
    registry.next_event_id += 1;

    let event = PrizeEvent {
        id: event_id,
        organizer: info.sender.clone(),
        prize_amount,
        prize_denom: prize_denom.clone(),
        reference_block,
        winners_distribution,
        participants: participant_addrs,
        restricted_voting: !voter_addrs.is_empty(),
        status: EventStatus::Open,
        created_at: env.block.time,
        closed_at: None,
        awards: vec![],
        undistributed: Uint128::zero(),
    };
    PRIZE_EVENTS.save(deps.storage, event_id, &event)?;

    for voter in &voter_addrs {
        EVENT_VOTERS.save(deps.storage, (event_id, voter), &())?;
    }

    ESCROW.update(deps.storage, &prize_denom, |held| -> StdResult<_> {
        Ok(held.unwrap_or_default().checked_add(prize_amount)?)
    })?;
    REGISTRY.save(deps.storage, &registry)?;

    let mut response = ContractResponse::new()
        .set_data(to_json_binary(&event_id)?)
        .add_attribute("action", "setup_event")
        .add_attribute("event_id", event_id.to_string())
        .add_attribute("organizer", info.sender.to_string())
        .add_event(
            Event::new("prize_event_created")
                .add_attribute("event_id", event_id.to_string())
                .add_attribute("prize_amount", prize_amount.to_string())
                .add_attribute("prize_denom", prize_denom.clone())
                .add_attribute("reference_block", reference_block.to_string())
                .add_attribute("organizer", info.sender.to_string())
                .add_attribute("participants", event.participants.len().to_string())
                .add_attribute("restricted_voting", event.restricted_voting.to_string()),
        );

    if !surplus.is_zero() {
        response = response.add_message(ledger::credit(&info.sender, &prize_denom, surplus));
    }

    Ok(response)
}

/// Spend vote weight on a participant of an open event.
/// The vote tokens are attached to the message and burned.
pub fn vote(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    event_id: u64,
    participant: String,
    weight: Uint128,
) -> Result<ContractResponse, ContractError> {
    let event = PRIZE_EVENTS
        .may_load(deps.storage, event_id)?
        .filter(PrizeEvent::is_open)
        .ok_or(ContractError::NotAValidEvent { event_id })?;

    if event.restricted_voting && !EVENT_VOTERS.has(deps.storage, (event_id, &info.sender)) {
        return Err(ContractError::VoterNotAllowed {
            event_id,
            voter: info.sender.to_string(),
        });
    }

    let participant_addr = event
        .participants
        .iter()
        .find(|p| p.as_str() == participant)
        .cloned()
        .ok_or(ContractError::NotValidParticipantForEvent {
            event_id,
            participant: participant.clone(),
        })?;

    if weight.is_zero() {
        return Err(ContractError::ZeroAmount {
            field: "weight".to_string(),
        });
    }

    let config = CONFIG.load(deps.storage)?;
    let surplus = ledger::debit(&info.funds, &config.vote_denom, weight)?;

    let tally = TALLIES
        .may_load(deps.storage, (event_id, &participant_addr))?
        .unwrap_or_default()
        .checked_add(weight)
        .map_err(StdError::from)?;

    let mut registry = REGISTRY.load(deps.storage)?;
    registry.total_votes_cast += 1;
    registry.total_weight_burned = registry
        .total_weight_burned
        .checked_add(weight)
        .map_err(StdError::from)?;

    TALLIES.save(deps.storage, (event_id, &participant_addr), &tally)?;
    REGISTRY.save(deps.storage, &registry)?;

    let mut response = ContractResponse::new()
        .add_message(ledger::burn(&env, &config.vote_denom, weight))
        .add_attribute("action", "vote")
        .add_attribute("event_id", event_id.to_string())
        .add_attribute("voter", info.sender.to_string())
        .add_attribute("participant", participant.clone())
        .add_event(
            Event::new("prize_vote_cast")
                .add_attribute("event_id", event_id.to_string())
                .add_attribute("voter", info.sender.to_string())
                .add_attribute("participant", participant)
                .add_attribute("weight", weight.to_string())
                .add_attribute("tally", tally.to_string()),
        );

    if !surplus.is_zero() {
        response = response.add_message(ledger::credit(&info.sender, &config.vote_denom, surplus));
    }

    Ok(response)
}

/// Close an event and credit its winners. Organizer only.
///
/// The whole split is computed before anything is written, so a failing
/// close leaves the event Open with its tally untouched.
pub fn close_event(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    event_id: u64,
) -> Result<ContractResponse, ContractError> {
    let mut event = PRIZE_EVENTS
        .may_load(deps.storage, event_id)?
        .ok_or(ContractError::NotAValidEvent { event_id })?;

    if info.sender != event.organizer {
        return Err(ContractError::OnlyOwnerAllowed { event_id });
    }

    if !event.is_open() {
        return Err(ContractError::EventClosed { event_id });
    }

    let outcome = distribution::distribute(deps.storage, &event)?;

    event.status = EventStatus::Closed;
    event.closed_at = Some(env.block.time);
    event.awards = outcome.awards;
    event.undistributed = outcome.undistributed;
    PRIZE_EVENTS.save(deps.storage, event_id, &event)?;

    let mut registry = REGISTRY.load(deps.storage)?;
    registry.total_events_closed += 1;
    REGISTRY.save(deps.storage, &registry)?;

    let mut response = ContractResponse::new()
        .add_attribute("action", "close_event")
        .add_attribute("event_id", event_id.to_string())
        .add_attribute("winners", event.awards.len().to_string())
        .add_event(
            Event::new("prize_event_closed")
                .add_attribute("event_id", event_id.to_string())
                .add_attribute("prize_amount", event.prize_amount.to_string())
                .add_attribute("prize_denom", event.prize_denom.clone())
                .add_attribute("undistributed", event.undistributed.to_string())
                .add_attribute("timestamp", env.block.time.seconds().to_string()),
        );

    for award in &event.awards {
        response = response.add_event(
            Event::new("prize_awarded")
                .add_attribute("event_id", event_id.to_string())
                .add_attribute("rank", award.rank.to_string())
                .add_attribute("participant", award.participant.to_string())
                .add_attribute("percentage", award.percentage.to_string())
                .add_attribute("amount", award.amount.to_string())
                .add_attribute("denom", event.prize_denom.clone()),
        );
    }

    Ok(response)
}

/// Withdraw the sender's whole claimable balance in `denom`.
///
/// A zero balance is a successful no-op. Otherwise the balance is removed
/// before the bank send is dispatched; the send reports failure through
/// `reply` so the claim can be undone.
pub fn claim_prize(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    denom: String,
) -> Result<ContractResponse, ContractError> {
    let amount = CLAIMS
        .may_load(deps.storage, (&info.sender, denom.as_str()))?
        .unwrap_or_default();

    let data = to_json_binary(&ClaimResponse {
        denom: denom.clone(),
        amount,
    })?;

    if amount.is_zero() {
        return Ok(ContractResponse::new()
            .set_data(data)
            .add_attribute("action", "claim_prize")
            .add_attribute("participant", info.sender.to_string())
            .add_attribute("amount", "0"));
    }

    CLAIMS.remove(deps.storage, (&info.sender, denom.as_str()));
    ESCROW.update(deps.storage, &denom, |held| -> StdResult<_> {
        Ok(held.unwrap_or_default().checked_sub(amount)?)
    })?;

    let pending = PendingClaim {
        recipient: info.sender.clone(),
        denom: denom.clone(),
        amount,
    };
    let transfer = SubMsg::reply_on_error(
        ledger::credit(&info.sender, &denom, amount),
        CLAIM_TRANSFER_REPLY_ID,
    )
    .with_payload(to_json_binary(&pending)?);

    Ok(ContractResponse::new()
        .add_submessage(transfer)
        .set_data(data)
        .add_attribute("action", "claim_prize")
        .add_attribute("participant", info.sender.to_string())
        .add_attribute("amount", amount.to_string())
        .add_event(
            Event::new("prize_claimed")
                .add_attribute("participant", info.sender.to_string())
                .add_attribute("denom", denom)
                .add_attribute("amount", amount.to_string()),
        ))
}

/// Reply for a failed claim transfer: put the credit back and fail.
/// Failing here also reverts the claim's own writes, so the balance ends up
/// exactly where it was before the claim.
pub fn claim_transfer_failed(deps: DepsMut, reply: Reply) -> Result<ContractResponse, ContractError> {
    let reason = match reply.result {
        SubMsgResult::Err(reason) => reason,
        SubMsgResult::Ok(_) => return Ok(ContractResponse::new()),
    };
    let pending: PendingClaim = from_json(&reply.payload)?;

    CLAIMS.update(
        deps.storage,
        (&pending.recipient, pending.denom.as_str()),
        |balance| -> StdResult<_> { Ok(balance.unwrap_or_default().checked_add(pending.amount)?) },
    )?;
    ESCROW.update(deps.storage, &pending.denom, |held| -> StdResult<_> {
        Ok(held.unwrap_or_default().checked_add(pending.amount)?)
    })?;

    Err(ContractError::TransferFailed {
        recipient: pending.recipient.to_string(),
        denom: pending.denom,
        amount: pending.amount,
        reason,
    })
}

/// Split a payment into whole vote units, their cost and the leftover.
pub fn quote_purchase(payment: Uint128, unit_price: Uint128) -> StdResult<SaleQuoteResponse> {
    let minted_weight = payment.checked_div(unit_price)?;
    let cost = minted_weight.checked_mul(unit_price)?;
    Ok(SaleQuoteResponse {
        minted_weight,
        cost,
        refund: payment - cost,
    })
}

/// Buy vote tokens with the payment denom at the configured unit price.
/// Payment that does not buy a whole unit is returned.
pub fn purchase_voting_tokens(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<ContractResponse, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let payment = ledger::attached(&info.funds, &config.payment_denom, config.vote_unit_price)?;
    let quote = quote_purchase(payment, config.vote_unit_price)?;
    if quote.minted_weight.is_zero() {
        return Err(ContractError::PaymentBelowUnitPrice {
            payment,
            unit_price: config.vote_unit_price,
        });
    }

    let mint_msg = ledger::mint(&env, &config.vote_denom, quote.minted_weight, &info.sender)?;

    let proceeds = SALE_PROCEEDS.load(deps.storage)?;
    SALE_PROCEEDS.save(
        deps.storage,
        &proceeds.checked_add(quote.cost).map_err(StdError::from)?,
    )?;

    let mut response = ContractResponse::new()
        .add_message(mint_msg)
        .add_attribute("action", "purchase_voting_tokens")
        .add_attribute("buyer", info.sender.to_string())
        .add_attribute("minted", quote.minted_weight.to_string())
        .add_event(
            Event::new("prize_votes_purchased")
                .add_attribute("buyer", info.sender.to_string())
                .add_attribute("payment", payment.to_string())
                .add_attribute("minted", quote.minted_weight.to_string())
                .add_attribute("unit_price", config.vote_unit_price.to_string()),
        );

    if !quote.refund.is_zero() {
        response = response.add_message(ledger::credit(
            &info.sender,
            &config.payment_denom,
            quote.refund,
        ));
    }

    Ok(response)
}

/// Update configuration. Admin only.
pub fn update_config(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    admin: Option<String>,
) -> Result<ContractResponse, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can update config".to_string(),
        });
    }

    if let Some(new_admin) = admin {
        config.admin = deps.api.addr_validate(&new_admin)?;
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(ContractResponse::new()
        .add_attribute("action", "update_config")
        .add_attribute("admin", config.admin.to_string()))
}

/// Withdraw vote token sale revenue. Admin only. Escrowed prizes are
/// tracked separately and can never be withdrawn here.
pub fn withdraw_sale_proceeds(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    amount: Option<Uint128>,
    recipient: Option<String>,
) -> Result<ContractResponse, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {
            reason: "only admin can withdraw sale proceeds".to_string(),
        });
    }

    let available = SALE_PROCEEDS.load(deps.storage)?;
    let requested = amount.unwrap_or(available);
    if requested.is_zero() {
        return Err(ContractError::ZeroAmount {
            field: "amount".to_string(),
        });
    }
    if requested > available {
        return Err(ContractError::InsufficientProceeds {
            requested,
            available,
        });
    }

    let recipient = match recipient {
        Some(addr) => deps.api.addr_validate(&addr)?,
        None => info.sender.clone(),
    };

    SALE_PROCEEDS.save(deps.storage, &(available - requested))?;

    Ok(ContractResponse::new()
        .add_message(ledger::credit(&recipient, &config.payment_denom, requested))
        .add_attribute("action", "withdraw_sale_proceeds")
        .add_attribute("amount", requested.to_string())
        .add_event(
            Event::new("prize_proceeds_withdrawn")
                .add_attribute("recipient", recipient.to_string())
                .add_attribute("denom", config.payment_denom)
                .add_attribute("amount", requested.to_string()),
        ))
}
