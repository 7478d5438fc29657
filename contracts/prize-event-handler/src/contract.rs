use cosmwasm_std::{
    entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Reply, StdResult, Uint128,
};
use cw2::{get_contract_version, set_contract_version};
use injective_cosmwasm::InjectiveMsgWrapper;

use crate::error::ContractError;
use crate::execute::{self, CLAIM_TRANSFER_REPLY_ID};
use crate::ledger;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, SetupEventParams};
use crate::query;
use crate::state::{Config, RegistryState, CONFIG, REGISTRY, SALE_PROCEEDS};

const CONTRACT_NAME: &str = "crates.io:prize-event-handler";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

type ContractResponse = cosmwasm_std::Response<InjectiveMsgWrapper>;

#[entry_point]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<ContractResponse, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.vote_unit_price.is_zero() {
        return Err(ContractError::InvalidUnitPrice);
    }

    // Create Token Factory vote denom
    let (create_denom_msg, vote_denom) = ledger::create_denom(&env, &msg.vote_subdenom);

    let config = Config {
        admin: info.sender.clone(),
        vote_denom: vote_denom.clone(),
        payment_denom: msg.payment_denom,
        vote_unit_price: msg.vote_unit_price,
    };
    CONFIG.save(deps.storage, &config)?;

    let registry = RegistryState {
        next_event_id: 0,
        total_events_closed: 0,
        total_votes_cast: 0,
        total_weight_burned: Uint128::zero(),
    };
    REGISTRY.save(deps.storage, &registry)?;
    SALE_PROCEEDS.save(deps.storage, &Uint128::zero())?;

    Ok(ContractResponse::new()
        .add_message(create_denom_msg)
        .add_attribute("action", "instantiate")
        .add_attribute("contract", "prize-event-handler")
        .add_attribute("vote_denom", vote_denom)
        .add_attribute("admin", info.sender.to_string()))
}

#[entry_point]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<ContractResponse, ContractError> {
    match msg {
        ExecuteMsg::SetupEvent {
            prize_amount,
            prize_denom,
            reference_block,
            winners_distribution,
            voters,
            participants,
        } => execute::setup_event(
            deps,
            env,
            info,
            SetupEventParams {
                prize_amount,
                prize_denom,
                reference_block,
                winners_distribution,
                voters,
                participants,
            },
        ),
        ExecuteMsg::Vote {
            event_id,
            participant,
            weight,
        } => execute::vote(deps, env, info, event_id, participant, weight),
        ExecuteMsg::CloseEvent { event_id } => execute::close_event(deps, env, info, event_id),
        ExecuteMsg::ClaimPrize { denom } => execute::claim_prize(deps, env, info, denom),
        ExecuteMsg::PurchaseVotingTokens {} => execute::purchase_voting_tokens(deps, env, info),
        ExecuteMsg::UpdateConfig { admin } => execute::update_config(deps, env, info, admin),
        ExecuteMsg::WithdrawSaleProceeds { amount, recipient } => {
            execute::withdraw_sale_proceeds(deps, env, info, amount, recipient)
        }
    }
}

#[entry_point]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<ContractResponse, ContractError> {
    match msg.id {
        CLAIM_TRANSFER_REPLY_ID => execute::claim_transfer_failed(deps, msg),
        id => Err(ContractError::UnknownReplyId { id }),
    }
}

#[entry_point]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => query::query_config(deps),
        QueryMsg::RegistryState {} => query::query_registry_state(deps),
        QueryMsg::Event { event_id } => query::query_event(deps, event_id),
        QueryMsg::Events { start_after, limit } => query::query_events(deps, start_after, limit),
        QueryMsg::TallyFor {
            event_id,
            participant,
        } => query::query_tally_for(deps, event_id, participant),
        QueryMsg::Standings { event_id } => query::query_standings(deps, event_id),
        QueryMsg::ClaimBalance { participant, denom } => {
            query::query_claim_balance(deps, participant, denom)
        }
        QueryMsg::Claims {
            participant,
            start_after,
            limit,
        } => query::query_claims(deps, participant, start_after, limit),
        QueryMsg::EventVoters {
            event_id,
            start_after,
            limit,
        } => query::query_event_voters(deps, event_id, start_after, limit),
        QueryMsg::CanVote { event_id, address } => query::query_can_vote(deps, event_id, address),
        QueryMsg::Escrow { denom } => query::query_escrow(deps, denom),
        QueryMsg::VoteBalance { address } => query::query_vote_balance(deps, address),
        QueryMsg::SaleQuote { payment } => query::query_sale_quote(deps, payment),
    }
}

#[entry_point]
pub fn migrate(
    deps: DepsMut,
    _env: Env,
    _msg: MigrateMsg,
) -> Result<ContractResponse, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::Unauthorized {
            reason: "Cannot migrate from different contract type".to_string(),
        });
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(ContractResponse::new()
        .add_attribute("action", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
