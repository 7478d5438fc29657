use cosmwasm_std::{StdError, Uint128};
use prize_events_common::schedule::ScheduleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    // ── Validation ──
    #[error("too many participants: {count} given, at most {max} per event")]
    TooManyParticipants { count: usize, max: usize },

    #[error("invalid winners distribution: percentages sum to {total}, must sum to 100")]
    InvalidDistribution { total: u64 },

    #[error("winners distribution pays {places} places but the event has {participants} participants")]
    DistributionExceedsParticipants { places: usize, participants: usize },

    #[error("participant {address} listed more than once")]
    DuplicateParticipant { address: String },

    #[error("{field} must be greater than zero")]
    ZeroAmount { field: String },

    #[error("vote unit price must be greater than zero")]
    InvalidUnitPrice,

    #[error("payment {payment} is below the vote unit price {unit_price}")]
    PaymentBelowUnitPrice {
        payment: Uint128,
        unit_price: Uint128,
    },

    // ── Authorization ──
    #[error("only the organizer of event {event_id} can close it")]
    OnlyOwnerAllowed { event_id: u64 },

    #[error("{voter} is not on the voter list of event {event_id}")]
    VoterNotAllowed { event_id: u64, voter: String },

    #[error("{participant} is not a participant of event {event_id}")]
    NotValidParticipantForEvent { event_id: u64, participant: String },

    // ── State ──
    #[error("event {event_id} does not exist or is closed")]
    NotAValidEvent { event_id: u64 },

    #[error("event {event_id} is already closed")]
    EventClosed { event_id: u64 },

    #[error("insufficient sale proceeds: requested {requested}, available {available}")]
    InsufficientProceeds {
        requested: Uint128,
        available: Uint128,
    },

    // ── Ledger ──
    #[error("insufficient allowance: no {denom} attached, {needed} required")]
    InsufficientAllowance { denom: String, needed: Uint128 },

    #[error("insufficient balance: {attached}{denom} attached, {needed} required")]
    InsufficientBalance {
        denom: String,
        needed: Uint128,
        attached: Uint128,
    },

    #[error("must send {expected} only, got {got}")]
    WrongDenom { expected: String, got: String },

    #[error("transfer of {amount}{denom} to {recipient} failed: {reason}")]
    TransferFailed {
        recipient: String,
        denom: String,
        amount: Uint128,
        reason: String,
    },

    #[error("unknown reply id {id}")]
    UnknownReplyId { id: u64 },
}

impl From<ScheduleError> for ContractError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::InvalidTotal { total } => ContractError::InvalidDistribution { total },
            ScheduleError::TooManyPlaces {
                places,
                participants,
            } => ContractError::DistributionExceedsParticipants {
                places,
                participants,
            },
        }
    }
}
