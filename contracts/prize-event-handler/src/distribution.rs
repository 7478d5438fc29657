use cosmwasm_std::{StdResult, Storage, Uint128};
use prize_events_common::schedule::{rank_standings, split_prize, undistributed};
use prize_events_common::types::{Award, Standing};

use crate::state::{PrizeEvent, CLAIMS, TALLIES};

/// Result of splitting one event's prize.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub awards: Vec<Award>,
    /// Rounding residue that stays in escrow
    pub undistributed: Uint128,
}

/// Current standings of every participant, ranked.
/// Participants nobody voted for are included with zero weight.
pub fn ranked_standings(storage: &dyn Storage, event: &PrizeEvent) -> StdResult<Vec<Standing>> {
    let standings = event
        .participants
        .iter()
        .map(|participant| {
            let weight = TALLIES
                .may_load(storage, (event.id, participant))?
                .unwrap_or_default();
            Ok(Standing {
                participant: participant.clone(),
                weight,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(rank_standings(standings))
}

/// Rank and split without writing anything.
pub fn compute(storage: &dyn Storage, event: &PrizeEvent) -> StdResult<Distribution> {
    let ranked = ranked_standings(storage, event)?;
    let awards = split_prize(event.prize_amount, &event.winners_distribution, &ranked);
    let undistributed = undistributed(event.prize_amount, &awards);
    Ok(Distribution {
        awards,
        undistributed,
    })
}

/// Compute the split for `event` and credit every award to the claims ledger
/// under the event's prize denom. Called once, when the event closes.
pub fn distribute(storage: &mut dyn Storage, event: &PrizeEvent) -> StdResult<Distribution> {
    let distribution = compute(storage, event)?;

    for award in &distribution.awards {
        CLAIMS.update(
            storage,
            (&award.participant, event.prize_denom.as_str()),
            |balance| -> StdResult<_> {
                Ok(balance.unwrap_or_default().checked_add(award.amount)?)
            },
        )?;
    }

    Ok(distribution)
}
