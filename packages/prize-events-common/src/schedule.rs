use cosmwasm_std::Uint128;

use crate::types::{Award, Standing};

/// A winners distribution must allocate exactly this many percent.
pub const PERCENT_TOTAL: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Percentages do not add up to 100.
    InvalidTotal { total: u64 },
    /// Empty schedule, or more paid places than participants.
    TooManyPlaces { places: usize, participants: usize },
}

/// Check a winners distribution against the participant roster.
///
/// The total is checked before the length so that an empty schedule reports
/// a total of 0 rather than a place count.
pub fn validate_schedule(schedule: &[u32], participants: usize) -> Result<(), ScheduleError> {
    let total: u64 = schedule.iter().map(|p| *p as u64).sum();
    if total != PERCENT_TOTAL {
        return Err(ScheduleError::InvalidTotal { total });
    }
    if schedule.is_empty() || schedule.len() > participants {
        return Err(ScheduleError::TooManyPlaces {
            places: schedule.len(),
            participants,
        });
    }
    Ok(())
}

/// Order standings by descending weight. Equal weights fall back to the
/// ascending participant address so the ranking is reproducible.
pub fn rank_standings(mut standings: Vec<Standing>) -> Vec<Standing> {
    standings.sort_by(|a, b| {
        b.weight
            .cmp(&a.weight)
            .then_with(|| a.participant.as_str().cmp(b.participant.as_str()))
    });
    standings
}

/// Split `prize` over the ranked standings following `schedule`.
///
/// Rank `k` receives `floor(prize * schedule[k] / 100)`; ranks past the end of
/// the schedule receive nothing and zero-amount shares are omitted. The
/// schedule must have passed [`validate_schedule`], which bounds every entry
/// by 100 and keeps the multiplication inside `Uint128`.
pub fn split_prize(prize: Uint128, schedule: &[u32], ranked: &[Standing]) -> Vec<Award> {
    ranked
        .iter()
        .zip(schedule.iter())
        .enumerate()
        .filter_map(|(rank, (standing, percentage))| {
            let amount = prize.multiply_ratio(*percentage as u128, PERCENT_TOTAL as u128);
            if amount.is_zero() {
                return None;
            }
            Some(Award {
                rank: rank as u32,
                participant: standing.participant.clone(),
                percentage: *percentage,
                amount,
            })
        })
        .collect()
}

/// Rounding residue left over after a split.
pub fn undistributed(prize: Uint128, awards: &[Award]) -> Uint128 {
    let credited = awards
        .iter()
        .fold(Uint128::zero(), |acc, award| acc + award.amount);
    prize.saturating_sub(credited)
}
