//! Team strength from a roster: the floor-averaged category ratings of the
//! top players by overall.

use std::cmp::Reverse;

use roster_models::player::{PlayerAttributes, PlayerId};
use roster_models::team::{ScoreVector, SCORE_LEN};

use crate::error::EngineError;
use crate::reference::ReferenceData;

/// How many players, ranked by overall, count toward a team's score.
pub const TOP_PLAYERS: usize = 8;

/// Rank a roster by overall rating, highest first, and keep the top
/// [`TOP_PLAYERS`]. Ties keep their roster order. Duplicate entries are
/// ranked as separate players.
pub fn select_top_players<'a>(
    roster: &'a [PlayerId],
    reference: &'a ReferenceData,
) -> Result<Vec<(&'a PlayerId, &'a PlayerAttributes)>, EngineError> {
    let mut ranked = roster
        .iter()
        .map(|id| {
            reference
                .player(id)
                .map(|attrs| (id, attrs))
                .ok_or_else(|| EngineError::UnknownPlayer(id.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    // sort_by_key is stable
    ranked.sort_by_key(|(_, attrs)| Reverse(attrs.overall));
    ranked.truncate(TOP_PLAYERS);
    Ok(ranked)
}

/// Compute a roster's score vector.
///
/// Each category is summed over the selected players and floor-divided by
/// the number selected. An empty roster scores all zeros. Any player missing
/// from the attribute table fails the whole computation.
pub fn compute_score(
    roster: &[PlayerId],
    reference: &ReferenceData,
) -> Result<ScoreVector, EngineError> {
    let top = select_top_players(roster, reference)?;
    if top.is_empty() {
        return Ok(ScoreVector::zeros());
    }

    let mut sums = [0u64; SCORE_LEN];
    for (_, attrs) in &top {
        for (sum, value) in sums.iter_mut().zip(attrs.categories()) {
            *sum += u64::from(value);
        }
    }

    let count = top.len() as u64;
    Ok(ScoreVector::from_categories(
        sums.map(|sum| (sum / count) as u32),
    ))
}
