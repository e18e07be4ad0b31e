//! Standings: score every prediction and rank participants.

use crate::logic::scoring::score;
use crate::logic::validation::is_complete;
use crate::models::{Fixture, MatchId, Prediction, ScheduleError, ScoringSchedule, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One participant's aggregated points.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub user_id: UserId,
    /// Saturates at `u32::MAX`.
    pub total: u32,
    /// Predictions that hit both scores.
    pub exact_hits: u32,
    pub outcome_hits: u32,
    pub knockout_hits: u32,
    /// Predictions on finished fixtures (scored, possibly for zero).
    pub scored_predictions: u32,
}

impl StandingsEntry {
    fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            total: 0,
            exact_hits: 0,
            outcome_hits: 0,
            knockout_hits: 0,
            scored_predictions: 0,
        }
    }
}

/// Score all predictions and rank: total desc, exact hits desc, user id asc.
///
/// Predictions for unknown fixtures are skipped. A finished fixture whose stage
/// the schedule does not cover fails the whole table.
pub fn compute_standings(
    fixtures: &[Fixture],
    predictions: &[Prediction],
    schedule: &ScoringSchedule,
) -> Result<Vec<StandingsEntry>, ScheduleError> {
    let by_id: HashMap<MatchId, &Fixture> = fixtures.iter().map(|f| (f.id, f)).collect();
    let mut entries: HashMap<UserId, StandingsEntry> = HashMap::new();

    for prediction in predictions {
        let entry = entries
            .entry(prediction.user_id)
            .or_insert_with(|| StandingsEntry::new(prediction.user_id));
        let Some(fixture) = by_id.get(&prediction.match_id) else {
            continue;
        };
        if !fixture.is_finished() {
            continue;
        }
        let points = score(fixture, prediction, schedule)?;
        let exact_both = is_complete(fixture, prediction)
            && prediction.scores() == fixture.score.map(|s| (s.home, s.away));
        entry.scored_predictions += 1;
        entry.total = entry.total.saturating_add(points.total);
        if exact_both {
            entry.exact_hits += 1;
        }
        if points.result_points > 0 {
            entry.outcome_hits += 1;
        }
        if points.knockout_points > 0 {
            entry.knockout_hits += 1;
        }
    }

    let mut table: Vec<StandingsEntry> = entries.into_values().collect();
    table.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then(b.exact_hits.cmp(&a.exact_hits))
            .then(a.user_id.cmp(&b.user_id))
    });
    Ok(table)
}
