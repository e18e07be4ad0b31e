//! Pending work: unlocked fixtures a participant has not completed a pick for.

use crate::logic::lock_clock::{is_fixture_locked, lock_instant};
use crate::logic::validation::is_complete;
use crate::models::{Candidate, Fixture, MatchId, Prediction, UserId};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Candidates split by stage kind: group picks and knockout (bracket) picks.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PendingPicks {
    pub open_picks: Vec<Candidate>,
    pub open_bracket: Vec<Candidate>,
}

impl PendingPicks {
    pub fn is_empty(&self) -> bool {
        self.open_picks.is_empty() && self.open_bracket.is_empty()
    }
}

/// Collect `user_id`'s pending picks at `now`. A fixture is pending while it
/// is unlocked and has no complete prediction from that participant.
pub fn collect_candidates(
    fixtures: &[Fixture],
    predictions: &[Prediction],
    user_id: UserId,
    now: DateTime<Utc>,
) -> PendingPicks {
    let mine: HashMap<MatchId, &Prediction> = predictions
        .iter()
        .filter(|p| p.user_id == user_id)
        .map(|p| (p.match_id, p))
        .collect();

    let mut pending = PendingPicks::default();
    for fixture in fixtures {
        if is_fixture_locked(fixture, now) {
            continue;
        }
        let done = mine
            .get(&fixture.id)
            .is_some_and(|p| is_complete(fixture, p));
        if done {
            continue;
        }
        let candidate = Candidate {
            id: fixture.id,
            label: fixture.label(),
            deadline_utc: lock_instant(fixture.kickoff_utc),
            kickoff_utc: fixture.kickoff_utc,
            stage_order: fixture.stage.order(),
        };
        if fixture.stage.is_knockout() {
            pending.open_bracket.push(candidate);
        } else {
            pending.open_picks.push(candidate);
        }
    }
    pending
}
