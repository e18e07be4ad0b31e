//! Next-action resolution: pick the single most pressing thing for a participant.

use crate::logic::candidates::collect_candidates;
use crate::logic::lock_clock::is_fixture_locked;
use crate::models::{ActionKind, Candidate, Fixture, NextAction, Prediction, UserId};
use chrono::{DateTime, Utc};

/// Everything the resolver looks at. Build it from one consistent snapshot.
#[derive(Clone, Debug, Default)]
pub struct NextActionInputs<'a> {
    pub open_picks: &'a [Candidate],
    pub open_bracket: &'a [Candidate],
    pub latest_results_updated_utc: Option<DateTime<Utc>>,
    pub seen_results_updated_utc: Option<DateTime<Utc>>,
    pub locked_waiting_deadline_utc: Option<DateTime<Utc>>,
    pub last_submitted_utc: Option<DateTime<Utc>>,
}

/// Resolve the recommended action. First matching rule wins:
///
/// 1. open picks (earliest deadline, then kickoff, stage order, id)
/// 2. open bracket picks (same ordering)
/// 3. unseen results
/// 4. locked fixtures still waiting on a result
/// 5. caught up
pub fn resolve_next_action(inputs: &NextActionInputs<'_>) -> NextAction {
    if let Some(candidate) = most_urgent(inputs.open_picks) {
        return NextAction {
            candidate: Some(candidate.clone()),
            ..NextAction::of_kind(ActionKind::OpenPicks)
        };
    }
    if let Some(candidate) = most_urgent(inputs.open_bracket) {
        return NextAction {
            candidate: Some(candidate.clone()),
            ..NextAction::of_kind(ActionKind::OpenBracket)
        };
    }
    if let Some(latest) = inputs.latest_results_updated_utc {
        let unseen = inputs.seen_results_updated_utc.map_or(true, |seen| seen < latest);
        if unseen {
            return NextAction {
                results_updated_utc: Some(latest),
                ..NextAction::of_kind(ActionKind::ViewResults)
            };
        }
    }
    if let Some(deadline) = inputs.locked_waiting_deadline_utc {
        return NextAction {
            waiting_until_utc: Some(deadline),
            ..NextAction::of_kind(ActionKind::LockedWaiting)
        };
    }
    NextAction {
        last_submitted_utc: inputs.last_submitted_utc,
        ..NextAction::of_kind(ActionKind::CaughtUp)
    }
}

fn most_urgent(candidates: &[Candidate]) -> Option<&Candidate> {
    candidates.iter().min_by_key(|c| c.priority_key())
}

/// One participant's view of the tournament at one instant.
#[derive(Clone, Copy, Debug)]
pub struct ParticipantSnapshot<'a> {
    pub fixtures: &'a [Fixture],
    /// May contain other participants' predictions; only `user_id`'s are used.
    pub predictions: &'a [Prediction],
    pub user_id: UserId,
    pub now: DateTime<Utc>,
    pub seen_results_updated_utc: Option<DateTime<Utc>>,
}

/// Derive resolver inputs from a snapshot and resolve.
pub fn next_action_for(snapshot: &ParticipantSnapshot<'_>) -> NextAction {
    let pending = collect_candidates(
        snapshot.fixtures,
        snapshot.predictions,
        snapshot.user_id,
        snapshot.now,
    );

    let latest_results_updated_utc = snapshot
        .fixtures
        .iter()
        .filter(|f| f.is_finished())
        .map(|f| f.result_updated_utc.unwrap_or(f.kickoff_utc))
        .max();

    let locked_waiting_deadline_utc = snapshot
        .fixtures
        .iter()
        .filter(|f| !f.is_finished() && is_fixture_locked(f, snapshot.now))
        .map(|f| f.kickoff_utc)
        .min();

    let last_submitted_utc = snapshot
        .predictions
        .iter()
        .filter(|p| p.user_id == snapshot.user_id)
        .map(|p| p.updated_at)
        .max();

    resolve_next_action(&NextActionInputs {
        open_picks: &pending.open_picks,
        open_bracket: &pending.open_bracket,
        latest_results_updated_utc,
        seen_results_updated_utc: snapshot.seen_results_updated_utc,
        locked_waiting_deadline_utc,
        last_submitted_utc,
    })
}
