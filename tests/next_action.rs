//! Integration tests for next-action resolution and candidate collection.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use tournament_predictions::{
    collect_candidates, next_action_for, resolve_next_action, ActionKind, Candidate, Fixture,
    MatchStatus, NextActionInputs, ParticipantSnapshot, Prediction, Side, Stage, TieBreak,
};
use uuid::Uuid;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 14, hour, minute, 0).unwrap()
}

fn candidate(id: u128, deadline: DateTime<Utc>) -> Candidate {
    Candidate {
        id: Uuid::from_u128(id),
        label: format!("match {id}"),
        deadline_utc: deadline,
        kickoff_utc: deadline + Duration::minutes(30),
        stage_order: 0,
    }
}

#[test]
fn open_picks_earliest_deadline_wins() {
    let picks = vec![candidate(1, at(12, 0)), candidate(2, at(9, 0))];
    let action = resolve_next_action(&NextActionInputs {
        open_picks: &picks,
        ..NextActionInputs::default()
    });
    assert_eq!(action.kind, ActionKind::OpenPicks);
    assert_eq!(action.candidate.unwrap().id, Uuid::from_u128(2));
}

#[test]
fn tie_break_chain_kickoff_stage_then_id() {
    let mut a = candidate(5, at(9, 0));
    let mut b = candidate(4, at(9, 0));
    b.kickoff_utc = a.kickoff_utc + Duration::minutes(1);
    let picks = vec![b.clone(), a.clone()];
    let action = resolve_next_action(&NextActionInputs {
        open_picks: &picks,
        ..NextActionInputs::default()
    });
    assert_eq!(action.candidate.unwrap().id, a.id);

    b.kickoff_utc = a.kickoff_utc;
    a.stage_order = 2;
    let picks = vec![a.clone(), b.clone()];
    let action = resolve_next_action(&NextActionInputs {
        open_picks: &picks,
        ..NextActionInputs::default()
    });
    assert_eq!(action.candidate.unwrap().id, b.id);

    a.stage_order = 0;
    let picks = vec![a.clone(), b.clone()];
    let action = resolve_next_action(&NextActionInputs {
        open_picks: &picks,
        ..NextActionInputs::default()
    });
    assert_eq!(action.candidate.unwrap().id, Uuid::from_u128(4));
}

#[test]
fn picks_outrank_bracket_outranks_results() {
    let picks = vec![candidate(1, at(20, 0))];
    let bracket = vec![candidate(2, at(8, 0))];
    let mut inputs = NextActionInputs {
        open_picks: &picks,
        open_bracket: &bracket,
        latest_results_updated_utc: Some(at(10, 0)),
        locked_waiting_deadline_utc: Some(at(11, 0)),
        ..NextActionInputs::default()
    };
    assert_eq!(resolve_next_action(&inputs).kind, ActionKind::OpenPicks);

    inputs.open_picks = &[];
    let action = resolve_next_action(&inputs);
    assert_eq!(action.kind, ActionKind::OpenBracket);
    assert_eq!(action.candidate.unwrap().id, Uuid::from_u128(2));

    inputs.open_bracket = &[];
    assert_eq!(resolve_next_action(&inputs).kind, ActionKind::ViewResults);
}

#[test]
fn unseen_results_when_newer_than_marker() {
    let inputs = NextActionInputs {
        latest_results_updated_utc: Some(at(10, 0)),
        seen_results_updated_utc: Some(at(9, 0)),
        ..NextActionInputs::default()
    };
    let action = resolve_next_action(&inputs);
    assert_eq!(action.kind, ActionKind::ViewResults);
    assert_eq!(action.results_updated_utc, Some(at(10, 0)));

    let never_seen = NextActionInputs {
        seen_results_updated_utc: None,
        ..inputs.clone()
    };
    assert_eq!(resolve_next_action(&never_seen).kind, ActionKind::ViewResults);

    let seen = NextActionInputs {
        seen_results_updated_utc: Some(at(10, 0)),
        ..inputs
    };
    assert_eq!(resolve_next_action(&seen).kind, ActionKind::CaughtUp);
}

#[test]
fn locked_waiting_then_caught_up() {
    let inputs = NextActionInputs {
        latest_results_updated_utc: Some(at(10, 0)),
        seen_results_updated_utc: Some(at(10, 0)),
        locked_waiting_deadline_utc: Some(at(18, 0)),
        last_submitted_utc: Some(at(7, 0)),
        ..NextActionInputs::default()
    };
    let action = resolve_next_action(&inputs);
    assert_eq!(action.kind, ActionKind::LockedWaiting);
    assert_eq!(action.waiting_until_utc, Some(at(18, 0)));

    let action = resolve_next_action(&NextActionInputs {
        locked_waiting_deadline_utc: None,
        ..inputs
    });
    assert_eq!(action.kind, ActionKind::CaughtUp);
    assert_eq!(action.last_submitted_utc, Some(at(7, 0)));
}

#[test]
fn candidates_skip_locked_and_completed_fixtures() {
    let user = Uuid::from_u128(100);
    let other = Uuid::from_u128(200);
    let now = at(12, 0);

    let locked = Fixture::new(Stage::Group, at(12, 20));
    let done = Fixture::new(Stage::Group, at(15, 0)).with_teams("Spain", "Japan");
    let open_group = Fixture::new(Stage::Group, at(16, 0)).with_teams("Brazil", "Serbia");
    let open_knockout = Fixture::new(Stage::RoundOf16, at(20, 0));
    let mut early_start = Fixture::new(Stage::Group, at(21, 0));
    early_start.status = MatchStatus::InPlay;

    let fixtures = vec![
        locked.clone(),
        done.clone(),
        open_group.clone(),
        open_knockout.clone(),
        early_start,
    ];
    let predictions = vec![
        Prediction::new(done.id, user, at(8, 0)).with_scores(1, 0),
        // Someone else's pick does not count for `user`.
        Prediction::new(open_group.id, other, at(8, 0)).with_scores(2, 0),
        // Level knockout pick without a tie-break is still pending.
        Prediction::new(open_knockout.id, user, at(8, 0)).with_scores(1, 1),
    ];

    let pending = collect_candidates(&fixtures, &predictions, user, now);
    assert_eq!(pending.open_picks.len(), 1);
    assert_eq!(pending.open_picks[0].id, open_group.id);
    assert_eq!(pending.open_picks[0].label, "Brazil vs Serbia");
    assert_eq!(pending.open_picks[0].deadline_utc, at(15, 30));
    assert_eq!(pending.open_bracket.len(), 1);
    assert_eq!(pending.open_bracket[0].id, open_knockout.id);
    assert_eq!(pending.open_bracket[0].stage_order, Stage::RoundOf16.order());
}

#[test]
fn snapshot_moves_from_picks_to_results_after_deadline() {
    let user = Uuid::from_u128(1);
    let mut finished = Fixture::new(Stage::Group, at(9, 0)).finished(1, 0);
    finished.result_updated_utc = Some(at(11, 0));
    let upcoming = Fixture::new(Stage::Group, at(14, 0));
    let fixtures = vec![finished, upcoming.clone()];
    let predictions = vec![Prediction::new(upcoming.id, user, at(7, 0))];

    let snapshot = ParticipantSnapshot {
        fixtures: &fixtures,
        predictions: &predictions,
        user_id: user,
        now: at(12, 0),
        seen_results_updated_utc: None,
    };
    let before = next_action_for(&snapshot);
    assert_eq!(before.kind, ActionKind::OpenPicks);
    assert_eq!(before.candidate.as_ref().unwrap().id, upcoming.id);

    let after = next_action_for(&ParticipantSnapshot {
        now: at(13, 30),
        ..snapshot
    });
    assert_eq!(after.kind, ActionKind::ViewResults);
    assert_eq!(after.results_updated_utc, Some(at(11, 0)));

    let seen = next_action_for(&ParticipantSnapshot {
        now: at(13, 30),
        seen_results_updated_utc: Some(at(11, 0)),
        ..snapshot
    });
    assert_eq!(seen.kind, ActionKind::LockedWaiting);
    assert_eq!(seen.waiting_until_utc, Some(at(14, 0)));
    assert_eq!(seen.last_submitted_utc, None);
}

#[test]
fn unstamped_finished_fixture_counts_as_updated_at_kickoff() {
    let user = Uuid::from_u128(1);
    let fixtures = vec![Fixture::new(Stage::Group, at(9, 0)).finished(2, 2)];
    let snapshot = ParticipantSnapshot {
        fixtures: &fixtures,
        predictions: &[],
        user_id: user,
        now: at(12, 0),
        seen_results_updated_utc: None,
    };
    let action = next_action_for(&snapshot);
    assert_eq!(action.kind, ActionKind::ViewResults);
    assert_eq!(action.results_updated_utc, Some(at(9, 0)));

    let seen = next_action_for(&ParticipantSnapshot {
        seen_results_updated_utc: Some(at(9, 0)),
        ..snapshot
    });
    assert_eq!(seen.kind, ActionKind::CaughtUp);
}

#[test]
fn snapshot_all_done_is_caught_up() {
    let user = Uuid::from_u128(1);
    let fixture = Fixture::new(Stage::Final, at(20, 0));
    let fixtures = vec![fixture.clone()];
    let predictions = vec![Prediction::new(fixture.id, user, at(9, 15))
        .with_scores(0, 0)
        .with_tie_break(TieBreak::Advances { side: Side::Home })];
    let action = next_action_for(&ParticipantSnapshot {
        fixtures: &fixtures,
        predictions: &predictions,
        user_id: user,
        now: at(10, 0),
        seen_results_updated_utc: None,
    });
    assert_eq!(action.kind, ActionKind::CaughtUp);
    assert_eq!(action.last_submitted_utc, Some(at(9, 15)));
}

proptest! {
    #[test]
    fn resolve_is_deterministic_and_earliest_first(
        offsets in proptest::collection::vec((0i64..600, 0u8..3), 1..8),
        reverse in any::<bool>(),
    ) {
        let mut picks: Vec<Candidate> = offsets
            .iter()
            .enumerate()
            .map(|(i, &(mins, stage))| {
                let mut c = candidate(i as u128, at(6, 0) + Duration::minutes(mins));
                c.stage_order = stage;
                c
            })
            .collect();
        if reverse {
            picks.reverse();
        }
        let inputs = NextActionInputs { open_picks: &picks, ..NextActionInputs::default() };
        let first = resolve_next_action(&inputs);
        prop_assert_eq!(&first, &resolve_next_action(&inputs));

        let chosen = first.candidate.unwrap();
        let earliest = picks.iter().map(|c| c.deadline_utc).min().unwrap();
        prop_assert_eq!(chosen.deadline_utc, earliest);
        prop_assert!(picks.iter().all(|c| c.priority_key() >= chosen.priority_key()));
    }
}
