//! Candidate (pending work) and NextAction (what to show the participant next).

use crate::models::fixture::MatchId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One unpicked fixture competing for the participant's attention.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: MatchId,
    pub label: String,
    /// Lock instant: last moment the pick can be made.
    pub deadline_utc: DateTime<Utc>,
    pub kickoff_utc: DateTime<Utc>,
    pub stage_order: u8,
}

impl Candidate {
    /// Sort key: deadline, then kickoff, then stage order, then id. Total.
    pub fn priority_key(&self) -> (DateTime<Utc>, DateTime<Utc>, u8, MatchId) {
        (self.deadline_utc, self.kickoff_utc, self.stage_order, self.id)
    }
}

/// Kind of recommended action, highest priority first.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    OpenPicks,
    OpenBracket,
    ViewResults,
    LockedWaiting,
    CaughtUp,
}

/// The single recommended action. Recomputed from scratch on every call.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NextAction {
    pub kind: ActionKind,
    /// The pick to make (OpenPicks / OpenBracket).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate: Option<Candidate>,
    /// Results instant to mark as seen (ViewResults).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_updated_utc: Option<DateTime<Utc>>,
    /// Next locked fixture's kickoff (LockedWaiting).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiting_until_utc: Option<DateTime<Utc>>,
    /// Most recent submission, for "all caught up" display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_submitted_utc: Option<DateTime<Utc>>,
}

impl NextAction {
    pub(crate) fn of_kind(kind: ActionKind) -> Self {
        Self {
            kind,
            candidate: None,
            results_updated_utc: None,
            waiting_until_utc: None,
            last_submitted_utc: None,
        }
    }
}
