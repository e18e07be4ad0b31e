//! Prediction rules: lock clock, completeness, scoring, next action, standings.

mod candidates;
mod lock_clock;
mod next_action;
mod scoring;
mod standings;
mod validation;

pub use candidates::{collect_candidates, PendingPicks};
pub use lock_clock::{is_fixture_locked, is_locked, lock_instant, LOCK_OFFSET_MINUTES};
pub use next_action::{next_action_for, resolve_next_action, NextActionInputs, ParticipantSnapshot};
pub use scoring::{score, PointsBreakdown};
pub use standings::{compute_standings, StandingsEntry};
pub use validation::{has_stale_tie_break, is_complete};
