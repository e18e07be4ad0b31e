//! Data structures for the prediction game: fixtures, predictions, scoring schedule, actions.

mod action;
mod fixture;
mod prediction;
mod schedule;

pub use action::{ActionKind, Candidate, NextAction};
pub use fixture::{DecidedBy, Fixture, MatchId, MatchStatus, Outcome, Score, Side, Stage};
pub use prediction::{sanitize_score, Prediction, RawPrediction, TieBreak, UserId};
pub use schedule::{ScheduleError, ScoringSchedule, StagePoints};
