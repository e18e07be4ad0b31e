//! Tournament prediction game: library with models, rules engine, and configuration.

pub mod config;
pub mod logic;
pub mod models;

pub use config::{load_schedule, load_schedule_csv, load_schedule_json, ConfigError, ServerConfig};
pub use logic::{
    collect_candidates, compute_standings, has_stale_tie_break, is_complete, is_fixture_locked,
    is_locked, lock_instant, next_action_for, resolve_next_action, score, NextActionInputs,
    ParticipantSnapshot, PendingPicks, PointsBreakdown, StandingsEntry, LOCK_OFFSET_MINUTES,
};
pub use models::{
    ActionKind, Candidate, DecidedBy, Fixture, MatchId, MatchStatus, NextAction, Outcome,
    Prediction, RawPrediction, ScheduleError, Score, ScoringSchedule, Side, Stage, StagePoints,
    TieBreak, UserId,
};
