//! Prediction (canonical shape) and RawPrediction (as entered / loaded).

use crate::models::fixture::{DecidedBy, MatchId, Outcome, Side};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant.
pub type UserId = Uuid;

/// A participant's pick for who survives a predicted knockout draw.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TieBreak {
    /// Winner plus the means (extra time or penalties).
    Decided { winner: Side, decided_by: DecidedBy },
    /// Only the side that advances.
    Advances { side: Side },
}

impl TieBreak {
    pub fn winner(&self) -> Side {
        match *self {
            TieBreak::Decided { winner, .. } => winner,
            TieBreak::Advances { side } => side,
        }
    }
}

/// One participant's forecast for one fixture. `(match_id, user_id)` is unique.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub match_id: MatchId,
    pub user_id: UserId,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    /// Declared outcome; derived from the scores when absent.
    pub outcome: Option<Outcome>,
    pub tie_break: Option<TieBreak>,
    pub updated_at: DateTime<Utc>,
}

impl Prediction {
    /// An empty prediction (nothing picked yet).
    pub fn new(match_id: MatchId, user_id: UserId, updated_at: DateTime<Utc>) -> Self {
        Self {
            match_id,
            user_id,
            home_score: None,
            away_score: None,
            outcome: None,
            tie_break: None,
            updated_at,
        }
    }

    pub fn with_scores(mut self, home: u32, away: u32) -> Self {
        self.home_score = Some(home);
        self.away_score = Some(away);
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = Some(tie_break);
        self
    }

    /// Both scores, if both are present.
    pub fn scores(&self) -> Option<(u32, u32)> {
        Some((self.home_score?, self.away_score?))
    }

    /// True when both scores are present and equal.
    pub fn predicts_draw(&self) -> bool {
        matches!(self.scores(), Some((h, a)) if h == a)
    }

    /// Declared outcome, else the outcome implied by the predicted scores.
    pub fn predicted_outcome(&self) -> Option<Outcome> {
        self.outcome
            .or_else(|| self.scores().map(|(h, a)| Outcome::from_scores(h, a)))
    }
}

/// Prediction as it arrives from forms or storage: loose numbers and either of
/// the two tie-break shapes (`winner` + `decided_by`, or a single `advances`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction {
    pub match_id: MatchId,
    pub user_id: UserId,
    #[serde(default)]
    pub home_score: Option<f64>,
    #[serde(default)]
    pub away_score: Option<f64>,
    #[serde(default)]
    pub outcome: Option<Outcome>,
    #[serde(default)]
    pub winner: Option<Side>,
    #[serde(default)]
    pub decided_by: Option<DecidedBy>,
    #[serde(default)]
    pub advances: Option<Side>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RawPrediction {
    /// Translate to the canonical shape. Malformed scores become absent;
    /// `updated_at` falls back to `received_at` when missing.
    pub fn canonicalize(self, received_at: DateTime<Utc>) -> Prediction {
        let tie_break = match (self.winner, self.decided_by, self.advances) {
            (Some(winner), Some(decided_by), _) => Some(TieBreak::Decided { winner, decided_by }),
            (_, _, Some(side)) => Some(TieBreak::Advances { side }),
            _ => None,
        };
        Prediction {
            match_id: self.match_id,
            user_id: self.user_id,
            home_score: sanitize_score(self.home_score),
            away_score: sanitize_score(self.away_score),
            outcome: self.outcome,
            tie_break,
            updated_at: self.updated_at.unwrap_or(received_at),
        }
    }
}

/// Keep only finite, non-negative whole numbers that fit a u32.
pub fn sanitize_score(value: Option<f64>) -> Option<u32> {
    let v = value?;
    if !v.is_finite() || v < 0.0 || v.fract() != 0.0 || v > f64::from(u32::MAX) {
        return None;
    }
    Some(v as u32)
}
