//! Scoring: turn a finished fixture and a complete prediction into points.

use crate::logic::validation::is_complete;
use crate::models::{Fixture, Prediction, ScheduleError, Score, ScoringSchedule, Side, StagePoints};
use serde::{Deserialize, Serialize};

/// Points for one prediction, split by component. `total` saturates at `u32::MAX`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PointsBreakdown {
    pub exact_points: u32,
    pub result_points: u32,
    pub knockout_points: u32,
    pub total: u32,
}

impl PointsBreakdown {
    fn new(exact_points: u32, result_points: u32, knockout_points: u32) -> Self {
        Self {
            exact_points,
            result_points,
            knockout_points,
            total: exact_points
                .saturating_add(result_points)
                .saturating_add(knockout_points),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.total == 0
    }
}

/// Score `prediction` against `fixture` using `schedule`.
///
/// Returns the zero breakdown when the fixture is not finished, has no score,
/// or the prediction is incomplete. Returns `Err` only when the fixture is
/// finished and the schedule cannot price its stage.
pub fn score(
    fixture: &Fixture,
    prediction: &Prediction,
    schedule: &ScoringSchedule,
) -> Result<PointsBreakdown, ScheduleError> {
    let Some(actual) = fixture.score.filter(|_| fixture.is_finished()) else {
        return Ok(PointsBreakdown::default());
    };
    let points = schedule.points_for(fixture.stage)?;
    if !is_complete(fixture, prediction) {
        return Ok(PointsBreakdown::default());
    }
    let Some((home, away)) = prediction.scores() else {
        return Ok(PointsBreakdown::default());
    };

    let exact = match (home == actual.home, away == actual.away) {
        (true, true) => points.exact_score_both,
        (true, false) | (false, true) => points.exact_score_one,
        (false, false) => 0,
    };

    let result = if prediction.predicted_outcome() == Some(actual.outcome()) {
        points.result
    } else {
        0
    };

    let knockout = knockout_points(fixture, actual, prediction, points)?;

    Ok(PointsBreakdown::new(exact, result, knockout))
}

/// Tie-break component. Only a knockout fixture level after regulation and
/// settled by extra time or penalties pays out, and only to a prediction of a
/// level scoreline.
fn knockout_points(
    fixture: &Fixture,
    actual: Score,
    prediction: &Prediction,
    points: &StagePoints,
) -> Result<u32, ScheduleError> {
    if !fixture.stage.is_knockout() || actual.home != actual.away {
        return Ok(0);
    }
    let actual_winner: Side = match (fixture.winner, fixture.decided_by) {
        (Some(winner), Some(_)) => winner,
        _ => return Ok(0),
    };
    let award = points
        .knockout_winner
        .ok_or(ScheduleError::KnockoutPointsMissing(fixture.stage))?;
    let predicted_winner = prediction
        .tie_break
        .filter(|_| prediction.predicts_draw())
        .map(|t| t.winner());
    Ok(if predicted_winner == Some(actual_winner) { award } else { 0 })
}
