//! Prediction completeness per stage.

use crate::models::{Fixture, Prediction};

/// Whether `prediction` is complete for `fixture`.
///
/// Group stage: both scores present.
/// Knockout: both scores present, and when the scores are level a tie-break
/// selection too. A stored tie-break on a non-draw prediction is ignored.
pub fn is_complete(fixture: &Fixture, prediction: &Prediction) -> bool {
    let Some((home, away)) = prediction.scores() else {
        return false;
    };
    if fixture.stage.is_knockout() && home == away {
        return prediction.tie_break.is_some();
    }
    true
}

/// Tie-break stored on a prediction whose scores are not level; callers may clear it.
pub fn has_stale_tie_break(prediction: &Prediction) -> bool {
    prediction.tie_break.is_some() && prediction.scores().is_some() && !prediction.predicts_draw()
}
