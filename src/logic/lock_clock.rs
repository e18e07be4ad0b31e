//! Lock clock: predictions freeze a fixed time before kickoff.

use crate::models::{Fixture, MatchStatus};
use chrono::{DateTime, Duration, Utc};

/// Minutes before kickoff at which predictions lock.
pub const LOCK_OFFSET_MINUTES: i64 = 30;

/// Instant after which a prediction for a fixture kicking off at `kickoff_utc`
/// can no longer change.
pub fn lock_instant(kickoff_utc: DateTime<Utc>) -> DateTime<Utc> {
    kickoff_utc - Duration::minutes(LOCK_OFFSET_MINUTES)
}

/// Clock-only lock check. `now` always comes from the caller.
pub fn is_locked(kickoff_utc: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now >= lock_instant(kickoff_utc)
}

/// Lock check that also honours fixture status: a fixture in play or finished
/// is locked even if the clock says otherwise (early kickoff).
pub fn is_fixture_locked(fixture: &Fixture, now: DateTime<Utc>) -> bool {
    matches!(fixture.status, MatchStatus::InPlay | MatchStatus::Finished)
        || is_locked(fixture.kickoff_utc, now)
}
