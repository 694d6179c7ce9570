//! Once-per-day streak and candle-count rollover.

use chrono::{DateTime, NaiveDate, TimeZone};

use crate::storage::PersistedState;

/// Apply the day rollover for `now` (in its own offset) to `persisted`.
///
/// Same calendar day: unchanged. Otherwise the streak continues only when
/// the last activity was exactly yesterday and resets to 1 for any gap or a
/// first run; the daily candle count starts over.
pub fn rollover<Tz: TimeZone>(now: &DateTime<Tz>, persisted: &PersistedState) -> PersistedState {
    rollover_on(now.date_naive(), persisted)
}

/// [`rollover`] for an already-computed local date.
pub fn rollover_on(today: NaiveDate, persisted: &PersistedState) -> PersistedState {
    if persisted.last_date == Some(today) {
        return persisted.clone();
    }

    let was_yesterday = persisted.last_date.is_some() && persisted.last_date == today.pred_opt();
    PersistedState {
        streak: if was_yesterday {
            persisted.streak.saturating_add(1)
        } else {
            1
        },
        candles_today: 0,
        last_date: Some(today),
        ..persisted.clone()
    }
}

/// True when `rollover` would change anything.
pub fn rollover_due(today: NaiveDate, persisted: &PersistedState) -> bool {
    persisted.last_date != Some(today)
}
