use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::burn::BurnState;
use crate::storage::{Mode, Sound};

/// Every state change in the system produces an Event.
/// Renderers poll snapshots; audio cues key off the transition events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CandleLit {
        remaining_ms: u64,
        burn_end_at: u64,
        at: DateTime<Utc>,
    },
    CandleExtinguished {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    /// The burn ran out on its own.
    BurnExpired {
        at: DateTime<Utc>,
    },
    BurnReset {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    /// A partly burnt, unlit candle carried over from an earlier session.
    BurnRestored {
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    /// A burn persisted by an earlier session was picked up again.
    BurnResumed {
        remaining_ms: u64,
        burn_end_at: u64,
        at: DateTime<Utc>,
    },
    DayRolledOver {
        date: NaiveDate,
        previous_date: Option<NaiveDate>,
        streak: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: BurnState,
        remaining_ms: u64,
        total_ms: u64,
        /// 0.0 .. 100.0 wax left.
        wax_pct: f64,
        burn_end_at: u64,
        role: String,
        mode: Mode,
        sound: Sound,
        streak: u32,
        candles_today: u32,
        persistence_degraded: bool,
        at: DateTime<Utc>,
    },
}
