//! Burn timer implementation.
//!
//! The burn timer is a wall-clock-based state machine. It does not use
//! internal threads - the caller passes the current time to every transition
//! and is responsible for calling `tick()` periodically while lit.
//!
//! ## State Transitions
//!
//! ```text
//! Unlit -ignite-> Lit -extinguish-> Unlit
//!                 Lit -tick (remaining hits 0)-> Unlit   (natural burnout)
//! any   -reset->  Unlit with a full candle
//! ```
//!
//! The absolute end time is the source of truth: remaining time is always
//! `burn_end_at - now`, recomputed on each observation and never decremented,
//! so reloads, sleep and missed ticks cannot make it drift.

use serde::{Deserialize, Serialize};

use crate::clock::instant;
use crate::events::Event;

/// Full burn: 10 minutes.
pub const FULL_BURN_MS: u64 = 10 * 60 * 1000;

/// Design target for the tick cadence while lit.
pub const TICK_INTERVAL_MS: u64 = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BurnState {
    Unlit,
    Lit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurnTimer {
    state: BurnState,
    /// Remaining burn in milliseconds as of the last observation.
    remaining_ms: u64,
    /// Epoch ms at which the current burn ends; 0 when unlit.
    burn_end_at: u64,
}

impl Default for BurnTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl BurnTimer {
    /// An unlit, full candle.
    pub fn new() -> Self {
        Self {
            state: BurnState::Unlit,
            remaining_ms: FULL_BURN_MS,
            burn_end_at: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> BurnState {
        self.state
    }

    pub fn is_lit(&self) -> bool {
        self.state == BurnState::Lit
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn burn_end_at(&self) -> u64 {
        self.burn_end_at
    }

    /// An unlit candle with no wax left.
    pub fn is_spent(&self) -> bool {
        !self.is_lit() && self.remaining_ms == 0
    }

    /// 0.0 .. 1.0 wax left.
    pub fn wax_fraction(&self) -> f64 {
        (self.remaining_ms as f64 / FULL_BURN_MS as f64).clamp(0.0, 1.0)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Light the candle for whatever wax is left. No-op when already lit.
    /// A spent candle lights with a deadline of `now` and expires on the
    /// next tick.
    pub fn ignite(&mut self, now_ms: u64) -> Option<Event> {
        if self.is_lit() {
            return None;
        }
        self.state = BurnState::Lit;
        self.burn_end_at = now_ms.saturating_add(self.remaining_ms);
        Some(Event::CandleLit {
            remaining_ms: self.remaining_ms,
            burn_end_at: self.burn_end_at,
            at: instant(now_ms),
        })
    }

    /// Put the flame out, keeping the unburnt wax. No-op when unlit.
    pub fn extinguish(&mut self, now_ms: u64) -> Option<Event> {
        if !self.is_lit() {
            return None;
        }
        self.remaining_ms = self.burn_end_at.saturating_sub(now_ms);
        self.burn_end_at = 0;
        self.state = BurnState::Unlit;
        Some(Event::CandleExtinguished {
            remaining_ms: self.remaining_ms,
            at: instant(now_ms),
        })
    }

    /// Call periodically while lit. Returns `Some(Event::BurnExpired)` exactly
    /// once, when the burn runs out.
    pub fn tick(&mut self, now_ms: u64) -> Option<Event> {
        if !self.is_lit() {
            return None;
        }
        self.remaining_ms = self.burn_end_at.saturating_sub(now_ms);
        if self.remaining_ms > 0 {
            return None;
        }
        self.burn_end_at = 0;
        self.state = BurnState::Unlit;
        Some(Event::BurnExpired {
            at: instant(now_ms),
        })
    }

    /// Back to an unlit, full candle from any state.
    pub fn reset(&mut self, now_ms: u64) -> Event {
        *self = Self::new();
        Event::BurnReset {
            remaining_ms: self.remaining_ms,
            at: instant(now_ms),
        }
    }

    /// Rebuild the timer from the persisted end time and remaining wax at
    /// startup.
    ///
    /// A deadline in the future resumes the burn. With no deadline, a partly
    /// burnt candle comes back unlit with its wax. Anything else (an expired
    /// deadline, a spent or full candle) resets.
    pub fn resume(burn_end_at: u64, remaining_ms: u64, now_ms: u64) -> (Self, Event) {
        if burn_end_at > now_ms {
            let timer = Self {
                state: BurnState::Lit,
                remaining_ms: burn_end_at - now_ms,
                burn_end_at,
            };
            let event = Event::BurnResumed {
                remaining_ms: timer.remaining_ms,
                burn_end_at,
                at: instant(now_ms),
            };
            (timer, event)
        } else if burn_end_at == 0 && remaining_ms > 0 && remaining_ms < FULL_BURN_MS {
            let timer = Self {
                state: BurnState::Unlit,
                remaining_ms,
                burn_end_at: 0,
            };
            let event = Event::BurnRestored {
                remaining_ms,
                at: instant(now_ms),
            };
            (timer, event)
        } else {
            let mut timer = Self::new();
            let event = timer.reset(now_ms);
            (timer, event)
        }
    }
}

/// `mm:ss`, rounding down to whole seconds.
pub fn format_mmss(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: u64 = 1_704_096_000_000;
    const MINUTE: u64 = 60_000;

    #[test]
    fn ignite_sets_deadline() {
        let mut timer = BurnTimer::new();
        let event = timer.ignite(T0);
        assert!(matches!(event, Some(Event::CandleLit { .. })));
        assert_eq!(timer.state(), BurnState::Lit);
        assert_eq!(timer.burn_end_at(), T0 + FULL_BURN_MS);
    }

    #[test]
    fn ignite_while_lit_is_ignored() {
        let mut timer = BurnTimer::new();
        timer.ignite(T0);
        assert!(timer.ignite(T0 + MINUTE).is_none());
        assert_eq!(timer.burn_end_at(), T0 + FULL_BURN_MS);
    }

    #[test]
    fn extinguish_keeps_remaining_wax() {
        let mut timer = BurnTimer::new();
        timer.ignite(T0);
        timer.extinguish(T0 + 3 * MINUTE);
        assert_eq!(timer.state(), BurnState::Unlit);
        assert_eq!(timer.remaining_ms(), 7 * MINUTE);
        assert_eq!(timer.burn_end_at(), 0);
        assert!(timer.extinguish(T0 + 4 * MINUTE).is_none());
    }

    #[test]
    fn relight_continues_from_remaining() {
        let mut timer = BurnTimer::new();
        timer.ignite(T0);
        timer.extinguish(T0 + 3 * MINUTE);
        let relit_at = T0 + 30 * MINUTE;
        timer.ignite(relit_at);
        assert_eq!(timer.burn_end_at(), relit_at + 7 * MINUTE);
    }

    #[test]
    fn tick_recomputes_from_deadline() {
        let mut timer = BurnTimer::new();
        timer.ignite(T0);
        // A long gap between ticks (sleep) must not distort the remaining time.
        assert!(timer.tick(T0 + 250).is_none());
        assert!(timer.tick(T0 + 4 * MINUTE).is_none());
        assert_eq!(timer.remaining_ms(), 6 * MINUTE);
    }

    #[test]
    fn natural_burnout_fires_once() {
        let mut timer = BurnTimer::new();
        timer.ignite(T0);
        let mut expiries = 0;
        let mut now = T0;
        while now <= T0 + FULL_BURN_MS + 1_000 {
            if let Some(Event::BurnExpired { .. }) = timer.tick(now) {
                expiries += 1;
            }
            now += TICK_INTERVAL_MS;
        }
        assert_eq!(expiries, 1);
        assert_eq!(timer.state(), BurnState::Unlit);
        assert_eq!(timer.remaining_ms(), 0);
        assert_eq!(timer.burn_end_at(), 0);
        assert!(timer.is_spent());
    }

    #[test]
    fn spent_candle_lights_and_expires_on_next_tick() {
        let mut timer = BurnTimer::new();
        timer.ignite(T0);
        timer.tick(T0 + FULL_BURN_MS);
        assert!(timer.is_spent());

        let relit_at = T0 + FULL_BURN_MS + 1;
        let event = timer.ignite(relit_at);
        assert_eq!(
            event,
            Some(Event::CandleLit {
                remaining_ms: 0,
                burn_end_at: relit_at,
                at: instant(relit_at),
            })
        );
        assert!(matches!(
            timer.tick(relit_at + TICK_INTERVAL_MS),
            Some(Event::BurnExpired { .. })
        ));
        assert!(timer.tick(relit_at + 2 * TICK_INTERVAL_MS).is_none());

        timer.reset(relit_at + MINUTE);
        assert_eq!(timer.remaining_ms(), FULL_BURN_MS);
    }

    #[test]
    fn reset_from_lit() {
        let mut timer = BurnTimer::new();
        timer.ignite(T0);
        let event = timer.reset(T0 + MINUTE);
        assert_eq!(
            event,
            Event::BurnReset {
                remaining_ms: FULL_BURN_MS,
                at: instant(T0 + MINUTE),
            }
        );
        assert_eq!(timer.state(), BurnState::Unlit);
        assert_eq!(timer.burn_end_at(), 0);
    }

    #[test]
    fn resume_future_deadline() {
        let (timer, event) = BurnTimer::resume(T0 + 2 * MINUTE, FULL_BURN_MS, T0);
        assert_eq!(timer.state(), BurnState::Lit);
        assert_eq!(timer.remaining_ms(), 2 * MINUTE);
        assert!(matches!(event, Event::BurnResumed { .. }));
    }

    #[test]
    fn resume_keeps_partly_burnt_unlit_candle() {
        let (timer, event) = BurnTimer::resume(0, 7 * MINUTE, T0);
        assert_eq!(timer.state(), BurnState::Unlit);
        assert_eq!(timer.remaining_ms(), 7 * MINUTE);
        assert_eq!(timer.burn_end_at(), 0);
        assert_eq!(
            event,
            Event::BurnRestored {
                remaining_ms: 7 * MINUTE,
                at: instant(T0),
            }
        );
    }

    #[test]
    fn resume_past_deadline_spent_or_full_resets() {
        let cases = [
            (0, FULL_BURN_MS),
            (0, 0),
            (0, FULL_BURN_MS + 1),
            (T0 - 1, 3 * MINUTE),
            (T0, 3 * MINUTE),
        ];
        for (end, remaining) in cases {
            let (timer, event) = BurnTimer::resume(end, remaining, T0);
            assert_eq!(timer.state(), BurnState::Unlit);
            assert_eq!(timer.remaining_ms(), FULL_BURN_MS);
            assert!(matches!(event, Event::BurnReset { .. }));
        }
    }

    #[test]
    fn mmss_formatting() {
        assert_eq!(format_mmss(FULL_BURN_MS), "10:00");
        assert_eq!(format_mmss(7 * MINUTE + 5_999), "07:05");
        assert_eq!(format_mmss(0), "00:00");
    }

    #[test]
    fn wax_fraction_tracks_remaining() {
        let mut timer = BurnTimer::new();
        assert_eq!(timer.wax_fraction(), 1.0);
        timer.ignite(T0);
        timer.tick(T0 + 5 * MINUTE);
        assert!((timer.wax_fraction() - 0.5).abs() < f64::EPSILON);
    }
}
