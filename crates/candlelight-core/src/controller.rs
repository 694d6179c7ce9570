//! The single owner of the persisted record.
//!
//! Front-ends hold a `CandleController` and call its transitions; nothing
//! else writes the record. Every mutating transition persists immediately.
//! A failing store never aborts a transition: the failure is logged and the
//! controller reports itself as degraded.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::burn::{BurnTimer, HoldGesture};
use crate::clock::{instant, Clock};
use crate::content::{ContentResolver, DailyContent, ROLE_WILDCARD};
use crate::daily::{rollover_due, rollover_on};
use crate::error::ValidationError;
use crate::events::Event;
use crate::share::ShareCard;
use crate::storage::{Mode, PersistedState, Sound, StateKey, StateStore};

pub struct CandleController<S: StateStore, C: Clock> {
    store: S,
    clock: C,
    state: PersistedState,
    timer: BurnTimer,
    hold: HoldGesture,
    degraded: bool,
}

impl<S: StateStore, C: Clock> CandleController<S, C> {
    /// Read the persisted record. An unreadable store yields defaults and
    /// marks the controller degraded.
    pub fn new(store: S, clock: C) -> Self {
        let (state, degraded) = match PersistedState::load(&store) {
            Ok(state) => (state, false),
            Err(e) => {
                warn!(error = %e, "state store unreadable, starting from defaults");
                (PersistedState::default(), true)
            }
        };
        Self {
            store,
            clock,
            state,
            timer: BurnTimer::new(),
            hold: HoldGesture::default(),
            degraded,
        }
    }

    pub fn with_hold_threshold(mut self, threshold_ms: u64) -> Self {
        self.hold = HoldGesture::new(threshold_ms);
        self
    }

    /// Role to use when none has been stored yet. Ignored once a role is
    /// persisted, or when `role` is not a valid persona.
    pub fn with_default_role(mut self, role: &str) -> Self {
        let role = role.trim();
        let unset = matches!(self.store.get(StateKey::Role), Ok(None));
        if unset && !role.is_empty() && role != ROLE_WILDCARD {
            self.state.role = role.to_string();
        }
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    pub fn timer(&self) -> &BurnTimer {
        &self.timer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// True once any read or write against the store has failed.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Today's local calendar date.
    pub fn today(&self) -> NaiveDate {
        self.clock.now().date_naive()
    }

    pub fn daily_content(&self, resolver: &ContentResolver<'_>) -> DailyContent {
        resolver.resolve_daily(&self.state.role, self.state.mode, self.today())
    }

    pub fn share_card(&self, resolver: &ContentResolver<'_>) -> ShareCard {
        ShareCard::build(resolver, &self.state.role, self.today())
    }

    pub fn hold_progress(&self) -> f64 {
        self.hold.progress(self.clock.now_ms())
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.timer.state(),
            remaining_ms: self.timer.remaining_ms(),
            total_ms: crate::burn::FULL_BURN_MS,
            wax_pct: self.timer.wax_fraction() * 100.0,
            burn_end_at: self.timer.burn_end_at(),
            role: self.state.role.clone(),
            mode: self.state.mode,
            sound: self.state.sound,
            streak: self.state.streak,
            candles_today: self.state.candles_today,
            persistence_degraded: self.degraded,
            at: instant(self.clock.now_ms()),
        }
    }

    // ── Session start ────────────────────────────────────────────────

    /// Day rollover followed by burn resumption. Call once at startup.
    pub fn init(&mut self) -> Vec<Event> {
        let mut events = Vec::with_capacity(2);
        events.extend(self.rollover());
        events.push(self.resume());
        events
    }

    /// Apply the day rollover and persist it at once, so a restart later the
    /// same day cannot count it twice. Redundant calls are no-ops.
    pub fn rollover(&mut self) -> Option<Event> {
        let now = self.clock.now();
        let today = now.date_naive();
        if !rollover_due(today, &self.state) {
            return None;
        }
        let previous_date = self.state.last_date;
        self.state = rollover_on(today, &self.state);
        self.persist();
        info!(
            date = %today,
            streak = self.state.streak,
            "new day"
        );
        Some(Event::DayRolledOver {
            date: today,
            previous_date,
            streak: self.state.streak,
            at: instant(self.clock.now_ms()),
        })
    }

    /// Pick up a burn or a partly burnt candle persisted by an earlier
    /// session, or start from a full, unlit candle.
    pub fn resume(&mut self) -> Event {
        let now = self.clock.now_ms();
        let (timer, event) =
            BurnTimer::resume(self.state.burn_end_at, self.state.remaining_ms, now);
        self.timer = timer;
        if self.timer.is_lit() {
            debug!(remaining_ms = self.timer.remaining_ms(), "burn resumed");
        } else {
            self.sync_unlit();
            self.persist();
        }
        event
    }

    // ── Burn ─────────────────────────────────────────────────────────

    pub fn ignite(&mut self) -> Option<Event> {
        let event = self.timer.ignite(self.clock.now_ms())?;
        self.hold.release();
        self.state.burn_end_at = self.timer.burn_end_at();
        self.state.remaining_ms = self.timer.remaining_ms();
        self.state.candles_today = self.state.candles_today.saturating_add(1);
        self.persist();
        debug!(
            burn_end_at = self.state.burn_end_at,
            candles_today = self.state.candles_today,
            "candle lit"
        );
        Some(event)
    }

    pub fn extinguish(&mut self) -> Option<Event> {
        let event = self.timer.extinguish(self.clock.now_ms())?;
        self.sync_unlit();
        self.persist();
        debug!(remaining_ms = self.timer.remaining_ms(), "candle extinguished");
        Some(event)
    }

    /// Recompute the remaining time. Natural burnout is persisted and
    /// reported once; counters are left alone.
    pub fn tick(&mut self) -> Option<Event> {
        let event = self.timer.tick(self.clock.now_ms())?;
        self.sync_unlit();
        self.persist();
        debug!("burn expired");
        Some(event)
    }

    pub fn reset(&mut self) -> Event {
        let event = self.timer.reset(self.clock.now_ms());
        self.hold.release();
        self.sync_unlit();
        self.persist();
        event
    }

    // ── Hold-to-ignite ───────────────────────────────────────────────

    /// Start a long press. Ignored while lit.
    pub fn press_hold(&mut self) -> bool {
        if self.timer.is_lit() {
            return false;
        }
        self.hold.press(self.clock.now_ms());
        true
    }

    pub fn release_hold(&mut self) {
        self.hold.release();
    }

    /// Ignite once the press has been held long enough.
    pub fn poll_hold(&mut self) -> Option<Event> {
        if self.hold.poll(self.clock.now_ms()) {
            self.ignite()
        } else {
            None
        }
    }

    // ── Preferences ──────────────────────────────────────────────────

    /// # Errors
    /// Rejects an empty role and the wildcard tag.
    pub fn set_role(&mut self, role: &str) -> Result<(), ValidationError> {
        let role = role.trim();
        if role.is_empty() || role == ROLE_WILDCARD {
            return Err(ValidationError::InvalidValue {
                field: "role".into(),
                message: format!("'{role}' is not a persona"),
            });
        }
        self.state.role = role.to_string();
        self.persist();
        Ok(())
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.state.mode = mode;
        self.persist();
    }

    pub fn toggle_mode(&mut self) -> Mode {
        self.set_mode(self.state.mode.toggled());
        self.state.mode
    }

    pub fn set_sound(&mut self, sound: Sound) {
        self.state.sound = sound;
        self.persist();
    }

    pub fn toggle_sound(&mut self) -> Sound {
        self.set_sound(self.state.sound.toggled());
        self.state.sound
    }

    /// Forget local progress: last date, streak, today's candles and any
    /// burn. Role, mode and sound are kept.
    pub fn wipe(&mut self) -> Event {
        self.state.last_date = None;
        self.state.streak = 0;
        self.state.candles_today = 0;
        info!("local progress wiped");
        self.reset()
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Copy an unlit timer into the record: no deadline, current wax.
    fn sync_unlit(&mut self) {
        self.state.burn_end_at = 0;
        self.state.remaining_ms = self.timer.remaining_ms();
    }

    fn persist(&mut self) {
        if let Err(e) = self.state.save(&mut self.store) {
            warn!(error = %e, "failed to persist state");
            self.degraded = true;
        }
    }
}
