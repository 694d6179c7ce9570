//! Long-press gate in front of `ignite`.
//!
//! A hold has to last [`LONG_PRESS_MS`] before it fires. Releasing (pointer
//! up, cancel, blur) drops the pending hold so nothing ignites after the
//! gesture ends.

use serde::{Deserialize, Serialize};

pub const LONG_PRESS_MS: u64 = 800;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldGesture {
    threshold_ms: u64,
    started_at: Option<u64>,
}

impl Default for HoldGesture {
    fn default() -> Self {
        Self::new(LONG_PRESS_MS)
    }
}

impl HoldGesture {
    pub fn new(threshold_ms: u64) -> Self {
        Self {
            threshold_ms,
            started_at: None,
        }
    }

    pub fn threshold_ms(&self) -> u64 {
        self.threshold_ms
    }

    pub fn is_holding(&self) -> bool {
        self.started_at.is_some()
    }

    /// Start a hold. Pressing again restarts it.
    pub fn press(&mut self, now_ms: u64) {
        self.started_at = Some(now_ms);
    }

    pub fn release(&mut self) {
        self.started_at = None;
    }

    /// 0.0 .. 1.0 progress toward firing; 0.0 when not holding.
    pub fn progress(&self, now_ms: u64) -> f64 {
        match self.started_at {
            Some(_) if self.threshold_ms == 0 => 1.0,
            Some(start) => {
                (now_ms.saturating_sub(start) as f64 / self.threshold_ms as f64).min(1.0)
            }
            None => 0.0,
        }
    }

    /// True exactly once per hold, when it has lasted long enough. Firing
    /// ends the hold.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.started_at {
            Some(start) if now_ms.saturating_sub(start) >= self.threshold_ms => {
                self.started_at = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_threshold() {
        let mut hold = HoldGesture::default();
        hold.press(1_000);
        assert!(!hold.poll(1_500));
        assert!((hold.progress(1_400) - 0.5).abs() < f64::EPSILON);
        assert!(hold.poll(1_800));
        assert!(!hold.poll(1_900));
        assert!(!hold.is_holding());
    }

    #[test]
    fn release_cancels() {
        let mut hold = HoldGesture::default();
        hold.press(0);
        hold.release();
        assert!(!hold.poll(10_000));
        assert_eq!(hold.progress(10_000), 0.0);
    }

    #[test]
    fn press_again_restarts() {
        let mut hold = HoldGesture::new(100);
        hold.press(0);
        hold.press(90);
        assert!(!hold.poll(150));
        assert!(hold.poll(190));
    }
}
