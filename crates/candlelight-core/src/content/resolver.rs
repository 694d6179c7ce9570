//! Resolve the prayer and prediction shown for a role on a given day.
//!
//! Both lookups use the seed `"{date}::{role}"` against their own pool, so
//! the two selections are independent. The mode only picks which variant of
//! the chosen prayer is surfaced and which title is shown.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::library::{fallback_predictions, fallback_prayers};
use super::{ContentItem, ContentLibrary, Locale, Prayer, Prediction};
use crate::picker::pick;
use crate::storage::Mode;

const DEFAULT_PREDICTION_EMOJI: &str = "🔮";

/// Plain data consumed by renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyContent {
    pub prayer_title: String,
    pub prayer_text: String,
    pub prediction_emoji: String,
    pub prediction_text: String,
}

/// `YYYY-MM-DD::role`.
pub fn daily_seed(date: NaiveDate, role: &str) -> String {
    format!("{}::{role}", date.format("%Y-%m-%d"))
}

/// Items tagged with `role` or the wildcard; if none, the wildcard-only
/// subset (which may itself be empty).
fn role_pool<'a, T: ContentItem>(items: &'a [T], role: &str) -> Vec<&'a T> {
    let pool: Vec<&T> = items.iter().filter(|i| i.matches_role(role)).collect();
    if !pool.is_empty() {
        return pool;
    }
    items.iter().filter(|i| i.is_wildcard()).collect()
}

fn select<'a, T: ContentItem>(items: &'a [T], role: &str, seed: &str) -> Option<&'a T> {
    let pool = role_pool(items, role);
    pick(&pool, seed).ok().copied()
}

/// Resolver bound to a library and a label locale.
#[derive(Debug, Clone, Copy)]
pub struct ContentResolver<'a> {
    prayers: &'a [Prayer],
    predictions: &'a [Prediction],
    locale: Locale,
}

impl<'a> ContentResolver<'a> {
    pub fn new(library: &'a ContentLibrary, locale: Locale) -> Self {
        Self::from_pools(library.prayers(), library.predictions(), locale)
    }

    pub fn from_pools(
        prayers: &'a [Prayer],
        predictions: &'a [Prediction],
        locale: Locale,
    ) -> Self {
        Self {
            prayers,
            predictions,
            locale,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn prayer_for(&self, role: &str, date: NaiveDate) -> Prayer {
        let seed = daily_seed(date, role);
        select(self.prayers, role, &seed)
            .cloned()
            .unwrap_or_else(|| first_fallback(fallback_prayers()))
    }

    pub fn prediction_for(&self, role: &str, date: NaiveDate) -> Prediction {
        let seed = daily_seed(date, role);
        select(self.predictions, role, &seed)
            .cloned()
            .unwrap_or_else(|| first_fallback(fallback_predictions()))
    }

    pub fn resolve_daily(&self, role: &str, mode: Mode, date: NaiveDate) -> DailyContent {
        let prayer = self.prayer_for(role, date);
        let prediction = self.prediction_for(role, date);
        DailyContent {
            prayer_title: self.locale.prayer_title(mode).to_string(),
            prayer_text: prayer.text(mode == Mode::Sacred).to_string(),
            prediction_emoji: prediction_emoji(&prediction).to_string(),
            prediction_text: prediction.text,
        }
    }
}

/// Resolve with the default locale.
pub fn resolve_daily(
    role: &str,
    mode: Mode,
    date: NaiveDate,
    prayers: &[Prayer],
    predictions: &[Prediction],
) -> DailyContent {
    ContentResolver::from_pools(prayers, predictions, Locale::default())
        .resolve_daily(role, mode, date)
}

pub(crate) fn prediction_emoji(prediction: &Prediction) -> &str {
    prediction
        .emoji
        .as_deref()
        .filter(|e| !e.is_empty())
        .unwrap_or(DEFAULT_PREDICTION_EMOJI)
}

fn first_fallback<T>(mut pool: Vec<T>) -> T {
    pool.swap_remove(0)
}
