//! In-memory content pools, loaded once per session.
//!
//! Loading never fails: a collection that cannot be fetched or parsed is
//! replaced by a one-item built-in pool and the library remembers that it is
//! serving fallback content so the caller can show an advisory.

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use super::{ContentKind, ContentSource, Locale, Prayer, Prediction, ROLE_WILDCARD};
use crate::error::ContentError;

#[derive(Debug, Clone)]
pub struct ContentLibrary {
    prayers: Vec<Prayer>,
    predictions: Vec<Prediction>,
    load_error: bool,
}

impl ContentLibrary {
    /// Build a library from already-loaded pools. Empty pools are replaced by
    /// the built-in fallback.
    pub fn new(prayers: Vec<Prayer>, predictions: Vec<Prediction>) -> Self {
        Self {
            prayers: non_empty_or(prayers, fallback_prayers),
            predictions: non_empty_or(predictions, fallback_predictions),
            load_error: false,
        }
    }

    /// The built-in pools only.
    pub fn fallback() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Fetch both collections concurrently, one attempt each.
    pub async fn load(source: &ContentSource) -> Self {
        let (prayers, predictions) = tokio::join!(
            load_kind::<Prayer>(source, ContentKind::Prayers),
            load_kind::<Prediction>(source, ContentKind::Predictions),
        );

        let mut load_error = false;
        let prayers = prayers.unwrap_or_else(|e| {
            warn!(error = %e, "prayer pool unavailable, using fallback");
            load_error = true;
            Vec::new()
        });
        let predictions = predictions.unwrap_or_else(|e| {
            warn!(error = %e, "prediction pool unavailable, using fallback");
            load_error = true;
            Vec::new()
        });

        info!(
            source = %source,
            prayers = prayers.len(),
            predictions = predictions.len(),
            "content loaded"
        );

        Self {
            load_error,
            ..Self::new(prayers, predictions)
        }
    }

    pub fn prayers(&self) -> &[Prayer] {
        &self.prayers
    }

    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    /// True when at least one collection failed to load.
    pub fn load_error(&self) -> bool {
        self.load_error
    }

    /// User-visible banner text when serving fallback content.
    pub fn advisory(&self, locale: Locale) -> Option<&'static str> {
        self.load_error.then(|| locale.load_error_advisory())
    }
}

impl Default for ContentLibrary {
    fn default() -> Self {
        Self::fallback()
    }
}

async fn load_kind<T: DeserializeOwned>(
    source: &ContentSource,
    kind: ContentKind,
) -> Result<Vec<T>, ContentError> {
    let raw = source.fetch(kind).await?;
    serde_json::from_str(&raw).map_err(|source| ContentError::Parse { kind, source })
}

fn non_empty_or<T>(items: Vec<T>, fallback: fn() -> Vec<T>) -> Vec<T> {
    if items.is_empty() {
        fallback()
    } else {
        items
    }
}

pub(crate) fn fallback_prayers() -> Vec<Prayer> {
    vec![Prayer {
        id: "fallback_1".into(),
        mood: "focus".into(),
        roles: vec![ROLE_WILDCARD.into()],
        tone: Some("light".into()),
        sacred: Some("Даруй мне Wi‑Fi стабильный и кофе бодрящий.".into()),
        secular: Some("Пусть Wi‑Fi будет стабильным, а кофе — бодрым.".into()),
    }]
}

pub(crate) fn fallback_predictions() -> Vec<Prediction> {
    vec![Prediction {
        id: "fallback_1".into(),
        mood: "neutral".into(),
        roles: vec![ROLE_WILDCARD.into()],
        emoji: Some("🔮".into()),
        text: "Небольшой шаг вперёд сейчас лучше, чем идеальный план завтра.".into(),
    }]
}
