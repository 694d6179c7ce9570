//! Daily content: item types, loading, and per-role/per-day resolution.

mod item;
mod library;
mod locale;
pub mod resolver;
mod source;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use item::{ContentItem, Prayer, Prediction, ROLE_WILDCARD};
pub use library::ContentLibrary;
pub use locale::Locale;
pub use resolver::{daily_seed, resolve_daily, ContentResolver, DailyContent};
pub use source::ContentSource;

/// The two independently loaded collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Prayers,
    Predictions,
}

impl ContentKind {
    pub fn file_name(self) -> &'static str {
        match self {
            ContentKind::Prayers => "prayers.json",
            ContentKind::Predictions => "predictions.json",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Prayers => f.write_str("prayers"),
            ContentKind::Predictions => f.write_str("predictions"),
        }
    }
}
