use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::storage::Mode;

/// Display language for labels derived from the mode (never from content).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

impl Locale {
    pub fn prayer_title(self, mode: Mode) -> &'static str {
        match (self, mode) {
            (Locale::Ru, Mode::Sacred) => "Молитва дня",
            (Locale::Ru, Mode::Secular) => "Мантра дня",
            (Locale::En, Mode::Sacred) => "Prayer of the day",
            (Locale::En, Mode::Secular) => "Mantra of the day",
        }
    }

    /// What the candle grants: a blessing in sacred mode, a buff otherwise.
    pub fn buff_word(self, mode: Mode) -> &'static str {
        match (self, mode) {
            (Locale::Ru, Mode::Sacred) => "благословение",
            (Locale::Ru, Mode::Secular) => "бафф",
            (Locale::En, Mode::Sacred) => "blessing",
            (Locale::En, Mode::Secular) => "buff",
        }
    }

    pub fn share_heading(self) -> &'static str {
        match self {
            Locale::Ru => "Предсказание дня",
            Locale::En => "Prediction of the day",
        }
    }

    pub fn load_error_advisory(self) -> &'static str {
        match self {
            Locale::Ru => "Не удалось загрузить данные. Показан резервный контент.",
            Locale::En => "Could not load content. Showing fallback content.",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Ru => f.write_str("ru"),
            Locale::En => f.write_str("en"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" => Ok(Locale::Ru),
            "en" => Ok(Locale::En),
            other => Err(format!("unsupported locale '{other}' (expected ru or en)")),
        }
    }
}
