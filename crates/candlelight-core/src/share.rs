//! Content of the shareable "prediction of the day" card.
//!
//! Drawing is left to the renderer; this is the text it draws.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::content::resolver::prediction_emoji;
use crate::content::ContentResolver;

const FOOTER: &str = "candlelight";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareCard {
    pub heading: String,
    /// `YYYY-MM-DD • role`
    pub subtitle: String,
    pub emoji: String,
    pub text: String,
    pub footer: String,
}

impl ShareCard {
    pub fn build(resolver: &ContentResolver<'_>, role: &str, date: NaiveDate) -> Self {
        let prediction = resolver.prediction_for(role, date);
        Self {
            heading: resolver.locale().share_heading().to_string(),
            subtitle: format!("{} • {role}", date.format("%Y-%m-%d")),
            emoji: prediction_emoji(&prediction).to_string(),
            text: prediction.text,
            footer: FOOTER.to_string(),
        }
    }

    /// Greedy word wrap of the prediction text to `width` characters.
    /// Words longer than `width` get a line of their own.
    pub fn lines(&self, width: usize) -> Vec<String> {
        wrap(&self.text, width)
    }
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
