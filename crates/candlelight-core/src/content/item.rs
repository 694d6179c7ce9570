use serde::{Deserialize, Serialize};

/// Role tag that makes an item eligible for every persona.
pub const ROLE_WILDCARD: &str = "any";

/// Shared view over prayer and prediction items used for role filtering.
pub trait ContentItem {
    fn id(&self) -> &str;

    fn roles(&self) -> &[String];

    /// True when the item is tagged with `role` or with the wildcard.
    fn matches_role(&self, role: &str) -> bool {
        self.roles()
            .iter()
            .any(|r| r == role || r == ROLE_WILDCARD)
    }

    fn is_wildcard(&self) -> bool {
        self.roles().iter().any(|r| r == ROLE_WILDCARD)
    }
}

/// A prayer (sacred) / mantra (secular) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prayer {
    pub id: String,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(
        default,
        rename = "text_sacred",
        alias = "sacred",
        skip_serializing_if = "Option::is_none"
    )]
    pub sacred: Option<String>,
    #[serde(
        default,
        rename = "text_secular",
        alias = "secular",
        skip_serializing_if = "Option::is_none"
    )]
    pub secular: Option<String>,
}

impl Prayer {
    /// The variant for `sacred`, falling back to the other one when absent.
    pub fn text(&self, sacred: bool) -> &str {
        let (preferred, other) = if sacred {
            (&self.sacred, &self.secular)
        } else {
            (&self.secular, &self.sacred)
        };
        non_empty(preferred)
            .or_else(|| non_empty(other))
            .unwrap_or_default()
    }
}

impl ContentItem for Prayer {
    fn id(&self) -> &str {
        &self.id
    }

    fn roles(&self) -> &[String] {
        &self.roles
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: String,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default)]
    pub text: String,
}

impl ContentItem for Prediction {
    fn id(&self) -> &str {
        &self.id
    }

    fn roles(&self) -> &[String] {
        &self.roles
    }
}

fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|t| !t.is_empty())
}
