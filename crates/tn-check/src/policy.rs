use serde::{Deserialize, Serialize};

/// How many tubes of each type a cohort must draw from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPolicy {
    /// Zero or one drawn tube per type.
    #[default]
    AtMostOne,
    /// Exactly one drawn tube per type.
    ExactlyOne,
}

impl DrawPolicy {
    pub fn allows(self, drawn: usize) -> bool {
        match self {
            DrawPolicy::AtMostOne => drawn <= 1,
            DrawPolicy::ExactlyOne => drawn == 1,
        }
    }
}
