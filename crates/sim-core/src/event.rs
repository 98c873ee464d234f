//! Narrative events handed to the presentation layer.

use serde::{Deserialize, Serialize};

/// Display category of an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Positive,
    Negative,
    Gold,
    Neutral,
}

/// One line of the game log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Simulation month the event happened in.
    pub month: u32,
    pub text: String,
    pub severity: Severity,
}

impl GameEvent {
    pub fn new(month: u32, text: impl Into<String>, severity: Severity) -> Self {
        Self {
            month,
            text: text.into(),
            severity,
        }
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "M{}: {}", self.month, self.text)
    }
}
