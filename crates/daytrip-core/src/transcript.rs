//! Session transcript: the on-screen history of prompts and completions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One prompt/response pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// The preference text as the user submitted it.
    pub preference: String,
    /// The raw completion, before parsing.
    pub completion: String,
    pub recorded_at: DateTime<Utc>,
}

/// Append-only log of a session's completions.
///
/// Entries can be added and read but never edited or removed; the whole log
/// is dropped with its session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, preference: impl Into<String>, completion: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            preference: preference.into(),
            completion: completion.into(),
            recorded_at: Utc::now(),
        });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the log the way a conversation buffer prints it:
    /// `Human: …` / `AI: …` lines, one pair per entry.
    pub fn buffer(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("Human: {}\nAI: {}", entry.preference, entry.completion))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
