//! # Transcript
//!
//! Append-only conversation history. Entries are immutable once appended:
//! nothing in the crate removes or edits one, and the rendered order is
//! always the append order. Each entry carries a monotonically increasing
//! ordinal so persistence and display never have to guess at sequencing.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

/// One rendered line of chat history, tagged by sender.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub sender: Sender,
    pub text: String,
    pub ordinal: u64,
}

/// The conversation log. Owns its entries exclusively; the only way in is
/// [`Transcript::append`], the only way out is a shared slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    next_ordinal: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a transcript from persisted entries, preserving their
    /// ordinals. New appends continue past the highest loaded ordinal.
    pub fn from_entries(entries: Vec<TranscriptEntry>) -> Self {
        let next_ordinal = entries.iter().map(|e| e.ordinal + 1).max().unwrap_or(0);
        Self {
            entries,
            next_ordinal,
        }
    }

    /// Appends an entry with the next ordinal and returns a reference to it.
    /// Empty text is legal and renders as an empty entry.
    pub fn append(&mut self, sender: Sender, text: String) -> &TranscriptEntry {
        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;
        self.entries.push(TranscriptEntry {
            sender,
            text,
            ordinal,
        });
        self.entries.last().expect("just pushed")
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

    /// First user entry, if any. Used for deriving session titles.
    pub fn first_user_entry(&self) -> Option<&TranscriptEntry> {
        self.entries.iter().find(|e| e.sender == Sender::User)
    }
}
