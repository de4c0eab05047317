//! # Session Persistence
//!
//! Save/load conversations to `~/.wayfarer/sessions/`.
//!
//! Each session is a JSON file (`<uuid>.json`) plus a lightweight index
//! (`sessions.json`) that avoids loading all files just to find the most
//! recent one.
//!
//! All writes use atomic rename (write `.tmp`, then `rename()`) for crash safety.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::state::App;
use crate::core::transcript::{Transcript, TranscriptEntry};

/// Summary metadata for a session (stored in the index file).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SessionMeta {
    pub id: String,
    pub title: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub entry_count: usize,
}

/// Full session data: metadata + transcript entries.
#[derive(Serialize, Deserialize, Debug)]
pub struct SessionData {
    pub meta: SessionMeta,
    pub entries: Vec<TranscriptEntry>,
}

/// Index of all sessions, sorted by `updated_at` descending.
#[derive(Serialize, Deserialize, Default, Debug)]
pub struct SessionIndex {
    pub sessions: Vec<SessionMeta>,
}

/// Returns `~/.wayfarer/sessions/`, creating it if needed.
pub fn sessions_dir() -> io::Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
    let dir = home.join(".wayfarer").join("sessions");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Generate a new UUID v4 session ID.
pub fn new_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Derive a title from the first user entry in the transcript.
/// Returns the first line, truncated to 60 chars.
pub fn derive_title(entries: &[TranscriptEntry]) -> String {
    for entry in entries {
        if entry.sender == crate::core::transcript::Sender::User {
            let first_line = entry.text.lines().next().unwrap_or("").trim();
            if first_line.is_empty() {
                continue;
            }
            if first_line.chars().count() > 60 {
                let head: String = first_line.chars().take(57).collect();
                return format!("{head}...");
            }
            return first_line.to_string();
        }
    }
    "Untitled".to_string()
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Save a session to disk and update the index.
pub fn save_session(
    id: &str,
    entries: &[TranscriptEntry],
    existing_meta: Option<&SessionMeta>,
) -> io::Result<()> {
    // Don't save empty sessions
    if entries.is_empty() {
        return Ok(());
    }

    let dir = sessions_dir()?;
    let now = Utc::now().timestamp();

    let meta = SessionMeta {
        id: id.to_string(),
        title: existing_meta
            .map(|m| m.title.clone())
            .unwrap_or_else(|| derive_title(entries)),
        created_at: existing_meta.map(|m| m.created_at).unwrap_or(now),
        updated_at: now,
        entry_count: entries.len(),
    };

    let data = SessionData {
        meta: meta.clone(),
        entries: entries.to_vec(),
    };

    let session_path = dir.join(format!("{}.json", id));
    atomic_write_json(&session_path, &data)?;

    // Update index, most recently updated first
    let mut index = load_index().unwrap_or_default();
    index.sessions.retain(|s| s.id != id);
    index.sessions.push(meta);
    index.sessions.sort_by_key(|s| std::cmp::Reverse(s.updated_at));

    let index_path = dir.join("sessions.json");
    atomic_write_json(&index_path, &index)?;

    Ok(())
}

/// Load a session from disk by ID.
pub fn load_session(id: &str) -> io::Result<SessionData> {
    let dir = sessions_dir()?;
    let path = dir.join(format!("{}.json", id));
    let json = fs::read_to_string(&path)?;
    serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Load the session index from disk.
pub fn load_index() -> io::Result<SessionIndex> {
    let dir = sessions_dir()?;
    let path = dir.join("sessions.json");
    if !path.exists() {
        return Ok(SessionIndex::default());
    }
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Load the most recently updated session, if any exists.
pub fn load_latest_session() -> Option<SessionData> {
    let index = load_index().ok()?;
    let meta = index.sessions.first()?;
    match load_session(&meta.id) {
        Ok(data) => Some(data),
        Err(e) => {
            warn!("Failed to load session {}: {}", meta.id, e);
            None
        }
    }
}

/// Restore a loaded session into the app's transcript.
pub fn restore_session(app: &mut App, data: SessionData) {
    app.current_session_id = Some(data.meta.id.clone());
    app.transcript = Transcript::from_entries(data.entries);
}

/// Save the current app session to disk. Generates a session ID if needed.
/// Skips empty sessions. This is the single entry point for session
/// persistence — call from the TUI on SaveSession effect or quit.
pub fn save_current_session(app: &mut App) {
    if app.transcript.is_empty() {
        return;
    }

    let id = app
        .current_session_id
        .get_or_insert_with(new_session_id)
        .clone();

    // Load existing meta to preserve title/created_at
    let existing_meta = load_session(&id).ok().map(|d| d.meta);

    if let Err(e) = save_session(&id, app.transcript.entries(), existing_meta.as_ref()) {
        warn!("Failed to save session: {}", e);
    } else {
        debug!("Session saved: {}", id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::Sender;

    fn user_entry(text: &str, ordinal: u64) -> TranscriptEntry {
        TranscriptEntry {
            sender: Sender::User,
            text: text.to_string(),
            ordinal,
        }
    }

    fn assistant_entry(text: &str, ordinal: u64) -> TranscriptEntry {
        TranscriptEntry {
            sender: Sender::Assistant,
            text: text.to_string(),
            ordinal,
        }
    }

    #[test]
    fn test_derive_title_from_first_user_entry() {
        let entries = vec![
            assistant_entry("Welcome", 0),
            user_entry("Route to the harbor?", 1),
        ];
        assert_eq!(derive_title(&entries), "Route to the harbor?");
    }

    #[test]
    fn test_derive_title_truncates_long_messages() {
        let long = "a".repeat(80);
        let entries = vec![user_entry(&long, 0)];
        let title = derive_title(&entries);
        assert!(title.len() <= 63); // 57 + "..."
        assert!(title.ends_with("..."));
    }

    #[test]
    fn test_derive_title_uses_first_line() {
        let entries = vec![user_entry("First line\nSecond line", 0)];
        assert_eq!(derive_title(&entries), "First line");
    }

    #[test]
    fn test_derive_title_skips_empty_user_entries() {
        let entries = vec![user_entry("", 0), user_entry("real question", 1)];
        assert_eq!(derive_title(&entries), "real question");
    }

    #[test]
    fn test_derive_title_no_user_entries() {
        let entries = vec![assistant_entry("hi", 0)];
        assert_eq!(derive_title(&entries), "Untitled");
    }

    #[test]
    fn test_session_data_round_trip() {
        let data = SessionData {
            meta: SessionMeta {
                id: "abc".to_string(),
                title: "Route to the harbor?".to_string(),
                created_at: 100,
                updated_at: 200,
                entry_count: 2,
            },
            entries: vec![
                user_entry("Route to the harbor?", 0),
                assistant_entry("On it", 1),
            ],
        };
        let json = serde_json::to_string(&data).unwrap();
        let back: SessionData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.meta.id, "abc");
        assert_eq!(back.entries.len(), 2);
        assert_eq!(back.entries[1].sender, Sender::Assistant);
    }
}
