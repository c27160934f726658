pub mod store;

use chrono::{DateTime, Local};
use std::fmt;
use std::fmt::Write as _;

pub use store::NoteStore;

/// Default display format for creation timestamps (e.g. "3/14/2025, 9:26:53 AM")
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Unique note identifier, handed out by the owning store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(u64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub title: String,        // Always non-empty and trimmed
    pub description: String,  // Trimmed, may be empty
    pub created_at: DateTime<Local>,
}

impl Note {
    /// Format the creation time for display.
    /// Falls back to RFC 3339 if `format` contains an invalid specifier.
    pub fn created_at_display(&self, format: &str) -> String {
        let mut out = String::new();
        if write!(out, "{}", self.created_at.format(format)).is_err() {
            out.clear();
            out.push_str(&self.created_at.to_rfc3339());
        }
        out
    }

    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }
}

/// The only error a user can trigger while adding notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required. Please enter a title for your note.")]
    EmptyTitle,
}

/// Note selected for deletion, waiting on the user to confirm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
    pub id: NoteId,
    pub title: String,  // Shown in the prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_note() -> Note {
        Note {
            id: NoteId(7),
            title: "Groceries".to_string(),
            description: String::new(),
            created_at: Local.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap(),
        }
    }

    #[test]
    fn test_default_timestamp_format() {
        let note = sample_note();
        assert_eq!(note.created_at_display(DEFAULT_TIMESTAMP_FORMAT), "3/14/2025, 9:26:53 AM");
    }

    #[test]
    fn test_invalid_timestamp_format_falls_back() {
        let note = sample_note();
        let shown = note.created_at_display("%Q");
        assert!(shown.starts_with("2025-03-14T09:26:53"), "got {}", shown);
    }

    #[test]
    fn test_note_id_display() {
        assert_eq!(NoteId(7).to_string(), "#7");
    }

    #[test]
    fn test_validation_message() {
        assert_eq!(
            ValidationError::EmptyTitle.to_string(),
            "Title is required. Please enter a title for your note."
        );
    }
}
