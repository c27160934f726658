//! In-memory note store for a single session.
//!
//! Notes are kept newest-first. A note only ever enters through [`NoteStore::add`]
//! and only ever leaves through a confirmed delete; nothing else mutates it.

use chrono::{DateTime, Local};

use super::{Note, NoteId, PendingDeletion, ValidationError};

#[derive(Debug)]
pub struct NoteStore {
    notes: Vec<Note>,
    next_id: u64,
    pending: Option<PendingDeletion>,
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteStore {
    pub fn new() -> Self {
        Self {
            notes: Vec::new(),
            next_id: 1,
            pending: None,
        }
    }

    /// Add a note stamped with the current local time
    pub fn add(&mut self, title: &str, description: &str) -> Result<&Note, ValidationError> {
        self.add_at(title, description, Local::now())
    }

    /// Add a note with an explicit creation time.
    /// Title and description are trimmed; an empty title is rejected and
    /// leaves the store untouched.
    pub fn add_at(
        &mut self,
        title: &str,
        description: &str,
        created_at: DateTime<Local>,
    ) -> Result<&Note, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        let id = NoteId(self.next_id);
        self.next_id += 1;

        self.notes.insert(0, Note {
            id,
            title: title.to_string(),
            description: description.trim().to_string(),
            created_at,
        });
        tracing::debug!(%id, total = self.notes.len(), "note added");

        Ok(&self.notes[0])
    }

    /// Mark a note for deletion. Replaces any earlier pending target.
    pub fn request_delete(&mut self, id: NoteId, title: impl Into<String>) {
        let title = title.into();
        tracing::debug!(%id, "delete requested");
        self.pending = Some(PendingDeletion { id, title });
    }

    /// Remove the pending target, if it is still present, and clear the selection
    pub fn confirm_delete(&mut self) -> Option<Note> {
        let pending = self.pending.take()?;
        let index = self.notes.iter().position(|n| n.id == pending.id);
        match index {
            Some(i) => {
                let removed = self.notes.remove(i);
                tracing::debug!(id = %removed.id, total = self.notes.len(), "note deleted");
                Some(removed)
            }
            None => {
                // Already gone: nothing to do
                tracing::debug!(id = %pending.id, "delete target no longer present");
                None
            }
        }
    }

    pub fn cancel_delete(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::debug!(id = %pending.id, "delete cancelled");
        }
    }

    pub fn pending(&self) -> Option<&PendingDeletion> {
        self.pending.as_ref()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
