//! Add-note form state: field contents, focus and the inline validation message.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::notes::{NoteId, NoteStore, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
}

/// What the owner should do after the form handled a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Handled,
    Submit,
    Leave,    // Esc: hand focus back to the notes list
    Ignored,
}

#[derive(Debug, Clone)]
pub struct NoteForm {
    pub title: String,
    pub description: String,
    pub field: Field,
    pub error: Option<ValidationError>,
}

impl Default for NoteForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            field: Field::Title,
            error: None,
        }
    }
}

impl NoteForm {
    /// The add action is only offered once the title has some content
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::F(2) => FormOutcome::Submit,
            KeyCode::Char('s') if ctrl => FormOutcome::Submit,
            KeyCode::Esc => FormOutcome::Leave,
            KeyCode::Enter => match self.field {
                // Shift+Enter never submits from the title line
                Field::Title if key.modifiers.contains(KeyModifiers::SHIFT) => FormOutcome::Ignored,
                Field::Title => FormOutcome::Submit,
                Field::Description => {
                    self.description.push('\n');
                    FormOutcome::Handled
                }
            },
            KeyCode::Backspace => {
                match self.field {
                    Field::Title => {
                        self.title.pop();
                        self.clear_error_if_valid();
                    }
                    Field::Description => {
                        self.description.pop();
                    }
                }
                FormOutcome::Handled
            }
            KeyCode::Char(c) if !ctrl => {
                match self.field {
                    Field::Title => {
                        self.title.push(c);
                        self.clear_error_if_valid();
                    }
                    Field::Description => self.description.push(c),
                }
                FormOutcome::Handled
            }
            _ => FormOutcome::Ignored,
        }
    }

    /// Validate and hand the fields to the store.
    /// On success the form is reset; on failure the fields are kept and the
    /// error is shown under the title.
    pub fn submit(&mut self, store: &mut NoteStore) -> Result<NoteId, ValidationError> {
        match store.add(&self.title, &self.description) {
            Ok(note) => {
                let id = note.id;
                self.reset();
                Ok(id)
            }
            Err(e) => {
                self.error = Some(e);
                Err(e)
            }
        }
    }

    pub fn reset(&mut self) {
        self.title.clear();
        self.description.clear();
        self.error = None;
        self.field = Field::Title;
    }

    fn clear_error_if_valid(&mut self) {
        if self.error.is_some() && self.can_submit() {
            self.error = None;
        }
    }
}
