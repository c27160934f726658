use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

use crate::config::AppConfig;
use crate::form::{Field, FormOutcome, NoteForm};
use crate::notes::{Note, NoteStore};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Form,   // Title / description inputs (see NoteForm::field)
    Notes,  // The note list
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
    Confirm,  // Delete confirmation, open while the store has a pending target
}

pub struct App {
    pub config: AppConfig,
    pub theme: Theme,

    pub store: NoteStore,
    pub form: NoteForm,

    pub section: Section,
    pub selected_note: usize,
    pub show_help: bool,

    // Loading screen shown until `loading_delay` has passed since `started`
    pub loading: bool,
    pub started: Instant,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    pub should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let theme = Theme::from_config(&config.theme);
        let loading = !config.loading_delay().is_zero();

        Self {
            config,
            theme,
            store: NoteStore::new(),
            form: NoteForm::default(),
            section: Section::Form,
            selected_note: 0,
            show_help: false,
            loading,
            started: Instant::now(),
            status_message: None,
            status_message_time: None,
            should_quit: false,
        }
    }

    /// Which popup is on top. A pending deletion always wins over help.
    pub fn popup(&self) -> Popup {
        if self.store.pending().is_some() {
            Popup::Confirm
        } else if self.show_help {
            Popup::Help
        } else {
            Popup::None
        }
    }

    pub fn selected(&self) -> Option<&Note> {
        self.store.notes().get(self.selected_note)
    }

    /// Set a status message (auto-clears after the configured timeout)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Nothing to interact with until the notes are "loaded"
        if self.loading {
            if key.code == KeyCode::Char('q') {
                self.should_quit = true;
            }
            return;
        }

        match self.popup() {
            Popup::Confirm => self.handle_confirm_key(key),
            Popup::Help => self.handle_help_key(key),
            Popup::None => match self.section {
                Section::Form => self.handle_form_key(key),
                Section::Notes => self.handle_notes_key(key),
            },
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => self.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Esc => self.cancel_delete(),
            _ => {}
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Esc
                | KeyCode::Char('?')
                | KeyCode::Char('h')
                | KeyCode::Enter
                | KeyCode::Char('q')
        ) {
            self.show_help = false;
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                match self.form.field {
                    Field::Title => self.form.field = Field::Description,
                    Field::Description => self.section = Section::Notes,
                }
                return;
            }
            KeyCode::BackTab => {
                match self.form.field {
                    Field::Title => self.section = Section::Notes,
                    Field::Description => self.form.field = Field::Title,
                }
                return;
            }
            KeyCode::F(1) => {
                self.show_help = true;
                return;
            }
            _ => {}
        }

        match self.form.handle_key(key) {
            FormOutcome::Submit => self.submit_form(),
            FormOutcome::Leave => self.section = Section::Notes,
            FormOutcome::Handled | FormOutcome::Ignored => {}
        }
    }

    fn handle_notes_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                self.section = Section::Form;
                self.form.field = Field::Title;
            }
            KeyCode::BackTab => {
                self.section = Section::Form;
                self.form.field = Field::Description;
            }
            KeyCode::Char('a') | KeyCode::Char('n') | KeyCode::Char('i') => {
                self.section = Section::Form;
                self.form.field = Field::Title;
            }
            KeyCode::Char('j') | KeyCode::Down => self.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_up(),
            KeyCode::Char('d') | KeyCode::Delete => self.request_delete(),
            KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::F(1) => self.show_help = true,
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        match self.form.submit(&mut self.store) {
            Ok(id) => {
                tracing::info!(%id, total = self.store.len(), "Added note");
                // Newest note sits at the top of the list
                self.selected_note = 0;
                self.set_status("Note added");
            }
            Err(e) => {
                // Shown inline under the title field
                tracing::debug!("Rejected note: {}", e);
            }
        }
    }

    fn move_down(&mut self) {
        let len = self.store.len();
        if len > 0 {
            self.selected_note = (self.selected_note + 1) % len;
        }
    }

    fn move_up(&mut self) {
        let len = self.store.len();
        if len > 0 {
            self.selected_note = self.selected_note.checked_sub(1).unwrap_or(len - 1);
        }
    }

    fn request_delete(&mut self) {
        let Some(note) = self.selected() else { return };
        let (id, title) = (note.id, note.title.clone());
        self.store.request_delete(id, title);
    }

    fn confirm_delete(&mut self) {
        match self.store.confirm_delete() {
            Some(note) => {
                tracing::info!(id = %note.id, total = self.store.len(), "Deleted note");
                self.set_status(format!("Deleted '{}'", note.title));
            }
            None => self.set_status("Note was already gone"),
        }

        // Keep selection in range
        if self.selected_note >= self.store.len() {
            self.selected_note = self.store.len().saturating_sub(1);
        }
    }

    fn cancel_delete(&mut self) {
        self.store.cancel_delete();
        self.set_status("Deletion cancelled");
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advance time-based state: end of the loading screen, status expiry
    pub fn tick_at(&mut self, now: Instant) {
        let since_start = now.saturating_duration_since(self.started);
        if self.loading && since_start >= self.config.loading_delay() {
            self.loading = false;
            tracing::debug!("Loading screen finished");
        }

        if let Some(time) = self.status_message_time {
            if now.saturating_duration_since(time) >= self.config.status_timeout() {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}
