mod components;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Popup, Section};
use crate::form::Field;
use crate::theme::Theme;
use components::{centered_rect, key_hints, spinner_frame, wrap_to_width};

/// Main body of the screen, chosen from app state alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Empty,
    List,
}

pub fn screen(app: &App) -> Screen {
    if app.loading {
        Screen::Loading
    } else if app.store.is_empty() {
        Screen::Empty
    } else {
        Screen::List
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    if screen(app) == Screen::Loading {
        draw_loading(f, app);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),   // Header
            Constraint::Length(1),   // Status line
            Constraint::Length(13),  // Add-note form
            Constraint::Min(4),      // Notes
            Constraint::Length(1),   // Footer
        ])
        .split(f.area());

    draw_header(f, &app.theme, chunks[0]);
    draw_status_line(f, app, chunks[1]);
    draw_form(f, app, chunks[2]);
    match screen(app) {
        Screen::Empty => draw_empty_state(f, app, chunks[3]),
        _ => draw_note_list(f, app, chunks[3]),
    }
    draw_footer(f, app, chunks[4]);

    // Draw popups on top
    match app.popup() {
        Popup::None => {}
        Popup::Help => draw_help_popup(f, &app.theme),
        Popup::Confirm => draw_confirm_popup(f, app),
    }
}

fn draw_loading(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(60, 30, f.area());

    let loader = Paragraph::new(vec![
        Line::from(Span::styled(
            spinner_frame(app.started.elapsed()),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Loading your notes...", Style::default().fg(theme.text_dim))),
    ])
    .alignment(Alignment::Center);

    f.render_widget(loader, area);
}

fn draw_header(f: &mut Frame, theme: &Theme, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Notes Management",
            Style::default().fg(theme.header).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Organize your thoughts and ideas",
            Style::default().fg(theme.text_dim),
        )),
    ])
    .alignment(Alignment::Center);

    f.render_widget(header, area);
}

fn draw_status_line(f: &mut Frame, app: &App, area: Rect) {
    let line = match app.status_message {
        Some(ref status) => {
            Line::from(Span::styled(status, Style::default().fg(app.theme.success)))
        }
        None => Line::from(""),
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let form = &app.form;
    let is_active = app.section == Section::Form;
    let border = if is_active { theme.accent } else { theme.inactive };
    let title_focused = is_active && form.field == Field::Title;
    let desc_focused = is_active && form.field == Field::Description;

    let block = Block::default()
        .title(Span::styled(" New Note ", border_title_style(theme, is_active)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title input
            Constraint::Length(1),  // Inline error
            Constraint::Min(3),     // Description
            Constraint::Length(1),  // Add button
        ])
        .split(inner);

    // Title input, scrolled sideways so the cursor stays in view
    let title_border = if form.error.is_some() {
        theme.danger
    } else if title_focused {
        theme.accent
    } else {
        theme.inactive
    };
    let title_color = if title_focused { theme.accent } else { theme.header };
    let title_label = Line::from(vec![
        Span::styled(" Title ", Style::default().fg(title_color)),
        Span::styled("* ", Style::default().fg(theme.danger)),
    ]);
    let title_line = input_line(theme, &form.title, "Enter note title...", title_focused);
    let title_inner_width = rows[0].width.saturating_sub(2) as usize;
    let title_scroll = if form.title.is_empty() {
        0
    } else {
        title_line.width().saturating_sub(title_inner_width) as u16
    };
    let title_input = Paragraph::new(title_line)
        .scroll((0, title_scroll))
        .block(
            Block::default()
                .title(title_label)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(title_border)),
        );
    f.render_widget(title_input, rows[0]);

    if let Some(error) = form.error {
        let message = Paragraph::new(Line::from(vec![
            Span::styled(" ⚠ ", Style::default().fg(theme.danger)),
            Span::styled(error.to_string(), Style::default().fg(theme.danger)),
        ]));
        f.render_widget(message, rows[1]);
    }

    // Description text area: hard-wrapped to the box, scrolled so the cursor line stays visible
    let desc_area = rows[2];
    let desc_inner_width = desc_area.width.saturating_sub(2) as usize;
    let mut desc_lines: Vec<Line> = if form.description.is_empty() && !desc_focused {
        vec![Line::from(Span::styled(
            "Enter note description (optional)...",
            Style::default().fg(theme.text_dim),
        ))]
    } else {
        let mut wrapped = wrap_to_width(&form.description, desc_inner_width);
        // Cursor needs a free column at the end of the last row
        if desc_focused && wrapped.last().is_some_and(|r| r.width() >= desc_inner_width) {
            wrapped.push(String::new());
        }
        wrapped
            .into_iter()
            .map(|r| Line::from(Span::styled(r, Style::default().fg(theme.text))))
            .collect()
    };
    if desc_focused {
        if let Some(last) = desc_lines.last_mut() {
            last.spans.push(Span::styled("█", Style::default().fg(theme.accent)));
        }
    }
    let visible = desc_area.height.saturating_sub(2) as usize;
    let scroll = desc_lines.len().saturating_sub(visible) as u16;
    let desc_color = if desc_focused { theme.accent } else { theme.header };
    let desc_border = if desc_focused { theme.accent } else { theme.inactive };
    let description = Paragraph::new(desc_lines)
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title(Span::styled(" Description ", Style::default().fg(desc_color)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(desc_border)),
        );
    f.render_widget(description, desc_area);

    // Add button, greyed out until the title has content
    let button_style = if form.can_submit() {
        Style::default().fg(theme.success).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.inactive)
    };
    let button = Paragraph::new(Line::from(vec![
        Span::styled("[ Add Note ]", button_style),
        Span::styled("  Enter (title) / F2", Style::default().fg(theme.text_dim)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(button, rows[3]);
}

/// Single-line input: the value with a cursor, or a dimmed placeholder
fn input_line<'a>(
    theme: &Theme,
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
) -> Line<'a> {
    let cursor = Span::styled(if focused { "_" } else { "" }, Style::default().fg(theme.accent));
    if value.is_empty() {
        Line::from(vec![cursor, Span::styled(placeholder, Style::default().fg(theme.text_dim))])
    } else {
        Line::from(vec![Span::styled(value, Style::default().fg(theme.text)), cursor])
    }
}

fn border_title_style(theme: &Theme, is_active: bool) -> Style {
    if is_active {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.inactive)
    }
}

fn notes_block(app: &App) -> Block<'static> {
    let is_active = app.section == Section::Notes;
    let border = if is_active { app.theme.accent } else { app.theme.inactive };
    Block::default()
        .title(Span::styled(
            format!(" Notes ({}) ", app.store.len()),
            border_title_style(&app.theme, is_active),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

fn draw_empty_state(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let empty = Paragraph::new(vec![
        Line::from(""),
        Line::from("📝"),
        Line::from(Span::styled(
            "No notes yet",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Start by creating your first note above. \
             Keep track of your thoughts, ideas, and reminders all in one place.",
            Style::default().fg(theme.text_dim),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(notes_block(app));

    f.render_widget(empty, area);
}

fn draw_note_list(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let format = app.config.timestamp_format.as_str();
    // Borders plus the two-column indent
    let desc_width = (area.width as usize).saturating_sub(4);

    let items: Vec<ListItem> = app
        .store
        .notes()
        .iter()
        .map(|note| {
            let mut lines = vec![Line::from(vec![
                Span::styled("● ", Style::default().fg(theme.accent)),
                Span::styled(
                    note.title.as_str(),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ),
            ])];
            if note.has_description() {
                lines.extend(wrap_to_width(&note.description, desc_width).into_iter().map(|l| {
                    Line::from(Span::styled(format!("  {}", l), Style::default().fg(theme.text)))
                }));
            }
            lines.push(Line::from(Span::styled(
                format!("  Created: {}", note.created_at_display(format)),
                Style::default().fg(theme.text_dim),
            )));
            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();

    let highlight = if app.section == Section::Notes {
        Style::default().bg(theme.bg_selected).fg(theme.text)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(notes_block(app))
        .highlight_style(highlight);

    let mut state = ListState::default().with_selected(Some(app.selected_note));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints: Vec<(&str, &str)> = match (app.popup(), app.section) {
        (Popup::Confirm, _) => vec![("y/Enter", "Delete"), ("n/Esc", "Cancel")],
        (Popup::Help, _) => vec![("Esc", "Close")],
        (Popup::None, Section::Form) => vec![
            ("Enter", "Add"),
            ("F2", "Add"),
            ("Tab", "Next"),
            ("Esc", "List"),
            ("F1", "Help"),
        ],
        (Popup::None, Section::Notes) => vec![
            ("↑↓", "Nav"),
            ("d", "Delete"),
            ("a", "New"),
            ("Tab", "Form"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
    };

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 50 { 3 } else if area.width < 70 { 4 } else { hints.len() };

    let footer = Paragraph::new(key_hints(&hints, max_hints, &app.theme))
        .alignment(Alignment::Center);

    f.render_widget(footer, area);
}

fn draw_confirm_popup(f: &mut Frame, app: &App) {
    let Some(pending) = app.store.pending() else { return };
    let theme = &app.theme;
    let popup_area = centered_rect(60, 30, f.area());

    f.render_widget(Clear, popup_area);

    // Prompt is shown even if the note vanished meanwhile; confirming is then a no-op
    let created = match app.store.get(pending.id) {
        Some(note) => {
            format!("Created: {}", note.created_at_display(&app.config.timestamp_format))
        }
        None => "Already removed".to_string(),
    };

    let confirm = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Are you sure you want to delete \"", Style::default().fg(theme.text)),
            Span::styled(
                pending.title.as_str(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled("\"?", Style::default().fg(theme.text)),
        ]),
        Line::from(Span::styled(created, Style::default().fg(theme.text_dim))),
        Line::from(Span::styled(
            "This action cannot be undone.",
            Style::default().fg(theme.text_dim),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("n", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::raw(" Cancel   "),
            Span::styled("y", Style::default().fg(theme.danger).add_modifier(Modifier::BOLD)),
            Span::raw(" Delete"),
        ]),
    ])
    .block(
        Block::default()
            .title(Span::styled(" Delete Note? ", Style::default().fg(theme.danger)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.danger)),
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    f.render_widget(confirm, popup_area);
}

fn draw_help_popup(f: &mut Frame, theme: &Theme) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 70 },
        if area.height < 40 { 95 } else { 80 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        let style = Style::default().fg(theme.header).add_modifier(Modifier::BOLD);
        Line::from(Span::styled(title, style))
    };
    let binding = |keys: &'static str, action: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", keys), Style::default().fg(theme.accent)),
            Span::raw(action),
        ])
    };

    let help_text = vec![
        section("═══ Form ═══"),
        binding("Tab", "Title → Description → Notes"),
        binding("Enter", "Add note (in the title field)"),
        binding("F2 / Ctrl-S", "Add note (from either field)"),
        binding("Enter", "New line (in the description)"),
        binding("Esc", "Go to the notes list"),
        Line::from(""),
        section("═══ Notes ═══"),
        binding("↑/↓ k/j", "Move selection"),
        binding("d / Del", "Delete selected note (asks first)"),
        binding("a / n / i", "Write a new note"),
        binding("q", "Quit"),
        Line::from(""),
        section("═══ Delete Prompt ═══"),
        binding("y / Enter", "Delete"),
        binding("n / Esc", "Keep the note"),
        Line::from(""),
        Line::from(Span::styled(
            "  Notes live in memory only and are gone when jotter exits.",
            Style::default().fg(theme.text_dim),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(theme.text_dim)),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::styled(" to close", Style::default().fg(theme.text_dim)),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" jotter Help ", Style::default().fg(theme.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn ready_app() -> App {
        App::new(AppConfig {
            loading_delay_ms: 0,
            ..AppConfig::default()
        })
    }

    fn render(app: &App) -> String {
        render_sized(app, 100, 40)
    }

    fn render_sized(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_loading_screen() {
        let app = App::new(AppConfig::default());
        assert_eq!(screen(&app), Screen::Loading);

        let out = render(&app);
        assert!(out.contains("Loading your notes..."));
        assert!(!out.contains("Notes Management"));
    }

    #[test]
    fn test_empty_state() {
        let app = ready_app();
        assert_eq!(screen(&app), Screen::Empty);

        let out = render(&app);
        assert!(out.contains("Notes Management"));
        assert!(out.contains("No notes yet"));
        assert!(out.contains("Enter note title..."));
    }

    #[test]
    fn test_list_view() {
        let mut app = ready_app();
        app.store.add("Groceries", "Milk, eggs").unwrap();
        app.store.add("Todo", "").unwrap();
        assert_eq!(screen(&app), Screen::List);

        let out = render(&app);
        assert!(!out.contains("No notes yet"));
        assert!(out.contains("Notes (2)"));
        assert!(out.contains("Groceries"));
        assert!(out.contains("Milk, eggs"));
        assert_eq!(out.matches("Created: ").count(), 2);
        assert!(out.find("Todo").unwrap() < out.find("Groceries").unwrap());
    }

    #[test]
    fn test_confirm_prompt() {
        let mut app = ready_app();
        let id = app.store.add("Groceries", "").unwrap().id;

        assert!(!render(&app).contains("Delete Note?"));

        app.store.request_delete(id, "Groceries");
        let out = render(&app);
        assert!(out.contains("Delete Note?"));
        assert!(out.contains("cannot be undone"));

        app.store.cancel_delete();
        assert!(!render(&app).contains("Delete Note?"));
    }

    #[test]
    fn test_validation_error_rendered() {
        let mut app = ready_app();
        let _ = app.form.submit(&mut app.store);

        let out = render(&app);
        assert!(out.contains("Title is required"));
    }

    #[test]
    fn test_help_popup_rendered() {
        let mut app = ready_app();
        app.show_help = true;
        assert!(render(&app).contains("jotter Help"));
    }

    #[test]
    fn test_long_title_scrolls_to_cursor() {
        let mut app = ready_app();
        app.form.title = format!("{}END", "x".repeat(80));

        let out = render_sized(&app, 40, 40);
        assert!(out.contains("xEND_"));
    }

    #[test]
    fn test_empty_title_placeholder_not_scrolled() {
        let app = ready_app();
        let out = render_sized(&app, 20, 40);
        assert!(out.contains("_Enter note"));
    }

    #[test]
    fn test_long_description_wraps() {
        let mut app = ready_app();
        app.form.field = Field::Description;
        app.form.description = format!("{}TAIL", "y".repeat(72));

        let out = render_sized(&app, 40, 40);
        assert!(out.contains("TAIL█"));
    }

    #[test]
    fn test_long_note_description_wraps_in_list() {
        let mut app = ready_app();
        app.store.add("Groceries", &format!("{}TAIL", "z".repeat(72))).unwrap();

        let out = render_sized(&app, 40, 40);
        assert!(out.contains("TAIL"));
    }
}
