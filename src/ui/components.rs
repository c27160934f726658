//! Small rendering helpers shared by the screens in `ui`.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
};
use std::time::Duration;
use unicode_width::UnicodeWidthChar;

use crate::theme::Theme;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_FRAME_MS: u128 = 80;

/// Spinner glyph for the given time since startup
pub fn spinner_frame(elapsed: Duration) -> &'static str {
    let frame = (elapsed.as_millis() / SPINNER_FRAME_MS) as usize;
    SPINNER[frame % SPINNER.len()]
}

/// One-line legend of `key action │ key action │ ...`, truncated to `max` entries
pub fn key_hints<'a>(hints: &[(&'a str, &'a str)], max: usize, theme: &Theme) -> Line<'a> {
    let spans: Vec<Span> = hints
        .iter()
        .take(max)
        .enumerate()
        .flat_map(|(i, (key, action))| {
            let sep = if i == 0 { "" } else { " │ " };
            vec![
                Span::styled(sep, Style::default().fg(theme.inactive)),
                Span::styled(*key, Style::default().fg(theme.accent)),
                Span::styled(format!(" {}", action), Style::default().fg(theme.text_dim)),
            ]
        })
        .collect();

    Line::from(spans)
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Hard-wrap `text` into rows at most `width` columns wide. Newlines always
/// start a new row. A glyph wider than `width` gets a row to itself.
pub fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return text.split('\n').map(str::to_string).collect();
    }

    let mut rows = Vec::new();
    for line in text.split('\n') {
        let mut row = String::new();
        let mut row_width = 0;
        for c in line.chars() {
            let w = c.width().unwrap_or(0);
            if row_width + w > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            row.push(c);
            row_width += w;
        }
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner_frame(Duration::ZERO), "⠋");
        assert_eq!(spinner_frame(Duration::from_millis(80)), "⠙");
        assert_eq!(spinner_frame(Duration::from_millis(800)), "⠋");
    }

    #[test]
    fn test_key_hints_truncates() {
        let theme = Theme::default();
        let line = key_hints(&[("a", "Add"), ("d", "Del"), ("q", "Quit")], 2, &theme);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "a Add │ d Del");
    }

    #[test]
    fn test_centered_rect_inside_parent() {
        let parent = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, parent);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 15);
    }

    #[test]
    fn test_wrap_to_width_splits_long_lines() {
        assert_eq!(wrap_to_width("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(wrap_to_width("abcd", 4), vec!["abcd"]);
    }

    #[test]
    fn test_wrap_to_width_keeps_blank_lines() {
        assert_eq!(wrap_to_width("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap_to_width("", 10), vec![""]);
        assert_eq!(wrap_to_width("a\n", 10), vec!["a", ""]);
    }

    #[test]
    fn test_wrap_to_width_counts_columns() {
        // Each of these takes two columns
        assert_eq!(wrap_to_width("日本語", 4), vec!["日本", "語"]);
        assert_eq!(wrap_to_width("日", 1), vec!["日"]);
    }

    #[test]
    fn test_wrap_to_width_zero_width() {
        assert_eq!(wrap_to_width("abc\nd", 0), vec!["abc", "d"]);
    }
}
