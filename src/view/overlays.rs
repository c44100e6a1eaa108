//! Popups drawn over the main layout

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::UiState;
use super::utils::centered_rect;

const KEY_COLUMN: usize = 16;

const KEY_GROUPS: &[(&str, &[(&str, &str)])] = &[
    (
        "Library",
        &[
            ("Tab", "Songs / Albums"),
            ("↑ ↓", "Move selection"),
            ("Enter", "Play song, open album"),
            ("Esc Backspace", "Back"),
            ("R", "Rescan music folder"),
        ],
    ),
    (
        "Playback",
        &[
            ("Space", "Play / pause"),
            ("n p", "Next / previous"),
            ("s", "Shuffle"),
            ("← →", "Seek 5%"),
            ("0-9", "Seek to 0%..90%"),
        ],
    ),
    (
        "Player",
        &[
            ("v", "Reveal / conceal"),
            ("t", "Header toggle"),
            ("h", "This help"),
            ("q", "Quit"),
        ],
    ),
];

fn popup_block(title: &str, accent: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(title)
        .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Black))
}

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    let Some(message) = ui_state.error_message.as_deref() else {
        return;
    };

    let area = frame.area();
    let width = 52.min(area.width.saturating_sub(4));
    let text_width = width.saturating_sub(2).max(1) as usize;
    let lines = message.chars().count().div_ceil(text_width).max(1) as u16;
    let popup = centered_rect(area, width, lines + 2);

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: false })
            .block(popup_block(" Error · Esc ", Color::Red)),
        popup,
    );
}

fn help_lines() -> Vec<Line<'static>> {
    let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let key = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);

    let mut lines = Vec::new();
    for (i, (group, bindings)) in KEY_GROUPS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*group, heading)));
        lines.extend(bindings.iter().map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("  {:<KEY_COLUMN$}", keys), key),
                Span::raw(*action),
            ])
        }));
    }
    lines
}

pub fn render_help_popup(frame: &mut Frame) {
    let lines = help_lines();
    let popup = centered_rect(frame.area(), 46, lines.len() as u16 + 2);

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(popup_block(" Keys · h ", Color::Cyan)),
        popup,
    );
}
