//! Full player surface shown when the sheet is revealed

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::PlayerView;
use super::progress::render_progress_bar;

pub fn render_player(frame: &mut Frame, area: Rect, view: &PlayerView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Now playing details
            Constraint::Length(3), // Transport controls
            Constraint::Length(3), // Seek bar
        ])
        .split(area);

    let details: Vec<Line> = match &view.player.now_playing {
        None => vec![Line::from(Span::styled(
            "Nothing playing. Pick a song below and press Enter.",
            Style::default().fg(Color::DarkGray),
        ))],
        Some(entry) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    entry.title.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(entry.subtitle.clone(), Style::default().fg(Color::Cyan))),
            ];
            if let Some(art) = &entry.art {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("Cover: {}", art),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            lines
        }
    };

    let now_playing = Paragraph::new(details)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Now Playing ")
                .padding(Padding::uniform(1))
                .border_style(Style::default().fg(Color::Green)),
        );
    frame.render_widget(now_playing, chunks[0]);

    let shuffle_style = if view.player.shuffle {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let controls = Paragraph::new(Line::from(vec![
        Span::styled("🔀", shuffle_style),
        Span::raw("     ⏮     "),
        Span::styled(
            view.play_icon.glyph(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw("     ⏭"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(controls, chunks[1]);

    render_progress_bar(frame, chunks[2], view);
}
