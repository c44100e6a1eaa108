//! Layout rendering (top bar with tabs, clock and sheet controls)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use ratatui::widgets::Padding;

use crate::model::{LibraryStatus, LibraryTab, PlayerView, UiState};
use super::utils::clock_text;

pub fn render_top_bar(frame: &mut Frame, area: Rect, player: &PlayerView, ui_state: &UiState, tab: LibraryTab) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Tabs
            Constraint::Length(24), // Library status
            Constraint::Length(20), // Sheet controls + clock
        ])
        .split(area);

    let selected = match tab {
        LibraryTab::Songs => 0,
        LibraryTab::Albums => 1,
    };
    let tabs = Tabs::new(vec![LibraryTab::Songs.title(), LibraryTab::Albums.title()])
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" howl ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(tabs, chunks[0]);

    let (status_text, status_style) = match &ui_state.library_status {
        LibraryStatus::Loading => ("Loading library…".to_string(), Style::default().fg(Color::Yellow)),
        LibraryStatus::Ready { songs } => (format!("{} songs", songs), Style::default().fg(Color::Cyan)),
        LibraryStatus::Failed(_) => ("Library unavailable".to_string(), Style::default().fg(Color::Red)),
    };
    let status = Paragraph::new(status_text)
        .style(status_style)
        .block(Block::default().borders(Borders::ALL).title(" Library "));
    frame.render_widget(status, chunks[1]);

    let controls = Paragraph::new(Line::from(vec![
        Span::styled(player.handle_icon.glyph(), Style::default().fg(Color::Green)),
        Span::raw("  "),
        Span::styled(player.toggle_icon.label(), Style::default().fg(Color::Green)),
        Span::raw("  "),
        Span::styled(clock_text(), Style::default().fg(Color::White)),
    ]))
    .block(Block::default().borders(Borders::ALL).padding(Padding::horizontal(1)));
    frame.render_widget(controls, chunks[2]);
}
