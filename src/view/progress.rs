//! Progress bar rendering (mini-player and the full player's seek bar)

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::model::PlayerView;
use super::utils::format_duration;

pub fn render_progress_bar(frame: &mut Frame, area: Rect, view: &PlayerView) {
    let player = &view.player;
    let status_text = match &player.now_playing {
        None => " No track playing".to_string(),
        Some(entry) => format!(" {} {} | {}", view.play_icon.glyph(), entry.title, entry.subtitle),
    };

    let shuffle_text = if player.shuffle { "Shuffle: On" } else { "Shuffle: Off" };
    let time_str = format!(
        "{} / {}",
        format_duration(player.position_ms),
        format_duration(player.duration_ms)
    );

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} ", status_text))
                .title_bottom(Line::from(format!(" {} ", shuffle_text)).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(player.progress.clamp(0.0, 1.0))
        .label(time_str);

    frame.render_widget(gauge, area);
}
