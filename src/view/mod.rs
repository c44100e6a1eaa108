//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! The screen is a backdrop sheet: concealed, the library fills the screen
//! above a one-line mini-player; revealed, the full player sits on top and
//! the library shrinks below it.
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Top bar with tabs, library status, sheet controls and clock
//! - `library`: Songs, albums and album detail lists
//! - `player`: Full player surface
//! - `progress`: Progress bar / mini-player
//! - `overlays`: Modal overlays (error, help)

mod utils;
mod layout;
mod library;
mod player;
mod progress;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{ContentState, PlayerView, SheetState, UiState};

pub use utils::format_duration;

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, player: &PlayerView, ui_state: &UiState, content_state: &ContentState) {
        let current_media_id = player.player.now_playing.as_ref().map(|e| e.media_id.as_str());

        match player.sheet {
            SheetState::Concealed => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3), // Tabs + controls
                        Constraint::Min(0),    // Library
                        Constraint::Length(3), // Mini-player
                    ])
                    .split(frame.area());

                layout::render_top_bar(frame, chunks[0], player, ui_state, content_state.tab());
                library::render_library(frame, chunks[1], ui_state, content_state, current_media_id, true);
                progress::render_progress_bar(frame, chunks[2], player);
            }
            SheetState::Revealed => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3),      // Tabs + controls
                        Constraint::Percentage(55), // Player
                        Constraint::Min(0),         // Library behind the sheet
                    ])
                    .split(frame.area());

                layout::render_top_bar(frame, chunks[0], player, ui_state, content_state.tab());
                player::render_player(frame, chunks[1], player);
                library::render_library(frame, chunks[2], ui_state, content_state, current_media_id, false);
            }
        }

        // Error notification overlay (if there's an error)
        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
