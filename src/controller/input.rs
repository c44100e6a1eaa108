//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use super::playback::SEEK_STEP;
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_error().await;
            }
            return Ok(());
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                model.switch_tab().await;
            }
            KeyCode::Up => {
                model.content_move_up().await;
            }
            KeyCode::Down => {
                model.content_move_down().await;
            }
            KeyCode::Enter => {
                drop(model);
                self.open_selected().await;
            }
            KeyCode::Backspace | KeyCode::Esc => {
                model.navigate_back().await;
            }
            // Play/Pause toggle
            KeyCode::Char(' ') => {
                drop(model);
                self.toggle_playback().await;
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                drop(model);
                self.next_track().await;
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                drop(model);
                self.previous_track().await;
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                drop(model);
                self.toggle_shuffle().await;
            }
            // Header toggle button
            KeyCode::Char('t') | KeyCode::Char('T') => {
                drop(model);
                self.toggle_clicked().await;
            }
            // Reveal/conceal the player sheet
            KeyCode::Char('v') | KeyCode::Char('V') => {
                drop(model);
                self.toggle_sheet().await;
            }
            KeyCode::Left => {
                drop(model);
                self.seek_by(-SEEK_STEP).await;
            }
            KeyCode::Right => {
                drop(model);
                self.seek_by(SEEK_STEP).await;
            }
            // 0-9 jump to tenths of the track
            KeyCode::Char(c) if c.is_ascii_digit() => {
                drop(model);
                let tenths = c.to_digit(10).unwrap_or(0);
                self.seek_to_fraction(f64::from(tenths) / 10.0).await;
            }
            KeyCode::Char('R') => {
                drop(model);
                let controller = self.clone();
                tokio::spawn(async move {
                    controller.rescan().await;
                });
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }
}
