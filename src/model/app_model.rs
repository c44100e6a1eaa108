//! Main application model with state management

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use crate::engine::EngineSnapshot;
use crate::library::{Album, Song};

use super::library::ContentState;
use super::player::{PlayerState, PlayerView};
use super::types::{LibraryStatus, LibraryTab, SelectedItem, SheetState, UiState};

/// Errors stay on screen this long
const ERROR_DISPLAY_SECS: u64 = 5;

/// Main application model containing all state
pub struct AppModel {
    player: Arc<Mutex<PlayerState>>,
    pub ui_state: Arc<Mutex<UiState>>,
    pub content_state: Arc<Mutex<ContentState>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            player: Arc::new(Mutex::new(PlayerState::default())),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            content_state: Arc::new(Mutex::new(ContentState::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    // ========================================================================
    // Player
    // ========================================================================

    pub async fn apply_engine_snapshot(&self, snapshot: &EngineSnapshot) {
        self.player.lock().await.apply(snapshot);
    }

    pub async fn show_seek(&self, fraction: f64) {
        self.player.lock().await.show_seek(fraction);
    }

    pub async fn get_player_state(&self) -> PlayerState {
        self.player.lock().await.clone()
    }

    /// Player state together with the icons that depend on the sheet
    pub async fn get_player_view(&self) -> PlayerView {
        let player = self.player.lock().await.clone();
        let sheet = self.ui_state.lock().await.sheet;
        PlayerView::new(player, sheet)
    }

    pub async fn is_playing(&self) -> bool {
        self.player.lock().await.is_playing
    }

    pub async fn get_shuffle_state(&self) -> bool {
        self.player.lock().await.shuffle
    }

    pub async fn get_duration_ms(&self) -> u64 {
        self.player.lock().await.duration_ms
    }

    pub async fn get_progress(&self) -> f64 {
        self.player.lock().await.progress
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // Sheet, overlays and errors
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn get_sheet(&self) -> SheetState {
        self.ui_state.lock().await.sheet
    }

    pub async fn set_sheet(&self, sheet: SheetState) {
        self.ui_state.lock().await.sheet = sheet;
    }

    pub async fn set_library_status(&self, status: LibraryStatus) {
        self.ui_state.lock().await.library_status = status;
    }

    pub async fn get_library_status(&self) -> LibraryStatus {
        self.ui_state.lock().await.library_status.clone()
    }

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed().as_secs() >= ERROR_DISPLAY_SECS {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    pub async fn show_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        self.ui_state.lock().await.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Library content
    // ========================================================================

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn set_songs(&self, songs: Vec<Song>) {
        self.content_state.lock().await.set_songs(songs);
    }

    pub async fn set_albums(&self, albums: Vec<Album>) {
        self.content_state.lock().await.set_albums(albums);
    }

    pub async fn get_active_tab(&self) -> LibraryTab {
        self.content_state.lock().await.tab()
    }

    pub async fn switch_tab(&self) {
        self.content_state.lock().await.switch_tab();
    }

    pub async fn open_album(&self, album: Album, songs: Vec<Song>) {
        self.content_state.lock().await.open_album(album, songs);
    }

    pub async fn navigate_back(&self) -> bool {
        self.content_state.lock().await.navigate_back()
    }

    pub async fn content_move_up(&self) {
        self.content_state.lock().await.move_up();
    }

    pub async fn content_move_down(&self) {
        self.content_state.lock().await.move_down();
    }

    pub async fn get_selected_content_item(&self) -> Option<SelectedItem> {
        self.content_state.lock().await.selected_item()
    }

    pub async fn get_selected_song(&self) -> Option<Song> {
        self.content_state.lock().await.selected_song()
    }

    pub async fn find_album(&self, album_id: u64) -> Option<Album> {
        self.content_state
            .lock()
            .await
            .albums
            .iter()
            .find(|a| a.album_id == album_id)
            .cloned()
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}
