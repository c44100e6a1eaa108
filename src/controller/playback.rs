//! Playback intents
//!
//! Each intent makes at most one engine call and then re-reads the engine
//! into the model, so the model never guesses at engine state.

use crate::engine::{EngineError, PlaybackEngine};
use crate::library::Song;
use crate::model::{seek_position, SheetState};
use crate::source::{PlaybackQueue, Readiness, SongMetadata};

use super::AppController;

/// Step used by the seek keys, as a fraction of the track
pub const SEEK_STEP: f64 = 0.05;

impl AppController {
    /// Run one engine call, surface its error and re-read engine state
    async fn run_engine_intent<F>(&self, action: &'static str, op: F)
    where
        F: FnOnce(&mut dyn PlaybackEngine) -> Result<(), EngineError>,
    {
        let result = {
            let mut engine = self.engine.lock().await;
            op(&mut **engine)
        };

        match result {
            Ok(()) => tracing::debug!(action, "Engine intent applied"),
            Err(e) => {
                tracing::error!(action, error = %e, "Engine intent failed");
                let error_msg = Self::format_error(&anyhow::Error::from(e));
                self.model.lock().await.set_error(error_msg).await;
            }
        }

        self.sync_from_engine().await;
    }

    pub async fn toggle_playback(&self) {
        self.run_engine_intent("toggle_playback", |engine| {
            if engine.is_playing() {
                engine.pause();
                Ok(())
            } else {
                engine.play()
            }
        })
        .await;
    }

    pub async fn next_track(&self) {
        self.run_engine_intent("next_track", |engine| engine.seek_to_next()).await;
    }

    pub async fn previous_track(&self) {
        self.run_engine_intent("previous_track", |engine| engine.seek_to_previous()).await;
    }

    pub async fn toggle_shuffle(&self) {
        self.run_engine_intent("toggle_shuffle", |engine| {
            let enabled = !engine.shuffle();
            engine.set_shuffle(enabled);
            tracing::info!(enabled, "Shuffle toggled");
            Ok(())
        })
        .await;
    }

    /// Seek to a fraction of the current track. The model shows the new
    /// position right away; the engine's answer replaces it afterwards.
    pub async fn seek_to_fraction(&self, fraction: f64) {
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        self.model.lock().await.show_seek(fraction).await;

        self.run_engine_intent("seek_to_fraction", |engine| {
            let position_ms = seek_position(fraction, engine.duration_ms());
            engine.seek_to(position_ms)
        })
        .await;
    }

    /// Seek relative to the current progress
    pub async fn seek_by(&self, delta: f64) {
        let progress = self.model.lock().await.get_progress().await;
        self.seek_to_fraction(progress + delta).await;
    }

    /// Start playback at `song`. With the library loaded the whole library is
    /// queued from that song; otherwise just the song itself.
    pub async fn song_selected(&self, song: &Song) {
        let source = self.source();
        let single = || PlaybackQueue::single(SongMetadata::from(song).to_queue_entry());

        let (queue, start_index) = if source.readiness() == Readiness::Initialized {
            source.queue_starting_at(song).unwrap_or_else(|| (single(), 0))
        } else {
            (single(), 0)
        };

        tracing::info!(
            media_id = %song.media_id,
            title = %song.title,
            queue_len = queue.len(),
            start_index,
            "Song selected"
        );

        self.run_engine_intent("song_selected", move |engine| engine.play_queue(queue, start_index))
            .await;
    }

    pub async fn sheet_toggled(&self, revealed: bool) {
        let sheet = SheetState::from_revealed(revealed);
        tracing::debug!(?sheet, "Sheet toggled");
        self.model.lock().await.set_sheet(sheet).await;
    }

    /// Flip the sheet between revealed and concealed
    pub async fn toggle_sheet(&self) {
        let revealed = self.model.lock().await.get_sheet().await.is_revealed();
        self.sheet_toggled(!revealed).await;
    }

    /// Header toggle: shuffle while the player is revealed, play/pause while concealed
    pub async fn toggle_clicked(&self) {
        let sheet = self.model.lock().await.get_sheet().await;
        match sheet {
            SheetState::Revealed => self.toggle_shuffle().await,
            SheetState::Concealed => self.toggle_playback().await,
        }
    }

    /// Periodic tick: let the engine move past finished entries, then re-read it
    pub async fn update_progress(&self) {
        self.engine.lock().await.poll();
        self.sync_from_engine().await;
    }
}
