//! Library loading, rescans and list navigation

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::oneshot;

use crate::model::{LibraryStatus, SelectedItem};
use crate::source::MusicSource;

use super::AppController;

/// Counts reported by a rescan
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanSummary {
    pub found_media: bool,
    pub songs: usize,
}

impl AppController {
    /// Load the stored library, then bring it in step with the music folder
    pub async fn start_library(&self) {
        self.start_listeners().await;
        self.load_source(self.source()).await;
        self.rescan().await;
    }

    /// Load `source` and mirror its readiness into the library banner
    pub(crate) async fn load_source(&self, source: Arc<MusicSource>) -> bool {
        self.model.lock().await.set_library_status(LibraryStatus::Loading).await;

        let (status_tx, status_rx) = oneshot::channel();
        let observed = Arc::clone(&source);
        source.when_ready(move |success| {
            let status = if success {
                LibraryStatus::Ready { songs: observed.len() }
            } else {
                LibraryStatus::Failed(observed.last_error().unwrap_or_else(|| "unknown error".to_string()))
            };
            let _ = status_tx.send(status);
        });

        source.load().await;

        let status = status_rx
            .await
            .unwrap_or_else(|_| LibraryStatus::Failed("library load was abandoned".to_string()));
        let success = matches!(status, LibraryStatus::Ready { .. });
        self.model.lock().await.set_library_status(status).await;
        success
    }

    /// Scan the music folder, then reload the source from the updated store
    pub async fn rescan(&self) {
        tracing::info!("Rescanning library");
        self.model.lock().await.set_library_status(LibraryStatus::Loading).await;

        match self.sync_repository().await {
            Ok(summary) => {
                tracing::info!(found_media = summary.found_media, songs = summary.songs, "Rescan finished");
            }
            Err(e) => {
                tracing::error!(error = %e, "Rescan failed");
                let error_msg = Self::format_error(&e);
                self.model.lock().await.set_error(error_msg).await;
            }
        }

        let source = self.replace_source();
        self.load_source(source).await;
    }

    /// Insert new media and drop vanished files on the blocking pool
    pub async fn sync_repository(&self) -> Result<ScanSummary> {
        let repository = Arc::clone(&self.repository);
        tokio::task::spawn_blocking(move || -> Result<ScanSummary> {
            let found_media = repository.sync_data()?;
            repository.cleanup()?;
            let songs = repository.get_all_songs()?.len();
            Ok(ScanSummary { found_media, songs })
        })
        .await
        .context("library scan task failed")?
    }

    /// Enter on the library pane: play a song or open an album
    pub async fn open_selected(&self) {
        let (selected, song) = {
            let model = self.model.lock().await;
            (model.get_selected_content_item().await, model.get_selected_song().await)
        };

        match selected {
            Some(SelectedItem::Song { .. }) => {
                if let Some(song) = song {
                    self.song_selected(&song).await;
                }
            }
            Some(SelectedItem::Album { album_id }) => self.open_album(album_id).await,
            None => {}
        }
    }

    pub async fn open_album(&self, album_id: u64) {
        let album = self.model.lock().await.find_album(album_id).await;
        let Some(album) = album else {
            tracing::warn!(album_id, "Album vanished before it could be opened");
            return;
        };

        let repository = Arc::clone(&self.repository);
        match tokio::task::spawn_blocking(move || repository.songs_for_album(album_id)).await {
            Ok(songs) => {
                tracing::debug!(album_id, title = %album.title, songs = songs.len(), "Opening album");
                self.model.lock().await.open_album(album, songs).await;
            }
            Err(e) => {
                tracing::error!(album_id, error = %e, "Album lookup task failed");
                let error_msg = Self::format_error(&anyhow::Error::from(e));
                self.model.lock().await.set_error(error_msg).await;
            }
        }
    }
}
