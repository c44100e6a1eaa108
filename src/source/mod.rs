//! Music source - the asynchronous, readiness-gated library loader
//!
//! A `MusicSource` fetches the repository's songs on the blocking pool, keeps
//! them as engine-neutral metadata and exposes two derived views: a playback
//! queue and a list of browsable items. Consumers wait on the readiness gate
//! (`when_ready` callbacks or the `ready` future) before trusting the list.

mod gate;
mod metadata;
mod queue;

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::library::{Song, SongsRepository};

pub use gate::{Readiness, ReadinessGate};
pub use metadata::{BrowsableItem, SongMetadata, MISSING_FIELD};
pub use queue::{PlaybackQueue, QueueEntry};

pub struct MusicSource {
    repository: Arc<dyn SongsRepository>,
    songs: RwLock<Vec<SongMetadata>>,
    gate: ReadinessGate,
    last_error: Mutex<Option<String>>,
}

impl MusicSource {
    /// Create a source for `repository`. It starts out initializing.
    pub fn new(repository: Arc<dyn SongsRepository>) -> Self {
        let source = Self {
            repository,
            songs: RwLock::new(Vec::new()),
            gate: ReadinessGate::new(),
            last_error: Mutex::new(None),
        };
        source.gate.transition(Readiness::Initializing);
        source
    }

    /// Fetch every song and settle the readiness gate.
    ///
    /// Failures never reach the caller: they leave the list empty and the gate in `Error`.
    /// Once the gate is terminal the list only changes when it agrees with that state:
    /// an `Initialized` source refreshes on success and keeps its list on failure, and
    /// an `Error` source stays empty.
    pub async fn load(&self) {
        if self.gate.state() == Readiness::Error {
            tracing::warn!("Music source already failed; ignoring reload");
            return;
        }

        let repository = Arc::clone(&self.repository);
        let fetched = tokio::task::spawn_blocking(move || repository.get_all_songs()).await;

        let outcome = match fetched {
            Ok(Ok(songs)) => Ok(songs),
            Ok(Err(e)) => Err(e.to_string()),
            Err(e) => Err(format!("library fetch task failed: {}", e)),
        };

        match outcome {
            Ok(_) if self.gate.state() == Readiness::Error => {
                tracing::warn!("Music source failed while reloading; dropping the fetched songs");
            }
            Ok(songs) => {
                let metadata: Vec<SongMetadata> = songs.iter().map(SongMetadata::from).collect();
                let count = metadata.len();
                *self.songs.write() = metadata;
                *self.last_error.lock() = None;
                tracing::info!(songs = count, "Music source loaded");
                self.gate.transition(Readiness::Initialized);
            }
            Err(reason) if self.gate.state() == Readiness::Initialized => {
                tracing::warn!(error = %reason, songs = self.len(), "Reload failed; keeping the loaded library");
            }
            Err(reason) => {
                self.songs.write().clear();
                tracing::error!(error = %reason, "Music source failed to load");
                *self.last_error.lock() = Some(reason);
                self.gate.transition(Readiness::Error);
            }
        }
    }

    pub fn readiness(&self) -> Readiness {
        self.gate.state()
    }

    /// See [`ReadinessGate::when_ready`]
    pub fn when_ready<F>(&self, callback: F) -> bool
    where
        F: FnOnce(bool) + Send + 'static,
    {
        self.gate.when_ready(callback)
    }

    /// See [`ReadinessGate::ready`]
    pub async fn ready(&self) -> bool {
        self.gate.ready().await
    }

    /// Why the last load failed, if it did
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }

    pub fn songs(&self) -> Vec<SongMetadata> {
        self.songs.read().clone()
    }

    pub fn len(&self) -> usize {
        self.songs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.read().is_empty()
    }

    /// Playback queue with one entry per song, in list order.
    ///
    /// Only meaningful once the source is `Initialized`; it does not wait.
    pub fn as_queue(&self) -> PlaybackQueue {
        PlaybackQueue::new(
            self.songs
                .read()
                .iter()
                .map(SongMetadata::to_queue_entry)
                .collect(),
        )
    }

    /// The full queue plus the index of `song` in it, matched on the whole
    /// record so songs sharing a placeholder id are told apart.
    pub fn queue_starting_at(&self, song: &Song) -> Option<(PlaybackQueue, usize)> {
        let wanted = SongMetadata::from(song);
        let songs = self.songs.read();
        let index = songs.iter().position(|m| *m == wanted)?;
        let queue = PlaybackQueue::new(songs.iter().map(SongMetadata::to_queue_entry).collect());
        Some((queue, index))
    }

    pub fn as_browsable_items(&self) -> Vec<BrowsableItem> {
        self.songs
            .read()
            .iter()
            .map(SongMetadata::to_browsable_item)
            .collect()
    }
}
