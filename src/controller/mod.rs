//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and the playback engine, and keeps the
//! library in step with the repository.
//!
//! - `input`: Key event handling
//! - `playback`: Playback intents (one engine call, then a state re-read)
//! - `library`: Library loading, rescans and list navigation
//! - `listeners`: Repository stream listeners

mod input;
mod playback;
mod library;
mod listeners;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::engine::{EngineError, PlaybackEngine};
use crate::library::{LibraryError, SongsRepository};
use crate::model::AppModel;
use crate::source::MusicSource;

pub use library::ScanSummary;
pub use playback::SEEK_STEP;

pub type SharedEngine = Arc<Mutex<Box<dyn PlaybackEngine>>>;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    pub(crate) engine: SharedEngine,
    pub(crate) repository: Arc<dyn SongsRepository>,
    source: Arc<parking_lot::RwLock<Arc<MusicSource>>>,
    listeners_started: Arc<Mutex<bool>>,
}

impl AppController {
    pub fn new(
        model: Arc<Mutex<AppModel>>,
        engine: Box<dyn PlaybackEngine>,
        repository: Arc<dyn SongsRepository>,
    ) -> Self {
        let source = Arc::new(MusicSource::new(Arc::clone(&repository)));
        Self {
            model,
            engine: Arc::new(Mutex::new(engine)),
            repository,
            source: Arc::new(parking_lot::RwLock::new(source)),
            listeners_started: Arc::new(Mutex::new(false)),
        }
    }

    /// The music source currently backing playback queues
    pub fn source(&self) -> Arc<MusicSource> {
        Arc::clone(&self.source.read())
    }

    /// Swap in a fresh, not yet loaded source
    pub(crate) fn replace_source(&self) -> Arc<MusicSource> {
        let source = Arc::new(MusicSource::new(Arc::clone(&self.repository)));
        *self.source.write() = Arc::clone(&source);
        source
    }

    /// Re-read the engine into the model
    pub async fn sync_from_engine(&self) {
        let snapshot = self.engine.lock().await.snapshot();
        let model = self.model.lock().await;
        model.apply_engine_snapshot(&snapshot).await;
    }

    pub(crate) fn format_error(error: &anyhow::Error) -> String {
        if let Some(engine_error) = error.downcast_ref::<EngineError>() {
            return match engine_error {
                EngineError::QueueEmpty => "Nothing is queued. Pick a song first.".to_string(),
                EngineError::NoDevice(_) => "No audio output device available.".to_string(),
                EngineError::Decode { uri, .. } => format!("Cannot play {}", uri),
                EngineError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    "File not found. Try rescanning the library (R).".to_string()
                }
                other => format!("Error: {}", other),
            };
        }

        if let Some(library_error) = error.downcast_ref::<LibraryError>() {
            return match library_error {
                LibraryError::MusicDirMissing(dir) => format!("Music folder not found: {}", dir),
                other => format!("Library error: {}", other),
            };
        }

        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_speaks_plainly_about_engine_failures() {
        let err = anyhow::Error::from(EngineError::QueueEmpty);
        assert_eq!(AppController::format_error(&err), "Nothing is queued. Pick a song first.");

        let err = anyhow::Error::from(EngineError::Io(std::io::Error::from(std::io::ErrorKind::NotFound)));
        assert!(AppController::format_error(&err).contains("rescanning"));

        let err = anyhow::Error::from(LibraryError::MusicDirMissing("/nope".to_string()));
        assert_eq!(AppController::format_error(&err), "Music folder not found: /nope");

        let err = anyhow::anyhow!("something else");
        assert_eq!(AppController::format_error(&err), "Error: something else");
    }
}
