//! Playback engines
//!
//! The rest of the application only talks to `PlaybackEngine`. Each engine
//! turns engine-neutral `QueueEntry` values into whatever it plays.
//!
//! - `cursor`: queue position and shuffle order shared by the engines
//! - `silent`: clock-driven engine without audio output
//! - `rodio_engine`: real audio output (feature `audio`)

mod cursor;
mod silent;
#[cfg(feature = "audio")]
mod rodio_engine;

use thiserror::Error;

use crate::source::{PlaybackQueue, QueueEntry};

pub use cursor::QueueCursor;
pub use silent::SilentEngine;
#[cfg(feature = "audio")]
pub use rodio_engine::RodioEngine;

/// Going back within this many milliseconds of a track's start moves to the previous entry;
/// later than that it restarts the current one.
pub const RESTART_THRESHOLD_MS: u64 = 3000;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("No audio output device: {0}")]
    NoDevice(String),

    #[error("Cannot decode {uri}: {reason}")]
    Decode { uri: String, reason: String },

    #[error("Seek failed: {0}")]
    Seek(String),

    #[error("Nothing is queued")]
    QueueEmpty,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Transport controls and state of a playback engine
pub trait PlaybackEngine: Send {
    fn name(&self) -> &'static str;

    /// Replace the queue and start playing at `start_index`
    fn play_queue(&mut self, queue: PlaybackQueue, start_index: usize) -> Result<(), EngineError>;

    fn play(&mut self) -> Result<(), EngineError>;

    fn pause(&mut self);

    /// Seek within the current entry to an absolute position
    fn seek_to(&mut self, position_ms: u64) -> Result<(), EngineError>;

    fn seek_to_next(&mut self) -> Result<(), EngineError>;

    fn seek_to_previous(&mut self) -> Result<(), EngineError>;

    fn set_shuffle(&mut self, enabled: bool);

    /// Give the engine a chance to advance past a finished entry
    fn poll(&mut self) {}

    fn is_playing(&self) -> bool;

    fn position_ms(&self) -> u64;

    fn duration_ms(&self) -> u64;

    fn shuffle(&self) -> bool;

    fn current_entry(&self) -> Option<&QueueEntry>;

    /// Everything the UI mirrors, read in one go
    fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            is_playing: self.is_playing(),
            position_ms: self.position_ms(),
            duration_ms: self.duration_ms(),
            shuffle: self.shuffle(),
            current: self.current_entry().cloned(),
        }
    }
}

/// Engine state as read back after each intent
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub is_playing: bool,
    pub position_ms: u64,
    pub duration_ms: u64,
    pub shuffle: bool,
    pub current: Option<QueueEntry>,
}

/// Open the best available engine.
///
/// Falls back to the silent engine when audio is disabled or no device opens.
pub fn build_engine(audio_enabled: bool) -> Box<dyn PlaybackEngine> {
    #[cfg(feature = "audio")]
    {
        if audio_enabled {
            match RodioEngine::new() {
                Ok(engine) => {
                    tracing::info!("Audio output ready");
                    return Box::new(engine);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Audio output unavailable, falling back to silent engine");
                }
            }
        }
    }

    if cfg!(not(feature = "audio")) && audio_enabled {
        tracing::info!("Built without the `audio` feature, using silent engine");
    }

    Box::new(SilentEngine::new())
}
