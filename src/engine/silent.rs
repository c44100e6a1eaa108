//! Clock-driven engine without audio output

use std::time::Instant;

use crate::source::{PlaybackQueue, QueueEntry};

use super::{EngineError, PlaybackEngine, QueueCursor, RESTART_THRESHOLD_MS};

/// Keeps a queue and a wall-clock position but produces no sound.
///
/// Used when no audio device is available and in tests.
#[derive(Debug, Default)]
pub struct SilentEngine {
    cursor: QueueCursor,
    playing: bool,
    offset_ms: u64,
    started_at: Option<Instant>,
}

impl SilentEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn restart_entry(&mut self) {
        self.offset_ms = 0;
        self.started_at = if self.playing { Some(Instant::now()) } else { None };
    }

    fn elapsed_ms(&self) -> u64 {
        self.started_at
            .map(|t| t.elapsed().as_millis() as u64)
            .unwrap_or(0)
    }
}

impl PlaybackEngine for SilentEngine {
    fn name(&self) -> &'static str {
        "silent"
    }

    fn play_queue(&mut self, queue: PlaybackQueue, start_index: usize) -> Result<(), EngineError> {
        if self.cursor.load(queue, start_index).is_none() {
            self.playing = false;
            self.restart_entry();
            return Err(EngineError::QueueEmpty);
        }
        self.playing = true;
        self.restart_entry();
        Ok(())
    }

    fn play(&mut self) -> Result<(), EngineError> {
        if self.cursor.current().is_none() {
            return Err(EngineError::QueueEmpty);
        }
        if !self.playing {
            // Replay from the top once the entry has run out
            if self.duration_ms() > 0 && self.offset_ms >= self.duration_ms() {
                self.offset_ms = 0;
            }
            self.playing = true;
            self.started_at = Some(Instant::now());
        }
        Ok(())
    }

    fn pause(&mut self) {
        if self.playing {
            self.offset_ms = self.position_ms();
            self.playing = false;
            self.started_at = None;
        }
    }

    fn seek_to(&mut self, position_ms: u64) -> Result<(), EngineError> {
        if self.cursor.current().is_none() {
            return Err(EngineError::QueueEmpty);
        }
        let duration = self.duration_ms();
        self.offset_ms = if duration > 0 { position_ms.min(duration) } else { position_ms };
        if self.playing {
            self.started_at = Some(Instant::now());
        }
        Ok(())
    }

    fn seek_to_next(&mut self) -> Result<(), EngineError> {
        if self.cursor.advance().is_some() {
            self.restart_entry();
        }
        Ok(())
    }

    fn seek_to_previous(&mut self) -> Result<(), EngineError> {
        if self.cursor.current().is_none() {
            return Err(EngineError::QueueEmpty);
        }
        if self.position_ms() <= RESTART_THRESHOLD_MS {
            self.cursor.retreat();
        }
        self.restart_entry();
        Ok(())
    }

    fn set_shuffle(&mut self, enabled: bool) {
        self.cursor.set_shuffle(enabled);
    }

    fn poll(&mut self) {
        let duration = self.duration_ms();
        if !self.playing || duration == 0 || self.position_ms() < duration {
            return;
        }

        if self.cursor.advance().is_some() {
            tracing::debug!("Entry finished, advancing queue");
            self.restart_entry();
        } else {
            tracing::debug!("Queue finished");
            self.offset_ms = duration;
            self.playing = false;
            self.started_at = None;
        }
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn position_ms(&self) -> u64 {
        let position = self.offset_ms + if self.playing { self.elapsed_ms() } else { 0 };
        let duration = self.duration_ms();
        if duration > 0 { position.min(duration) } else { position }
    }

    fn duration_ms(&self) -> u64 {
        self.cursor.current().map(|e| e.duration_ms).unwrap_or(0)
    }

    fn shuffle(&self) -> bool {
        self.cursor.shuffle()
    }

    fn current_entry(&self) -> Option<&QueueEntry> {
        self.cursor.current()
    }
}
