//! Audio output through rodio

use std::fs::File;
use std::io::BufReader;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::source::{PlaybackQueue, QueueEntry};

use super::{EngineError, PlaybackEngine, QueueCursor, RESTART_THRESHOLD_MS};

/// The parts of a `rodio::Sink` the engine drives
pub trait AudioOutput: Send {
    fn append(&self, decoder: Decoder<BufReader<File>>);
    fn play(&self);
    fn pause(&self);
    fn clear(&self);
    fn stop(&self);
    fn empty(&self) -> bool;
    fn is_paused(&self) -> bool;
    fn get_pos(&self) -> Duration;
    fn try_seek(&self, position: Duration) -> Result<(), String>;
}

impl AudioOutput for Sink {
    fn append(&self, decoder: Decoder<BufReader<File>>) {
        Sink::append(self, decoder)
    }

    fn play(&self) {
        Sink::play(self)
    }

    fn pause(&self) {
        Sink::pause(self)
    }

    fn clear(&self) {
        Sink::clear(self)
    }

    fn stop(&self) {
        Sink::stop(self)
    }

    fn empty(&self) -> bool {
        Sink::empty(self)
    }

    fn is_paused(&self) -> bool {
        Sink::is_paused(self)
    }

    fn get_pos(&self) -> Duration {
        Sink::get_pos(self)
    }

    fn try_seek(&self, position: Duration) -> Result<(), String> {
        Sink::try_seek(self, position).map_err(|e| e.to_string())
    }
}

/// Plays local files on the default output device.
///
/// `OutputStream` is not `Send`, so it lives on its own thread for as long as
/// the engine does; the engine only holds the `Sink`.
pub struct RodioEngine<O: AudioOutput = Sink> {
    sink: O,
    cursor: QueueCursor,
    playing: bool,
    duration_ms: u64,
    shutdown_tx: Option<mpsc::Sender<()>>,
    stream_thread: Option<JoinHandle<()>>,
}

impl RodioEngine<Sink> {
    pub fn new() -> Result<Self, EngineError> {
        let (sink_tx, sink_rx) = mpsc::channel::<Result<Sink, String>>();
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let stream_thread = std::thread::Builder::new()
            .name("howl-audio".to_string())
            .spawn(move || {
                let (stream, handle) = match OutputStream::try_default() {
                    Ok(pair) => pair,
                    Err(e) => {
                        let _ = sink_tx.send(Err(e.to_string()));
                        return;
                    }
                };
                match Sink::try_new(&handle) {
                    Ok(sink) => {
                        let _ = sink_tx.send(Ok(sink));
                    }
                    Err(e) => {
                        let _ = sink_tx.send(Err(e.to_string()));
                        return;
                    }
                }
                // Keep the device open until the engine goes away
                let _ = shutdown_rx.recv();
                drop(stream);
            })?;

        let sink = match sink_rx.recv() {
            Ok(Ok(sink)) => sink,
            Ok(Err(reason)) => {
                let _ = stream_thread.join();
                return Err(EngineError::NoDevice(reason));
            }
            Err(_) => {
                let _ = stream_thread.join();
                return Err(EngineError::NoDevice("audio thread exited".to_string()));
            }
        };

        Ok(Self {
            sink,
            cursor: QueueCursor::new(),
            playing: false,
            duration_ms: 0,
            shutdown_tx: Some(shutdown_tx),
            stream_thread: Some(stream_thread),
        })
    }
}

impl<O: AudioOutput> RodioEngine<O> {
    fn with_output(sink: O) -> Self {
        Self {
            sink,
            cursor: QueueCursor::new(),
            playing: false,
            duration_ms: 0,
            shutdown_tx: None,
            stream_thread: None,
        }
    }

    /// Decode the current entry into the sink and start it.
    ///
    /// An entry that cannot be opened stops the sink, so the cursor and the
    /// audible track never disagree.
    fn start_current(&mut self) -> Result<(), EngineError> {
        let entry = self.cursor.current().cloned().ok_or(EngineError::QueueEmpty)?;

        let (decoder, duration_ms) = match open_entry(&entry) {
            Ok(opened) => opened,
            Err(e) => {
                self.stop();
                self.duration_ms = 0;
                return Err(e);
            }
        };
        self.duration_ms = duration_ms;

        self.sink.clear();
        self.sink.append(decoder);
        self.sink.play();
        self.playing = true;

        tracing::info!(title = %entry.title, uri = %entry.uri, duration_ms = self.duration_ms, "Playing");
        Ok(())
    }

    fn stop(&mut self) {
        self.sink.clear();
        self.playing = false;
    }
}

fn open_entry(entry: &QueueEntry) -> Result<(Decoder<BufReader<File>>, u64), EngineError> {
    let file = File::open(&entry.uri)?;
    let decoder = Decoder::new(BufReader::new(file)).map_err(|e| EngineError::Decode {
        uri: entry.uri.clone(),
        reason: e.to_string(),
    })?;

    let duration_ms = if entry.duration_ms > 0 {
        entry.duration_ms
    } else {
        decoder
            .total_duration()
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    };
    Ok((decoder, duration_ms))
}

impl<O: AudioOutput> PlaybackEngine for RodioEngine<O> {
    fn name(&self) -> &'static str {
        "rodio"
    }

    fn play_queue(&mut self, queue: PlaybackQueue, start_index: usize) -> Result<(), EngineError> {
        if self.cursor.load(queue, start_index).is_none() {
            self.stop();
            return Err(EngineError::QueueEmpty);
        }
        self.start_current()
    }

    fn play(&mut self) -> Result<(), EngineError> {
        if self.cursor.current().is_none() {
            return Err(EngineError::QueueEmpty);
        }
        if self.sink.empty() {
            return self.start_current();
        }
        self.sink.play();
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.sink.pause();
        self.playing = false;
    }

    fn seek_to(&mut self, position_ms: u64) -> Result<(), EngineError> {
        if self.sink.empty() {
            return Err(EngineError::QueueEmpty);
        }
        self.sink
            .try_seek(Duration::from_millis(position_ms))
            .map_err(EngineError::Seek)
    }

    fn seek_to_next(&mut self) -> Result<(), EngineError> {
        if self.cursor.advance().is_some() {
            let was_playing = self.playing;
            self.start_current()?;
            if !was_playing {
                self.pause();
            }
        }
        Ok(())
    }

    fn seek_to_previous(&mut self) -> Result<(), EngineError> {
        if self.cursor.current().is_none() {
            return Err(EngineError::QueueEmpty);
        }
        if self.position_ms() > RESTART_THRESHOLD_MS || self.cursor.retreat().is_none() {
            return self.seek_to(0);
        }
        let was_playing = self.playing;
        self.start_current()?;
        if !was_playing {
            self.pause();
        }
        Ok(())
    }

    fn set_shuffle(&mut self, enabled: bool) {
        self.cursor.set_shuffle(enabled);
    }

    fn poll(&mut self) {
        if !self.playing || !self.sink.empty() {
            return;
        }

        if self.cursor.advance().is_some() {
            if let Err(e) = self.start_current() {
                tracing::error!(error = %e, "Could not start next entry");
                self.stop();
            }
        } else {
            tracing::debug!("Queue finished");
            self.playing = false;
        }
    }

    fn is_playing(&self) -> bool {
        self.playing && !self.sink.is_paused()
    }

    fn position_ms(&self) -> u64 {
        let position = self.sink.get_pos().as_millis() as u64;
        if self.duration_ms > 0 {
            position.min(self.duration_ms)
        } else {
            position
        }
    }

    fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    fn shuffle(&self) -> bool {
        self.cursor.shuffle()
    }

    fn current_entry(&self) -> Option<&QueueEntry> {
        self.cursor.current()
    }
}

impl<O: AudioOutput> Drop for RodioEngine<O> {
    fn drop(&mut self) {
        self.sink.stop();
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.stream_thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeOutput {
        queued: AtomicUsize,
        paused: AtomicBool,
    }

    impl AudioOutput for FakeOutput {
        fn append(&self, _decoder: Decoder<BufReader<File>>) {
            self.queued.fetch_add(1, Ordering::SeqCst);
        }
        fn play(&self) {
            self.paused.store(false, Ordering::SeqCst);
        }
        fn pause(&self) {
            self.paused.store(true, Ordering::SeqCst);
        }
        fn clear(&self) {
            self.queued.store(0, Ordering::SeqCst);
            self.paused.store(true, Ordering::SeqCst);
        }
        fn stop(&self) {
            self.clear();
        }
        fn empty(&self) -> bool {
            self.queued.load(Ordering::SeqCst) == 0
        }
        fn is_paused(&self) -> bool {
            self.paused.load(Ordering::SeqCst)
        }
        fn get_pos(&self) -> Duration {
            Duration::ZERO
        }
        fn try_seek(&self, _position: Duration) -> Result<(), String> {
            Ok(())
        }
    }

    /// A tenth of a second of 8 kHz mono silence
    fn write_wav(path: &std::path::Path) {
        let samples = 800u32;
        let data_len = samples * 2;
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
        bytes.extend_from_slice(b"WAVEfmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.extend_from_slice(&8000u32.to_le_bytes());
        bytes.extend_from_slice(&16000u32.to_le_bytes());
        bytes.extend_from_slice(&2u16.to_le_bytes());
        bytes.extend_from_slice(&16u16.to_le_bytes());
        bytes.extend_from_slice(b"data");
        bytes.extend_from_slice(&data_len.to_le_bytes());
        bytes.resize(bytes.len() + data_len as usize, 0);
        File::create(path).unwrap().write_all(&bytes).unwrap();
    }

    fn entry(id: &str, uri: &std::path::Path) -> QueueEntry {
        QueueEntry {
            media_id: id.to_string(),
            uri: uri.to_string_lossy().into_owned(),
            title: id.to_string(),
            subtitle: String::new(),
            art: None,
            duration_ms: 100,
        }
    }

    #[test]
    fn unopenable_next_entry_stops_instead_of_playing_the_old_one() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a.wav");
        write_wav(&good);
        let missing = dir.path().join("b.wav");

        let mut engine = RodioEngine::with_output(FakeOutput::default());
        engine
            .play_queue(PlaybackQueue::new(vec![entry("a", &good), entry("b", &missing)]), 0)
            .unwrap();
        assert!(engine.is_playing());

        let err = engine.seek_to_next().unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
        assert_eq!(engine.current_entry().map(|e| e.media_id.as_str()), Some("b"));
        assert!(!engine.is_playing());
        assert!(engine.sink.empty());
        assert_eq!(engine.duration_ms(), 0);
    }

    #[test]
    fn undecodable_entry_reports_its_uri() {
        let dir = tempfile::tempdir().unwrap();
        let junk = dir.path().join("junk.mp3");
        std::fs::write(&junk, b"not audio at all").unwrap();

        let mut engine = RodioEngine::with_output(FakeOutput::default());
        match engine.play_queue(PlaybackQueue::new(vec![entry("j", &junk)]), 0) {
            Err(EngineError::Decode { uri, .. }) => assert!(uri.ends_with("junk.mp3")),
            other => panic!("expected a decode error, got {:?}", other.err()),
        }
        assert!(!engine.is_playing());
    }
}
