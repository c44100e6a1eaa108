#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::watch;

use howl::library::{albums_from_songs, Album, LibraryError, Result, Song, SongsRepository};

pub fn song(id: &str, title: &str, album_id: u64, duration_ms: u64) -> Song {
    Song {
        media_id: id.to_string(),
        title: title.to_string(),
        artist: "The Testers".to_string(),
        album: format!("Album {}", album_id),
        album_id,
        uri: format!("/music/{}.mp3", id),
        album_art: None,
        duration_ms,
    }
}

pub fn three_songs() -> Vec<Song> {
    vec![
        song("a", "First", 1, 180_000),
        song("b", "Second", 1, 200_000),
        song("c", "Third", 2, 220_000),
    ]
}

/// In-memory repository; `fails` decides, by fetch number, which fetches are I/O errors
pub struct FakeRepository {
    songs: Vec<Song>,
    fails: fn(usize) -> bool,
    fetches: AtomicUsize,
    songs_tx: watch::Sender<Vec<Song>>,
    albums_tx: watch::Sender<Vec<Album>>,
}

impl FakeRepository {
    pub fn with_songs(songs: Vec<Song>) -> Self {
        let (songs_tx, _) = watch::channel(songs.clone());
        let (albums_tx, _) = watch::channel(albums_from_songs(&songs));
        Self {
            songs,
            fails: |_| false,
            fetches: AtomicUsize::new(0),
            songs_tx,
            albums_tx,
        }
    }

    pub fn failing() -> Self {
        Self::with_fetch_failures(Vec::new(), |_| true)
    }

    /// Fetch `n` (counting from 0) fails when `fails(n)` is true
    pub fn with_fetch_failures(songs: Vec<Song>, fails: fn(usize) -> bool) -> Self {
        let mut repo = Self::with_songs(songs);
        repo.fails = fails;
        repo
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl SongsRepository for FakeRepository {
    fn get_all_songs(&self) -> Result<Vec<Song>> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst);
        if (self.fails)(n) {
            return Err(LibraryError::Io(io::Error::new(io::ErrorKind::Other, "disk on fire")));
        }
        Ok(self.songs.clone())
    }

    fn songs_stream(&self) -> watch::Receiver<Vec<Song>> {
        self.songs_tx.subscribe()
    }

    fn song(&self, media_id: &str) -> Option<Song> {
        self.songs.iter().find(|s| s.media_id == media_id).cloned()
    }

    fn songs_for_album(&self, album_id: u64) -> Vec<Song> {
        self.songs.iter().filter(|s| s.album_id == album_id).cloned().collect()
    }

    fn albums_stream(&self) -> watch::Receiver<Vec<Album>> {
        self.albums_tx.subscribe()
    }

    fn sync_data(&self) -> Result<bool> {
        Ok(!self.songs.is_empty())
    }

    fn cleanup(&self) -> Result<bool> {
        Ok(!self.songs.is_empty())
    }
}
