//! Persisted song store
//!
//! The store keeps the library in memory, mirrors it to a JSON file and
//! publishes every change on `watch` channels so the UI can follow it.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tokio::sync::watch;

use super::error::Result;
use super::types::{albums_from_songs, Album, Song};

pub struct SongStore {
    path: PathBuf,
    songs: RwLock<Vec<Song>>,
    songs_tx: watch::Sender<Vec<Song>>,
    albums_tx: watch::Sender<Vec<Album>>,
}

impl SongStore {
    /// Open the store at `path`. A missing file is an empty library.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let songs = Self::read_file(&path)?;
        tracing::debug!(path = %path.display(), songs = songs.len(), "Song store opened");

        let (albums_tx, _) = watch::channel(albums_from_songs(&songs));
        let (songs_tx, _) = watch::channel(songs.clone());

        Ok(Self {
            path,
            songs: RwLock::new(songs),
            songs_tx,
            albums_tx,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file, replacing the in-memory library
    pub fn reload(&self) -> Result<Vec<Song>> {
        let songs = Self::read_file(&self.path)?;
        *self.songs.write() = songs.clone();
        self.publish();
        Ok(songs)
    }

    pub fn all(&self) -> Vec<Song> {
        self.songs.read().clone()
    }

    pub fn get(&self, media_id: &str) -> Option<Song> {
        self.songs
            .read()
            .iter()
            .find(|s| s.media_id == media_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.songs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.read().is_empty()
    }

    /// Insert songs whose media id is not stored yet. Returns how many were added.
    pub fn insert_or_ignore(&self, new_songs: Vec<Song>) -> usize {
        let inserted = {
            let mut songs = self.songs.write();
            let mut known: HashSet<String> = songs.iter().map(|s| s.media_id.clone()).collect();
            let before = songs.len();
            for song in new_songs {
                if known.insert(song.media_id.clone()) {
                    songs.push(song);
                }
            }
            songs.len() - before
        };

        if inserted > 0 {
            self.publish();
        }
        inserted
    }

    /// Delete songs by media id. Returns how many were removed.
    pub fn delete(&self, media_ids: &[String]) -> usize {
        if media_ids.is_empty() {
            return 0;
        }

        let removed = {
            let doomed: HashSet<&String> = media_ids.iter().collect();
            let mut songs = self.songs.write();
            let before = songs.len();
            songs.retain(|s| !doomed.contains(&s.media_id));
            before - songs.len()
        };

        if removed > 0 {
            self.publish();
        }
        removed
    }

    /// Write the library to disk (temp file + rename)
    pub fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = {
            let songs = self.songs.read();
            serde_json::to_string_pretty(&*songs)?
        };

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), "Song store persisted");
        Ok(())
    }

    pub fn subscribe_songs(&self) -> watch::Receiver<Vec<Song>> {
        self.songs_tx.subscribe()
    }

    pub fn subscribe_albums(&self) -> watch::Receiver<Vec<Album>> {
        self.albums_tx.subscribe()
    }

    fn publish(&self) {
        let songs = self.songs.read().clone();
        self.albums_tx.send_replace(albums_from_songs(&songs));
        self.songs_tx.send_replace(songs);
    }

    fn read_file(path: &Path) -> Result<Vec<Song>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}
