//! Songs repository: the persisted store kept in step with the media index

use std::collections::HashSet;
use std::path::PathBuf;

use tokio::sync::watch;

use super::error::Result;
use super::media_index::MediaIndex;
use super::store::SongStore;
use super::types::{Album, Song};

/// Access to the song library.
///
/// Methods block on disk I/O; async callers run them on the blocking pool.
pub trait SongsRepository: Send + Sync {
    /// One-shot fetch of every stored song
    fn get_all_songs(&self) -> Result<Vec<Song>>;

    /// Stream of the full song list, updated on every change
    fn songs_stream(&self) -> watch::Receiver<Vec<Song>>;

    fn song(&self, media_id: &str) -> Option<Song>;

    fn songs_for_album(&self, album_id: u64) -> Vec<Song>;

    /// Stream of albums derived from the song list
    fn albums_stream(&self) -> watch::Receiver<Vec<Album>>;

    /// Add songs from the media index that are not stored yet.
    /// Returns whether the media index contained any songs.
    fn sync_data(&self) -> Result<bool>;

    /// Remove stored songs that are no longer in the media index.
    /// Returns whether the media index contained any songs.
    fn cleanup(&self) -> Result<bool>;
}

/// Repository backed by a JSON song store and a directory scan
pub struct LocalRepository {
    store: SongStore,
    index: MediaIndex,
}

impl LocalRepository {
    pub fn open(store_path: impl Into<PathBuf>, music_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            store: SongStore::open(store_path)?,
            index: MediaIndex::new(music_dir),
        })
    }

    pub fn store(&self) -> &SongStore {
        &self.store
    }

    pub fn index(&self) -> &MediaIndex {
        &self.index
    }
}

impl SongsRepository for LocalRepository {
    fn get_all_songs(&self) -> Result<Vec<Song>> {
        self.store.reload()
    }

    fn songs_stream(&self) -> watch::Receiver<Vec<Song>> {
        self.store.subscribe_songs()
    }

    fn song(&self, media_id: &str) -> Option<Song> {
        self.store.get(media_id)
    }

    fn songs_for_album(&self, album_id: u64) -> Vec<Song> {
        self.store
            .all()
            .into_iter()
            .filter(|song| song.album_id == album_id)
            .collect()
    }

    fn albums_stream(&self) -> watch::Receiver<Vec<Album>> {
        self.store.subscribe_albums()
    }

    fn sync_data(&self) -> Result<bool> {
        let songs = self.index.scan()?;
        let found = !songs.is_empty();

        let inserted = self.store.insert_or_ignore(songs);
        if inserted > 0 {
            self.store.persist()?;
        }

        tracing::info!(inserted, total = self.store.len(), "Library synced with media index");
        Ok(found)
    }

    fn cleanup(&self) -> Result<bool> {
        let songs = self.index.scan()?;
        let found = !songs.is_empty();

        let present: HashSet<String> = songs.into_iter().map(|s| s.media_id).collect();
        let removed_ids: Vec<String> = self
            .store
            .all()
            .into_iter()
            .filter(|song| !present.contains(&song.media_id))
            .map(|song| song.media_id)
            .collect();

        let removed = self.store.delete(&removed_ids);
        if removed > 0 {
            self.store.persist()?;
        }

        tracing::info!(removed, total = self.store.len(), "Removed songs missing from media index");
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_track(dir: &std::path::Path, name: &str) {
        fs::write(dir.join(name), b"not really audio").unwrap();
    }

    #[test]
    fn sync_inserts_new_files_once() {
        let music = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        write_track(music.path(), "one.mp3");
        write_track(music.path(), "two.ogg");

        let repo = LocalRepository::open(data.path().join("songs.json"), music.path()).unwrap();
        assert!(repo.sync_data().unwrap());
        assert!(repo.sync_data().unwrap());

        assert_eq!(repo.get_all_songs().unwrap().len(), 2);
        assert!(data.path().join("songs.json").exists());
    }

    #[test]
    fn cleanup_removes_vanished_files() {
        let music = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        write_track(music.path(), "keep.mp3");
        write_track(music.path(), "gone.mp3");

        let repo = LocalRepository::open(data.path().join("songs.json"), music.path()).unwrap();
        repo.sync_data().unwrap();
        fs::remove_file(music.path().join("gone.mp3")).unwrap();

        assert!(repo.cleanup().unwrap());
        let titles: Vec<String> = repo.get_all_songs().unwrap().into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["keep"]);
    }

    #[test]
    fn empty_media_index_reports_false() {
        let music = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();

        let repo = LocalRepository::open(data.path().join("songs.json"), music.path()).unwrap();
        assert!(!repo.sync_data().unwrap());
        assert!(!repo.cleanup().unwrap());
    }

    #[test]
    fn songs_for_album_filters_by_album_id() {
        let music = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        fs::create_dir_all(music.path().join("a")).unwrap();
        write_track(&music.path().join("a"), "x.mp3");
        write_track(music.path(), "y.mp3");

        let repo = LocalRepository::open(data.path().join("songs.json"), music.path()).unwrap();
        repo.sync_data().unwrap();

        let album_id = repo.get_all_songs().unwrap()[0].album_id;
        // Untagged files all share the unknown album
        assert_eq!(repo.songs_for_album(album_id).len(), 2);
        assert!(repo.songs_for_album(album_id.wrapping_add(1)).is_empty());
    }
}
