//! Device media index: discovers audio files under the music directory and reads their tags

use std::path::{Path, PathBuf};

use lofty::{Accessor, AudioFile, ItemKey, TaggedFileExt};

use super::error::{LibraryError, Result};
use super::types::Song;

const COVER_FILE_NAMES: [&str; 4] = ["cover.jpg", "cover.png", "folder.jpg", "folder.png"];

pub struct MediaIndex {
    root: PathBuf,
    extensions: Vec<String>,
}

impl MediaIndex {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: ["mp3", "flac", "ogg", "opus", "wav", "m4a", "aac"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan the music directory and build a song for every supported file.
    ///
    /// Files are returned in path order. A file whose tags cannot be read still
    /// yields a song named after the file.
    pub fn scan(&self) -> Result<Vec<Song>> {
        let files = self.discover_files()?;
        tracing::info!(root = %self.root.display(), files = files.len(), "Scanning media index");

        let songs = files
            .iter()
            .map(|path| match read_song(path) {
                Ok(song) => song,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Could not read tags, using file name");
                    let mut song = Song::from_path(path, None, None, None, None, 0);
                    song.album_art = find_cover(path);
                    song
                }
            })
            .collect();

        Ok(songs)
    }

    fn discover_files(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            return Err(LibraryError::MusicDirMissing(self.root.display().to_string()));
        }

        if self.root.is_file() {
            return Ok(if self.is_supported_file(&self.root) {
                vec![self.root.clone()]
            } else {
                Vec::new()
            });
        }

        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|entry| entry.into_path())
            .filter(|path| path.is_file() && self.is_supported_file(path))
            .collect();

        files.sort();
        Ok(files)
    }

    fn is_supported_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let e = e.to_lowercase();
                self.extensions.iter().any(|supported| *supported == e)
            })
            .unwrap_or(false)
    }
}

fn read_song(path: &Path) -> Result<Song> {
    let tagged_file = lofty::read_from_path(path)?;
    let duration_ms = tagged_file.properties().duration().as_millis() as u64;

    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag());

    let mut song = match tag {
        Some(tag) => Song::from_path(
            path,
            tag.title().map(|s| s.to_string()),
            tag.artist().map(|s| s.to_string()),
            tag.album().map(|s| s.to_string()),
            tag.get_string(&ItemKey::AlbumArtist).map(|s| s.to_string()),
            duration_ms,
        ),
        None => Song::from_path(path, None, None, None, None, duration_ms),
    };

    song.album_art = find_cover(path);
    Ok(song)
}

/// Album art is a cover image sitting next to the audio file
fn find_cover(path: &Path) -> Option<String> {
    let dir = path.parent()?;
    COVER_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
        .map(|cover| cover.to_string_lossy().to_string())
}
