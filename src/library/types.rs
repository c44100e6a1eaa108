//! Song and album records

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// A song in the local library
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub media_id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_id: u64,
    pub uri: String,
    #[serde(default)]
    pub album_art: Option<String>,
    #[serde(default)]
    pub duration_ms: u64,
}

impl Song {
    /// Build a song for a file on disk, deriving its ids from the path and album
    pub fn from_path(
        path: &Path,
        title: Option<String>,
        artist: Option<String>,
        album: Option<String>,
        album_artist: Option<String>,
        duration_ms: u64,
    ) -> Self {
        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| {
                path.file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default()
            });
        let artist = artist
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());
        let album = album
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_ALBUM.to_string());
        let album_artist = album_artist
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| artist.clone());

        let uri = path.to_string_lossy().to_string();

        Self {
            media_id: media_id_for_path(path),
            album_id: album_id_for(&album, &album_artist),
            title,
            artist,
            album,
            uri,
            album_art: None,
            duration_ms,
        }
    }
}

/// An album, made of every song sharing its `album_id`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Album {
    pub album_id: u64,
    pub title: String,
    pub artist: String,
    pub album_art: Option<String>,
    pub song_count: usize,
}

/// Group songs into albums, ordered by album title.
///
/// The first song seen for an album provides its artist and artwork.
pub fn albums_from_songs(songs: &[Song]) -> Vec<Album> {
    let mut by_id: HashMap<u64, Album> = HashMap::new();

    for song in songs {
        by_id
            .entry(song.album_id)
            .and_modify(|album| {
                album.song_count += 1;
                if album.album_art.is_none() {
                    album.album_art = song.album_art.clone();
                }
            })
            .or_insert_with(|| Album {
                album_id: song.album_id,
                title: song.album.clone(),
                artist: song.artist.clone(),
                album_art: song.album_art.clone(),
                song_count: 1,
            });
    }

    let mut albums: Vec<Album> = by_id.into_values().collect();
    albums.sort_by(|a, b| {
        a.title
            .to_lowercase()
            .cmp(&b.title.to_lowercase())
            .then(a.album_id.cmp(&b.album_id))
    });
    albums
}

/// Stable media id for a file: FNV-1a over the path bytes, rendered as hex
pub fn media_id_for_path(path: &Path) -> String {
    format!("{:016x}", fnv1a(path.to_string_lossy().as_bytes()))
}

/// Stable album id from the album title and album artist (case-insensitive)
pub fn album_id_for(album: &str, album_artist: &str) -> u64 {
    let key = format!(
        "{}\u{1f}{}",
        album.trim().to_lowercase(),
        album_artist.trim().to_lowercase()
    );
    fnv1a(key.as_bytes())
}

fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    bytes.iter().fold(OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn song(title: &str, album: &str, artist: &str) -> Song {
        Song::from_path(
            &PathBuf::from(format!("/music/{}/{}.mp3", album, title)),
            Some(title.to_string()),
            Some(artist.to_string()),
            Some(album.to_string()),
            None,
            1000,
        )
    }

    #[test]
    fn missing_tags_fall_back_to_file_stem_and_unknowns() {
        let song = Song::from_path(
            Path::new("/music/loose/track01.flac"),
            None,
            Some("  ".to_string()),
            None,
            None,
            0,
        );
        assert_eq!(song.title, "track01");
        assert_eq!(song.artist, UNKNOWN_ARTIST);
        assert_eq!(song.album, UNKNOWN_ALBUM);
        assert_eq!(song.uri, "/music/loose/track01.flac");
    }

    #[test]
    fn media_id_is_stable_and_path_specific() {
        let a = media_id_for_path(Path::new("/music/a.mp3"));
        assert_eq!(a, media_id_for_path(Path::new("/music/a.mp3")));
        assert_ne!(a, media_id_for_path(Path::new("/music/b.mp3")));
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn album_id_ignores_case_and_whitespace() {
        assert_eq!(album_id_for("Blue Train", "John Coltrane"), album_id_for(" blue train", "JOHN COLTRANE "));
        assert_ne!(album_id_for("Blue Train", "John Coltrane"), album_id_for("Blue Train", "Someone Else"));
    }

    #[test]
    fn albums_group_songs_and_sort_by_title() {
        let songs = vec![
            song("one", "Zebra", "X"),
            song("two", "alpha", "Y"),
            song("three", "Zebra", "X"),
        ];
        let albums = albums_from_songs(&songs);

        assert_eq!(albums.len(), 2);
        assert_eq!(albums[0].title, "alpha");
        assert_eq!(albums[0].song_count, 1);
        assert_eq!(albums[1].title, "Zebra");
        assert_eq!(albums[1].song_count, 2);
        assert_eq!(albums[1].artist, "X");
    }
}
