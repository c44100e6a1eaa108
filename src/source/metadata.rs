//! Projections of library songs used by the music source

use crate::library::Song;

use super::queue::QueueEntry;

/// Stand-in for a missing media id or uri
pub const MISSING_FIELD: &str = "null";

/// Song record as held by the music source
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongMetadata {
    pub media_id: Option<String>,
    pub media_uri: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub album_id: u64,
    pub icon_uri: Option<String>,
    pub duration_ms: u64,
}

impl From<&Song> for SongMetadata {
    fn from(song: &Song) -> Self {
        Self {
            media_id: non_empty(&song.media_id),
            media_uri: non_empty(&song.uri),
            title: song.title.clone(),
            subtitle: song.artist.clone(),
            album_id: song.album_id,
            icon_uri: song.album_art.clone(),
            duration_ms: song.duration_ms,
        }
    }
}

impl SongMetadata {
    pub fn media_id_or_placeholder(&self) -> &str {
        self.media_id.as_deref().unwrap_or(MISSING_FIELD)
    }

    pub fn media_uri_or_placeholder(&self) -> &str {
        self.media_uri.as_deref().unwrap_or(MISSING_FIELD)
    }

    pub fn to_queue_entry(&self) -> QueueEntry {
        QueueEntry {
            media_id: self.media_id_or_placeholder().to_string(),
            uri: self.media_uri_or_placeholder().to_string(),
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            art: self.icon_uri.clone(),
            duration_ms: self.duration_ms,
        }
    }

    pub fn to_browsable_item(&self) -> BrowsableItem {
        BrowsableItem {
            media_id: self.media_id_or_placeholder().to_string(),
            media_uri: self.media_uri_or_placeholder().to_string(),
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            icon_uri: self.icon_uri.clone(),
            playable: true,
        }
    }
}

/// Descriptive, UI-facing view of a song
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowsableItem {
    pub media_id: String,
    pub media_uri: String,
    pub title: String,
    pub subtitle: String,
    pub icon_uri: Option<String>,
    pub playable: bool,
}

fn non_empty(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
