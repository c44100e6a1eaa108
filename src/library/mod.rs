//! Library module - songs, albums and where they come from
//!
//! - `types`: song and album records
//! - `store`: JSON-backed song store with change streams
//! - `media_index`: directory scan of the device's music files
//! - `repository`: the `SongsRepository` trait and its local implementation

mod error;
mod media_index;
mod repository;
mod store;
mod types;

pub use error::{LibraryError, Result};
pub use media_index::MediaIndex;
pub use repository::{LocalRepository, SongsRepository};
pub use store::SongStore;
pub use types::{album_id_for, albums_from_songs, media_id_for_path, Album, Song, UNKNOWN_ALBUM, UNKNOWN_ARTIST};
