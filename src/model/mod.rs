//! Model module - Application state and data types
//!
//! - `types`: sheet, tab, icon and UI state enums
//! - `player`: playback state mirrored from the engine, progress arithmetic
//! - `library`: song/album lists and album drill-down navigation
//! - `app_model`: main application model with state management methods

mod types;
mod player;
mod library;
mod app_model;

pub use types::{
    HandleIcon, LibraryStatus, LibraryTab, PlayIcon, SelectedItem, SheetState, ToggleIcon, UiState,
};

pub use player::{progress_fraction, seek_position, PlayerState, PlayerView};

pub use library::{ContentState, ContentView};

pub use app_model::AppModel;
