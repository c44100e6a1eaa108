//! Core type definitions for the application

use std::time::Instant;

/// Which list the library pane shows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LibraryTab {
    #[default]
    Songs,
    Albums,
}

impl LibraryTab {
    pub fn next(self) -> Self {
        match self {
            LibraryTab::Songs => LibraryTab::Albums,
            LibraryTab::Albums => LibraryTab::Songs,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            LibraryTab::Songs => "Songs",
            LibraryTab::Albums => "Albums",
        }
    }
}

/// Position of the backdrop sheet that carries the full player
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SheetState {
    #[default]
    Concealed,
    Revealed,
}

impl SheetState {
    pub fn from_revealed(revealed: bool) -> Self {
        if revealed { SheetState::Revealed } else { SheetState::Concealed }
    }

    pub fn is_revealed(self) -> bool {
        self == SheetState::Revealed
    }
}

/// Play button glyph; shows the action a press would take
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayIcon {
    Play,
    Pause,
}

impl PlayIcon {
    pub fn for_playing(is_playing: bool) -> Self {
        if is_playing { PlayIcon::Pause } else { PlayIcon::Play }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            PlayIcon::Play => "▶",
            PlayIcon::Pause => "⏸",
        }
    }
}

/// Sheet handle arrow
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleIcon {
    Up,
    Down,
}

impl HandleIcon {
    pub fn for_sheet(sheet: SheetState) -> Self {
        match sheet {
            SheetState::Revealed => HandleIcon::Up,
            SheetState::Concealed => HandleIcon::Down,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            HandleIcon::Up => "▲",
            HandleIcon::Down => "▼",
        }
    }
}

/// Header toggle button. Revealed it controls shuffle, concealed it controls playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleIcon {
    ShuffleOn,
    ShuffleOff,
    Play,
    Pause,
}

impl ToggleIcon {
    pub fn resolve(sheet: SheetState, shuffle: bool, is_playing: bool) -> Self {
        match (sheet, shuffle, is_playing) {
            (SheetState::Revealed, true, _) => ToggleIcon::ShuffleOn,
            (SheetState::Revealed, false, _) => ToggleIcon::ShuffleOff,
            (SheetState::Concealed, _, true) => ToggleIcon::Pause,
            (SheetState::Concealed, _, false) => ToggleIcon::Play,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToggleIcon::ShuffleOn => "🔀 on",
            ToggleIcon::ShuffleOff => "🔀 off",
            ToggleIcon::Play => "▶",
            ToggleIcon::Pause => "⏸",
        }
    }
}

/// Library banner state, mirrors the music source's readiness
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum LibraryStatus {
    #[default]
    Loading,
    Ready { songs: usize },
    Failed(String),
}

/// Represents a selected item for action handling
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectedItem {
    Song { media_id: String },
    Album { album_id: u64 },
}

/// UI state for the application
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub sheet: SheetState,
    pub library_status: LibraryStatus,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_points_up_only_when_revealed() {
        assert_eq!(HandleIcon::for_sheet(SheetState::Revealed), HandleIcon::Up);
        assert_eq!(HandleIcon::for_sheet(SheetState::Concealed), HandleIcon::Down);
    }

    #[test]
    fn toggle_follows_sheet_position() {
        assert_eq!(ToggleIcon::resolve(SheetState::Revealed, true, false), ToggleIcon::ShuffleOn);
        assert_eq!(ToggleIcon::resolve(SheetState::Revealed, false, true), ToggleIcon::ShuffleOff);
        assert_eq!(ToggleIcon::resolve(SheetState::Concealed, true, true), ToggleIcon::Pause);
        assert_eq!(ToggleIcon::resolve(SheetState::Concealed, false, false), ToggleIcon::Play);
    }

    #[test]
    fn play_icon_shows_the_opposite_action() {
        assert_eq!(PlayIcon::for_playing(true), PlayIcon::Pause);
        assert_eq!(PlayIcon::for_playing(false), PlayIcon::Play);
    }
}
