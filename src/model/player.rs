//! Player state mirrored from the playback engine

use crate::engine::EngineSnapshot;
use crate::source::QueueEntry;

use super::types::{HandleIcon, PlayIcon, SheetState, ToggleIcon};

/// Fraction of the entry already played, `0.0` when the duration is unknown
pub fn progress_fraction(position_ms: u64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        return 0.0;
    }
    (position_ms as f64 / duration_ms as f64).clamp(0.0, 1.0)
}

/// Absolute position for a seek bar fraction, clamped to `0.0..=1.0`
pub fn seek_position(fraction: f64, duration_ms: u64) -> u64 {
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    (fraction * duration_ms as f64).round() as u64
}

/// What the player surface shows
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerState {
    pub is_playing: bool,
    pub position_ms: u64,
    pub duration_ms: u64,
    pub progress: f64,
    pub shuffle: bool,
    pub now_playing: Option<QueueEntry>,
}

impl PlayerState {
    /// Copy everything the engine reports
    pub fn apply(&mut self, snapshot: &EngineSnapshot) {
        self.is_playing = snapshot.is_playing;
        self.position_ms = snapshot.position_ms;
        self.duration_ms = snapshot.duration_ms;
        self.progress = progress_fraction(snapshot.position_ms, snapshot.duration_ms);
        self.shuffle = snapshot.shuffle;
        self.now_playing = snapshot.current.clone();
    }

    /// Show a seek immediately, before the engine confirms it
    pub fn show_seek(&mut self, fraction: f64) {
        self.progress = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        self.position_ms = seek_position(self.progress, self.duration_ms);
    }

    pub fn play_icon(&self) -> PlayIcon {
        PlayIcon::for_playing(self.is_playing)
    }
}

/// Player state plus the sheet-dependent icons, as handed to the view
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerView {
    pub player: PlayerState,
    pub sheet: SheetState,
    pub play_icon: PlayIcon,
    pub handle_icon: HandleIcon,
    pub toggle_icon: ToggleIcon,
}

impl PlayerView {
    pub fn new(player: PlayerState, sheet: SheetState) -> Self {
        Self {
            play_icon: player.play_icon(),
            handle_icon: HandleIcon::for_sheet(sheet),
            toggle_icon: ToggleIcon::resolve(sheet, player.shuffle, player.is_playing),
            player,
            sheet,
        }
    }
}
