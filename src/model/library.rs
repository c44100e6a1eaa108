//! Library pane state: song and album lists, album drill-down

use crate::library::{Album, Song};

use super::types::{LibraryTab, SelectedItem};

/// What the library pane is showing
#[derive(Clone, Debug, PartialEq)]
pub enum ContentView {
    Songs {
        selected_index: usize,
    },
    Albums {
        selected_index: usize,
    },
    AlbumDetail {
        album: Album,
        songs: Vec<Song>,
        selected_index: usize,
    },
}

impl Default for ContentView {
    fn default() -> Self {
        ContentView::Songs { selected_index: 0 }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub songs: Vec<Song>,
    pub albums: Vec<Album>,
    pub view: ContentView,
    pub navigation_stack: Vec<ContentView>,
}

impl ContentState {
    /// Tab the current view belongs to; album detail counts as Albums
    pub fn tab(&self) -> LibraryTab {
        match self.view {
            ContentView::Songs { .. } => LibraryTab::Songs,
            ContentView::Albums { .. } | ContentView::AlbumDetail { .. } => LibraryTab::Albums,
        }
    }

    pub fn switch_tab(&mut self) {
        self.navigation_stack.clear();
        self.view = match self.tab().next() {
            LibraryTab::Songs => ContentView::Songs { selected_index: 0 },
            LibraryTab::Albums => ContentView::Albums { selected_index: 0 },
        };
    }

    pub fn set_songs(&mut self, songs: Vec<Song>) {
        self.songs = songs;
        let len = self.songs.len();
        if let ContentView::Songs { selected_index } = &mut self.view {
            *selected_index = (*selected_index).min(len.saturating_sub(1));
        }
    }

    pub fn set_albums(&mut self, albums: Vec<Album>) {
        self.albums = albums;
        let len = self.albums.len();
        for view in std::iter::once(&mut self.view).chain(self.navigation_stack.iter_mut()) {
            if let ContentView::Albums { selected_index } = view {
                *selected_index = (*selected_index).min(len.saturating_sub(1));
            }
        }
    }

    pub fn open_album(&mut self, album: Album, songs: Vec<Song>) {
        let previous_view = std::mem::take(&mut self.view);
        self.navigation_stack.push(previous_view);
        self.view = ContentView::AlbumDetail {
            album,
            songs,
            selected_index: 0,
        };
    }

    /// Pop the navigation stack. `false` when already at a top-level list.
    pub fn navigate_back(&mut self) -> bool {
        match self.navigation_stack.pop() {
            Some(previous_view) => {
                self.view = previous_view;
                true
            }
            None => false,
        }
    }

    fn visible_len(&self) -> usize {
        match &self.view {
            ContentView::Songs { .. } => self.songs.len(),
            ContentView::Albums { .. } => self.albums.len(),
            ContentView::AlbumDetail { songs, .. } => songs.len(),
        }
    }

    fn selected_index_mut(&mut self) -> &mut usize {
        match &mut self.view {
            ContentView::Songs { selected_index }
            | ContentView::Albums { selected_index }
            | ContentView::AlbumDetail { selected_index, .. } => selected_index,
        }
    }

    pub fn selected_index(&self) -> usize {
        match &self.view {
            ContentView::Songs { selected_index }
            | ContentView::Albums { selected_index }
            | ContentView::AlbumDetail { selected_index, .. } => *selected_index,
        }
    }

    pub fn move_up(&mut self) {
        let idx = self.selected_index_mut();
        if *idx > 0 {
            *idx -= 1;
        }
    }

    pub fn move_down(&mut self) {
        let max = self.visible_len().saturating_sub(1);
        let idx = self.selected_index_mut();
        if *idx < max {
            *idx += 1;
        }
    }

    pub fn selected_item(&self) -> Option<SelectedItem> {
        match &self.view {
            ContentView::Songs { selected_index } => self
                .songs
                .get(*selected_index)
                .map(|s| SelectedItem::Song { media_id: s.media_id.clone() }),
            ContentView::Albums { selected_index } => self
                .albums
                .get(*selected_index)
                .map(|a| SelectedItem::Album { album_id: a.album_id }),
            ContentView::AlbumDetail { songs, selected_index, .. } => songs
                .get(*selected_index)
                .map(|s| SelectedItem::Song { media_id: s.media_id.clone() }),
        }
    }

    /// The selected song, looked up in whichever list is visible
    pub fn selected_song(&self) -> Option<Song> {
        match &self.view {
            ContentView::Songs { selected_index } => self.songs.get(*selected_index).cloned(),
            ContentView::AlbumDetail { songs, selected_index, .. } => songs.get(*selected_index).cloned(),
            ContentView::Albums { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: &str, album_id: u64) -> Song {
        Song {
            media_id: id.to_string(),
            title: id.to_uppercase(),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            album_id,
            uri: format!("/music/{}.mp3", id),
            album_art: None,
            duration_ms: 1000,
        }
    }

    fn album(id: u64) -> Album {
        Album {
            album_id: id,
            title: format!("Album {}", id),
            artist: "Artist".to_string(),
            album_art: None,
            song_count: 2,
        }
    }

    #[test]
    fn selection_stays_within_the_visible_list() {
        let mut state = ContentState::default();
        state.set_songs(vec![song("a", 1), song("b", 1)]);

        state.move_up();
        assert_eq!(state.selected_index(), 0);
        state.move_down();
        state.move_down();
        assert_eq!(state.selected_index(), 1);
        assert_eq!(state.selected_item(), Some(SelectedItem::Song { media_id: "b".to_string() }));

        // Shrinking the list clamps the selection
        state.set_songs(vec![song("a", 1)]);
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn album_drill_down_and_back() {
        let mut state = ContentState::default();
        state.set_albums(vec![album(1), album(2)]);
        state.switch_tab();
        assert_eq!(state.tab(), LibraryTab::Albums);
        state.move_down();
        assert_eq!(state.selected_item(), Some(SelectedItem::Album { album_id: 2 }));

        state.open_album(album(2), vec![song("x", 2), song("y", 2)]);
        assert_eq!(state.tab(), LibraryTab::Albums);
        state.move_down();
        assert_eq!(state.selected_song().map(|s| s.media_id), Some("y".to_string()));

        assert!(state.navigate_back());
        assert_eq!(state.view, ContentView::Albums { selected_index: 1 });
        assert!(!state.navigate_back());
    }

    #[test]
    fn switching_tabs_drops_history() {
        let mut state = ContentState::default();
        state.switch_tab();
        state.open_album(album(1), vec![]);
        state.switch_tab();
        assert_eq!(state.tab(), LibraryTab::Songs);
        assert!(state.navigation_stack.is_empty());
    }
}
