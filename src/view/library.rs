//! Library pane rendering (songs, albums, album detail)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};
use ratatui::widgets::Padding;

use crate::library::{Album, Song};
use crate::model::{ContentState, ContentView, LibraryStatus, UiState};
use super::utils::{
    border_style, calculate_num_width, format_duration, render_scrollable_list, row_style, truncate_string,
};

pub fn render_library(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
    current_media_id: Option<&str>,
    is_focused: bool,
) {
    if content_state.songs.is_empty() {
        render_empty(frame, area, &ui_state.library_status, is_focused);
        return;
    }

    match &content_state.view {
        ContentView::Songs { selected_index } => {
            render_song_list(
                frame,
                area,
                " Songs ",
                &content_state.songs,
                *selected_index,
                is_focused,
                current_media_id,
            );
        }
        ContentView::Albums { selected_index } => {
            render_album_list(frame, area, &content_state.albums, *selected_index, is_focused);
        }
        ContentView::AlbumDetail { album, songs, selected_index } => {
            let title = format!(" {} - {} ", album.title, album.artist);
            render_song_list(frame, area, &title, songs, *selected_index, is_focused, current_media_id);
        }
    }
}

fn render_empty(frame: &mut Frame, area: Rect, status: &LibraryStatus, is_focused: bool) {
    let (text, color) = match status {
        LibraryStatus::Loading => ("Loading library…".to_string(), Color::Yellow),
        LibraryStatus::Ready { .. } => (
            "No music found.\n\nPut audio files in your music folder and press R to rescan.".to_string(),
            Color::DarkGray,
        ),
        LibraryStatus::Failed(reason) => (
            format!("The library could not be loaded:\n{}\n\nPress R to try again.", reason),
            Color::Red,
        ),
    };

    let content = Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding::horizontal(1))
                .border_style(border_style(is_focused)),
        );
    frame.render_widget(content, area);
}

fn render_song_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    songs: &[Song],
    selected_index: usize,
    is_focused: bool,
    current_media_id: Option<&str>,
) {
    let content_width = area.width.saturating_sub(4) as usize;
    let items = song_items(songs, selected_index, current_media_id, content_width);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));

    // +1 for header
    render_scrollable_list(frame, area, items, selected_index + 1, block);
}

fn song_items(
    songs: &[Song],
    selected_index: usize,
    current_media_id: Option<&str>,
    content_width: usize,
) -> Vec<ListItem<'static>> {
    let num_width = calculate_num_width(songs.len());
    let duration_width = 6;
    let fixed_width = 1 + num_width + 3 + 3 + 3 + duration_width;
    let remaining_width = content_width.saturating_sub(fixed_width);
    let title_width = (remaining_width * 55) / 100;
    let artist_width = remaining_width.saturating_sub(title_width);

    let mut items: Vec<ListItem<'static>> = vec![
        ListItem::new(format!(
            " {:<num_width$}   {:<title_width$}   {:<artist_width$}   {}",
            "#", "Title", "Artist", "Time",
            num_width = num_width,
            title_width = title_width,
            artist_width = artist_width
        ))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    ];

    items.extend(songs.iter().enumerate().map(|(i, song)| {
        let is_playing = current_media_id == Some(song.media_id.as_str());
        let playing_indicator = if is_playing { "▶" } else { " " };
        let song_num = format!("{}{:<num_width$}", playing_indicator, i + 1, num_width = num_width);

        ListItem::new(format!(
            "{}   {}   {}   {}",
            song_num,
            truncate_string(&song.title, title_width),
            truncate_string(&song.artist, artist_width),
            format_duration(song.duration_ms)
        ))
        .style(row_style(i == selected_index, is_playing))
    }));

    items
}

fn render_album_list(frame: &mut Frame, area: Rect, albums: &[Album], selected_index: usize, is_focused: bool) {
    let items: Vec<ListItem> = albums
        .iter()
        .enumerate()
        .map(|(i, album)| {
            let count = if album.song_count == 1 {
                "1 song".to_string()
            } else {
                format!("{} songs", album.song_count)
            };
            ListItem::new(format!("{} - {} ({})", album.title, album.artist, count))
                .style(row_style(i == selected_index, false))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Albums ")
        .padding(Padding::horizontal(1))
        .border_style(border_style(is_focused));

    render_scrollable_list(frame, area, items, selected_index, block);
}
