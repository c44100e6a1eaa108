//! Queue position and shuffle order

use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::source::{PlaybackQueue, QueueEntry};

/// Walks a `PlaybackQueue` in play order.
///
/// `order` maps play positions to queue indices. With shuffle on the current
/// entry is kept first and the rest is randomized (Fisher-Yates).
#[derive(Debug, Default)]
pub struct QueueCursor {
    queue: PlaybackQueue,
    order: Vec<usize>,
    position: Option<usize>,
    shuffle: bool,
}

impl QueueCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue and point at `start_index` (clamped)
    pub fn load(&mut self, queue: PlaybackQueue, start_index: usize) -> Option<&QueueEntry> {
        self.queue = queue;
        if self.queue.is_empty() {
            self.order.clear();
            self.position = None;
            return None;
        }

        let start = start_index.min(self.queue.len() - 1);
        self.rebuild_order(start);
        self.current()
    }

    pub fn current(&self) -> Option<&QueueEntry> {
        self.current_index().and_then(|i| self.queue.get(i))
    }

    /// Queue index of the current entry
    pub fn current_index(&self) -> Option<usize> {
        self.position.and_then(|p| self.order.get(p).copied())
    }

    /// Move to the next entry in play order. `None` at the end, position unchanged.
    pub fn advance(&mut self) -> Option<&QueueEntry> {
        let position = self.position?;
        if position + 1 >= self.order.len() {
            return None;
        }
        self.position = Some(position + 1);
        self.current()
    }

    /// Move to the previous entry in play order. `None` at the start, position unchanged.
    pub fn retreat(&mut self) -> Option<&QueueEntry> {
        let position = self.position?;
        if position == 0 {
            return None;
        }
        self.position = Some(position - 1);
        self.current()
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn set_shuffle(&mut self, enabled: bool) {
        if self.shuffle == enabled {
            return;
        }
        self.shuffle = enabled;
        if let Some(current) = self.current_index() {
            self.rebuild_order(current);
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Entries in play order
    pub fn play_order(&self) -> impl Iterator<Item = &QueueEntry> {
        self.order.iter().filter_map(|i| self.queue.get(*i))
    }

    fn rebuild_order(&mut self, current: usize) {
        if self.shuffle {
            let mut rest: Vec<usize> = (0..self.queue.len()).filter(|i| *i != current).collect();
            rest.shuffle(&mut thread_rng());
            self.order = std::iter::once(current).chain(rest).collect();
            self.position = Some(0);
        } else {
            self.order = (0..self.queue.len()).collect();
            self.position = Some(current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(n: usize) -> PlaybackQueue {
        PlaybackQueue::new(
            (0..n)
                .map(|i| QueueEntry {
                    media_id: format!("id{}", i),
                    uri: format!("/music/{}.mp3", i),
                    title: format!("Song {}", i),
                    subtitle: "Artist".to_string(),
                    art: None,
                    duration_ms: 1000,
                })
                .collect(),
        )
    }

    #[test]
    fn empty_queue_has_no_current_entry() {
        let mut cursor = QueueCursor::new();
        assert!(cursor.load(queue(0), 3).is_none());
        assert!(cursor.advance().is_none());
        assert!(cursor.retreat().is_none());
    }

    #[test]
    fn walks_forward_and_back_within_bounds() {
        let mut cursor = QueueCursor::new();
        assert_eq!(cursor.load(queue(3), 1).unwrap().media_id, "id1");
        assert_eq!(cursor.advance().unwrap().media_id, "id2");
        assert!(cursor.advance().is_none());
        assert_eq!(cursor.current().unwrap().media_id, "id2");
        assert_eq!(cursor.retreat().unwrap().media_id, "id1");
        assert_eq!(cursor.retreat().unwrap().media_id, "id0");
        assert!(cursor.retreat().is_none());
    }

    #[test]
    fn start_index_is_clamped() {
        let mut cursor = QueueCursor::new();
        assert_eq!(cursor.load(queue(2), 10).unwrap().media_id, "id1");
    }

    #[test]
    fn shuffle_keeps_current_first_and_every_entry_once() {
        let mut cursor = QueueCursor::new();
        cursor.load(queue(20), 7);
        cursor.set_shuffle(true);

        assert_eq!(cursor.current().unwrap().media_id, "id7");
        let mut ids: Vec<String> = cursor.play_order().map(|e| e.media_id.clone()).collect();
        assert_eq!(ids[0], "id7");
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn turning_shuffle_off_restores_list_order_at_current() {
        let mut cursor = QueueCursor::new();
        cursor.load(queue(5), 0);
        cursor.set_shuffle(true);
        cursor.advance();
        let current = cursor.current().unwrap().media_id.clone();

        cursor.set_shuffle(false);
        assert_eq!(cursor.current().unwrap().media_id, current);
        let ids: Vec<String> = cursor.play_order().map(|e| e.media_id.clone()).collect();
        assert_eq!(ids, vec!["id0", "id1", "id2", "id3", "id4"]);
    }
}
