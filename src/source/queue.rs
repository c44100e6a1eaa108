//! Engine-neutral playback queue

/// One playable entry handed to a playback engine
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueEntry {
    pub media_id: String,
    pub uri: String,
    pub title: String,
    pub subtitle: String,
    pub art: Option<String>,
    pub duration_ms: u64,
}

/// Ordered, concatenated list of entries
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaybackQueue {
    entries: Vec<QueueEntry>,
}

impl PlaybackQueue {
    pub fn new(entries: Vec<QueueEntry>) -> Self {
        Self { entries }
    }

    pub fn single(entry: QueueEntry) -> Self {
        Self {
            entries: vec![entry],
        }
    }

    pub fn push(&mut self, entry: QueueEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QueueEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueueEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    pub fn position_of(&self, media_id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.media_id == media_id)
    }
}
