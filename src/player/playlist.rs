//! Playlist of clips returned by a search.

use serde::{Deserialize, Serialize};

use crate::api::Clip;

/// A reference to one video clip in the playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub video_id: String,
    /// Clip start in seconds
    #[serde(default)]
    pub start: Option<f64>,
    /// Clip end in seconds
    #[serde(default)]
    pub end: Option<f64>,
    /// Sentence that matched the search
    #[serde(default)]
    pub text: Option<String>,
}

impl PlaylistItem {
    pub fn new(video_id: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            start: None,
            end: None,
            text: None,
        }
    }

    pub fn with_range(mut self, start: f64, end: f64) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

impl From<&Clip> for PlaylistItem {
    fn from(clip: &Clip) -> Self {
        Self {
            video_id: clip.video_id.clone(),
            start: clip.start_time,
            end: clip.end_time,
            text: clip.text.clone(),
        }
    }
}

/// Ordered list of videos, navigated sequentially.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    items: Vec<PlaylistItem>,
}

impl Playlist {
    pub fn new(items: Vec<PlaylistItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PlaylistItem> {
        self.items.get(index)
    }

    /// Clamp `index` into `[0, len - 1]`, or 0 for an empty playlist.
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.items.len().saturating_sub(1))
    }

    /// Index of the last item (0 when empty).
    pub fn last_index(&self) -> usize {
        self.items.len().saturating_sub(1)
    }
}

impl FromIterator<PlaylistItem> for Playlist {
    fn from_iter<I: IntoIterator<Item = PlaylistItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
