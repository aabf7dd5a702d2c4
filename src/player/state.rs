//! Player state management
//!
//! Contains the `PlaybackState` struct describing what is playing and which
//! transcript segment is active, as well as the effect type emitted by the
//! sync controller to the view layer.

/// Side effect requested by the sync controller.
///
/// The controller never touches the view or the player directly. It returns
/// these values and the event loop applies them.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEffect {
    /// Scroll/snap the transcript view to this segment index
    ScrollTo(usize),
    /// Seek the player within the current video
    Seek { seconds: f64 },
    /// Load a different video into the player
    LoadVideo {
        index: usize,
        video_id: String,
        start_seconds: u64,
    },
    /// Start fetching the transcript described by the ticket
    FetchTranscript(FetchTicket),
}

/// Identifies one in-flight transcript request.
///
/// Only the completion whose ticket matches the controller's pending ticket
/// is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    /// Monotonic request id
    pub id: u64,
    /// Playlist index the request was issued for
    pub video_index: usize,
    /// Video the transcript belongs to
    pub video_id: String,
    /// Clip start, forwarded to the backend as `center_position`
    pub center_position: Option<f64>,
}

/// Playback state for the currently selected video.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    current_video_index: usize,
    /// Current playback time in seconds (never negative)
    pub current_time: f64,
    /// Whether the player is muted
    pub is_muted: bool,
    active_segment_index: Option<usize>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackState {
    pub fn new() -> Self {
        Self {
            current_video_index: 0,
            current_time: 0.0,
            is_muted: false,
            active_segment_index: None,
        }
    }

    pub fn current_video_index(&self) -> usize {
        self.current_video_index
    }

    /// Derived from playback time and the loaded transcript.
    pub fn active_segment_index(&self) -> Option<usize> {
        self.active_segment_index
    }

    pub(crate) fn set_video_index(&mut self, index: usize) {
        self.current_video_index = index;
    }

    pub(crate) fn set_active_segment(&mut self, index: Option<usize>) {
        self.active_segment_index = index;
    }

    /// Store a playback time, clamping negatives and NaN to zero.
    pub(crate) fn set_time(&mut self, seconds: f64) {
        self.current_time = if seconds.is_nan() {
            0.0
        } else {
            seconds.max(0.0)
        };
    }

    pub fn toggle_mute(&mut self) {
        self.is_muted = !self.is_muted;
    }
}
