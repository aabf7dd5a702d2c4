//! Active-segment resolution.
//!
//! Maps a playback timestamp onto a transcript segment index. Captions are
//! perceived to lag behind the audio, so lookups are biased forward by a
//! fixed lookahead offset.

use super::Transcript;

/// Seconds added to playback time before segment lookup.
pub const LOOKAHEAD_OFFSET: f64 = 3.0;

/// Find the segment active at `current_time`.
///
/// Scans segments in order and returns the index of the first one whose
/// `[start, end)` interval contains `current_time + offset`. Overlapping
/// segments resolve to the earliest match.
///
/// # Arguments
/// * `transcript` - The loaded transcript
/// * `current_time` - Playback time in seconds
/// * `offset` - Lookahead offset in seconds (normally [`LOOKAHEAD_OFFSET`])
///
/// # Returns
/// `Some(index)` of the active segment, or `None` if no segment matches
pub fn resolve_active_segment(
    transcript: &Transcript,
    current_time: f64,
    offset: f64,
) -> Option<usize> {
    let adjusted = current_time + offset;
    transcript
        .sentences
        .iter()
        .position(|segment| segment.contains(adjusted))
}

/// Stateful resolver that remembers the last resolved index.
///
/// The remembered index exists only to suppress redundant writes: `update`
/// reports a change only when the resolved index differs from the previous
/// one.
#[derive(Debug, Clone)]
pub struct ActiveSegmentResolver {
    offset: f64,
    current: Option<usize>,
}

impl Default for ActiveSegmentResolver {
    fn default() -> Self {
        Self::new(LOOKAHEAD_OFFSET)
    }
}

impl ActiveSegmentResolver {
    pub fn new(offset: f64) -> Self {
        Self {
            offset,
            current: None,
        }
    }

    /// Last resolved index.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Forget the cached index (video switched, transcript dropped).
    pub fn reset(&mut self) {
        self.current = None;
    }

    /// Force the cached index, used for optimistic user selection.
    pub(crate) fn assume(&mut self, index: Option<usize>) {
        self.current = index;
    }

    /// Re-evaluate against `transcript` at `current_time`.
    ///
    /// A missing transcript resolves to `None`.
    ///
    /// # Returns
    /// `true` if the resolved index changed
    pub fn update(&mut self, transcript: Option<&Transcript>, current_time: f64) -> bool {
        let resolved =
            transcript.and_then(|t| resolve_active_segment(t, current_time, self.offset));
        if resolved == self.current {
            return false;
        }
        self.current = resolved;
        true
    }
}
