//! Transcript data model and active-segment lookup
//!
//! A transcript is an ordered list of time-boundaried segments for one video.
//! Playback time is mapped onto that list by [`resolve_active_segment`].

mod resolver;

use serde::{Deserialize, Serialize};

pub use resolver::{resolve_active_segment, ActiveSegmentResolver, LOOKAHEAD_OFFSET};

/// A single time-boundaried unit of transcript text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Segment start in seconds (inclusive)
    pub start_time: f64,
    /// Segment end in seconds (exclusive)
    pub end_time: f64,
    /// Sentence text
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start_time: f64, end_time: f64, text: impl Into<String>) -> Self {
        Self {
            start_time,
            end_time,
            text: text.into(),
        }
    }

    /// Whether `time` falls inside the half-open interval `[start, end)`.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start_time && time < self.end_time
    }
}

/// The full transcript of one video, sorted ascending by start time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub video_id: String,
    pub sentences: Vec<TranscriptSegment>,
}

impl Transcript {
    pub fn new(video_id: impl Into<String>, sentences: Vec<TranscriptSegment>) -> Self {
        Self {
            video_id: video_id.into(),
            sentences,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn segment(&self, index: usize) -> Option<&TranscriptSegment> {
        self.sentences.get(index)
    }

    /// End time of the last segment, or 0 for an empty transcript.
    pub fn duration(&self) -> f64 {
        self.sentences
            .iter()
            .map(|s| s.end_time)
            .fold(0.0, f64::max)
    }
}
