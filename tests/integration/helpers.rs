//! Shared test helpers

use std::collections::HashMap;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use verbalingo::api::{
    ApiError, ApiResult, Backend, Clip, SearchFilters, SearchResponse, TranscriptRequest,
    TranslateResponse,
};
use verbalingo::transcript::{Transcript, TranscriptSegment};

/// In-memory backend with optional per-video latency.
#[derive(Default)]
pub struct FakeBackend {
    transcripts: HashMap<String, Vec<TranscriptSegment>>,
    delays: HashMap<String, Duration>,
    clips: Vec<Clip>,
    /// Transcript requests in the order they were served
    pub requests: Mutex<Vec<TranscriptRequest>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transcript(mut self, video_id: &str, segments: Vec<TranscriptSegment>) -> Self {
        self.transcripts.insert(video_id.to_string(), segments);
        self
    }

    pub fn with_delay(mut self, video_id: &str, delay: Duration) -> Self {
        self.delays.insert(video_id.to_string(), delay);
        self
    }

    pub fn with_clip(mut self, video_id: &str, start: f64, text: &str) -> Self {
        self.clips.push(Clip {
            video_id: video_id.to_string(),
            start_time: Some(start),
            end_time: None,
            text: Some(text.to_string()),
            title: None,
        });
        self
    }

    pub fn served(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.video_id.clone())
            .collect()
    }
}

impl Backend for FakeBackend {
    fn search(&self, filters: &SearchFilters) -> ApiResult<SearchResponse> {
        let clips: Vec<Clip> = self
            .clips
            .iter()
            .filter(|c| {
                c.text
                    .as_deref()
                    .is_some_and(|t| t.to_lowercase().contains(&filters.query.to_lowercase()))
            })
            .cloned()
            .collect();
        let total = clips.len();
        Ok(SearchResponse { clips, total })
    }

    fn transcript(&self, request: &TranscriptRequest) -> ApiResult<Transcript> {
        if let Some(delay) = self.delays.get(&request.video_id) {
            thread::sleep(*delay);
        }
        self.requests.lock().unwrap().push(request.clone());
        match self.transcripts.get(&request.video_id) {
            Some(segments) => Ok(Transcript::new(request.video_id.clone(), segments.clone())),
            None => Err(ApiError::Status {
                endpoint: "transcript",
                status: 404,
                body: "not found".to_string(),
            }),
        }
    }

    fn translate(&self, text: &str, source: &str, target: &str) -> ApiResult<TranslateResponse> {
        Ok(TranslateResponse {
            original: text.to_string(),
            translated: text.to_uppercase(),
            source: source.to_string(),
            target: target.to_string(),
        })
    }
}

/// Three segments: [0,5) "a", [5,9) "b", [9,12) "c".
pub fn segments() -> Vec<TranscriptSegment> {
    vec![
        TranscriptSegment::new(0.0, 5.0, "a"),
        TranscriptSegment::new(5.0, 9.0, "b"),
        TranscriptSegment::new(9.0, 12.0, "c"),
    ]
}
