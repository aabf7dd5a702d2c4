//! Request and response types for the backend API.

use serde::{Deserialize, Serialize};

use crate::transcript::{Transcript, TranscriptSegment};

/// Filters for a word search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Word or phrase to search for
    pub query: String,
    /// Transcript language code (e.g. "en")
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
}

impl SearchFilters {
    pub fn new(query: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: language.into(),
            category: None,
            sub_category: None,
        }
    }

    /// Query string pairs, omitting absent filters.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![
            ("q", self.query.as_str()),
            ("language", self.language.as_str()),
        ];
        if let Some(category) = &self.category {
            pairs.push(("category", category.as_str()));
        }
        if let Some(sub_category) = &self.sub_category {
            pairs.push(("sub_category", sub_category.as_str()));
        }
        pairs
    }
}

/// One clip in the search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub video_id: String,
    #[serde(default)]
    pub start_time: Option<f64>,
    #[serde(default)]
    pub end_time: Option<f64>,
    /// Sentence containing the searched word
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Response of `GET /search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub clips: Vec<Clip>,
    /// Total number of matches on the backend (may exceed `clips.len()`)
    #[serde(default)]
    pub total: usize,
}

/// Wire shape of one transcript sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceDto {
    pub start_time: f64,
    pub end_time: f64,
    pub sentence_text: String,
}

/// Response of `GET /videos/{id}/transcript`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranscriptResponse {
    #[serde(default)]
    pub sentences: Vec<SentenceDto>,
}

impl TranscriptResponse {
    /// Convert to a domain transcript, sorting by start time.
    pub fn into_transcript(self, video_id: impl Into<String>) -> Transcript {
        let mut sentences: Vec<TranscriptSegment> = self
            .sentences
            .into_iter()
            .map(|s| TranscriptSegment::new(s.start_time, s.end_time, s.sentence_text))
            .collect();
        sentences.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        Transcript::new(video_id, sentences)
    }
}

/// Transcript request parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptRequest {
    pub video_id: String,
    pub language: String,
    /// Clip position the backend centers the transcript window on
    pub center_position: Option<f64>,
}

/// Response of `GET /translate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub original: String,
    pub translated: String,
    pub source: String,
    pub target: String,
}
