//! Backend API access.
//!
//! Thin blocking client for the search, transcript, and translate endpoints,
//! plus the [`FetchState`] type the views use to show loading and error
//! states.

mod client;
mod error;
mod fetch;
mod types;

pub use client::{ApiClient, Backend};
pub use error::{ApiError, ApiResult};
pub use fetch::FetchState;
pub use types::{
    Clip, SearchFilters, SearchResponse, SentenceDto, TranscriptRequest, TranscriptResponse,
    TranslateResponse,
};
