//! Off-thread transcript loading.
//!
//! The sync controller is single-threaded and must never block on the
//! network. `TranscriptLoader` runs fetches on a worker thread; the event
//! loop polls for finished results and hands them back to the controller
//! together with their ticket id, which lets the controller drop responses
//! for videos the user already left.

mod worker;

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

use tracing::{debug, warn};

pub use worker::{worker_loop, LoadResult};

use crate::api::{Backend, TranscriptRequest};
use crate::player::FetchTicket;
use crate::transcript::Transcript;

/// A finished transcript fetch.
#[derive(Debug)]
pub struct TranscriptResult {
    pub ticket_id: u64,
    /// The transcript, or a user-facing error message
    pub result: Result<Transcript, String>,
}

struct Job {
    ticket_id: u64,
    request: TranscriptRequest,
}

/// Fetches transcripts on a background thread.
///
/// Dropping the loader closes the request channel; the worker exits after
/// its current fetch.
pub struct TranscriptLoader {
    request_tx: Sender<Job>,
    result_rx: Receiver<LoadResult<Job, Result<Transcript, String>>>,
    language: String,
}

impl TranscriptLoader {
    /// Spawn the worker thread.
    pub fn spawn(backend: Arc<dyn Backend>, language: impl Into<String>) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<Job>();
        let (result_tx, result_rx) = mpsc::channel();

        thread::spawn(move || {
            worker_loop(request_rx, result_tx, |job: &Job| {
                backend.transcript(&job.request).map_err(|e| {
                    warn!(video_id = %job.request.video_id, error = %e, "transcript fetch failed");
                    e.user_message()
                })
            })
        });

        Self {
            request_tx,
            result_rx,
            language: language.into(),
        }
    }

    /// Queue a fetch for the given ticket.
    ///
    /// Returns false if the worker has shut down.
    pub fn request(&self, ticket: &FetchTicket) -> bool {
        let job = Job {
            ticket_id: ticket.id,
            request: TranscriptRequest {
                video_id: ticket.video_id.clone(),
                language: self.language.clone(),
                center_position: ticket.center_position,
            },
        };
        debug!(ticket = ticket.id, video_id = %ticket.video_id, "queue transcript fetch");
        self.request_tx.send(job).is_ok()
    }

    /// Take one finished result without blocking.
    pub fn try_recv(&self) -> Option<TranscriptResult> {
        match self.result_rx.try_recv() {
            Ok(done) => Some(TranscriptResult {
                ticket_id: done.key.ticket_id,
                result: done.value,
            }),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Block until the next result arrives (or the worker is gone).
    pub fn recv(&self) -> Option<TranscriptResult> {
        self.result_rx.recv().ok().map(|done| TranscriptResult {
            ticket_id: done.key.ticket_id,
            result: done.value,
        })
    }
}
