//! Playback and transcript synchronization
//!
//! Keeps the player, the playlist, and the transcript view consistent:
//!
//! - `state`: `PlaybackState` and the `SyncEffect` values handed to the event loop
//! - `playlist`: ordered clips and index clamping
//! - `sync`: the `SyncController` state machine (time updates, navigation,
//!   segment selection, stale fetch handling)
//! - `controls`: player trait and guarded control calls
//! - `clock`: wall-clock player used by the terminal view
//! - `embed`: player embed parameters
//!
//! # Usage
//!
//! ```
//! use verbalingo::player::{PlaylistItem, SyncController, SyncEffect};
//! use verbalingo::transcript::{Transcript, TranscriptSegment};
//!
//! let mut sync = SyncController::default();
//! let effects = sync.load_playlist(vec![PlaylistItem::new("abc")]);
//! let ticket = effects
//!     .iter()
//!     .find_map(|e| match e {
//!         SyncEffect::FetchTranscript(t) => Some(t.id),
//!         _ => None,
//!     })
//!     .unwrap();
//!
//! let transcript = Transcript::new(
//!     "abc",
//!     vec![
//!         TranscriptSegment::new(0.0, 5.0, "a"),
//!         TranscriptSegment::new(5.0, 9.0, "b"),
//!     ],
//! );
//! sync.complete_transcript_fetch(ticket, Ok(transcript));
//! assert_eq!(sync.on_time_update(3.0), Some(SyncEffect::ScrollTo(1)));
//! ```

pub mod clock;
pub mod controls;
pub mod embed;
pub mod playlist;
pub mod state;
pub mod sync;

pub use clock::ClockPlayer;
pub use controls::{PlayerControls, VideoPlayer};
pub use embed::embed_start_seconds;
pub use playlist::{Playlist, PlaylistItem};
pub use state::{FetchTicket, PlaybackState, SyncEffect};
pub use sync::SyncController;
