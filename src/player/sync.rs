//! Playback/transcript synchronization.
//!
//! `SyncController` owns the playlist, the playback state, and the transcript
//! of the current video. Every transition is a method call that returns the
//! side effects (scroll, seek, load, fetch) for the event loop to apply.
//!
//! Transcript fetches are tracked by ticket. A completion is applied only if
//! its ticket is still the pending one, so a slow response for a video the
//! user already left is dropped.

use tracing::{debug, info};

use super::embed::embed_start_seconds;
use super::playlist::{Playlist, PlaylistItem};
use super::state::{FetchTicket, PlaybackState, SyncEffect};
use crate::api::FetchState;
use crate::transcript::{ActiveSegmentResolver, Transcript, LOOKAHEAD_OFFSET};

/// Coordinates playlist navigation, playback time, and the transcript view.
#[derive(Debug)]
pub struct SyncController {
    playlist: Playlist,
    state: PlaybackState,
    resolver: ActiveSegmentResolver,
    transcript: FetchState<Transcript>,
    pending: Option<FetchTicket>,
    next_ticket_id: u64,
}

impl Default for SyncController {
    fn default() -> Self {
        Self::new(LOOKAHEAD_OFFSET)
    }
}

impl SyncController {
    /// Create a controller with the given lookahead offset in seconds.
    pub fn new(lookahead_offset: f64) -> Self {
        Self {
            playlist: Playlist::default(),
            state: PlaybackState::new(),
            resolver: ActiveSegmentResolver::new(lookahead_offset),
            transcript: FetchState::Idle,
            pending: None,
            next_ticket_id: 1,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn transcript(&self) -> &FetchState<Transcript> {
        &self.transcript
    }

    pub fn pending_ticket(&self) -> Option<&FetchTicket> {
        self.pending.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.state.current_video_index()
    }

    pub fn current_item(&self) -> Option<&PlaylistItem> {
        self.playlist.get(self.state.current_video_index())
    }

    pub fn active_segment(&self) -> Option<usize> {
        self.state.active_segment_index()
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.state.toggle_mute();
        self.state.is_muted
    }

    // === Navigation ===

    /// Replace the playlist and start over at its first video.
    pub fn load_playlist(&mut self, items: Vec<PlaylistItem>) -> Vec<SyncEffect> {
        info!(count = items.len(), "loading playlist");
        self.playlist = Playlist::new(items);
        self.enter_video(0)
    }

    /// Advance to the next video. Stops at the last one.
    pub fn next_video(&mut self) -> Vec<SyncEffect> {
        let current = self.state.current_video_index();
        if current >= self.playlist.last_index() {
            return Vec::new();
        }
        self.enter_video(current + 1)
    }

    /// Go back one video. Stops at the first one.
    pub fn prev_video(&mut self) -> Vec<SyncEffect> {
        let current = self.state.current_video_index();
        if current == 0 {
            return Vec::new();
        }
        self.enter_video(current - 1)
    }

    /// Jump to a playlist index, clamped into range.
    ///
    /// Selecting the current index again is a no-op.
    pub fn set_index(&mut self, index: usize) -> Vec<SyncEffect> {
        let index = self.playlist.clamp_index(index);
        if index == self.state.current_video_index() && !self.playlist.is_empty() {
            return Vec::new();
        }
        self.enter_video(index)
    }

    /// User picked a clip from the playlist.
    ///
    /// Switching clips behaves like `set_index`. Picking the clip that is
    /// already playing restarts it from its start position.
    pub fn select_clip(&mut self, index: usize) -> Vec<SyncEffect> {
        let index = self.playlist.clamp_index(index);
        if index != self.state.current_video_index() {
            return self.enter_video(index);
        }
        let Some(item) = self.playlist.get(index) else {
            return Vec::new();
        };
        let seconds = embed_start_seconds(item.start) as f64;
        self.state.set_time(seconds);
        let mut effects = vec![SyncEffect::Seek { seconds }];
        if self.refresh_active() {
            effects.extend(self.state.active_segment_index().map(SyncEffect::ScrollTo));
        }
        effects
    }

    /// Reset playback for `index` and request its transcript.
    fn enter_video(&mut self, index: usize) -> Vec<SyncEffect> {
        let index = self.playlist.clamp_index(index);
        self.state.set_video_index(index);
        self.invalidate_transcript();

        let Some(item) = self.playlist.get(index) else {
            self.state.set_time(0.0);
            return Vec::new();
        };

        let start_seconds = embed_start_seconds(item.start);
        self.state.set_time(start_seconds as f64);

        let ticket = FetchTicket {
            id: self.next_ticket_id,
            video_index: index,
            video_id: item.video_id.clone(),
            center_position: item.start,
        };
        self.next_ticket_id += 1;
        debug!(ticket = ticket.id, video_id = %ticket.video_id, "entering video");

        let load = SyncEffect::LoadVideo {
            index,
            video_id: item.video_id.clone(),
            start_seconds,
        };
        self.pending = Some(ticket.clone());
        self.transcript = FetchState::Loading;

        vec![load, SyncEffect::FetchTranscript(ticket)]
    }

    /// Drop the transcript and anything derived from it.
    fn invalidate_transcript(&mut self) {
        self.transcript = FetchState::Idle;
        self.pending = None;
        self.resolver.reset();
        self.state.set_active_segment(None);
    }

    // === Playback ===

    /// Handle a playback time update from the player.
    ///
    /// Returns `ScrollTo` only when the active segment changes to a new
    /// segment; repeated updates inside the same segment produce nothing.
    pub fn on_time_update(&mut self, current_time: f64) -> Option<SyncEffect> {
        self.state.set_time(current_time);
        if self.refresh_active() {
            self.state.active_segment_index().map(SyncEffect::ScrollTo)
        } else {
            None
        }
    }

    /// User clicked a transcript segment: seek to its start.
    ///
    /// The active index is set optimistically before the player confirms the
    /// seek. Out-of-range indices and a missing transcript are ignored.
    pub fn select_segment(&mut self, index: usize) -> Option<SyncEffect> {
        let start = self.transcript.value()?.segment(index)?.start_time;
        self.state.set_time(start);
        self.resolver.assume(Some(index));
        self.state.set_active_segment(Some(index));
        Some(SyncEffect::Seek { seconds: start })
    }

    /// Seek relative to the current time (keyboard scrubbing).
    pub fn seek_by(&mut self, delta: f64) -> Vec<SyncEffect> {
        let target = (self.state.current_time + delta).max(0.0);
        let mut effects = vec![SyncEffect::Seek { seconds: target }];
        effects.extend(self.on_time_update(target));
        effects
    }

    // === Transcript fetch ===

    /// Apply a finished transcript fetch.
    ///
    /// Completions for any ticket other than the pending one are dropped
    /// silently. On success the active segment is resolved right away.
    pub fn complete_transcript_fetch(
        &mut self,
        ticket_id: u64,
        result: Result<Transcript, String>,
    ) -> Option<SyncEffect> {
        match &self.pending {
            Some(pending) if pending.id == ticket_id => {}
            _ => {
                debug!(ticket = ticket_id, "discarding stale transcript response");
                return None;
            }
        }
        self.pending = None;

        match result {
            Ok(transcript) => {
                info!(
                    video_id = %transcript.video_id,
                    segments = transcript.len(),
                    "transcript loaded"
                );
                self.transcript = FetchState::Success(transcript);
                if self.refresh_active() {
                    self.state.active_segment_index().map(SyncEffect::ScrollTo)
                } else {
                    None
                }
            }
            Err(message) => {
                self.transcript = FetchState::Error(message);
                self.resolver.reset();
                self.state.set_active_segment(None);
                None
            }
        }
    }

    /// Re-resolve the active segment. Returns true if it changed.
    fn refresh_active(&mut self) -> bool {
        let changed = self
            .resolver
            .update(self.transcript.value(), self.state.current_time);
        self.state.set_active_segment(self.resolver.current());
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::TranscriptSegment;

    fn items(ids: &[&str]) -> Vec<PlaylistItem> {
        ids.iter().map(|id| PlaylistItem::new(*id)).collect()
    }

    fn transcript(video_id: &str) -> Transcript {
        Transcript::new(
            video_id,
            vec![
                TranscriptSegment::new(0.0, 5.0, "a"),
                TranscriptSegment::new(5.0, 9.0, "b"),
            ],
        )
    }

    fn fetch_ticket(effects: &[SyncEffect]) -> FetchTicket {
        effects
            .iter()
            .find_map(|e| match e {
                SyncEffect::FetchTranscript(t) => Some(t.clone()),
                _ => None,
            })
            .expect("fetch effect")
    }

    #[test]
    fn load_playlist_resets_to_first_video() {
        let mut sync = SyncController::default();
        sync.load_playlist(items(&["a", "b", "c"]));
        sync.set_index(2);

        let effects = sync.load_playlist(items(&["x", "y"]));

        assert_eq!(sync.current_index(), 0);
        assert_eq!(sync.active_segment(), None);
        assert!(sync.transcript().is_loading());
        assert_eq!(fetch_ticket(&effects).video_id, "x");
    }

    #[test]
    fn load_empty_playlist_issues_no_fetch() {
        let mut sync = SyncController::default();
        let effects = sync.load_playlist(Vec::new());
        assert!(effects.is_empty());
        assert_eq!(sync.current_index(), 0);
        assert_eq!(sync.transcript(), &FetchState::Idle);
    }

    #[test]
    fn load_video_effect_uses_embed_start() {
        let mut sync = SyncController::default();
        let effects = sync.load_playlist(vec![PlaylistItem::new("a").with_range(12.7, 15.0)]);

        assert_eq!(
            effects[0],
            SyncEffect::LoadVideo {
                index: 0,
                video_id: "a".to_string(),
                start_seconds: 11,
            }
        );
        assert_eq!(sync.state().current_time, 11.0);
        assert_eq!(fetch_ticket(&effects).center_position, Some(12.7));
    }

    #[test]
    fn next_video_stops_at_last() {
        let mut sync = SyncController::default();
        sync.load_playlist(items(&["a", "b"]));

        assert!(!sync.next_video().is_empty());
        assert_eq!(sync.current_index(), 1);
        assert!(sync.next_video().is_empty());
        assert_eq!(sync.current_index(), 1);
    }

    #[test]
    fn prev_video_stops_at_zero() {
        let mut sync = SyncController::default();
        sync.load_playlist(items(&["a", "b"]));
        assert!(sync.prev_video().is_empty());
        assert_eq!(sync.current_index(), 0);
    }

    #[test]
    fn set_index_clamps() {
        let mut sync = SyncController::default();
        sync.load_playlist(items(&["a", "b", "c"]));
        sync.set_index(99);
        assert_eq!(sync.current_index(), 2);
    }

    #[test]
    fn set_index_on_empty_playlist_is_zero() {
        let mut sync = SyncController::default();
        sync.set_index(5);
        assert_eq!(sync.current_index(), 0);
    }

    #[test]
    fn time_update_scrolls_once_per_segment() {
        let mut sync = SyncController::default();
        let effects = sync.load_playlist(items(&["a"]));
        let ticket = fetch_ticket(&effects);
        sync.complete_transcript_fetch(ticket.id, Ok(transcript("a")));

        // Already resolved to segment 0 on load; same segment again is silent
        assert_eq!(sync.active_segment(), Some(0));
        assert_eq!(sync.on_time_update(0.5), None);
        assert_eq!(sync.on_time_update(3.0), Some(SyncEffect::ScrollTo(1)));
        assert_eq!(sync.on_time_update(3.0), None);
        assert_eq!(sync.on_time_update(4.0), None);
        assert_eq!(sync.on_time_update(10.0), None);
        assert_eq!(sync.active_segment(), None);
    }

    #[test]
    fn time_update_without_transcript_is_quiet() {
        let mut sync = SyncController::default();
        sync.load_playlist(items(&["a"]));
        assert_eq!(sync.on_time_update(3.0), None);
        assert_eq!(sync.active_segment(), None);
        assert_eq!(sync.state().current_time, 3.0);
    }

    #[test]
    fn switching_video_clears_active_segment() {
        let mut sync = SyncController::default();
        let effects = sync.load_playlist(items(&["a", "b"]));
        sync.complete_transcript_fetch(fetch_ticket(&effects).id, Ok(transcript("a")));
        sync.on_time_update(3.0);
        assert_eq!(sync.active_segment(), Some(1));

        sync.set_index(1);

        assert_eq!(sync.active_segment(), None);
        assert!(sync.transcript().value().is_none());
    }

    #[test]
    fn stale_transcript_is_discarded() {
        let mut sync = SyncController::default();
        let first = fetch_ticket(&sync.load_playlist(items(&["a", "b"])));
        let second = fetch_ticket(&sync.next_video());

        sync.complete_transcript_fetch(second.id, Ok(transcript("b")));
        let late = sync.complete_transcript_fetch(first.id, Ok(transcript("a")));

        assert_eq!(late, None);
        assert_eq!(sync.transcript().value().unwrap().video_id, "b");
    }

    #[test]
    fn stale_error_does_not_clobber_loading_state() {
        let mut sync = SyncController::default();
        let first = fetch_ticket(&sync.load_playlist(items(&["a", "b"])));
        sync.next_video();

        sync.complete_transcript_fetch(first.id, Err("timeout".to_string()));

        assert!(sync.transcript().is_loading());
    }

    #[test]
    fn failed_fetch_surfaces_error() {
        let mut sync = SyncController::default();
        let ticket = fetch_ticket(&sync.load_playlist(items(&["a"])));
        sync.complete_transcript_fetch(ticket.id, Err("Nothing found.".to_string()));
        assert_eq!(sync.transcript().error(), Some("Nothing found."));
        assert_eq!(sync.on_time_update(3.0), None);
    }

    #[test]
    fn duplicate_completion_is_ignored() {
        let mut sync = SyncController::default();
        let ticket = fetch_ticket(&sync.load_playlist(items(&["a"])));
        sync.complete_transcript_fetch(ticket.id, Ok(transcript("a")));
        assert!(sync
            .complete_transcript_fetch(ticket.id, Err("late".to_string()))
            .is_none());
        assert!(sync.transcript().is_success());
    }

    #[test]
    fn select_segment_seeks_optimistically() {
        let mut sync = SyncController::default();
        let ticket = fetch_ticket(&sync.load_playlist(items(&["a"])));
        sync.complete_transcript_fetch(ticket.id, Ok(transcript("a")));

        let effect = sync.select_segment(1);

        assert_eq!(effect, Some(SyncEffect::Seek { seconds: 5.0 }));
        assert_eq!(sync.active_segment(), Some(1));
        assert_eq!(sync.state().current_time, 5.0);
    }

    #[test]
    fn select_segment_out_of_range_is_ignored() {
        let mut sync = SyncController::default();
        let ticket = fetch_ticket(&sync.load_playlist(items(&["a"])));
        sync.complete_transcript_fetch(ticket.id, Ok(transcript("a")));
        assert_eq!(sync.select_segment(7), None);
    }

    #[test]
    fn select_segment_before_load_is_ignored() {
        let mut sync = SyncController::default();
        sync.load_playlist(items(&["a"]));
        assert_eq!(sync.select_segment(0), None);
    }

    #[test]
    fn select_current_clip_restarts_it() {
        let mut sync = SyncController::default();
        sync.load_playlist(vec![PlaylistItem::new("a").with_range(20.0, 25.0)]);
        sync.on_time_update(40.0);

        let effects = sync.select_clip(0);

        assert_eq!(effects, vec![SyncEffect::Seek { seconds: 19.0 }]);
        assert_eq!(sync.state().current_time, 19.0);
    }

    #[test]
    fn restarting_clip_scrolls_to_new_active_segment() {
        let mut sync = SyncController::default();
        let effects = sync.load_playlist(vec![PlaylistItem::new("a").with_range(6.0, 8.0)]);
        let ticket = fetch_ticket(&effects);
        let segments = vec![
            TranscriptSegment::new(0.0, 5.0, "a"),
            TranscriptSegment::new(5.0, 9.0, "b"),
            TranscriptSegment::new(20.0, 30.0, "c"),
        ];
        sync.complete_transcript_fetch(ticket.id, Ok(Transcript::new("a", segments)));
        assert_eq!(sync.active_segment(), Some(1));
        assert_eq!(sync.on_time_update(18.0), Some(SyncEffect::ScrollTo(2)));

        let effects = sync.select_clip(0);

        assert_eq!(
            effects,
            vec![SyncEffect::Seek { seconds: 5.0 }, SyncEffect::ScrollTo(1)]
        );
        assert_eq!(sync.active_segment(), Some(1));
        assert_eq!(sync.on_time_update(5.5), None);
    }

    #[test]
    fn select_other_clip_switches_video() {
        let mut sync = SyncController::default();
        sync.load_playlist(items(&["a", "b"]));
        let effects = sync.select_clip(1);
        assert_eq!(sync.current_index(), 1);
        assert_eq!(fetch_ticket(&effects).video_index, 1);
    }

    #[test]
    fn seek_by_never_goes_negative() {
        let mut sync = SyncController::default();
        sync.load_playlist(items(&["a"]));
        let effects = sync.seek_by(-10.0);
        assert_eq!(effects[0], SyncEffect::Seek { seconds: 0.0 });
    }

    #[test]
    fn tickets_are_monotonic() {
        let mut sync = SyncController::default();
        let a = fetch_ticket(&sync.load_playlist(items(&["a", "b"])));
        let b = fetch_ticket(&sync.next_video());
        assert!(b.id > a.id);
        assert_eq!(sync.pending_ticket().map(|t| t.id), Some(b.id));
    }

    #[test]
    fn toggle_mute_reports_state() {
        let mut sync = SyncController::default();
        assert!(sync.toggle_mute());
        assert!(!sync.toggle_mute());
    }
}
