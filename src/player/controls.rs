//! Guarded player controls.
//!
//! The video player attaches asynchronously, so every control call must be
//! safe to make before it exists. Calls without an attached player are
//! no-ops and report `false`.

use tracing::debug;

use super::state::SyncEffect;

/// A video player that can be driven by the sync controller.
pub trait VideoPlayer {
    /// Load a video and start playing at `start_seconds`.
    fn load_video(&mut self, video_id: &str, start_seconds: u64);

    fn play(&mut self);

    fn pause(&mut self);

    /// Seek within the loaded video.
    fn seek_to(&mut self, seconds: f64);

    fn set_muted(&mut self, muted: bool);

    /// Current playback time in seconds.
    fn current_time(&self) -> f64;
}

/// Holds an optional player and forwards control calls to it.
pub struct PlayerControls<P: VideoPlayer> {
    player: Option<P>,
}

impl<P: VideoPlayer> Default for PlayerControls<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: VideoPlayer> PlayerControls<P> {
    pub fn new() -> Self {
        Self { player: None }
    }

    pub fn attach(&mut self, player: P) {
        self.player = Some(player);
    }

    pub fn detach(&mut self) -> Option<P> {
        self.player.take()
    }

    pub fn is_attached(&self) -> bool {
        self.player.is_some()
    }

    pub fn player(&self) -> Option<&P> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut P> {
        self.player.as_mut()
    }

    pub fn play(&mut self) -> bool {
        self.with_player("play", |p| p.play())
    }

    pub fn pause(&mut self) -> bool {
        self.with_player("pause", |p| p.pause())
    }

    pub fn seek_to(&mut self, seconds: f64) -> bool {
        self.with_player("seek", |p| p.seek_to(seconds))
    }

    pub fn set_muted(&mut self, muted: bool) -> bool {
        self.with_player("mute", |p| p.set_muted(muted))
    }

    /// Playback time, if a player is attached.
    pub fn current_time(&self) -> Option<f64> {
        self.player.as_ref().map(|p| p.current_time())
    }

    /// Apply the player-facing part of a sync effect.
    ///
    /// View and fetch effects are ignored here.
    pub fn apply(&mut self, effect: &SyncEffect) -> bool {
        match effect {
            SyncEffect::Seek { seconds } => self.seek_to(*seconds),
            SyncEffect::LoadVideo {
                video_id,
                start_seconds,
                ..
            } => self.with_player("load", |p| p.load_video(video_id, *start_seconds)),
            SyncEffect::ScrollTo(_) | SyncEffect::FetchTranscript(_) => false,
        }
    }

    fn with_player(&mut self, action: &str, f: impl FnOnce(&mut P)) -> bool {
        match self.player.as_mut() {
            Some(player) => {
                f(player);
                true
            }
            None => {
                debug!(action, "no player attached, ignoring control call");
                false
            }
        }
    }
}
