//! Wall-clock driven player used by the terminal watch view.
//!
//! There is no real video in the terminal, so playback time is derived from
//! elapsed wall time, speed, and a seek offset.

use std::time::Instant;

use super::controls::VideoPlayer;

/// Simulated player that advances with wall time.
#[derive(Debug, Clone)]
pub struct ClockPlayer {
    /// Video currently loaded
    pub video_id: Option<String>,
    /// Whether playback is paused
    pub paused: bool,
    /// Playback speed multiplier (1.0 = normal)
    pub speed: f64,
    /// Whether audio is muted (display only)
    pub muted: bool,
    /// Wall clock time when playback started/resumed
    start_time: Instant,
    /// Playback time at `start_time`
    time_offset: f64,
}

impl Default for ClockPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPlayer {
    pub fn new() -> Self {
        Self {
            video_id: None,
            paused: false,
            speed: 1.0,
            muted: false,
            start_time: Instant::now(),
            time_offset: 0.0,
        }
    }

    /// Toggle pause state and reset timing if resuming.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.play();
        } else {
            self.pause();
        }
    }

    /// Increase playback speed (max 4x).
    pub fn speed_up(&mut self) {
        self.rebase();
        self.speed = (self.speed * 1.5).min(4.0);
    }

    /// Decrease playback speed (min 0.25x).
    pub fn speed_down(&mut self) {
        self.rebase();
        self.speed = (self.speed / 1.5).max(0.25);
    }

    /// Fold elapsed time into the offset so speed changes don't jump.
    fn rebase(&mut self) {
        self.time_offset = self.current_time();
        self.start_time = Instant::now();
    }
}

impl VideoPlayer for ClockPlayer {
    fn load_video(&mut self, video_id: &str, start_seconds: u64) {
        self.video_id = Some(video_id.to_string());
        self.time_offset = start_seconds as f64;
        self.start_time = Instant::now();
        self.paused = false;
    }

    fn play(&mut self) {
        if self.paused {
            self.paused = false;
            self.start_time = Instant::now();
        }
    }

    fn pause(&mut self) {
        if !self.paused {
            self.time_offset = self.current_time();
            self.paused = true;
        }
    }

    fn seek_to(&mut self, seconds: f64) {
        self.time_offset = seconds.max(0.0);
        self.start_time = Instant::now();
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn current_time(&self) -> f64 {
        if self.paused {
            self.time_offset
        } else {
            self.time_offset + self.start_time.elapsed().as_secs_f64() * self.speed
        }
    }
}
