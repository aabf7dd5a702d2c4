//! Embed parameters handed to the video player.

/// Start offset for loading a clip into the player.
///
/// Starts one second before the clip so the first word is not cut off:
/// `floor(start - 1)`, never below zero. A clip without a start plays from 0.
pub fn embed_start_seconds(start: Option<f64>) -> u64 {
    match start {
        Some(start) if start.is_finite() => (start - 1.0).floor().max(0.0) as u64,
        _ => 0,
    }
}
