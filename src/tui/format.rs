//! Text formatting helpers shared by the watch view and CLI output.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::transcript::TranscriptSegment;

/// Format a duration in seconds to MM:SS format.
///
/// # Arguments
/// * `seconds` - Duration in seconds
///
/// # Returns
/// A string in MM:SS format
pub fn format_duration(seconds: f64) -> String {
    let total_secs = seconds.max(0.0) as u64;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}", mins, secs)
}

/// Truncate `text` to at most `max_width` terminal columns, adding an
/// ellipsis when anything was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width - 1 {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

/// One transcript line: `[MM:SS] text`, marked when active.
pub fn segment_line(segment: &TranscriptSegment, active: bool) -> String {
    let marker = if active { '▶' } else { ' ' };
    format!(
        "{} [{}] {}",
        marker,
        format_duration(segment.start_time),
        segment.text
    )
}

/// Build the progress bar characters.
///
/// # Arguments
/// * `bar_width` - Width of the bar in characters
/// * `current_time` - Current playback time
/// * `total_duration` - Total duration of the video transcript
///
/// # Returns
/// The bar as a string with a playhead at the current position
pub fn progress_bar(bar_width: usize, current_time: f64, total_duration: f64) -> String {
    if bar_width == 0 {
        return String::new();
    }
    let progress = if total_duration > 0.0 {
        (current_time / total_duration).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let head = ((bar_width as f64 * progress) as usize).min(bar_width - 1);

    (0..bar_width)
        .map(|i| match i.cmp(&head) {
            std::cmp::Ordering::Less => '━',
            std::cmp::Ordering::Equal => '⏺',
            std::cmp::Ordering::Greater => '─',
        })
        .collect()
}
