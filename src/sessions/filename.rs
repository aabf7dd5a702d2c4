//! Session file naming.
//!
//! Search terms can contain anything a user types, so file names are built
//! from a filesystem-safe slug plus a short hash of the exact key. The hash
//! keeps terms that slug identically ("café" and "cafe") in separate files.

use deunicode::deunicode;

/// Characters that are invalid in filenames on common filesystems.
const INVALID_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Windows reserved device names that cannot be used as filenames.
const WINDOWS_RESERVED: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Fallback slug when sanitization produces an empty result.
const FALLBACK_SLUG: &str = "session";

/// Maximum slug length before the hash suffix.
const MAX_SLUG_LENGTH: usize = 48;

/// Extension of session files.
pub const SESSION_EXTENSION: &str = "json";

/// Sanitizes a search term into a filename slug.
///
/// 1. Unicode → ASCII transliteration
/// 2. Whitespace → hyphens (collapsed)
/// 3. Invalid filesystem characters removed
/// 4. Leading/trailing dots and hyphens trimmed
/// 5. Windows reserved names prefixed with `_`
/// 6. Truncated to a fixed length, empty results → "session"
pub fn slug(term: &str) -> String {
    let ascii = deunicode(term);

    let mut result = String::with_capacity(ascii.len());
    let mut last_was_hyphen = false;

    for c in ascii.chars() {
        if c.is_whitespace() || c == '-' {
            if !last_was_hyphen {
                result.push('-');
                last_was_hyphen = true;
            }
        } else if INVALID_CHARS.contains(&c) {
            continue;
        } else if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
            result.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        }
    }

    let trimmed = result.trim_matches(|c| c == '.' || c == '-');
    let mut slug: String = trimmed.chars().take(MAX_SLUG_LENGTH).collect();
    while slug.ends_with('-') || slug.ends_with('.') {
        slug.pop();
    }

    let upper = slug.to_uppercase();
    let stem = upper.split('.').next().unwrap_or("");
    if WINDOWS_RESERVED.contains(&stem) {
        slug.insert(0, '_');
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// FNV-1a 64-bit hash. Stable across builds and platforms.
fn fnv1a(input: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    input.bytes().fold(OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    })
}

/// File name for the session stored under `key`.
pub fn session_filename(key: &str) -> String {
    format!(
        "{}-{:08x}.{}",
        slug(key),
        fnv1a(key) as u32,
        SESSION_EXTENSION
    )
}
