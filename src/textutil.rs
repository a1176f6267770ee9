//! UTF-8-safe text truncation helpers.
//!
//! File content included in the remote context and preview labels in the UI
//! both cap text by character count. Slicing by bytes can panic mid-codepoint,
//! so the cut logic lives here once.

/// Truncate to at most `max_chars` characters, appending `suffix` only when
/// truncation occurred.
pub fn truncate_chars_with_suffix(text: &str, max_chars: usize, suffix: &str) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str(suffix);
    out
}

/// Collapse newlines and clip to a single short preview line.
pub fn single_line_preview(text: &str, max_chars: usize) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    truncate_chars_with_suffix(flat.trim(), max_chars, "...")
}
