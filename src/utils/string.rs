//! Text helpers for fitting descriptions into fixed-width panels

/// Truncate to at most `max_chars` characters, appending "..." when cut.
///
/// Counts UTF-8 characters rather than bytes, so multi-byte text never gets
/// sliced mid-character.
///
/// ```
/// use mission_control_core::utils::string::truncate_at_char_boundary;
///
/// assert_eq!(truncate_at_char_boundary("Mission MG-001", 7), "Mission...");
/// assert_eq!(truncate_at_char_boundary("MG-001", 10), "MG-001");
/// assert_eq!(truncate_at_char_boundary("→→→", 2), "→→...");
/// ```
pub fn truncate_at_char_boundary(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}...", &s[..cut]),
    }
}

/// Format a zero-padded entity identifier such as `MG-001` or `AGT-010`
pub fn padded_id(prefix: &str, n: u32) -> String {
    format!("{}-{:03}", prefix, n)
}
