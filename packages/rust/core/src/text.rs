//! Small string helpers shared by the generators.

/// Shorten `value` to at most `max_len` characters, ending in `...`.
pub(crate) fn ellipsize(value: &str, max_len: usize) -> String {
    if value.chars().count() <= max_len {
        return value.to_string();
    }
    let head: String = value.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", head.trim())
}
