//! Shared utility helpers.

/// Case-insensitive substring search without allocating an uppercase copy.
#[inline]
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle_bytes = needle.as_bytes();
    let haystack_bytes = haystack.as_bytes();
    if needle_bytes.is_empty() {
        return true;
    }
    if needle_bytes.len() > haystack_bytes.len() {
        return false;
    }
    haystack_bytes
        .windows(needle_bytes.len())
        .any(|window| window.eq_ignore_ascii_case(needle_bytes))
}

/// True when the line holds nothing but whitespace (terminator included).
#[inline]
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// True when the line is a `--` SQL line comment, ignoring indentation.
#[inline]
pub fn is_line_comment(line: &str) -> bool {
    line.trim_start().starts_with("--")
}
