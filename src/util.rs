//! Shared byte-level helpers used by the repair and rewrite passes.

/// Case-insensitive substring search without allocating an uppercase copy.
#[inline]
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle_bytes = needle.as_bytes();
    let haystack_bytes = haystack.as_bytes();
    if needle_bytes.len() > haystack_bytes.len() {
        return false;
    }
    haystack_bytes
        .windows(needle_bytes.len())
        .any(|window| window.eq_ignore_ascii_case(needle_bytes))
}

/// Case-insensitive starts_with check without allocating.
#[inline]
pub fn starts_with_ci(haystack: &str, needle: &str) -> bool {
    haystack.len() >= needle.len()
        && haystack.as_bytes()[..needle.len()].eq_ignore_ascii_case(needle.as_bytes())
}

/// True for bytes that can appear in an unquoted SQL identifier.
#[inline]
pub fn is_ident_byte(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphanumeric()
}

/// Whole-word, case-insensitive keyword check at a byte position.
///
/// The byte before `pos` and the byte after the keyword must not be
/// identifier bytes, so `TRIM` does not match inside `LTRIM` or `TRIMMED`.
#[inline]
pub fn is_keyword_at(bytes: &[u8], pos: usize, keyword: &[u8]) -> bool {
    let end = pos + keyword.len();
    end <= bytes.len()
        && bytes[pos..end].eq_ignore_ascii_case(keyword)
        && (pos == 0 || !is_ident_byte(bytes[pos - 1]))
        && (end == bytes.len() || !is_ident_byte(bytes[end]))
}
