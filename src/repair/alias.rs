//! Alias forcing.
//!
//! Presto exports carry aliases the target cannot parse: single-quoted
//! text (`AS 'Total Sales'`), double-quoted text with spaces, and bare
//! multi-word aliases. Quoted alias text either becomes a backtick
//! identifier or collapses to a bare one, depending on policy;
//! multi-word bare aliases always collapse, with whitespace and special
//! characters turning into underscores.

use crate::scan::{self, Cursor, QuoteState};
use crate::util::{is_ident_byte, is_keyword_at};

use super::{AliasPolicy, RepairConfig};

pub(super) fn force_aliases(config: &RepairConfig, text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut cursor = Cursor::new(text);
    let mut copied = 0;
    while cursor.peek().is_some() {
        let pos = cursor.pos();
        if cursor.state() == QuoteState::Normal && is_as_keyword(bytes, pos) {
            if let Some((replacement, end)) = rewrite_alias(config, text, pos) {
                out.push_str(&text[copied..pos]);
                out.push_str(&replacement);
                copied = end;
                while cursor.pos() < end {
                    cursor.advance();
                }
                continue;
            }
        }
        cursor.advance();
    }
    out.push_str(&text[copied..]);
    out
}

/// AS as a whole word, followed by at least one whitespace byte.
fn is_as_keyword(bytes: &[u8], pos: usize) -> bool {
    is_keyword_at(bytes, pos, b"AS")
        && bytes.get(pos + 2).is_some_and(|b| b.is_ascii_whitespace())
}

fn rewrite_alias(config: &RepairConfig, text: &str, as_pos: usize) -> Option<(String, usize)> {
    let bytes = text.as_bytes();
    let mut i = as_pos + 2;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if i >= bytes.len() {
        return None;
    }
    match bytes[i] {
        b'\'' => {
            let (content, end) = scan::scan_quoted(text, i, b'\'')?;
            if content.is_empty() {
                return None;
            }
            Some((format!("AS {}", clean_alias(&content)), end))
        }
        b'"' => {
            let (content, end) = scan::scan_quoted(text, i, b'"')?;
            if content.is_empty() {
                return None;
            }
            let replacement = match config.alias_policy {
                AliasPolicy::PreserveQuoted => format!("AS `{content}`"),
                AliasPolicy::ForceBare => format!("AS {}", clean_alias(&content)),
            };
            Some((replacement, end))
        }
        _ => rewrite_bare_alias(text, i),
    }
}

/// Multi-word bare alias: identifier words joined by whitespace, ended
/// by a comma that starts another column, the FROM keyword, or the end
/// of the text. Single-word aliases are left alone.
fn rewrite_bare_alias(text: &str, start: usize) -> Option<(String, usize)> {
    let bytes = text.as_bytes();
    if bytes[start] != b'_' && !bytes[start].is_ascii_alphabetic() {
        return None;
    }
    let mut alias_end = start;
    let mut word_count = 0;
    let mut i = start;
    loop {
        let word_start = i;
        while i < bytes.len() && is_ident_byte(bytes[i]) {
            i += 1;
        }
        if i == word_start {
            return None;
        }
        word_count += 1;
        alias_end = i;
        let mut j = i;
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        if ends_alias(bytes, j) {
            break;
        }
        if j == i {
            // neither whitespace nor a terminator follows the word
            return None;
        }
        i = j;
    }
    if word_count < 2 {
        return None;
    }
    Some((format!("AS {}", clean_alias(&text[start..alias_end])), alias_end))
}

fn ends_alias(bytes: &[u8], j: usize) -> bool {
    if j >= bytes.len() {
        return true;
    }
    if bytes[j] == b',' {
        let mut k = j + 1;
        while k < bytes.len() && bytes[k].is_ascii_whitespace() {
            k += 1;
        }
        return k < bytes.len() && (bytes[k] == b'_' || bytes[k].is_ascii_alphabetic());
    }
    is_keyword_at(bytes, j, b"FROM")
}

/// Collapse whitespace runs to `_` and replace every character that
/// cannot appear in a bare identifier with `_`.
fn clean_alias(alias: &str) -> String {
    let mut cleaned = String::with_capacity(alias.len());
    let mut in_space = false;
    for ch in alias.trim().chars() {
        if ch.is_whitespace() {
            in_space = true;
            continue;
        }
        if in_space {
            cleaned.push('_');
            in_space = false;
        }
        if ch.is_alphanumeric() || ch == '_' {
            cleaned.push(ch);
        } else {
            cleaned.push('_');
        }
    }
    cleaned
}
