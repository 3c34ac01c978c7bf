//! Statement splitting.
//!
//! A raw export file holds many statements separated by semicolons.
//! Splitting honors quote context only, so a semicolon inside a string
//! literal or a quoted identifier never ends a statement. A trailing
//! fragment without a terminating semicolon is kept.

use crate::scan::{Cursor, QuoteState};

/// Split `text` into trimmed statements on semicolons outside quoted
/// runs. Empty pieces are dropped.
pub fn split_statements(text: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut cursor = Cursor::new(text);
    let mut start = 0;
    while let Some(b) = cursor.peek() {
        if b == b';' && cursor.state() == QuoteState::Normal {
            let piece = text[start..cursor.pos()].trim();
            if !piece.is_empty() {
                statements.push(piece.to_string());
            }
            start = cursor.pos() + 1;
        }
        cursor.advance();
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        statements.push(tail.to_string());
    }
    statements
}
