//! Argument-list repairs.
//!
//! Two-argument REGEXP_REPLACE calls gain an explicit empty replacement
//! so the target parser accepts them, and argument lists cut short by
//! log truncation (`func(a, )`) are patched with an empty literal.

use crate::scan;

use super::RepairConfig;

/// `REGEXP_REPLACE(subject, 'pattern')` -> with an appended `''`
/// replacement argument. Calls that already carry three arguments do
/// not match the pattern and stay as they are.
pub(super) fn repair_regexp_arity(config: &RepairConfig, text: &str) -> String {
    scan::replace_outside_strings(text, &config.two_arg_re, "${1}(${2}, ${3}, '')")
}

/// Close off truncated argument lists: `, )` becomes `, '')`, and the
/// doubled form that repair can produce collapses back to one.
pub fn repair_trailing_mistakes(config: &RepairConfig, text: &str) -> String {
    let repaired = scan::replace_outside_strings(text, &config.trailing_comma_re, ", '')");
    scan::replace_outside_strings(&repaired, &config.doubled_empty_re, ", '')")
}
