//! Presto function rewriting.
//!
//! After lexical repair the text is structurally sound but still calls
//! Presto-only functions. A fixed table maps each one to its Databricks
//! equivalent; the argument handling varies per function, from a plain
//! rename to argument surgery. Date format literals convert first, while
//! the `%`-token patterns are still recognizable.
//!
//! Each rule sweeps the whole text once. A rule's replacement is never
//! rescanned by the same rule, but later rules see it, so nested calls
//! of different functions all convert.

mod date_format;

pub use date_format::convert_date_format_pattern;

use crate::scan::{self, Cursor, QuoteState};
use crate::util::{contains_ci, is_keyword_at};

/// How a matched call's argument list is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgRule {
    /// Rename only; the argument list is scanned in place
    Rename,
    /// Re-emit the raw argument text unchanged under the new name
    PassThroughArgs,
    /// Single argument, trimmed
    TrimmedArg,
    /// Matches only a call with an empty argument list
    NoArgs,
    /// Exactly three arguments; the first loses surrounding quotes
    StripUnitQuotes,
    /// A literal extra argument is appended after the existing ones
    AppendArg(&'static str),
}

/// One source-function rewrite.
#[derive(Debug, Clone, Copy)]
pub struct FunctionRule {
    pub from: &'static str,
    pub to: &'static str,
    pub rule: ArgRule,
}

/// The rewrite configuration: the rename table plus date-format
/// handling.
#[derive(Debug, Clone)]
pub struct RewriteTables {
    pub functions: Vec<FunctionRule>,
    /// Functions whose string arguments hold date format patterns
    pub date_functions: Vec<&'static str>,
    /// Ordered `%`-token to DateTimeFormatter replacements
    pub date_tokens: Vec<(&'static str, &'static str)>,
}

impl RewriteTables {
    /// The standard Presto to Databricks table.
    pub fn presto_to_databricks() -> Self {
        Self {
            functions: vec![
                FunctionRule {
                    from: "AT_TIMEZONE",
                    to: "FROM_UTC_TIMESTAMP",
                    rule: ArgRule::PassThroughArgs,
                },
                FunctionRule {
                    from: "DATE_PARSE",
                    to: "TO_TIMESTAMP",
                    rule: ArgRule::Rename,
                },
                FunctionRule {
                    from: "FROM_ISO8601_TIMESTAMP",
                    to: "TO_TIMESTAMP",
                    rule: ArgRule::TrimmedArg,
                },
                FunctionRule {
                    from: "TO_UNIXTIME",
                    to: "UNIX_TIMESTAMP",
                    rule: ArgRule::Rename,
                },
                FunctionRule {
                    from: "NOW",
                    to: "CURRENT_TIMESTAMP",
                    rule: ArgRule::NoArgs,
                },
                FunctionRule {
                    from: "DATE_ADD",
                    to: "DATEADD",
                    rule: ArgRule::StripUnitQuotes,
                },
                FunctionRule {
                    from: "CARDINALITY",
                    to: "SIZE",
                    rule: ArgRule::Rename,
                },
                FunctionRule {
                    from: "FORMAT_DATETIME",
                    to: "DATE_FORMAT",
                    rule: ArgRule::Rename,
                },
                FunctionRule {
                    from: "ARBITRARY",
                    to: "FIRST",
                    rule: ArgRule::AppendArg("TRUE"),
                },
                FunctionRule {
                    from: "REGEXP_LIKE",
                    to: "RLIKE",
                    rule: ArgRule::Rename,
                },
            ],
            // covers both source and already-rewritten names, so format
            // literals convert no matter which pass renamed the call
            date_functions: vec![
                "TO_TIMESTAMP",
                "DATE_FORMAT",
                "DATE_PARSE",
                "TO_DATE",
                "FROM_UNIXTIME",
                "UNIX_TIMESTAMP",
            ],
            date_tokens: vec![
                ("%Y", "yyyy"),
                ("%y", "yy"),
                ("%m", "MM"),
                ("%d", "dd"),
                ("%H", "HH"),
                ("%h", "hh"),
                ("%i", "mm"),
                ("%M", "mm"),
                ("%s", "ss"),
                ("%S", "ss"),
                ("%p", "a"),
                ("%W", "EEEE"),
                ("%w", "e"),
                ("%b", "MMM"),
                ("%B", "MMMM"),
                ("%j", "DDD"),
            ],
        }
    }
}

impl Default for RewriteTables {
    fn default() -> Self {
        Self::presto_to_databricks()
    }
}

/// Apply the date-format pass, then every function rule in table order.
pub fn rewrite_functions(tables: &RewriteTables, text: &str) -> String {
    let mut sql = date_format::convert_date_formats(tables, text);
    for rule in &tables.functions {
        if !contains_ci(&sql, rule.from) {
            continue;
        }
        sql = apply_rule(rule, &sql);
    }
    sql
}

/// One whole-text sweep for a single rule.
fn apply_rule(rule: &FunctionRule, text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut cursor = Cursor::new(text);
    let mut copied = 0;
    while cursor.peek().is_some() {
        let pos = cursor.pos();
        if cursor.state() == QuoteState::Normal && is_keyword_at(bytes, pos, rule.from.as_bytes())
        {
            if let Some((replacement, end)) = apply_at(rule, text, pos) {
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

fn apply_at(rule: &FunctionRule, text: &str, pos: usize) -> Option<(String, usize)> {
    let bytes = text.as_bytes();
    let mut i = pos + rule.from.len();
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    if i >= bytes.len() || bytes[i] != b'(' {
        return None;
    }
    let open = i;
    if matches!(rule.rule, ArgRule::Rename) {
        // the scan continues inside the argument list
        return Some((format!("{}(", rule.to), open + 1));
    }
    let close = scan::matching_paren(text, open + 1)?;
    let interior = &text[open + 1..close];
    let end = close + 1;
    let replacement = match rule.rule {
        ArgRule::Rename => unreachable!("handled above"),
        ArgRule::PassThroughArgs => format!("{}({})", rule.to, interior),
        ArgRule::TrimmedArg => format!("{}({})", rule.to, interior.trim()),
        ArgRule::NoArgs => {
            if !interior.trim().is_empty() {
                return None;
            }
            format!("{}()", rule.to)
        }
        ArgRule::StripUnitQuotes => {
            let args = scan::split_args(interior);
            if args.len() != 3 {
                // wrong shape: emit the span untouched and skip past it
                return Some((text[pos..end].to_string(), end));
            }
            let unit = args[0].trim_matches(|c| c == '\'' || c == '"');
            format!("{}({}, {}, {})", rule.to, unit, args[1], args[2])
        }
        ArgRule::AppendArg(extra) => format!("{}({}, {})", rule.to, interior.trim(), extra),
    };
    Some((replacement, end))
}
