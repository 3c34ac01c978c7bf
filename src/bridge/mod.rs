//! sqlparser bridge.
//!
//! The repaired and rewritten text round-trips through sqlparser-rs:
//! parse with the source dialect, apply one structural fix-up, print
//! for the target. Printing also retargets double-quoted identifiers
//! to backticks, since that is how Databricks quotes identifiers.

mod dialect;

pub use dialect::PrestoDialect;

use std::ops::ControlFlow;

use sqlparser::ast::{visit_expressions_mut, Expr, FunctionArguments, Statement};
use sqlparser::dialect::DatabricksDialect;
use sqlparser::parser::{Parser, ParserError};

use crate::scan;

/// Parse text in the source (Presto) dialect.
pub fn parse_source(sql: &str) -> Result<Vec<Statement>, ParserError> {
    Parser::parse_sql(&PrestoDialect::new(), sql)
}

/// Parse text in the target (Databricks) dialect.
pub fn parse_target(sql: &str) -> Result<Vec<Statement>, ParserError> {
    Parser::parse_sql(&DatabricksDialect {}, sql)
}

/// Patch calls of `function_name` that arrive with two arguments: the
/// first operand is cloned in as the missing replacement argument.
pub fn fix_regexp_nodes(statements: &mut [Statement], function_name: &str) {
    for statement in statements.iter_mut() {
        let _ = visit_expressions_mut(statement, |expr| {
            if let Expr::Function(func) = expr {
                if func.name.to_string().eq_ignore_ascii_case(function_name) {
                    if let FunctionArguments::List(arg_list) = &mut func.args {
                        if arg_list.args.len() == 2 {
                            let subject = arg_list.args[0].clone();
                            arg_list.args.push(subject);
                        }
                    }
                }
            }
            ControlFlow::<()>::Continue(())
        });
    }
}

/// Render statements as target-dialect SQL, one per line, separated by
/// `;`. Double-quoted identifiers come out backtick-quoted.
pub fn print_statements(statements: &[Statement]) -> String {
    let rendered = statements
        .iter()
        .map(|statement| statement.to_string())
        .collect::<Vec<_>>()
        .join(";\n");
    retarget_quoted_identifiers(&rendered)
}

/// Rewrite every double-quoted run in printed SQL as a backtick
/// identifier. The printer emits strings single-quoted, so a
/// double-quoted run here is always an identifier.
fn retarget_quoted_identifiers(sql: &str) -> String {
    let bytes = sql.as_bytes();
    let mut out = String::with_capacity(sql.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'`' => i = scan::quoted_run_end(sql, i, bytes[i]),
            b'"' => match scan::scan_quoted(sql, i, b'"') {
                Some((ident, end)) => {
                    out.push_str(&sql[copied..i]);
                    out.push('`');
                    out.push_str(&ident.replace('`', "``"));
                    out.push('`');
                    copied = end;
                    i = end;
                }
                None => i += 1,
            },
            _ => i += 1,
        }
    }
    out.push_str(&sql[copied..]);
    out
}
