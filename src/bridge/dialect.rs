//! Source dialect for sqlparser-rs
//!
//! Presto/Trino input is parsed with a custom dialect that wraps
//! GenericDialect. The generic dialect already accepts the constructs
//! the repair pipeline emits (backtick identifiers, two-argument TRIM,
//! lambda arrows), so this wrapper delegates everything to it while
//! keeping a single place to hang Presto-specific parsing behavior.

use std::any::TypeId;

use sqlparser::dialect::{Dialect, GenericDialect};

/// Presto/Trino source dialect.
///
/// # Example
///
/// ```
/// use sqlparser::parser::Parser;
/// use presto2dbsql::bridge::PrestoDialect;
///
/// let dialect = PrestoDialect::new();
/// let statements = Parser::parse_sql(&dialect, "SELECT 1").unwrap();
/// assert_eq!(statements.len(), 1);
/// ```
#[derive(Debug)]
pub struct PrestoDialect {
    /// The base GenericDialect to delegate to
    base: GenericDialect,
}

impl Default for PrestoDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl PrestoDialect {
    /// Create a new PrestoDialect instance
    pub fn new() -> Self {
        Self {
            base: GenericDialect {},
        }
    }
}

impl Dialect for PrestoDialect {
    // ==========================================================================
    // Dialect identity - report as GenericDialect for dialect_of!() checks
    //
    // sqlparser uses dialect_of!(self is GenericDialect) checks internally to
    // enable parsing such as the two-argument TRIM(expr, 'chars') form the
    // repair pipeline emits. Returning GenericDialect's TypeId makes this
    // dialect pass those checks.
    // ==========================================================================

    fn dialect(&self) -> TypeId {
        TypeId::of::<GenericDialect>()
    }

    // ==========================================================================
    // Required identifier methods - delegate to GenericDialect
    // ==========================================================================

    fn is_identifier_start(&self, ch: char) -> bool {
        self.base.is_identifier_start(ch)
    }

    fn is_identifier_part(&self, ch: char) -> bool {
        self.base.is_identifier_part(ch)
    }

    // ==========================================================================
    // Delimited identifier handling - delegate to GenericDialect
    // ==========================================================================

    fn is_delimited_identifier_start(&self, ch: char) -> bool {
        self.base.is_delimited_identifier_start(ch)
    }

    // ==========================================================================
    // Feature flags - delegate all to GenericDialect
    // ==========================================================================

    fn convert_type_before_value(&self) -> bool {
        self.base.convert_type_before_value()
    }

    fn supports_connect_by(&self) -> bool {
        self.base.supports_connect_by()
    }

    fn supports_eq_alias_assignment(&self) -> bool {
        self.base.supports_eq_alias_assignment()
    }

    fn supports_try_convert(&self) -> bool {
        self.base.supports_try_convert()
    }

    fn supports_boolean_literals(&self) -> bool {
        self.base.supports_boolean_literals()
    }

    fn supports_methods(&self) -> bool {
        self.base.supports_methods()
    }

    fn supports_named_fn_args_with_colon_operator(&self) -> bool {
        self.base.supports_named_fn_args_with_colon_operator()
    }

    fn supports_named_fn_args_with_expr_name(&self) -> bool {
        self.base.supports_named_fn_args_with_expr_name()
    }

    fn supports_named_fn_args_with_rarrow_operator(&self) -> bool {
        self.base.supports_named_fn_args_with_rarrow_operator()
    }

    fn supports_start_transaction_modifier(&self) -> bool {
        self.base.supports_start_transaction_modifier()
    }

    fn supports_end_transaction_modifier(&self) -> bool {
        self.base.supports_end_transaction_modifier()
    }

    fn supports_set_stmt_without_operator(&self) -> bool {
        self.base.supports_set_stmt_without_operator()
    }

    fn supports_timestamp_versioning(&self) -> bool {
        self.base.supports_timestamp_versioning()
    }
}
