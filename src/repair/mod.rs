//! Lexical repair pipeline.
//!
//! Raw statement blobs from logs and exports arrive wrapped in
//! PREPARE/EXECUTE scaffolding, with doubled-up quote escaping, broken
//! aliases and half-finished argument lists. The repair pipeline is an
//! ordered list of text-to-text passes that make such blobs parseable
//! before any dialect rewriting happens. Pass order matters: unwrapping
//! runs first so later passes see the inner statement, and quote
//! balancing runs last so it sees every edit.

mod alias;
mod arity;
mod literal;
mod trim;
mod wrapper;

use regex::Regex;

pub use arity::repair_trailing_mistakes;
pub use literal::{balance_single_quotes, normalize_identifiers};

/// Policy for double-quoted alias text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AliasPolicy {
    /// `AS "Some Name"` keeps its text and becomes a backtick identifier
    #[default]
    PreserveQuoted,
    /// `AS "Some Name"` is collapsed to a bare identifier, the same way
    /// single-quoted aliases are
    ForceBare,
}

/// Tunables and precompiled patterns shared by the repair passes.
#[derive(Debug, Clone)]
pub struct RepairConfig {
    pub alias_policy: AliasPolicy,
    /// Collapse whitespace between a qualifier dot and a quoted
    /// identifier (`t. "col"` -> `t."col"`)
    pub collapse_qualified_quote: bool,
    /// Replace path separators inside quoted identifiers with `_`
    pub sanitize_ident_separators: bool,
    /// Function whose two-argument calls receive an empty replacement
    /// argument
    pub regexp_function: String,
    pub(crate) prepare_re: Regex,
    pub(crate) two_arg_re: Regex,
    pub(crate) trailing_comma_re: Regex,
    pub(crate) doubled_empty_re: Regex,
    pub(crate) qualified_quote_re: Regex,
}

impl RepairConfig {
    pub fn new() -> Self {
        Self::with_regexp_function("REGEXP_REPLACE")
    }

    /// Build a config whose arity repair targets `function_name`
    /// instead of REGEXP_REPLACE.
    pub fn with_regexp_function(function_name: &str) -> Self {
        let two_arg_pattern = format!(
            r"(?i)({})\(\s*([^),]+?)\s*,\s*('(?:[^']|''|\\')*')\s*\)",
            regex::escape(function_name)
        );
        Self {
            alias_policy: AliasPolicy::default(),
            collapse_qualified_quote: true,
            sanitize_ident_separators: false,
            regexp_function: function_name.to_string(),
            prepare_re: Regex::new(r"(?i)\bPREPARE\s+\w+\s+FROM\s+")
                .expect("Invalid PREPARE pattern"),
            two_arg_re: Regex::new(&two_arg_pattern).expect("Invalid arity repair pattern"),
            trailing_comma_re: Regex::new(r",\s*\)").expect("Invalid trailing comma pattern"),
            doubled_empty_re: Regex::new(&regex::escape(", '') )"))
                .expect("Invalid doubled empty pattern"),
            qualified_quote_re: Regex::new(r#"(\w+)\.\s+""#)
                .expect("Invalid qualified quote pattern"),
        }
    }
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One repair pass: a name for verbose output and the pass function.
#[derive(Debug, Clone, Copy)]
pub struct Pass {
    pub name: &'static str,
    pub run: fn(&RepairConfig, &str) -> String,
}

/// The ordered repair passes with their shared configuration.
#[derive(Debug, Clone)]
pub struct RepairPipeline {
    config: RepairConfig,
    passes: Vec<Pass>,
}

impl RepairPipeline {
    pub fn new(config: RepairConfig) -> Self {
        let passes = vec![
            Pass {
                name: "unwrap-embedded",
                run: wrapper::unwrap_embedded,
            },
            Pass {
                name: "unescape-literals",
                run: literal::unescape_literals,
            },
            Pass {
                name: "normalize-identifiers",
                run: literal::normalize_identifiers,
            },
            Pass {
                name: "force-aliases",
                run: alias::force_aliases,
            },
            Pass {
                name: "repair-regexp-arity",
                run: arity::repair_regexp_arity,
            },
            Pass {
                name: "convert-trim",
                run: trim::convert_trim_syntax,
            },
            Pass {
                name: "repair-trailing",
                run: arity::repair_trailing_mistakes,
            },
            Pass {
                name: "balance-quotes",
                run: literal::balance_single_quotes,
            },
        ];
        Self { config, passes }
    }

    /// Run every pass in order over `text`.
    pub fn run(&self, text: &str) -> String {
        let mut current = text.to_string();
        for pass in &self.passes {
            current = (pass.run)(&self.config, &current);
        }
        current
    }

    pub fn config(&self) -> &RepairConfig {
        &self.config
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }
}

impl Default for RepairPipeline {
    fn default() -> Self {
        Self::new(RepairConfig::new())
    }
}
