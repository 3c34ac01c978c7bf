use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use presto2dbsql::{convert_file, AliasPolicy, ConverterOptions, QuoteComparison, RepairConfig};

#[derive(Parser)]
#[command(name = "presto2dbsql")]
#[command(author, version, about = "Convert Presto/Trino SQL files into Databricks SQL")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a SQL file into converted/compatible/errors outputs
    Convert {
        /// Path to the input SQL file
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for the output files (defaults to the input's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Process statements sequentially even for large batches
        #[arg(long)]
        sequential: bool,

        /// Compare quoted identifiers as a name set instead of per-style
        #[arg(long)]
        quote_sets: bool,

        /// Collapse double-quoted aliases to bare identifiers
        #[arg(long)]
        force_bare_aliases: bool,

        /// Replace path separators inside quoted identifiers with underscores
        #[arg(long)]
        sanitize_identifiers: bool,

        /// Keep whitespace between a qualifier dot and a quoted identifier
        #[arg(long)]
        keep_qualified_quote_space: bool,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output_dir,
            sequential,
            quote_sets,
            force_bare_aliases,
            sanitize_identifiers,
            keep_qualified_quote_space,
            verbose,
        } => {
            let mut repair = RepairConfig::new();
            if force_bare_aliases {
                repair.alias_policy = AliasPolicy::ForceBare;
            }
            repair.sanitize_ident_separators = sanitize_identifiers;
            repair.collapse_qualified_quote = !keep_qualified_quote_space;

            let options = ConverterOptions {
                repair,
                quote_comparison: if quote_sets {
                    QuoteComparison::IdentifierSet
                } else {
                    QuoteComparison::StyleMap
                },
                sequential,
                verbose,
                ..Default::default()
            };

            let out_dir = output_dir
                .unwrap_or_else(|| input.parent().unwrap_or(Path::new(".")).to_path_buf());

            let summary = convert_file(&options, &input, &out_dir)?;

            println!(
                "Converted: {}, compatible: {}, errors: {}",
                summary.converted, summary.compatible, summary.errors
            );
            println!("Output written to: {}", out_dir.display());
        }
    }

    Ok(())
}
