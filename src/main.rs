use anyhow::Result;
use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use sql_dump_reorder::reorder::MarkerMatch;
use sql_dump_reorder::{
    reorder_dump, ReorderOptions, RelocationRules, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH,
};

#[derive(Parser)]
#[command(name = "sql-dump-reorder")]
#[command(
    author,
    version,
    about = "Move a function definition below the tables it depends on in a SQL dump"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Relocate a function block after the table constraints
    Reorder {
        /// Path to the SQL dump to read
        #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
        input: PathBuf,

        /// Path for the rewritten SQL dump
        #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
        output: PathBuf,

        /// Text on the first line of the block to move
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        start_marker: Option<String>,

        /// Text on the last line of the block to move
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        end_marker: Option<String>,

        /// Text on the statement the block is moved after
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        anchor: Option<String>,

        /// Text required on the line right after the anchor
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        anchor_follow: Option<String>,

        /// Statement the moved block must still precede
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        guard: Option<String>,

        /// Skip the guard check
        #[arg(long, conflicts_with = "guard")]
        no_guard: bool,

        /// Comment line written above the moved block (repeatable, replaces the defaults)
        #[arg(long = "comment")]
        comments: Vec<String>,

        /// Match markers case-insensitively
        #[arg(long)]
        ignore_case: bool,

        /// Report what would change without writing the output
        #[arg(long)]
        dry_run: bool,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Reorder {
            input,
            output,
            start_marker,
            end_marker,
            anchor,
            anchor_follow,
            guard,
            no_guard,
            comments,
            ignore_case,
            dry_run,
            verbose,
        } => {
            let defaults = RelocationRules::default();
            let rules = RelocationRules {
                block_start: start_marker.unwrap_or(defaults.block_start),
                block_end: end_marker.unwrap_or(defaults.block_end),
                anchor: anchor.unwrap_or(defaults.anchor),
                anchor_follow: anchor_follow.unwrap_or(defaults.anchor_follow),
                guard: if no_guard { None } else { guard.or(defaults.guard) },
                comments: if comments.is_empty() {
                    defaults.comments
                } else {
                    comments
                },
                matcher: MarkerMatch {
                    case_sensitive: !ignore_case,
                },
            };

            let options = ReorderOptions {
                input_path: input,
                output_path: output,
                rules,
                dry_run,
                verbose,
            };

            let summary = reorder_dump(options)?;
            summary.print();
        }
    }

    Ok(())
}
