//! sql-dump-reorder: move a function definition below the tables it needs
//!
//! A PostgreSQL dump can define a `LANGUAGE sql` helper before the tables its
//! body selects from, which makes the dump fail to restore. This library
//! lifts that function out of the dump and reinserts it after the table
//! constraints, leaving every other line where it was.

pub mod dump;
pub mod error;
pub mod outline;
pub mod reorder;
pub mod util;

use std::path::PathBuf;

use anyhow::Result;

pub use error::ReorderError;
pub use reorder::{Relocation, RelocationRules};

use dump::LineSequence;
use outline::Section;

/// Dump read when no input path is given
pub const DEFAULT_INPUT_PATH: &str = "backups/goldpen_supabase.sql";
/// Dump written when no output path is given
pub const DEFAULT_OUTPUT_PATH: &str = "backups/supabase_ready.sql";

/// Options for reordering a dump
#[derive(Debug, Clone)]
pub struct ReorderOptions {
    /// Path to the SQL dump to read
    pub input_path: PathBuf,
    /// Path the rewritten dump is written to
    pub output_path: PathBuf,
    /// Markers locating the block and its new position
    pub rules: RelocationRules,
    /// Compute everything but skip writing the output
    pub dry_run: bool,
    /// Enable verbose output
    pub verbose: bool,
}

impl Default for ReorderOptions {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            rules: RelocationRules::default(),
            dry_run: false,
            verbose: false,
        }
    }
}

/// What a reorder run did
#[derive(Debug, Clone)]
pub struct ReorderSummary {
    pub output_path: PathBuf,
    /// Name of the relocated routine, when the block starts a function
    pub routine: Option<String>,
    pub relocation: Relocation,
    pub outline: Vec<Section>,
    pub written: bool,
}

impl ReorderSummary {
    pub fn total_lines(&self) -> usize {
        self.relocation.output.len()
    }

    /// Print the status report to stdout.
    pub fn print(&self) {
        let what = self
            .routine
            .as_deref()
            .map(|name| format!("{}() function", name))
            .unwrap_or_else(|| "block".to_string());
        let block = &self.relocation.block;
        let removed = &self.relocation.removed;

        println!("Found {} at lines {} to {}", what, block.start + 1, block.end);
        println!("Removing lines {} to {}", removed.start + 1, removed.end);
        println!("Inserting {} at line {}", what, self.relocation.insert_at + 1);
        println!();
        if self.written {
            println!("Fixed SQL file written to: {}", self.output_path.display());
        } else {
            println!("Dry run, not written: {}", self.output_path.display());
        }
        println!("Total lines: {}", self.total_lines());
        println!();
        outline::print_outline(&self.outline);
    }
}

/// Relocate the block in a dump file and write the result
pub fn reorder_dump(options: ReorderOptions) -> Result<ReorderSummary> {
    if options.verbose {
        println!("Reading SQL dump: {}", options.input_path.display());
    }

    // Step 1: Read the dump
    let input = LineSequence::read(&options.input_path)?;

    if options.verbose {
        println!("Read {} lines", input.len());
    }

    // Step 2: Move the block
    let relocation = reorder::relocate(&input, &options.rules)?;

    let routine = input
        .get(relocation.block.start)
        .and_then(outline::routine_name)
        .map(str::to_string);

    if options.verbose {
        let anchor_text = relocation
            .output
            .get(relocation.anchor_line)
            .map(str::trim_end)
            .unwrap_or_default();
        println!(
            "Anchor at line {}: {}",
            relocation.anchor_line + 1,
            anchor_text
        );
        println!(
            "Relocated block starts at output line {}",
            relocation.relocated_at + 1
        );
    }

    // Step 3: Write the result
    if !options.dry_run {
        relocation.output.write(&options.output_path)?;
    }

    let outline = outline::outline(relocation.output.lines(), Some(relocation.relocated_at));

    Ok(ReorderSummary {
        output_path: options.output_path,
        routine,
        relocation,
        outline,
        written: !options.dry_run,
    })
}
