//! Error types for sql-dump-reorder

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while relocating a block in a SQL dump
#[derive(Error, Debug)]
pub enum ReorderError {
    #[error("Failed to read SQL dump: {path}")]
    InputReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("SQL dump is neither UTF-8 nor Windows-1252: {path}")]
    InputDecodeError { path: PathBuf },

    #[error("Failed to write SQL dump to {path}")]
    OutputWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Block start marker not found: {marker:?}")]
    MarkerNotFound { marker: String },

    #[error("Block starting at line {start_line} has no end marker {end_marker:?} after it")]
    UnterminatedBlock {
        start_line: usize,
        end_marker: String,
    },

    #[error("Insertion anchor not found: a line containing {anchor:?} followed by a line containing {follow:?}")]
    AnchorNotFound { anchor: String, follow: String },

    #[error("Insertion point (line {insert_line}) falls after {guard:?} at line {guard_line}")]
    GuardViolation {
        guard: String,
        guard_line: usize,
        insert_line: usize,
    },
}
