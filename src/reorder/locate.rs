//! Marker search over dump lines
//!
//! Markers are plain substrings. Nothing here understands SQL: a marker
//! inside a string literal or a comment matches just like one in a statement.

use anyhow::Result;

use crate::error::ReorderError;
use crate::util::{contains_ci, is_blank};

/// How a marker is compared against a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerMatch {
    pub case_sensitive: bool,
}

impl Default for MarkerMatch {
    fn default() -> Self {
        Self {
            case_sensitive: true,
        }
    }
}

impl MarkerMatch {
    #[inline]
    pub fn matches(&self, line: &str, marker: &str) -> bool {
        if self.case_sensitive {
            line.contains(marker)
        } else {
            contains_ci(line, marker)
        }
    }
}

/// Half-open range of line indices covering one block, end-marker line included
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    pub start: usize,
    pub end: usize,
}

impl BlockSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Where the block goes back in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    /// Index of the line holding the anchor marker
    pub line: usize,
    /// Index the block is inserted before
    pub insert_at: usize,
}

/// Find the block delimited by `start_marker` and `end_marker`.
///
/// Each line containing the start marker moves the start forward, so with
/// repeated start markers the block begins at the last one seen before the
/// end marker. The end marker only counts on a line after the start line.
pub fn find_block(
    lines: &[String],
    start_marker: &str,
    end_marker: &str,
    matcher: MarkerMatch,
) -> Result<BlockSpan> {
    let mut start = None;

    for (i, line) in lines.iter().enumerate() {
        if matcher.matches(line, start_marker) {
            start = Some(i);
        }
        if let Some(s) = start {
            if i > s && matcher.matches(line, end_marker) {
                return Ok(BlockSpan { start: s, end: i + 1 });
            }
        }
    }

    match start {
        None => Err(ReorderError::MarkerNotFound {
            marker: start_marker.to_string(),
        }
        .into()),
        Some(s) => Err(ReorderError::UnterminatedBlock {
            start_line: s + 1,
            end_marker: end_marker.to_string(),
        }
        .into()),
    }
}

/// Find the insertion point after the anchor statement.
///
/// The anchor is the first line containing `anchor` whose next line contains
/// `follow`. The rest of that statement is skipped up to the next blank line,
/// and the insertion point is just past that blank line (or the end of input).
pub fn find_anchor(
    lines: &[String],
    anchor: &str,
    follow: &str,
    matcher: MarkerMatch,
) -> Result<Anchor> {
    let found = lines
        .windows(2)
        .position(|pair| matcher.matches(&pair[0], anchor) && matcher.matches(&pair[1], follow));

    let Some(line) = found else {
        return Err(ReorderError::AnchorNotFound {
            anchor: anchor.to_string(),
            follow: follow.to_string(),
        }
        .into());
    };

    let mut j = line + 2;
    while j < lines.len() && !is_blank(&lines[j]) {
        j += 1;
    }

    Ok(Anchor {
        line,
        insert_at: (j + 1).min(lines.len()),
    })
}

/// Index of the first line containing `marker`
pub fn find_first(lines: &[String], marker: &str, matcher: MarkerMatch) -> Option<usize> {
    lines.iter().position(|line| matcher.matches(line, marker))
}
