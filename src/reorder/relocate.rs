//! Block removal and splice

use std::ops::Range;

use anyhow::Result;

use super::locate::{find_anchor, find_block, find_first, BlockSpan};
use super::RelocationRules;
use crate::dump::LineSequence;
use crate::error::ReorderError;
use crate::util::{is_blank, is_line_comment};

/// Blank lines after the block that are removed along with it
const TRAILING_BLANKS: usize = 2;

/// Outcome of a relocation. All positions are 0-based line indices.
#[derive(Debug, Clone)]
pub struct Relocation {
    pub output: LineSequence,
    /// Block position in the input
    pub block: BlockSpan,
    /// Lines removed from the input (block plus its comment and blank lines)
    pub removed: Range<usize>,
    /// Anchor line in the sequence left after removal
    pub anchor_line: usize,
    /// Insertion point in the sequence left after removal
    pub insert_at: usize,
    /// Where the block's first line sits in the output
    pub relocated_at: usize,
}

/// Widen a block span to the lines that go with it.
///
/// A `--` comment directly above the block is taken along. Up to two blank
/// lines directly below are dropped; anything else is left in place.
pub fn plan_removal(lines: &[String], block: &BlockSpan) -> Range<usize> {
    let start = match block.start.checked_sub(1) {
        Some(above) if is_line_comment(&lines[above]) => above,
        _ => block.start,
    };

    let mut end = block.end;
    while end < lines.len() && end - block.end < TRAILING_BLANKS && is_blank(&lines[end]) {
        end += 1;
    }

    start..end
}

fn terminate(line: &mut String) {
    if !line.ends_with('\n') {
        line.push('\n');
    }
}

fn comment_line(text: &str) -> String {
    let text = text.trim_end_matches(['\r', '\n']);
    if is_line_comment(text) {
        format!("{}\n", text)
    } else {
        format!("-- {}\n", text)
    }
}

/// Lift the block out of `input` and reinsert it after the anchor.
///
/// Nothing is written; the caller decides what to do with the output.
pub fn relocate(input: &LineSequence, rules: &RelocationRules) -> Result<Relocation> {
    let lines = input.lines();

    let block = find_block(lines, &rules.block_start, &rules.block_end, rules.matcher)?;
    let removed = plan_removal(lines, &block);

    let mut remaining: Vec<String> = Vec::with_capacity(lines.len());
    remaining.extend_from_slice(&lines[..removed.start]);
    remaining.extend_from_slice(&lines[removed.end..]);

    let anchor = find_anchor(&remaining, &rules.anchor, &rules.anchor_follow, rules.matcher)?;

    if let Some(guard) = rules.guard.as_deref().filter(|g| !g.is_empty()) {
        if let Some(guard_line) = find_first(&remaining[..anchor.insert_at], guard, rules.matcher) {
            return Err(ReorderError::GuardViolation {
                guard: guard.to_string(),
                guard_line: guard_line + 1,
                insert_line: anchor.insert_at + 1,
            }
            .into());
        }
    }

    let mut output: Vec<String> =
        Vec::with_capacity(remaining.len() + block.len() + rules.comments.len() + 3);
    output.extend_from_slice(&remaining[..anchor.insert_at]);
    if let Some(last) = output.last_mut() {
        terminate(last);
    }

    output.push("\n".to_string());
    output.extend(rules.comments.iter().map(|c| comment_line(c)));

    let relocated_at = output.len();
    output.extend_from_slice(&lines[block.start..block.end]);
    if let Some(last) = output.last_mut() {
        terminate(last);
    }
    output.push("\n".to_string());
    output.push("\n".to_string());

    output.extend_from_slice(&remaining[anchor.insert_at..]);

    Ok(Relocation {
        output: LineSequence::from_lines(output),
        block,
        removed,
        anchor_line: anchor.line,
        insert_at: anchor.insert_at,
        relocated_at,
    })
}
