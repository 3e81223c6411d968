//! Statement-level outline of a dump
//!
//! Gives a coarse picture of statement order after a relocation: which kinds
//! of statements appear and where each run starts. Classification looks only
//! at the leading keywords of each statement.

mod report;

pub use report::{print_outline, render_outline};

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::util::{is_blank, is_line_comment};

static ENUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*CREATE\s+TYPE\s+\S+\s+AS\s+ENUM\b").unwrap());
static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*CREATE\s+(?:OR\s+REPLACE\s+)?FUNCTION\s+([^\s(]+)").unwrap()
});
static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*CREATE\s+(?:(?:UNLOGGED|TEMP|TEMPORARY)\s+)?TABLE\b").unwrap()
});
static INSERT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*INSERT\s+INTO\b").unwrap());
static TRIGGER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*CREATE\s+(?:OR\s+REPLACE\s+)?(?:CONSTRAINT\s+)?TRIGGER\b").unwrap()
});
static POLICY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*CREATE\s+POLICY\b").unwrap());
static ALTER_TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*ALTER\s+TABLE\b").unwrap());
static FOREIGN_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bFOREIGN\s+KEY\b").unwrap());
static ENABLE_RLS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bENABLE\s+ROW\s+LEVEL\s+SECURITY\b").unwrap());
static ADD_CONSTRAINT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bADD\s+CONSTRAINT\b").unwrap());
// Dollar-quote delimiter: `$$` or `$tag$` (tags never start with a digit)
static DOLLAR_QUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(?:[A-Za-z_]\w*)?\$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    EnumType,
    Function,
    Table,
    Insert,
    Constraint,
    Relocated,
    Trigger,
    ForeignKey,
    Policy,
    RowLevelSecurity,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StatementKind::EnumType => "ENUM types",
            StatementKind::Function => "functions",
            StatementKind::Table => "CREATE TABLE statements",
            StatementKind::Insert => "INSERT statements",
            StatementKind::Constraint => "ALTER TABLE constraints",
            StatementKind::Relocated => "relocated function",
            StatementKind::Trigger => "CREATE TRIGGER statements",
            StatementKind::ForeignKey => "ALTER TABLE foreign keys",
            StatementKind::Policy => "CREATE POLICY statements",
            StatementKind::RowLevelSecurity => "ENABLE RLS",
        };
        f.write_str(label)
    }
}

/// A run of consecutive statements of one kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: StatementKind,
    /// 1-based line of the first statement in the run
    pub first_line: usize,
    pub count: usize,
    /// Routine names, for function sections
    pub names: Vec<String>,
}

/// Name of the routine created on `line`, if it starts a function definition
pub fn routine_name(line: &str) -> Option<&str> {
    FUNCTION_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Index of the last line of the statement starting at `start`.
///
/// The statement ends at the first line ending in `;` outside a
/// dollar-quoted body.
fn statement_end(lines: &[String], start: usize) -> usize {
    let mut in_dollar_quote = false;

    for (offset, line) in lines[start..].iter().enumerate() {
        if DOLLAR_QUOTE_RE.find_iter(line).count() % 2 == 1 {
            in_dollar_quote = !in_dollar_quote;
        }
        if !in_dollar_quote && line.trim_end().ends_with(';') {
            return start + offset;
        }
    }

    lines.len().saturating_sub(1)
}

fn classify(statement: &[String]) -> Option<StatementKind> {
    let head = statement.first()?;

    if ENUM_RE.is_match(head) {
        Some(StatementKind::EnumType)
    } else if FUNCTION_RE.is_match(head) {
        Some(StatementKind::Function)
    } else if TABLE_RE.is_match(head) {
        Some(StatementKind::Table)
    } else if INSERT_RE.is_match(head) {
        Some(StatementKind::Insert)
    } else if TRIGGER_RE.is_match(head) {
        Some(StatementKind::Trigger)
    } else if POLICY_RE.is_match(head) {
        Some(StatementKind::Policy)
    } else if ALTER_TABLE_RE.is_match(head) {
        let text = statement.concat();
        if FOREIGN_KEY_RE.is_match(&text) {
            Some(StatementKind::ForeignKey)
        } else if ENABLE_RLS_RE.is_match(&text) {
            Some(StatementKind::RowLevelSecurity)
        } else if ADD_CONSTRAINT_RE.is_match(&text) {
            Some(StatementKind::Constraint)
        } else {
            None
        }
    } else {
        None
    }
}

/// Group the statements of a dump into runs of the same kind.
///
/// The statement starting at `relocated_at` (a 0-based line index) is
/// reported as [`StatementKind::Relocated`]. Statements of no tracked kind
/// (`SET`, `COMMENT ON`, `GRANT`, ...) are skipped without breaking a run.
pub fn outline(lines: &[String], relocated_at: Option<usize>) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];
        if is_blank(line) || is_line_comment(line) {
            i += 1;
            continue;
        }

        let end = statement_end(lines, i);
        let kind = if relocated_at == Some(i) {
            Some(StatementKind::Relocated)
        } else {
            classify(&lines[i..=end])
        };

        if let Some(kind) = kind {
            let name = routine_name(line).map(str::to_string);
            match sections.last_mut() {
                Some(section) if section.kind == kind => {
                    section.count += 1;
                    section.names.extend(name);
                }
                _ => sections.push(Section {
                    kind,
                    first_line: i + 1,
                    count: 1,
                    names: name.into_iter().collect(),
                }),
            }
        }

        i = end + 1;
    }

    sections
}
