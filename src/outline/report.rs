//! Human-readable outline printer

use super::{Section, StatementKind};

/// Render the outline as numbered lines, one per section.
pub fn render_outline(sections: &[Section]) -> Vec<String> {
    sections
        .iter()
        .enumerate()
        .map(|(i, section)| {
            let mut line = format!("{:>3}. {}", i + 1, section.kind);
            if section.kind == StatementKind::Relocated {
                line.push_str(" (NOW HERE - after tables exist)");
            }
            if !section.names.is_empty() {
                line.push_str(&format!(": {}", section.names.join(", ")));
            }
            line.push_str(&format!(
                " [line {}, {} statement{}]",
                section.first_line,
                section.count,
                if section.count == 1 { "" } else { "s" }
            ));
            line
        })
        .collect()
}

/// Print the outline to stdout.
pub fn print_outline(sections: &[Section]) {
    println!("Structure:");
    if sections.is_empty() {
        println!("  (no recognised statements)");
        return;
    }
    for line in render_outline(sections) {
        println!("{}", line);
    }
}
