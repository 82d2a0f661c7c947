//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Found 3 publications
//! Deleted 2009-10-01-paper-title-number-1.html
//! Created 2023-01-a-study-of-gf2-codes.html: A Study of GF(2) Codes
//! Created 2021-06-iterative-decoding-on-graphs.html: Iterative Decoding on Graphs
//! Created 2016-01-algebraic-structures-for-network-coding.html: Algebraic Structures for Network Coding
//! Generated publications index at docs/publications/index.html
//! Generated 3 publication files in docs/publication
//! ```
//!
//! ## Check
//!
//! ```text
//! Publications
//! 001 A Study of GF(2) Codes
//!     File: 2023-01-a-study-of-gf2-codes.html
//!     Type: article (carraro2023)
//!
//! Groups
//!     Journal Articles: 1
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::BuildEvent;
use crate::naming;
use crate::types::{PublicationKind, Record};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn publications(count: usize) -> String {
    match count {
        1 => "1 publication".to_string(),
        n => format!("{n} publications"),
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format a single build progress event as display lines.
pub fn format_build_event(event: &BuildEvent) -> Vec<String> {
    match event {
        BuildEvent::Parsed { count } => vec![format!("Found {}", publications(*count))],
        BuildEvent::LegacyDeleted { filename } => vec![format!("Deleted {filename}")],
        BuildEvent::PageWritten { filename, title } => vec![format!("Created {filename}: {title}")],
        BuildEvent::IndexWritten { path } => {
            vec![format!("Generated publications index at {}", path.display())]
        }
        BuildEvent::Finished { count, output_dir } => {
            let files = if *count == 1 { "file" } else { "files" };
            vec![format!(
                "Generated {count} publication {files} in {}",
                output_dir.display()
            )]
        }
    }
}

/// Print a build event to stdout.
pub fn print_build_event(event: &BuildEvent) {
    for line in format_build_event(event) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the parsed bibliography: one entry per record, then group counts.
pub fn format_check_output(records: &[Record]) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Publications".to_string());
    for (i, record) in records.iter().enumerate() {
        let title = record.non_empty("title").unwrap_or("Untitled");
        lines.push(format!("{} {}", format_index(i + 1), title));
        lines.push(format!("    File: {}", naming::detail_filename(record)));
        lines.push(format!("    Type: {} ({})", record.entry_type, record.key));
    }

    let counts: Vec<(PublicationKind, usize)> = PublicationKind::DISPLAY_ORDER
        .iter()
        .map(|&kind| {
            let n = records
                .iter()
                .filter(|r| PublicationKind::from_entry_type(&r.entry_type) == kind)
                .count();
            (kind, n)
        })
        .filter(|(_, n)| *n > 0)
        .collect();

    if !counts.is_empty() {
        lines.push(String::new());
        lines.push("Groups".to_string());
        for (kind, n) in counts {
            lines.push(format!("    {}: {}", kind.heading(), n));
        }
    }

    lines
}

/// Print check output to stdout.
pub fn print_check_output(records: &[Record]) {
    for line in format_check_output(records) {
        println!("{}", line);
    }
}
