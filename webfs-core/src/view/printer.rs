//! src/view/printer.rs
//! ============================================================================
//! # Printer: Plain-Text Listing Rendering
//!
//! Breadcrumb and listing table for the line-oriented driver. Writes to any
//! `io::Write` so the output is capturable in tests.

use std::io::{self, Write};

use crate::model::path_stack::PathStack;
use crate::remote::entry::FileEntry;

/// Breadcrumb line with the index each crumb answers to in a `nav` command.
pub fn breadcrumb(path: &PathStack) -> String {
    path.segments()
        .iter()
        .enumerate()
        .map(|(index, segment)| format!("[{index}] {segment}"))
        .collect::<Vec<_>>()
        .join(" / ")
}

pub fn render<W: Write>(out: &mut W, path: &PathStack, entries: &[FileEntry]) -> io::Result<()> {
    writeln!(out, "{}", breadcrumb(path))?;
    if entries.is_empty() {
        writeln!(out, "  (empty)")?;
        return Ok(());
    }
    for entry in entries {
        let marker = if entry.is_dir { "d" } else { "-" };
        writeln!(
            out,
            "  {marker} {:<32} {:>10}  {}",
            entry.name,
            entry.size_human(),
            entry.modified_human()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breadcrumb_indices_follow_the_stack() {
        let mut path = PathStack::new();
        path.push("docs");
        assert_eq!(breadcrumb(&path), "[0] . / [1] docs");
    }

    #[test]
    fn render_lists_entries_with_markers() {
        let mut out: Vec<u8> = Vec::new();
        let mut entry = FileEntry::file("a.txt");
        entry.size = Some(512);
        render(&mut out, &PathStack::new(), &[FileEntry::dir("docs"), entry]).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "[0] .");
        assert!(lines[1].starts_with("  d docs"));
        assert!(lines[2].starts_with("  - a.txt"));
        assert!(lines[2].contains("512 B"));
    }

    #[test]
    fn empty_listing_is_marked() {
        let mut out: Vec<u8> = Vec::new();
        render(&mut out, &PathStack::new(), &[]).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("(empty)"));
    }
}
