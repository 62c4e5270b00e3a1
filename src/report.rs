//! Comparison Reports
//!
//! Flat text and JSON renderings of a [`Comparison`] for the command line.

use crate::compare::{Comparison, DiffTree};
use crate::scan::DirectoryIndex;
use chrono::Utc;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::{self, Write};

/// Rendering switches for the text report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Dump every leaf path and fingerprint before the diff
    pub debug: bool,
    /// Append a summary table
    pub summary: bool,
    /// Colour section headers
    pub color: bool,
}

/// Write the "Only in" sections, optionally preceded by debug dumps
pub fn write_text_report<W: Write>(
    out: &mut W,
    comparison: &Comparison,
    options: &ReportOptions,
) -> io::Result<()> {
    let label_a = comparison.index_a.root_path().display().to_string();
    let label_b = comparison.index_b.root_path().display().to_string();

    if options.debug {
        write_header(out, &format!("Debug for {}", label_a), options.color)?;
        write_debug_dump(out, &comparison.index_a)?;
        write_header(out, &format!("Debug for {}", label_b), options.color)?;
        write_debug_dump(out, &comparison.index_b)?;
    }

    write_header(out, &format!("Only in {}", label_a), options.color)?;
    write_paths(out, &comparison.only_in_a)?;
    write_header(out, &format!("Only in {}", label_b), options.color)?;
    write_paths(out, &comparison.only_in_b)?;

    if options.summary {
        writeln!(out, "{}", summary_table(comparison))?;
    }
    Ok(())
}

/// Every leaf of `index` as `path fingerprint`, ordered by path
pub fn write_debug_dump<W: Write>(out: &mut W, index: &DirectoryIndex) -> io::Result<()> {
    for (path, fingerprint) in index.leaves() {
        writeln!(out, "{} {}", path, fingerprint.to_hex())?;
    }
    Ok(())
}

fn write_paths<W: Write>(out: &mut W, diff: &DiffTree) -> io::Result<()> {
    for path in diff.leaf_paths() {
        writeln!(out, "{}", path)?;
    }
    Ok(())
}

fn write_header<W: Write>(out: &mut W, title: &str, color: bool) -> io::Result<()> {
    let line = format!("========== {} ==========", title);
    if color {
        writeln!(out, "{}", line.bold().yellow())
    } else {
        writeln!(out, "{}", line)
    }
}

/// Leaf and unmatched counts per root
pub fn summary_table(comparison: &Comparison) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Root", "Leaves", "Unmatched"]);
    for (index, diff) in [
        (&comparison.index_a, &comparison.only_in_a),
        (&comparison.index_b, &comparison.only_in_b),
    ] {
        table.add_row(vec![
            index.root_path().display().to_string(),
            index.leaf_count().to_string(),
            diff.leaf_count().to_string(),
        ]);
    }
    table
}

/// Serializable form of a comparison
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub generated_at: String,
    pub root_a: String,
    pub root_b: String,
    pub leaves_a: usize,
    pub leaves_b: usize,
    pub only_in_a: Vec<String>,
    pub only_in_b: Vec<String>,
}

impl JsonReport {
    pub fn from_comparison(comparison: &Comparison) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            root_a: comparison.index_a.root_path().display().to_string(),
            root_b: comparison.index_b.root_path().display().to_string(),
            leaves_a: comparison.index_a.leaf_count(),
            leaves_b: comparison.index_b.leaf_count(),
            only_in_a: comparison.only_in_a.leaf_paths(),
            only_in_b: comparison.only_in_b.leaf_paths(),
        }
    }
}

/// Write the comparison as pretty JSON
pub fn write_json_report<W: Write>(out: &mut W, comparison: &Comparison) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &JsonReport::from_comparison(comparison))?;
    writeln!(out)
}
