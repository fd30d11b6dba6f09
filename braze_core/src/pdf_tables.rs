//! # PDF Table Extraction
//!
//! Best-effort recovery of tabular blocks and footnotes from the text layer of
//! a local reference PDF. Text comes from `pdf-extract`; a table is a run of
//! consecutive lines that each split into two or more columns on wide
//! whitespace. A missing, encrypted or malformed PDF yields empty results.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::documents::ReferenceDocument;
use crate::errors::{GuideError, GuideResult};
use crate::settings::GuideSettings;

/// Separator placed between cells of a recovered row
pub const CELL_SEPARATOR: &str = " | ";

const FOOTNOTE_PREFIXES: [&str; 3] = ["*", "Note", "NOTE"];

/// Tables and footnotes recovered from one document.
///
/// Each table is a list of rows; each row is its cells joined with
/// [`CELL_SEPARATOR`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedTables {
    pub tables: Vec<Vec<String>>,
    pub footnotes: Vec<String>,
}

impl ExtractedTables {
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.footnotes.is_empty()
    }
}

/// Extract tables from the PDF at `path`, degrading to empty on any failure.
pub fn extract_tables(path: &Path, min_rows: usize) -> ExtractedTables {
    match try_extract_text(path) {
        Ok(text) => parse_text(&text, min_rows),
        Err(_) => ExtractedTables::default(),
    }
}

/// Read the text layer of a PDF.
pub fn try_extract_text(path: &Path) -> GuideResult<String> {
    let bytes = fs::read(path)
        .map_err(|e| GuideError::file_error("read PDF", path.display().to_string(), e.to_string()))?;

    pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
        let message = e.to_string();
        let reason = if message.contains("decrypt") || message.contains("password") || message.contains("encryption") {
            format!("PDF appears to be encrypted or password-protected: {}", message)
        } else {
            format!("Failed to extract text: {}", message)
        };
        GuideError::file_error("extract PDF text", path.display().to_string(), reason)
    })
}

/// Tables and footnotes from the local MIL-STD-248D copy, if any.
pub fn load_milstd248_tables(settings: &GuideSettings) -> ExtractedTables {
    extract_tables(&ReferenceDocument::MilStd248D.local_path(settings), settings.min_table_rows)
}

/// Detect table blocks and footnotes in extracted text.
pub fn parse_text(text: &str, min_rows: usize) -> ExtractedTables {
    let mut result = ExtractedTables::default();
    let mut block: Vec<String> = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();

        if is_footnote(line) {
            flush_block(&mut block, &mut result.tables, min_rows);
            if !result.footnotes.iter().any(|n| n == line) {
                result.footnotes.push(line.to_string());
            }
            continue;
        }

        let cells = split_columns(raw);
        if cells.len() >= 2 {
            block.push(cells.join(CELL_SEPARATOR));
        } else {
            flush_block(&mut block, &mut result.tables, min_rows);
        }
    }
    flush_block(&mut block, &mut result.tables, min_rows);

    result
}

/// Keep the pending block as a table if it is long enough
fn flush_block(block: &mut Vec<String>, tables: &mut Vec<Vec<String>>, min_rows: usize) {
    if !block.is_empty() && block.len() >= min_rows {
        tables.push(std::mem::take(block));
    } else {
        block.clear();
    }
}

fn is_footnote(line: &str) -> bool {
    FOOTNOTE_PREFIXES.iter().any(|p| line.starts_with(p))
}

/// Split a line on tabs or runs of two or more spaces.
fn split_columns(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut spaces = 0;

    for ch in line.trim().chars() {
        match ch {
            '\t' => {
                push_cell(&mut cells, &mut current);
                spaces = 0;
            }
            ' ' => spaces += 1,
            _ => {
                if spaces >= 2 {
                    push_cell(&mut cells, &mut current);
                } else if spaces == 1 {
                    current.push(' ');
                }
                spaces = 0;
                current.push(ch);
            }
        }
    }
    push_cell(&mut cells, &mut current);
    cells
}

fn push_cell(cells: &mut Vec<String>, current: &mut String) {
    let cell = current.trim();
    if !cell.is_empty() {
        cells.push(cell.to_string());
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
TABLE II. Base metal groupings

Group    Material         Thickness
I        Carbon steel     0.020-0.500
II       Stainless        0.030-0.375
* Thickness in inches.
Single line of running prose.
Process\tPosition
GTAW\tAll
NOTE: Positions per figure 3.
* Thickness in inches.
";

    #[test]
    fn test_split_columns() {
        assert_eq!(
            split_columns("I        Carbon steel     0.020-0.500"),
            vec!["I", "Carbon steel", "0.020-0.500"]
        );
        assert_eq!(split_columns("GTAW\tAll"), vec!["GTAW", "All"]);
        assert_eq!(split_columns("just one cell"), vec!["just one cell"]);
        assert!(split_columns("   ").is_empty());
    }

    #[test]
    fn test_parse_tables_and_footnotes() {
        let extracted = parse_text(SAMPLE, 2);

        assert_eq!(extracted.tables.len(), 2);
        assert_eq!(
            extracted.tables[0],
            vec![
                "Group | Material | Thickness",
                "I | Carbon steel | 0.020-0.500",
                "II | Stainless | 0.030-0.375",
            ]
        );
        assert_eq!(extracted.tables[1], vec!["Process | Position", "GTAW | All"]);
        assert_eq!(
            extracted.footnotes,
            vec!["* Thickness in inches.", "NOTE: Positions per figure 3."]
        );
    }

    #[test]
    fn test_min_rows_filters_short_blocks() {
        let extracted = parse_text(SAMPLE, 3);
        assert_eq!(extracted.tables.len(), 1);
        assert_eq!(extracted.tables[0].len(), 3);
    }

    #[test]
    fn test_prose_only() {
        let extracted = parse_text("A paragraph of text.\nAnother line.\n", 2);
        assert!(extracted.is_empty());
    }

    #[test]
    fn test_missing_pdf_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let extracted = extract_tables(&dir.path().join("absent.pdf"), 2);
        assert!(extracted.is_empty());
    }

    #[test]
    fn test_malformed_pdf_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"not a pdf at all").unwrap();

        assert!(try_extract_text(&path).is_err());
        assert!(extract_tables(&path, 2).is_empty());
    }

    #[test]
    fn test_load_without_local_copy() {
        let dir = tempfile::tempdir().unwrap();
        let settings = GuideSettings {
            files_dir: dir.path().to_path_buf(),
            ..GuideSettings::default()
        };
        assert!(load_milstd248_tables(&settings).is_empty());
    }
}
