//! CSV export of harvested records
//!
//! The survey tooling downstream consumes a flat CSV with the fixed record
//! columns. Since every record always carries every field (sentinel included)
//! the column set never varies between exports.

use crate::extract::DetailRecord;
use crate::output::OutputError;
use std::path::Path;

/// Writes all records to a CSV file, header row first
pub fn export_csv(records: &[DetailRecord], path: &Path) -> Result<(), OutputError> {
    let mut out = String::new();

    out.push_str(&DetailRecord::COLUMNS.join(","));
    out.push('\n');

    for record in records {
        let row: Vec<String> = record.values().iter().map(|v| escape_field(v)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    std::fs::write(path, out)?;
    Ok(())
}

/// Quotes a field when it contains a delimiter, quote, or newline
fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_escape_plain_field() {
        assert_eq!(escape_field("Oil on canvas"), "Oil on canvas");
    }

    #[test]
    fn test_escape_field_with_comma() {
        assert_eq!(
            escape_field("Dublin, Ireland"),
            "\"Dublin, Ireland\""
        );
    }

    #[test]
    fn test_escape_field_with_quotes() {
        assert_eq!(
            escape_field("the \"Taking\""),
            "\"the \"\"Taking\"\"\""
        );
    }

    #[test]
    fn test_escape_field_with_newline() {
        assert_eq!(escape_field("line one\nline two"), "\"line one\nline two\"");
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.csv");

        let mut record = DetailRecord::empty();
        record.title = "Island Funeral".to_string();
        record.locator = "https://example.com/objects/1".to_string();
        record.medium = "Oil on canvas".to_string();

        export_csv(&[record], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("title,locator,artist,"));
        assert!(lines[1].contains("Island Funeral"));
        assert!(lines[1].contains("Oil on canvas"));
    }

    #[test]
    fn test_export_empty_records_still_writes_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");

        export_csv(&[], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
