//! CSV and JSON export of record collections.
//!
//! Backs the dashboard's "export" action: the current tab's filtered rows
//! (or only the selected ones) are written to a timestamped file in the
//! working directory.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// Quotes a single CSV field: doubles embedded quotes, wraps fields that
/// contain a comma, quote or whitespace.
fn csv_field(raw: &str) -> String {
    let needs_escaping = raw.contains('"');
    let needs_wrapping = raw
        .chars()
        .any(|c| c == ',' || c == '"' || c == ' ' || c == '\t' || c == '\n');
    let mut out = raw.to_string();
    if needs_escaping {
        out = out.replace('"', "\"\"");
    }
    if needs_wrapping {
        out = format!("\"{out}\"");
    }
    out
}

/// Writes a header line plus one line per row.
pub fn write_csv(path: &Path, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    let header_line = headers
        .iter()
        .map(|h| csv_field(h))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(out, "{header_line}")?;
    for row in rows {
        let line = row
            .iter()
            .map(|cell| csv_field(cell))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    info!(path = %path.display(), rows = rows.len(), "wrote csv export");
    Ok(())
}

/// Writes the full records as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: &Path, records: &[T]) -> io::Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), records)?;
    info!(path = %path.display(), records = records.len(), "wrote json export");
    Ok(())
}

/// Timestamped export file name: `"annotations-20241109-153000.csv"`.
pub fn export_name(prefix: &str, ext: &str, now: DateTime<Utc>) -> PathBuf {
    PathBuf::from(format!("{}-{}.{}", prefix, now.format("%Y%m%d-%H%M%S"), ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("two words"), "\"two words\"");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field(""), "");
    }

    #[test]
    fn csv_round_trip_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rows = vec![
            vec!["1".to_string(), "mass, small".to_string()],
            vec!["2".to_string(), "clear".to_string()],
        ];
        write_csv(&path, &["id", "finding"], &rows).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "id,finding");
        assert_eq!(lines[1], "1,\"mass, small\"");
        assert_eq!(lines[2], "2,clear");
    }

    #[test]
    fn json_export_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let ws = crate::model::Workspace::demo();
        write_json(&path, &ws.versions).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<crate::model::DatasetVersion> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), ws.versions.len());
    }

    #[test]
    fn export_name_is_timestamped() {
        let now = Utc.with_ymd_and_hms(2024, 11, 9, 15, 30, 0).single().unwrap();
        assert_eq!(
            export_name("annotations", "csv", now),
            PathBuf::from("annotations-20241109-153000.csv")
        );
    }
}
