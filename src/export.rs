use crate::constants::NORMALIZED_FIELDS;
use crate::error::{FinderError, Result};
use crate::types::NormalizedCandidateRecord;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(FinderError::UnsupportedFormat(format!(
                "cannot export to '.{}' files",
                other
            ))),
        }
    }
}

/// Column order: the normalized fields, then every extra field in sorted order
pub fn columns(table: &[NormalizedCandidateRecord]) -> Vec<String> {
    let extras: BTreeSet<&String> = table.iter().flat_map(|r| r.extra.keys()).collect();
    NORMALIZED_FIELDS
        .iter()
        .map(|f| f.to_string())
        .chain(extras.into_iter().cloned())
        .collect()
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One display row, aligned with `columns`
pub fn row(record: &NormalizedCandidateRecord, columns: &[String]) -> Vec<String> {
    let mut cells = vec![
        record.location_preference.clone(),
        record.disability.clone(),
        record.educational_qualification.clone(),
        record.work_experience.to_string(),
    ];
    cells.extend(
        columns[NORMALIZED_FIELDS.len()..]
            .iter()
            .map(|col| record.extra.get(col).map(cell).unwrap_or_default()),
    );
    cells
}

pub fn write_csv<W: Write>(table: &[NormalizedCandidateRecord], writer: W) -> Result<()> {
    let columns = columns(table);
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&columns)?;
    for record in table {
        csv_writer.write_record(row(record, &columns))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(table: &[NormalizedCandidateRecord], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, table)?;
    Ok(())
}

pub fn write_table<W: Write>(table: &[NormalizedCandidateRecord], format: ExportFormat, writer: W) -> Result<()> {
    match format {
        ExportFormat::Csv => write_csv(table, writer),
        ExportFormat::Json => write_json(table, writer),
    }
}

/// Write the table to `path`, choosing the format from its extension
pub fn export_to_path(table: &[NormalizedCandidateRecord], path: &Path) -> Result<()> {
    let format = ExportFormat::from_path(path)?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_table(table, format, &mut writer)?;
    writer.flush()?;
    info!("Exported {} candidates to {}", table.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn record(extra: &[(&str, Value)]) -> NormalizedCandidateRecord {
        NormalizedCandidateRecord {
            location_preference: "Delhi".into(),
            disability: "None".into(),
            educational_qualification: "Masters".into(),
            work_experience: 2.5,
            extra: extra
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_columns_union_extras() {
        let table = vec![record(&[("name", json!("A"))]), record(&[("age", json!(30))])];
        assert_eq!(
            columns(&table),
            vec![
                "location_preference",
                "disability",
                "educational_qualification",
                "work_experience",
                "age",
                "name"
            ]
        );
    }

    #[test]
    fn test_write_csv() {
        let table = vec![record(&[("name", json!("A"))]), record(&[("age", json!(30))])];
        let mut out = Vec::new();
        write_csv(&table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            "location_preference,disability,educational_qualification,work_experience,age,name"
        );
        assert_eq!(lines[1], "Delhi,None,Masters,2.5,,A");
        assert_eq!(lines[2], "Delhi,None,Masters,2.5,30,");
    }

    #[test]
    fn test_row_fills_missing_extras() {
        let table = vec![record(&[("name", json!("A"))]), record(&[("age", json!(30)), ("notes", Value::Null)])];
        let columns = columns(&table);
        assert_eq!(row(&table[0], &columns), vec!["Delhi", "None", "Masters", "2.5", "", "A", ""]);
        assert_eq!(row(&table[1], &columns), vec!["Delhi", "None", "Masters", "2.5", "30", "", ""]);
    }

    #[test]
    fn test_write_json() {
        let table = vec![record(&[("name", json!("A"))])];
        let mut out = Vec::new();
        write_json(&table, &mut out).unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["name"], "A");
        assert_eq!(value[0]["work_experience"], 2.5);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("out.CSV")).unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("out.json")).unwrap(), ExportFormat::Json);
        assert!(ExportFormat::from_path(Path::new("out.xlsx")).is_err());
    }
}
