use crate::apis::decode::{decode_csv, decode_json, ensure_candidates};
use crate::error::{FinderError, Result};
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// Load raw candidates from a saved search response. Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `{"candidates": [...]}` or a bare array of records
/// * `.csv`  – header row of field names, one candidate per row
pub fn load_raw_records(path: &Path) -> Result<Vec<Value>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let body = std::fs::read(path)?;
    let records = match ext.as_str() {
        "json" => decode_json(&body)?,
        "csv" => decode_csv(&body)?,
        other => {
            return Err(FinderError::UnsupportedFormat(format!(
                "cannot import '.{}' files",
                other
            )))
        }
    };
    info!("Loaded {} raw candidates from {}", records.len(), path.display());
    ensure_candidates(records)
}
