//! Response body decoders.
//!
//! Deployments answer either with a JSON document or with CSV text. Both are
//! turned into the same sequence of raw records here so nothing downstream
//! depends on the transport format.

use crate::config::ResponseFormat;
use crate::error::{FinderError, Result};
use serde_json::{Map, Value};
use tracing::debug;

pub const CANDIDATES_KEY: &str = "candidates";

/// Decode a response body into raw candidate values
pub fn decode_body(body: &[u8], format: ResponseFormat, content_type: Option<&str>) -> Result<Vec<Value>> {
    let resolved = match format {
        ResponseFormat::Auto => detect_format(body, content_type),
        explicit => explicit,
    };
    debug!(?resolved, bytes = body.len(), "Decoding search response");

    match resolved {
        ResponseFormat::Csv => decode_csv(body),
        _ => decode_json(body),
    }
}

fn detect_format(body: &[u8], content_type: Option<&str>) -> ResponseFormat {
    if let Some(content_type) = content_type.map(str::to_ascii_lowercase) {
        if content_type.contains("json") {
            return ResponseFormat::Json;
        }
        if content_type.contains("csv") {
            return ResponseFormat::Csv;
        }
    }
    match body.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') | Some(b'[') => ResponseFormat::Json,
        _ => ResponseFormat::Csv,
    }
}

/// Accepts `{"candidates": [...]}` or a bare array. A missing or null
/// `candidates` field decodes to an empty list.
pub fn decode_json(body: &[u8]) -> Result<Vec<Value>> {
    let root: Value = serde_json::from_slice(body)?;
    match root {
        Value::Array(items) => Ok(items),
        Value::Object(mut document) => match document.remove(CANDIDATES_KEY) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(FinderError::MalformedBatch(format!(
                "'{}' must be an array, found {}",
                CANDIDATES_KEY,
                json_type_name(&other)
            ))),
        },
        other => Err(FinderError::MalformedBatch(format!(
            "expected a JSON object or array, found {}",
            json_type_name(&other)
        ))),
    }
}

/// Header row names the fields; every cell becomes a string value
pub fn decode_csv(body: &[u8]) -> Result<Vec<Value>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(body);
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let record: Map<String, Value> = headers
            .iter()
            .zip(row.iter())
            .map(|(header, cell)| (header.to_string(), Value::String(cell.to_string())))
            .collect();
        records.push(Value::Object(record));
    }
    Ok(records)
}

/// Turn an empty decode into the distinct "no candidates" condition
pub fn ensure_candidates(records: Vec<Value>) -> Result<Vec<Value>> {
    if records.is_empty() {
        Err(FinderError::NoCandidates)
    } else {
        Ok(records)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
