use crate::constants::{
    is_contact_field, DISABILITY_FIELD, EDUCATION_FIELD, EXPERIENCE_FIELD, LOCATION_FIELD,
    NORMALIZED_FIELDS,
};
use crate::error::{FinderError, Result};
use crate::normalize::{
    normalize_disability, normalize_education, normalize_experience, normalize_location,
};
use crate::types::{CandidateTable, NormalizedCandidateRecord, RawCandidateRecord};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Normalize a single raw record, dropping contact fields
pub fn normalize_record(raw: &RawCandidateRecord) -> NormalizedCandidateRecord {
    let extra: BTreeMap<String, Value> = raw
        .iter()
        .filter(|(key, _)| !NORMALIZED_FIELDS.contains(&key.as_str()) && !is_contact_field(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    NormalizedCandidateRecord {
        location_preference: normalize_location(raw.get(LOCATION_FIELD)),
        disability: normalize_disability(raw.get(DISABILITY_FIELD)),
        educational_qualification: normalize_education(raw.get(EDUCATION_FIELD)),
        work_experience: normalize_experience(raw.get(EXPERIENCE_FIELD)),
        extra,
    }
}

/// Build a candidate table from raw service records, preserving order.
///
/// The whole batch is rejected if any entry is not an object or if one of
/// the normalized fields is missing from every record. A field missing from
/// only some records falls back to its normalizer default.
pub fn build_table(raw_records: &[Value]) -> Result<CandidateTable> {
    let records = raw_records
        .iter()
        .enumerate()
        .map(|(i, value)| {
            value.as_object().ok_or_else(|| {
                FinderError::MalformedBatch(format!("candidate {} is not an object", i))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    build_table_from_records(&records)
}

pub fn build_table_from_records(records: &[&RawCandidateRecord]) -> Result<CandidateTable> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    for field in NORMALIZED_FIELDS {
        if !records.iter().any(|record| record.contains_key(field)) {
            warn!(field, count = records.len(), "Field absent from every candidate record");
            return Err(FinderError::MalformedBatch(format!(
                "field '{}' is missing from every candidate",
                field
            )));
        }
    }

    let table: CandidateTable = records.iter().map(|raw| normalize_record(raw)).collect();
    debug!("Normalized {} candidate records", table.len());
    Ok(table)
}
