use crate::constants::{MAX_CANDIDATES, MIN_CANDIDATES};
use crate::error::{FinderError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Raw candidate record as returned by the search service
pub type RawCandidateRecord = serde_json::Map<String, serde_json::Value>;

/// A candidate with its filterable fields normalized and contact fields removed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedCandidateRecord {
    pub location_preference: String,
    pub disability: String,
    pub educational_qualification: String,
    pub work_experience: f64,
    /// Remaining display fields, copied verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Ordered candidates from a single search response
pub type CandidateTable = Vec<NormalizedCandidateRecord>;

/// Arguments for a candidate search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub job_description: String,
    pub n: u32,
}

impl SearchRequest {
    pub fn new(job_description: impl Into<String>, n: u32) -> Result<Self> {
        let job_description = job_description.into();
        if job_description.trim().is_empty() {
            return Err(FinderError::InvalidRequest(
                "job description must not be empty".to_string(),
            ));
        }
        if !(MIN_CANDIDATES..=MAX_CANDIDATES).contains(&n) {
            return Err(FinderError::InvalidRequest(format!(
                "candidate count must be between {} and {}, got {}",
                MIN_CANDIDATES, MAX_CANDIDATES, n
            )));
        }
        Ok(Self { job_description, n })
    }
}
