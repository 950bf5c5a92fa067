use crate::constants::{DEFAULT_EXPERIENCE_MAX, DEFAULT_EXPERIENCE_MIN};
use crate::error::{FinderError, Result};
use crate::types::{CandidateTable, NormalizedCandidateRecord};
use serde::Serialize;
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// Closed years-of-experience interval. Always applied when filtering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExperienceRange {
    min: f64,
    max: f64,
}

impl ExperienceRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(FinderError::InvalidRequest(
                "experience bounds must be finite".to_string(),
            ));
        }
        if min > max {
            return Err(FinderError::InvalidRequest(format!(
                "experience range is empty: min {} exceeds max {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, years: f64) -> bool {
        years >= self.min && years <= self.max
    }
}

impl Default for ExperienceRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_EXPERIENCE_MIN,
            max: DEFAULT_EXPERIENCE_MAX,
        }
    }
}

/// User-selected filter values. An empty selection places no constraint on
/// its column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub locations: BTreeSet<String>,
    pub disabilities: BTreeSet<String>,
    pub educations: BTreeSet<String>,
    pub experience: ExperienceRange,
}

impl FilterCriteria {
    pub fn with_locations<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locations.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_disabilities<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disabilities.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_educations<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.educations.extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_experience(mut self, range: ExperienceRange) -> Self {
        self.experience = range;
        self
    }

    /// True when no categorical selection is active and the range is the default
    pub fn is_unconstrained(&self) -> bool {
        self.locations.is_empty()
            && self.disabilities.is_empty()
            && self.educations.is_empty()
            && self.experience == ExperienceRange::default()
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

fn selected(selection: &BTreeSet<String>, value: &str) -> bool {
    selection.is_empty() || selection.contains(value)
}

/// Check if a record passes every criterion
pub fn matches_filters(record: &NormalizedCandidateRecord, criteria: &FilterCriteria) -> bool {
    selected(&criteria.locations, &record.location_preference)
        && selected(&criteria.disabilities, &record.disability)
        && selected(&criteria.educations, &record.educational_qualification)
        && criteria.experience.contains(record.work_experience)
}

/// Return the records passing all filters, in table order
pub fn apply_filters(table: &[NormalizedCandidateRecord], criteria: &FilterCriteria) -> CandidateTable {
    table
        .iter()
        .filter(|record| matches_filters(record, criteria))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Facet options
// ---------------------------------------------------------------------------

/// Distinct values offered for each categorical filter
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacetOptions {
    pub locations: BTreeSet<String>,
    pub disabilities: BTreeSet<String>,
    pub educations: BTreeSet<String>,
}

impl FacetOptions {
    pub fn from_table(table: &[NormalizedCandidateRecord]) -> Self {
        let mut options = Self::default();
        for record in table {
            options.locations.insert(record.location_preference.clone());
            options.disabilities.insert(record.disability.clone());
            options.educations.insert(record.educational_qualification.clone());
        }
        options
    }
}
