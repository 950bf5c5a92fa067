/// Field name constants shared between the table builder, filters and export.
/// These are the keys the search service uses in each candidate record.

pub const LOCATION_FIELD: &str = "location_preference";
pub const DISABILITY_FIELD: &str = "disability";
pub const EDUCATION_FIELD: &str = "educational_qualification";
pub const EXPERIENCE_FIELD: &str = "work_experience";

/// Normalized columns in display order
pub const NORMALIZED_FIELDS: [&str; 4] = [
    LOCATION_FIELD,
    DISABILITY_FIELD,
    EDUCATION_FIELD,
    EXPERIENCE_FIELD,
];

/// Contact-identifying fields that never leave the table builder
pub const CONTACT_FIELDS: [&str; 10] = [
    "email",
    "email_id",
    "email_address",
    "phone",
    "phone_number",
    "mobile",
    "mobile_number",
    "contact",
    "contact_number",
    "whatsapp",
];

// Sentinels for absent or blank values
pub const UNKNOWN: &str = "Unknown";
pub const NO_DISABILITY: &str = "None";

pub const DEFAULT_ENDPOINT: &str = "https://datafinsight.azurewebsites.net/api/ai_search";
pub const DEFAULT_TOKEN_PARAM: &str = "code";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Bounds accepted for the requested candidate count
pub const MIN_CANDIDATES: u32 = 1;
pub const MAX_CANDIDATES: u32 = 100;

/// Experience slider span in years
pub const DEFAULT_EXPERIENCE_MIN: f64 = 0.0;
pub const DEFAULT_EXPERIENCE_MAX: f64 = 30.0;

/// Returns true if `field` identifies or contacts the candidate
pub fn is_contact_field(field: &str) -> bool {
    let lowered = field.to_ascii_lowercase();
    CONTACT_FIELDS.contains(&lowered.as_str())
}
