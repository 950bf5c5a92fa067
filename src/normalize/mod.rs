//! Field normalizers for candidate records.
//!
//! Every function here is total: any input shape, including absent, null,
//! blank or non-string values, maps to a canonical value. Unmatched text
//! falls back to its cleaned form rather than a sentinel.

pub mod tables;

use crate::constants::{NO_DISABILITY, UNKNOWN};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

pub use tables::{KeywordTable, DISABILITIES, EDUCATION_LEVELS, LOCATIONS};

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("valid digit pattern"));
static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[[:punct:]]").expect("valid punctuation pattern"));
static PERCENTAGES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?\s*%").expect("valid percentage pattern"));
static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)?)").expect("valid number pattern"));

/// Render a raw field as text; `None` for absent or null values
fn raw_text(raw: Option<&Value>) -> Option<String> {
    match raw? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn strip_punctuation(text: &str) -> String {
    PUNCTUATION.replace_all(text, "").into_owned()
}

/// Map a cleaned value through `table`, falling back to the cleaned value itself.
/// The blank sentinel maps back to itself so normalized output re-normalizes unchanged.
fn canonicalize(cleaned: String, table: &KeywordTable, blank: &str) -> String {
    if cleaned.is_empty() || cleaned == blank.to_lowercase() {
        return blank.to_string();
    }
    match table.lookup(&cleaned) {
        Some(canonical) => canonical.to_string(),
        None => cleaned,
    }
}

pub fn clean_location(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_digits = DIGITS.replace_all(&lowered, "");
    strip_punctuation(&without_digits).trim().to_string()
}

pub fn clean_disability(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_percentages = PERCENTAGES.replace_all(&lowered, "");
    strip_punctuation(&without_percentages).trim().to_string()
}

pub fn clean_education(text: &str) -> String {
    strip_punctuation(&text.to_lowercase()).trim().to_string()
}

/// Canonical city name for a location preference, e.g. "New Delhi-110001" -> "Delhi"
pub fn normalize_location(raw: Option<&Value>) -> String {
    match raw_text(raw) {
        Some(text) => canonicalize(clean_location(&text), &LOCATIONS, UNKNOWN),
        None => UNKNOWN.to_string(),
    }
}

/// Canonical disability category; absent or blank input means "None"
pub fn normalize_disability(raw: Option<&Value>) -> String {
    match raw_text(raw) {
        Some(text) => canonicalize(clean_disability(&text), &DISABILITIES, NO_DISABILITY),
        None => NO_DISABILITY.to_string(),
    }
}

pub fn normalize_education(raw: Option<&Value>) -> String {
    match raw_text(raw) {
        Some(text) => canonicalize(clean_education(&text), &EDUCATION_LEVELS, UNKNOWN),
        None => UNKNOWN.to_string(),
    }
}

/// Years of experience as a finite, non-negative number.
///
/// Numbers pass through; strings are parsed directly, then by their leading
/// numeric token ("5 years" -> 5.0). Anything else is 0.0.
pub fn normalize_experience(raw: Option<&Value>) -> f64 {
    let years = match raw {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => parse_experience(s),
        _ => 0.0,
    };
    if years.is_finite() && years > 0.0 {
        years
    } else {
        0.0
    }
}

fn parse_experience(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Ok(value) = trimmed.parse::<f64>() {
        if value.is_finite() && value >= 0.0 {
            return value;
        }
    }
    LEADING_NUMBER
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn location(s: &str) -> String {
        normalize_location(Some(&json!(s)))
    }

    fn disability(s: &str) -> String {
        normalize_disability(Some(&json!(s)))
    }

    fn education(s: &str) -> String {
        normalize_education(Some(&json!(s)))
    }

    #[test]
    fn test_location_variants() {
        assert_eq!(location("New Delhi-110001"), "Delhi");
        assert_eq!(location("Delhi NCR"), "Delhi");
        assert_eq!(location("SHAHJAHANPUR"), "Delhi");
        assert_eq!(location("Navi Mumbai"), "Mumbai");
        assert_eq!(location("Bengaluru, Karnataka 560001"), "Bangalore");
    }

    #[test]
    fn test_location_fallbacks() {
        assert_eq!(normalize_location(None), "Unknown");
        assert_eq!(normalize_location(Some(&Value::Null)), "Unknown");
        assert_eq!(location("  123 "), "Unknown");
        assert_eq!(location("Jaipur, 302001"), "jaipur");
    }

    #[test]
    fn test_disability() {
        assert_eq!(disability(""), "None");
        assert_eq!(disability("   "), "None");
        assert_eq!(normalize_disability(None), "None");
        assert_eq!(disability("40% Locomotor disability"), "Locomotor");
        assert_eq!(disability("Low Vision (60 %)"), "Low Vision");
        assert_eq!(disability("Hearing impairment"), "Hearing Impairment");
        assert_eq!(disability("Speech & language"), "speech  language");
    }

    #[test]
    fn test_education() {
        assert_eq!(education("Bachelor's Degree"), "Bachelors");
        assert_eq!(education("B.Tech"), "Bachelors");
        assert_eq!(education("M.Sc. Physics"), "Masters");
        assert_eq!(education("Ph.D"), "PhD");
        assert_eq!(education("12th pass"), "High School");
        assert_eq!(education("Diploma"), "diploma");
        assert_eq!(normalize_education(None), "Unknown");
    }

    #[test]
    fn test_experience() {
        assert_eq!(normalize_experience(Some(&json!("5 years"))), 5.0);
        assert_eq!(normalize_experience(Some(&json!("2.5yrs"))), 2.5);
        assert_eq!(normalize_experience(Some(&json!(""))), 0.0);
        assert_eq!(normalize_experience(Some(&json!("abc"))), 0.0);
        assert_eq!(normalize_experience(Some(&json!(7))), 7.0);
        assert_eq!(normalize_experience(Some(&json!(" 3.0 "))), 3.0);
        assert_eq!(normalize_experience(None), 0.0);
        assert_eq!(normalize_experience(Some(&Value::Null)), 0.0);
    }

    #[test]
    fn test_experience_never_negative() {
        assert_eq!(normalize_experience(Some(&json!(-4))), 0.0);
        assert_eq!(normalize_experience(Some(&json!("-4"))), 0.0);
        assert_eq!(normalize_experience(Some(&json!("inf"))), 0.0);
        assert_eq!(normalize_experience(Some(&json!(true))), 0.0);
    }

    #[test]
    fn test_normalized_values_are_stable() {
        let normalizers: [(fn(&str) -> String, KeywordTable, &str); 3] = [
            (location, LOCATIONS, UNKNOWN),
            (disability, DISABILITIES, NO_DISABILITY),
            (education, EDUCATION_LEVELS, UNKNOWN),
        ];
        for (normalize, table, sentinel) in normalizers {
            for value in table.canonical_labels().chain([sentinel]) {
                let once = normalize(value);
                assert_eq!(once, value);
                assert_eq!(normalize(&once), once);
            }
        }
        assert_eq!(disability("none"), "None");
        assert_eq!(location("unknown"), "Unknown");
        assert_eq!(education(&education("Diploma")), "diploma");
    }

    #[test]
    fn test_non_string_values_are_rendered() {
        assert_eq!(normalize_location(Some(&json!(42))), "Unknown");
        assert_eq!(normalize_education(Some(&json!(true))), "true");
    }
}
