//! Keyword tables mapping free-text variants to canonical labels.
//!
//! Each table is ordered: when a cleaned value contains variants from more
//! than one entry, the earliest entry wins.

/// An ordered list of (canonical label, keyword variants) pairs
#[derive(Debug, Clone, Copy)]
pub struct KeywordTable {
    entries: &'static [(&'static str, &'static [&'static str])],
}

impl KeywordTable {
    pub const fn new(entries: &'static [(&'static str, &'static [&'static str])]) -> Self {
        Self { entries }
    }

    /// Returns the first canonical label with a variant contained in `cleaned`.
    /// A cleaned canonical label (e.g. "hearing impairment") always resolves to itself.
    pub fn lookup(&self, cleaned: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, variants)| variants.iter().any(|variant| cleaned.contains(variant)))
            .map(|(canonical, _)| *canonical)
            .or_else(|| {
                self.canonical_labels()
                    .find(|label| cleaned.contains(label.to_lowercase().as_str()))
            })
    }

    pub fn canonical_labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(canonical, _)| *canonical)
    }
}

pub const LOCATIONS: KeywordTable = KeywordTable::new(&[
    (
        "Delhi",
        &["delhi", "new delhi", "ncr", "shahjahanpur", "noida", "gurgaon", "gurugram"],
    ),
    ("Mumbai", &["mumbai", "bombay", "navi mumbai", "thane"]),
    ("Bangalore", &["bangalore", "bengaluru"]),
    ("Chennai", &["chennai", "madras"]),
    ("Kolkata", &["kolkata", "calcutta"]),
    ("Hyderabad", &["hyderabad", "secunderabad"]),
    ("Pune", &["pune", "poona"]),
]);

pub const DISABILITIES: KeywordTable = KeywordTable::new(&[
    ("Locomotor", &["locomotor", "orthopedic", "orthopaedic"]),
    ("Blindness", &["blindness", "blind"]),
    ("Low Vision", &["low vision"]),
    ("Hearing Impairment", &["hearing", "deaf"]),
    ("Intellectual Disability", &["intellectual"]),
]);

// Postgraduate keywords sit above the bachelor entry so "postgraduate"
// never resolves through the plain "graduate" variant.
pub const EDUCATION_LEVELS: KeywordTable = KeywordTable::new(&[
    ("PhD", &["phd", "doctorate"]),
    (
        "Masters",
        &["master", "postgraduate", "post graduate", "mtech", "msc", "mba", "mca", "mcom"],
    ),
    (
        "Bachelors",
        &["bachelor", "undergraduate", "graduate", "btech", "bsc", "bcom", "bca", "bba"],
    ),
    (
        "High School",
        &["high school", "higher secondary", "secondary", "12th", "10th", "intermediate"],
    ),
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_respects_table_order() {
        const TABLE: KeywordTable = KeywordTable::new(&[("First", &["ab"]), ("Second", &["abc"])]);
        assert_eq!(TABLE.lookup("xabcx"), Some("First"));
        assert_eq!(TABLE.lookup("zzz"), None);
    }

    #[test]
    fn test_postgraduate_is_masters() {
        assert_eq!(EDUCATION_LEVELS.lookup("postgraduate diploma"), Some("Masters"));
        assert_eq!(EDUCATION_LEVELS.lookup("graduate"), Some("Bachelors"));
    }

    #[test]
    fn test_canonical_labels() {
        let labels: Vec<_> = DISABILITIES.canonical_labels().collect();
        assert_eq!(labels.first(), Some(&"Locomotor"));
        assert_eq!(labels.len(), 5);
    }

    #[test]
    fn test_lowercased_label_resolves_to_itself() {
        const TABLE: KeywordTable = KeywordTable::new(&[("Sign Language", &["bsl"])]);
        assert_eq!(TABLE.lookup("sign language user"), Some("Sign Language"));
        for table in [LOCATIONS, DISABILITIES, EDUCATION_LEVELS] {
            for label in table.canonical_labels() {
                assert_eq!(table.lookup(&label.to_lowercase()), Some(label));
            }
        }
    }
}
