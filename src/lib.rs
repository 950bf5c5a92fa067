pub mod apis;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod filter;
pub mod logging;
pub mod normalize;
pub mod session;
pub mod table;
pub mod types;

pub use error::{ErrorKind, FinderError, Result};
pub use filter::{apply_filters, ExperienceRange, FacetOptions, FilterCriteria};
pub use normalize::{normalize_disability, normalize_education, normalize_experience, normalize_location};
pub use session::{SearchNotice, Session};
pub use table::build_table;
pub use types::{CandidateTable, NormalizedCandidateRecord, RawCandidateRecord, SearchRequest};
