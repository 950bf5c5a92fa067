pub mod decode;
pub mod import;
pub mod search;

pub use import::load_raw_records;
pub use search::{HttpSearchClient, SearchClient};
