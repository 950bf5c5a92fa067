use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV decoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Search service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("No candidates found")]
    NoCandidates,

    #[error("Malformed candidate batch: {0}")]
    MalformedBatch(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// How a failure is surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network error, non-2xx status or undecodable response body.
    Transport,
    /// The request succeeded but returned zero candidates.
    EmptyResult,
    /// The response could not be mapped to a consistent table.
    DataError,
    /// The user supplied an invalid request or filter.
    Input,
    /// Local configuration or file problems.
    Local,
}

impl FinderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FinderError::Http(_)
            | FinderError::Json(_)
            | FinderError::Csv(_)
            | FinderError::Api { .. } => ErrorKind::Transport,
            FinderError::NoCandidates => ErrorKind::EmptyResult,
            FinderError::MalformedBatch(_) => ErrorKind::DataError,
            FinderError::InvalidRequest(_) => ErrorKind::Input,
            FinderError::Toml(_)
            | FinderError::Io(_)
            | FinderError::Config(_)
            | FinderError::UnsupportedFormat(_) => ErrorKind::Local,
        }
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_separates_empty_result_from_transport() {
        assert_eq!(FinderError::NoCandidates.kind(), ErrorKind::EmptyResult);
        let api = FinderError::Api { status: 500, message: "boom".into() };
        assert_eq!(api.kind(), ErrorKind::Transport);
        assert_eq!(
            FinderError::MalformedBatch("x".into()).kind(),
            ErrorKind::DataError
        );
    }

    #[test]
    fn test_api_error_message() {
        let err = FinderError::Api { status: 401, message: "Unauthorized".into() };
        assert_eq!(err.to_string(), "Search service returned 401: Unauthorized");
    }
}
