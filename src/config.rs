use crate::constants::{
    DEFAULT_ENDPOINT, DEFAULT_EXPERIENCE_MAX, DEFAULT_EXPERIENCE_MIN, DEFAULT_TIMEOUT_SECONDS,
    DEFAULT_TOKEN_PARAM,
};
use crate::error::{FinderError, Result};
use crate::filter::ExperienceRange;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const CONFIG_PATH: &str = "config.toml";
pub const ENDPOINT_ENV: &str = "CANDIDATE_FINDER_ENDPOINT";
pub const TOKEN_ENV: &str = "CANDIDATE_FINDER_TOKEN";
pub const TIMEOUT_ENV: &str = "CANDIDATE_FINDER_TIMEOUT_SECS";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub filters: FilterConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub response_format: ResponseFormat,
    pub credential: CredentialPlacement,
    pub token: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            response_format: ResponseFormat::default(),
            credential: CredentialPlacement::default(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub experience_min: f64,
    pub experience_max: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            experience_min: DEFAULT_EXPERIENCE_MIN,
            experience_max: DEFAULT_EXPERIENCE_MAX,
        }
    }
}

impl FilterConfig {
    pub fn experience_range(&self) -> Result<ExperienceRange> {
        ExperienceRange::new(self.experience_min, self.experience_max)
    }
}

/// Body encoding of a search response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    Json,
    Csv,
    /// Decide from the Content-Type header, then from the body itself
    #[default]
    Auto,
}

/// Where the opaque access token travels on the request
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "placement", rename_all = "lowercase")]
pub enum CredentialPlacement {
    Query {
        #[serde(default = "default_token_param")]
        param: String,
    },
    /// `Authorization: Bearer <token>`
    Header,
}

impl Default for CredentialPlacement {
    fn default() -> Self {
        CredentialPlacement::Query {
            param: default_token_param(),
        }
    }
}

fn default_token_param() -> String {
    DEFAULT_TOKEN_PARAM.to_string()
}

impl Config {
    /// Load `config.toml` from the working directory, or defaults when absent,
    /// then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_PATH);
        let mut config = if path.exists() {
            Self::load_from(path)?
        } else {
            debug!("No {} found, using defaults", CONFIG_PATH);
            Self::default()
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            FinderError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&config_content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.filters.experience_range()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            self.search.endpoint = endpoint;
        }
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.trim().is_empty() {
                self.search.token = Some(token);
            }
        }
        if let Ok(timeout) = std::env::var(TIMEOUT_ENV) {
            self.search.timeout_seconds = timeout.parse().map_err(|e| {
                FinderError::Config(format!("{} must be a whole number of seconds: {}", TIMEOUT_ENV, e))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.search.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.search.response_format, ResponseFormat::Auto);
        assert_eq!(
            config.search.credential,
            CredentialPlacement::Query { param: "code".to_string() }
        );
        assert_eq!(config.filters.experience_range().unwrap(), ExperienceRange::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml(
            r#"
            [search]
            endpoint = "http://localhost:7071/api/search"
            timeout_seconds = 5
            response_format = "csv"

            [search.credential]
            placement = "header"

            [filters]
            experience_min = 1.0
            experience_max = 40.0
            "#,
        )
        .unwrap();

        assert_eq!(config.search.endpoint, "http://localhost:7071/api/search");
        assert_eq!(config.search.timeout_seconds, 5);
        assert_eq!(config.search.response_format, ResponseFormat::Csv);
        assert_eq!(config.search.credential, CredentialPlacement::Header);
        assert_eq!(config.filters.experience_range().unwrap().max(), 40.0);
    }

    #[test]
    fn test_query_param_default() {
        let config = Config::from_toml(
            r#"
            [search.credential]
            placement = "query"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.search.credential,
            CredentialPlacement::Query { param: "code".to_string() }
        );
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = Config::from_toml(
            r#"
            [filters]
            experience_min = 10.0
            experience_max = 2.0
            "#,
        );
        assert!(result.is_err());
    }
}
