//! API endpoint configuration

/// Base URL baked in at compile time, if the build environment set one
pub const BUILD_API_URL: Option<&str> = option_env!("POKEDEX_API_URL");
pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const COLLECTION_PATH: &str = "/api/pokemon";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API base URL is empty")]
    Empty,
    #[error("API base URL must start with http:// or https://, got {0:?}")]
    Scheme(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Runtime override wins over the build-time value, then the default.
    pub fn resolve(runtime: Option<&str>) -> Result<Self, ConfigError> {
        let raw = runtime.or(BUILD_API_URL).unwrap_or(DEFAULT_API_URL);
        Self::new(raw)
    }

    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ConfigError::Empty);
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Scheme(base_url.to_string()));
        }
        Ok(Self {
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/api/pokemon`
    pub fn collection_url(&self) -> String {
        format!("{}{COLLECTION_PATH}", self.base_url)
    }

    /// `{base}/api/pokemon/{id}` with the id percent-encoded
    pub fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url(), urlencoding::encode(id))
    }
}
