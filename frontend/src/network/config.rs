use crate::constants::DEFAULT_API_BASE_URL;

/// API route configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    // When empty, requests go to same-origin relative URLs ("/chat").
    base_url: String,
}

impl Default for ApiConfig {
    /// Points at the local proxy server.  Used until `init_api_config()` or
    /// `init_api_config_js()` stores the real configuration, and by unit
    /// tests that never run the bootstrap sequence.
    fn default() -> Self {
        Self::from_url(DEFAULT_API_BASE_URL)
    }
}

impl ApiConfig {
    /// Create a new ApiConfig from the build-time API_BASE_URL variable,
    /// falling back to the local proxy when it is not set.
    pub fn new() -> Self {
        match option_env!("API_BASE_URL") {
            Some(url) => Self::from_url(url),
            None => Self::default(),
        }
    }

    /// Create a new ApiConfig from a URL string
    pub fn from_url(url: &str) -> Self {
        Self {
            base_url: url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint path such as `/chat`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
