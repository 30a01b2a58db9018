//! Server configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.

/// Upstream used when `API_UPSTREAM_URL` is not set
pub const DEFAULT_API_UPSTREAM_URL: &str = "http://127.0.0.1:5000";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the gallery API that `/api/*` is forwarded to
    /// Example: https://gallery-api.example.com
    pub api_upstream_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self::with_upstream(std::env::var("API_UPSTREAM_URL").ok())
    }

    /// Build a config from an optional upstream URL, applying the default
    /// and trimming trailing slashes
    pub fn with_upstream(url: Option<String>) -> Self {
        let url = url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_UPSTREAM_URL.to_string());

        Self {
            api_upstream_url: url.trim_end_matches('/').to_string(),
        }
    }

    /// Full upstream URL for an API path (`/login`, `/getImage`, ...)
    pub fn upstream_url(&self, path: &str, query: Option<&str>) -> String {
        let path = path.trim_start_matches('/');
        match query.filter(|q| !q.is_empty()) {
            Some(query) => format!("{}/{}?{}", self.api_upstream_url, path, query),
            None => format!("{}/{}", self.api_upstream_url, path),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_upstream() {
        let config = Config::with_upstream(None);
        assert_eq!(config.api_upstream_url, DEFAULT_API_UPSTREAM_URL);
    }

    #[test]
    fn test_blank_upstream_uses_default() {
        let config = Config::with_upstream(Some("   ".to_string()));
        assert_eq!(config.api_upstream_url, DEFAULT_API_UPSTREAM_URL);
    }

    #[test]
    fn test_trailing_slashes_trimmed() {
        let config = Config::with_upstream(Some("https://api.example.com//".to_string()));
        assert_eq!(config.api_upstream_url, "https://api.example.com");
    }

    #[test]
    fn test_upstream_keeps_base_path() {
        let config = Config::with_upstream(Some("https://example.com/gallery/".to_string()));
        assert_eq!(
            config.upstream_url("/getImage", None),
            "https://example.com/gallery/getImage"
        );
    }

    #[test]
    fn test_upstream_url_with_query() {
        let config = Config::with_upstream(Some("http://localhost:5000".to_string()));
        assert_eq!(
            config.upstream_url("resetPassword/42", Some("lang=en")),
            "http://localhost:5000/resetPassword/42?lang=en"
        );
        assert_eq!(
            config.upstream_url("/login", Some("")),
            "http://localhost:5000/login"
        );
    }
}
