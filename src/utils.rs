use std::time::Duration;

/// API base URL used when neither the builder nor the environment sets one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/";

/// Environment variable that overrides [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "INMET_API_URL";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Base URL from `INMET_API_URL`, falling back to [`DEFAULT_BASE_URL`].
/// Blank values are ignored.
pub fn resolve_base_url() -> String {
    base_url_or_default(std::env::var(BASE_URL_ENV).ok())
}

fn base_url_or_default(from_env: Option<String>) -> String {
    from_env
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_fallback() {
        assert_eq!(base_url_or_default(None), DEFAULT_BASE_URL);
        assert_eq!(base_url_or_default(Some("  ".into())), DEFAULT_BASE_URL);
        assert_eq!(
            base_url_or_default(Some(" https://inmet.example/api/ ".into())),
            "https://inmet.example/api/"
        );
    }
}
