use anyhow::{Context, Result};

const DEFAULT_KEYWORD_LIMIT: usize = 30;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_EMBEDDINGS_TIMEOUT_SECS: u64 = 30;

/// Remote embedding backend settings. Present only when `EMBEDDINGS_URL` is set.
#[derive(Debug, Clone)]
pub struct EmbeddingsConfig {
    pub url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

/// Application configuration loaded from environment variables.
/// Every variable has a default except `EMBEDDINGS_MODEL`, which becomes
/// required once `EMBEDDINGS_URL` is set.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub upload_dir: String,
    pub keyword_limit: usize,
    pub max_upload_bytes: usize,
    pub embeddings: Option<EmbeddingsConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let embeddings = match optional_env("EMBEDDINGS_URL") {
            Some(url) => Some(EmbeddingsConfig {
                url,
                model: require_env("EMBEDDINGS_MODEL")?,
                api_key: optional_env("EMBEDDINGS_API_KEY"),
                timeout_secs: parse_env("EMBEDDINGS_TIMEOUT_SECS", DEFAULT_EMBEDDINGS_TIMEOUT_SECS)?,
            }),
            None => None,
        };

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            upload_dir: std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            keyword_limit: parse_env("KEYWORD_LIMIT", DEFAULT_KEYWORD_LIMIT)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            embeddings,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            upload_dir: "uploads".to_string(),
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            embeddings: None,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_falls_back_to_default() {
        let value: usize = parse_env("SCREENER_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("SCREENER_TEST_BAD_NUMBER", "not-a-number");
        let result: Result<u16> = parse_env("SCREENER_TEST_BAD_NUMBER", 1);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_config_has_no_remote_backend() {
        let config = Config::default();
        assert!(config.embeddings.is_none());
        assert_eq!(config.keyword_limit, 30);
    }
}
