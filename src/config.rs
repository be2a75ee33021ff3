use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Eldercare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Session history keeps only this many recent turns.
pub const MAX_SESSION_TURNS: usize = 20;

pub const DEFAULT_USER_NAME: &str = "User";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;

pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_USER_NAME: &str = "ELDERCARE_USER";
pub const ENV_DATA_DIR: &str = "ELDERCARE_DATA_DIR";
pub const ENV_BIND_ADDR: &str = "ELDERCARE_BIND";
pub const ENV_MODEL: &str = "ELDERCARE_MODEL";
pub const ENV_BASE_URL: &str = "GEMINI_BASE_URL";
pub const ENV_LLM_TIMEOUT: &str = "ELDERCARE_LLM_TIMEOUT_SECS";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "eldercare_lib=info,eldercare=info,tower_http=warn"
}

/// Get the application data directory.
/// ~/Eldercare/ when a home directory is known, the working directory otherwise.
pub fn app_data_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(APP_NAME),
        None => PathBuf::from("."),
    }
}

/// Data file name for a user: `{lowercased name}_health_data.json`.
pub fn user_data_file_name(user_name: &str) -> String {
    format!("{}_health_data.json", user_name.to_lowercase())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Please set the GEMINI_API_KEY environment variable")]
    MissingApiKey,
    #[error("Invalid bind address '{0}': {1}")]
    InvalidBindAddress(String, std::net::AddrParseError),
    #[error("Invalid LLM timeout '{0}': expected a whole number of seconds")]
    InvalidTimeout(String),
}

/// Runtime configuration, resolved once at startup.
#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub user_name: String,
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub model: String,
    pub base_url: String,
    pub llm_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("user_name", &self.user_name)
            .field("data_dir", &self.data_dir)
            .field("bind_addr", &self.bind_addr)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .finish()
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset. The API key is the only
    /// required value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(ENV_API_KEY).ok_or(ConfigError::MissingApiKey)?;

        let bind_raw = get(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidBindAddress(bind_raw.clone(), e))?;

        let llm_timeout_secs = match get(ENV_LLM_TIMEOUT) {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?,
            None => DEFAULT_LLM_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            user_name: get(ENV_USER_NAME).unwrap_or_else(|| DEFAULT_USER_NAME.to_string()),
            data_dir: get(ENV_DATA_DIR).map(PathBuf::from).unwrap_or_else(app_data_dir),
            bind_addr,
            model: get(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: get(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            llm_timeout_secs,
        })
    }

    /// Full path of the per-user JSON data file.
    pub fn user_data_path(&self) -> PathBuf {
        self.data_dir.join(user_data_file_name(&self.user_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn app_data_dir_ends_with_app_name() {
        let dir = app_data_dir();
        if dirs::home_dir().is_some() {
            assert!(dir.ends_with("Eldercare"));
        }
    }

    #[test]
    fn data_file_name_is_lowercased() {
        assert_eq!(user_data_file_name("User"), "user_health_data.json");
        assert_eq!(user_data_file_name("MARTHA"), "martha_health_data.json");
    }

    #[test]
    fn missing_api_key_fails_fast() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let err = AppConfig::from_lookup(lookup_from(&[(ENV_API_KEY, "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[(ENV_API_KEY, "secret")])).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.user_name, DEFAULT_USER_NAME);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(config.llm_timeout_secs, DEFAULT_LLM_TIMEOUT_SECS);
    }

    #[test]
    fn overrides_are_read() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "secret"),
            (ENV_USER_NAME, "Martha"),
            (ENV_DATA_DIR, "/tmp/eldercare-test"),
            (ENV_BIND_ADDR, "0.0.0.0:8080"),
            (ENV_MODEL, "gemini-1.5-flash"),
            (ENV_LLM_TIMEOUT, "30"),
        ]))
        .unwrap();
        assert_eq!(config.user_name, "Martha");
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.llm_timeout_secs, 30);
        assert_eq!(
            config.user_data_path(),
            PathBuf::from("/tmp/eldercare-test/martha_health_data.json")
        );
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "secret"),
            (ENV_BIND_ADDR, "not-an-address"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddress(..)));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            (ENV_API_KEY, "secret"),
            (ENV_LLM_TIMEOUT, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(_)));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = AppConfig::from_lookup(lookup_from(&[(ENV_API_KEY, "secret")])).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn app_name_is_eldercare() {
        assert_eq!(APP_NAME, "Eldercare");
    }
}
