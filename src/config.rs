use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/state.json";
pub const DEFAULT_COMPLETION_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_COMPLETION_MODEL: &str = "llama3-70b-8192";
pub const DEFAULT_REFLECTION_DELAY: Duration = Duration::from_millis(2_000);

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub completion_url: String,
    pub completion_model: String,
    pub api_key: Option<String>,
    pub reflection_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            completion_url: DEFAULT_COMPLETION_URL.to_string(),
            completion_model: DEFAULT_COMPLETION_MODEL.to_string(),
            api_key: None,
            reflection_delay: DEFAULT_REFLECTION_DELAY,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any variable source; unset or unparsable values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: lookup("PORT")
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(defaults.port),
            data_path: resolve_data_path(lookup("APP_DATA_PATH")),
            completion_url: lookup("GROQ_API_URL").unwrap_or(defaults.completion_url),
            completion_model: lookup("GROQ_MODEL").unwrap_or(defaults.completion_model),
            api_key: lookup("GROQ_API_KEY").filter(|key| !key.trim().is_empty()),
            reflection_delay: lookup("REFLECTION_DELAY_MS")
                .and_then(|value| value.parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.reflection_delay),
        }
    }
}

pub fn resolve_data_path(configured: Option<String>) -> PathBuf {
    match configured {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_DATA_PATH),
    }
}
