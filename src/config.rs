use std::{env, path::PathBuf};

use thiserror::Error;

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_TOKEN_PATH: &str = ".tugas-token";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be an http(s) URL, got '{value}'")]
    InvalidUrl { name: &'static str, value: String },

    #[error("{name} must be true/false or 1/0, got '{value}'")]
    InvalidBool { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// backend base URL, without trailing slash
    pub api_url: String,
    pub token_path: PathBuf,
    pub log_level: String,
    pub log_json: bool,
}

impl Config {
    /// Reads `.env` if present, then the `TUGAS_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("TUGAS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl {
                name: "TUGAS_API_URL",
                value: api_url,
            });
        }

        let log_json = match lookup("TUGAS_LOG_JSON").as_deref() {
            None | Some("") | Some("false") | Some("0") => false,
            Some("true") | Some("1") => true,
            Some(other) => {
                return Err(ConfigError::InvalidBool {
                    name: "TUGAS_LOG_JSON",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token_path: lookup("TUGAS_TOKEN_PATH")
                .unwrap_or_else(|| DEFAULT_TOKEN_PATH.to_string())
                .into(),
            log_level: lookup("TUGAS_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_json,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.token_path, PathBuf::from(DEFAULT_TOKEN_PATH));
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
    }

    #[test]
    fn trims_trailing_slash() {
        let config = config_from(&[("TUGAS_API_URL", "https://sekolah.example/api/")]).unwrap();
        assert_eq!(config.api_url, "https://sekolah.example/api");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config_from(&[("TUGAS_API_URL", "sekolah.example")]),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            config_from(&[("TUGAS_LOG_JSON", "yes")]),
            Err(ConfigError::InvalidBool { .. })
        ));
    }
}
