use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppProfile {
    Dev,
    Prod,
}

impl AppProfile {
    pub fn from_env(value: Option<String>) -> Self {
        match value.as_deref().map(str::trim) {
            Some("prod") | Some("production") => Self::Prod,
            _ => Self::Dev,
        }
    }

    pub fn log_level(self) -> tracing::Level {
        match self {
            Self::Dev => tracing::Level::DEBUG,
            Self::Prod => tracing::Level::INFO,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub model: String,
    pub profile: AppProfile,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            profile: AppProfile::Dev,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        crate::config::load_dotenv();

        Self::from_lookup(read_env)
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();

        config.api_key = read(API_KEY_VAR);

        if let Some(url) = read("PHYSICS_FACTS_API_BASE_URL") {
            config.api_base_url = url;
        }

        if let Some(model) = read("PHYSICS_FACTS_MODEL") {
            config.model = model;
        }

        config.profile = AppProfile::from_env(read("PHYSICS_FACTS_PROFILE"));

        config
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Model id without the optional `models/` resource prefix.
    pub fn model_id(&self) -> &str {
        self.model.trim_start_matches("models/")
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .or_else(|| option_env_from_build(key).map(|s| s.to_string()))
}

fn option_env_from_build(key: &str) -> Option<&'static str> {
    match key {
        "GEMINI_API_KEY" => option_env!("GEMINI_API_KEY"),
        "PHYSICS_FACTS_API_BASE_URL" => option_env!("PHYSICS_FACTS_API_BASE_URL"),
        "PHYSICS_FACTS_MODEL" => option_env!("PHYSICS_FACTS_MODEL"),
        "PHYSICS_FACTS_PROFILE" => option_env!("PHYSICS_FACTS_PROFILE"),
        _ => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv() {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            tracing::warn!("failed to load .env: {err}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[inline]
pub fn load_dotenv() {}

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
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.api_key(), None);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.profile, AppProfile::Dev);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = AppConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "   ")]));
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn reads_overrides_and_trims_values() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, " secret \n"),
            ("PHYSICS_FACTS_API_BASE_URL", "http://localhost:9000/v1/"),
            ("PHYSICS_FACTS_MODEL", "models/gemini-pro"),
            ("PHYSICS_FACTS_PROFILE", "production"),
        ]));
        assert_eq!(config.api_key(), Some("secret"));
        assert_eq!(config.api_base_url, "http://localhost:9000/v1/");
        assert_eq!(config.model_id(), "gemini-pro");
        assert_eq!(config.profile, AppProfile::Prod);
        assert_eq!(config.profile.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn unknown_profile_falls_back_to_dev() {
        assert_eq!(AppProfile::from_env(Some("staging".into())), AppProfile::Dev);
        assert_eq!(AppProfile::Dev.log_level(), tracing::Level::DEBUG);
    }
}
