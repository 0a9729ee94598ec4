use std::{fs, time::Duration};

use events_client::config::{API_URL_ENV_KEYS, DEFAULT_API_URL};
use serde::Deserialize;

const SETTINGS_FILE: &str = "site.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub api_url: String,
    pub cache_ttl_seconds: u64,
    pub upstream_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            api_url: DEFAULT_API_URL.into(),
            cache_ttl_seconds: 60,
            upstream_timeout_ms: 10_000,
        }
    }
}

impl Settings {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    api_url: Option<String>,
    cache_ttl_seconds: Option<u64>,
    upstream_timeout_ms: Option<u64>,
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<FileSettings>(raw) else {
        tracing::warn!(file = SETTINGS_FILE, "ignoring unreadable settings file");
        return;
    };

    if let Some(v) = file_cfg.bind_addr {
        settings.server_bind = v;
    }
    if let Some(v) = file_cfg.api_url {
        settings.api_url = v;
    }
    if let Some(v) = file_cfg.cache_ttl_seconds {
        settings.cache_ttl_seconds = v;
    }
    if let Some(v) = file_cfg.upstream_timeout_ms {
        settings.upstream_timeout_ms = v;
    }
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SITE_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = lookup("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    // Keys are listed highest priority first.
    if let Some(v) = API_URL_ENV_KEYS
        .iter()
        .filter_map(|key| lookup(*key))
        .find(|value| !value.trim().is_empty())
    {
        settings.api_url = v;
    }

    if let Some(v) = lookup("APP__CACHE_TTL_SECONDS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.cache_ttl_seconds = parsed;
        }
    }
    if let Some(v) = lookup("APP__UPSTREAM_TIMEOUT_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.upstream_timeout_ms = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
