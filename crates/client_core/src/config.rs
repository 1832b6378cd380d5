//! Backend base-URL configuration, resolved once at startup.
//!
//! Layering: built-in default, then an optional `scheduler.toml` next to the
//! working directory, then environment variables. The GUI binary may apply a
//! final CLI override on top.

use std::{collections::HashMap, env, fs};

use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000/api";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("scheduler.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("api_base_url") {
                settings.api_base_url = v.clone();
            }
        }
    }

    if let Ok(v) = env::var("SCHEDULER_API_URL") {
        settings.api_base_url = v;
    }
    if let Ok(v) = env::var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    settings.api_base_url = normalize_base_url(&settings.api_base_url);
    settings
}

/// Endpoint paths are joined with a single `/`, so the base must not end
/// with one. An empty value falls back to the local default.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DEFAULT_API_BASE_URL.to_string();
    }
    trimmed.trim_end_matches('/').to_string()
}
