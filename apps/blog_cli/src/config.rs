use std::{fs, io::ErrorKind, path::Path};

use anyhow::{bail, Context};
use client_core::{list::DEFAULT_PAGE_SIZE, DEFAULT_API_URL};

pub const CONFIG_FILE: &str = "blog_client.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub page_size: u32,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            page_size: DEFAULT_PAGE_SIZE,
            log_filter: "info".into(),
        }
    }
}

/// Defaults, then `blog_client.toml` in the working directory, then the
/// environment.
pub fn load_settings() -> anyhow::Result<Settings> {
    let raw = match fs::read_to_string(CONFIG_FILE) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == ErrorKind::NotFound => None,
        Err(err) => {
            return Err(err).with_context(|| {
                format!("failed to read '{}'", Path::new(CONFIG_FILE).display())
            })
        }
    };

    settings_from_sources(raw.as_deref(), |key| std::env::var(key).ok())
}

pub fn settings_from_sources(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        let table: toml::Table =
            toml::from_str(raw).with_context(|| format!("invalid {CONFIG_FILE}"))?;
        if let Some(v) = table.get("api_url") {
            let Some(url) = v.as_str() else {
                bail!("api_url in {CONFIG_FILE} must be a string");
            };
            settings.api_url = url.to_string();
        }
        if let Some(v) = table.get("page_size") {
            if let Some(size) = v.as_integer().and_then(|n| u32::try_from(n).ok()) {
                apply_page_size(&mut settings, size);
            }
        }
        if let Some(v) = table.get("log_filter").and_then(|v| v.as_str()) {
            settings.log_filter = v.to_string();
        }
    }

    if let Some(v) = env("BLOG_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = env("APP__PAGE_SIZE") {
        if let Ok(size) = v.trim().parse::<u32>() {
            apply_page_size(&mut settings, size);
        }
    }

    if let Some(v) = env("RUST_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    Ok(settings)
}

pub fn apply_page_size(settings: &mut Settings, size: u32) {
    if size > 0 {
        settings.page_size = size;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
