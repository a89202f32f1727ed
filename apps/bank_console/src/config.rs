use std::{fs, io::ErrorKind, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use url::Url;

pub const SETTINGS_FILE: &str = "bank_console.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSettings {
    pub base_url: String,
    pub log_filter: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            base_url: "https://backendbank-system-production.up.railway.app/v1/api".into(),
            log_filter: "info".into(),
            request_timeout_secs: None,
        }
    }
}

impl ConsoleSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    base_url: Option<String>,
    log_filter: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then `bank_console.toml` in the working directory, then the
/// environment, then `--server-url`.
pub fn load_settings(server_url: Option<&str>) -> anyhow::Result<ConsoleSettings> {
    let raw = match fs::read_to_string(SETTINGS_FILE) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == ErrorKind::NotFound => None,
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read '{SETTINGS_FILE}'"));
        }
    };

    resolve_settings(
        raw.as_deref().map(|raw| (Path::new(SETTINGS_FILE), raw)),
        |key| std::env::var(key).ok(),
        server_url,
    )
}

fn resolve_settings(
    file: Option<(&Path, &str)>,
    env: impl Fn(&str) -> Option<String>,
    server_url: Option<&str>,
) -> anyhow::Result<ConsoleSettings> {
    let mut settings = ConsoleSettings::default();

    if let Some((path, raw)) = file {
        let file_cfg: FileSettings = toml::from_str(raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?;
        if let Some(v) = file_cfg.base_url {
            settings.base_url = v;
        }
        if let Some(v) = file_cfg.log_filter {
            settings.log_filter = v;
        }
        if file_cfg.request_timeout_secs.is_some() {
            settings.request_timeout_secs = file_cfg.request_timeout_secs;
        }
    }

    if let Some(v) = env("BANK_API_URL") {
        settings.base_url = v;
    }
    if let Some(v) = env("APP__BASE_URL") {
        settings.base_url = v;
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        let secs = v
            .trim()
            .parse::<u64>()
            .with_context(|| format!("APP__REQUEST_TIMEOUT_SECS must be whole seconds, got '{v}'"))?;
        settings.request_timeout_secs = (secs > 0).then_some(secs);
    }

    if let Some(v) = server_url {
        settings.base_url = v.to_string();
    }

    Url::parse(&settings.base_url)
        .with_context(|| format!("invalid service url '{}'", settings.base_url))?;

    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
