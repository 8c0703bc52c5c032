mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use defaults::*;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "kanboard-digest.yaml";

/// Config file format this build understands
pub const CONFIG_VERSION: u32 = 1;

pub const ENV_KB_URL: &str = "KB_URL";
pub const ENV_KB_USER: &str = "KB_USER";
pub const ENV_KB_TOKEN: &str = "KB_TOKEN";
pub const ENV_KB_PROJECT_ID: &str = "KB_PROJECT_ID";
pub const ENV_HF_API_KEY: &str = "HF_API_KEY";
pub const ENV_HF_MODEL: &str = "HF_MODEL";
pub const ENV_SMTP_HOST: &str = "EMAIL_SMTP_HOST";
pub const ENV_SMTP_PORT: &str = "EMAIL_SMTP_PORT";
pub const ENV_EMAIL_USER: &str = "EMAIL_USER";
pub const ENV_EMAIL_PASS: &str = "EMAIL_PASS";
pub const ENV_EMAIL_TO: &str = "EMAIL_TO";

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            report_dir: default_report_dir(),
            timeout_sec: default_timeout_sec(),
            kanboard: KanboardConfig::default(),
            classification: ClassificationConfig::default(),
            summarizer: SummarizerConfig::default(),
            email: EmailConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load an explicitly requested file, or the default file when it exists.
    /// Without either, built-in defaults are used.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Overlay settings from the environment. Blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_KB_URL) {
            self.kanboard.url = Some(v);
        }
        if let Some(v) = get(ENV_KB_USER) {
            self.kanboard.user = Some(v);
        }
        if let Some(v) = get(ENV_KB_TOKEN) {
            self.kanboard.token = Some(v);
        }
        if let Some(v) = get(ENV_KB_PROJECT_ID) {
            self.kanboard.project_id = parse_value(ENV_KB_PROJECT_ID, &v)?;
        }
        if let Some(v) = get(ENV_HF_API_KEY) {
            self.summarizer.api_key = Some(v);
        }
        if let Some(v) = get(ENV_HF_MODEL) {
            self.summarizer.model = v;
        }
        if let Some(v) = get(ENV_SMTP_HOST) {
            self.email.smtp_host = v;
        }
        if let Some(v) = get(ENV_SMTP_PORT) {
            self.email.smtp_port = parse_value(ENV_SMTP_PORT, &v)?;
        }
        if let Some(v) = get(ENV_EMAIL_USER) {
            self.email.user = Some(v);
        }
        if let Some(v) = get(ENV_EMAIL_PASS) {
            self.email.password = Some(v);
        }
        if let Some(v) = get(ENV_EMAIL_TO) {
            self.email.to = Some(v);
        }

        Ok(())
    }

    /// Check that every required setting is present, reporting all gaps at once
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion(self.version));
        }

        let checks = [
            (ENV_HF_API_KEY, &self.summarizer.api_key),
            (ENV_KB_URL, &self.kanboard.url),
            (ENV_KB_USER, &self.kanboard.user),
            (ENV_KB_TOKEN, &self.kanboard.token),
            (ENV_EMAIL_USER, &self.email.user),
            (ENV_EMAIL_PASS, &self.email.password),
            (ENV_EMAIL_TO, &self.email.to),
        ];

        let missing: Vec<&'static str> = checks
            .iter()
            .filter(|(_, value)| is_blank(value))
            .map(|(key, _)| *key)
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_sec)
    }
}

/// Borrow a required setting, failing with the env key that supplies it
pub fn required<'a>(value: &'a Option<String>, key: &'static str) -> Result<&'a str, ConfigError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(vec![key])),
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}
