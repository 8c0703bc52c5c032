use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Missing required settings: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("Unsupported config version {0} (expected {expected})", expected = crate::config::CONFIG_VERSION)]
    UnsupportedVersion(u32),
}

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Kanboard request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Kanboard returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Kanboard error in {method}: {error}")]
    Rpc { method: String, error: String },

    #[error("Kanboard returned no result for {method}")]
    MissingResult { method: String },

    #[error("Unexpected {method} payload: {source}")]
    Decode {
        method: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to write report '{path}': {source}")]
    WriteReport {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Invalid email address '{address}': {source}")]
    Address {
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("No recipients configured")]
    NoRecipients,

    #[error("Failed to build email message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Tracker error: {0}")]
    Tracker(#[from] TrackerError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),
}
