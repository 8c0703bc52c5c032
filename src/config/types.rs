use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,

    /// Timeout applied to every tracker, model and SMTP call
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,

    #[serde(default)]
    pub kanboard: KanboardConfig,

    #[serde(default)]
    pub classification: ClassificationConfig,

    #[serde(default)]
    pub summarizer: SummarizerConfig,

    #[serde(default)]
    pub email: EmailConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct KanboardConfig {
    /// JSON-RPC endpoint, e.g. https://kanboard.example.com/jsonrpc.php
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default, skip_serializing)]
    pub token: Option<String>,

    #[serde(default = "default_project_id")]
    pub project_id: u64,
}

impl Default for KanboardConfig {
    fn default() -> Self {
        Self {
            url: None,
            user: None,
            token: None,
            project_id: default_project_id(),
        }
    }
}

/// Column names per bucket, matched case-insensitively
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ClassificationConfig {
    #[serde(default = "default_active_columns")]
    pub active_columns: Vec<String>,

    #[serde(default)]
    pub blocked_columns: Vec<String>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            active_columns: default_active_columns(),
            blocked_columns: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct SummarizerConfig {
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_endpoint(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct EmailConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP login, also used as the From address
    #[serde(default)]
    pub user: Option<String>,

    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    /// Comma-separated recipient list
    #[serde(default)]
    pub to: Option<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            user: None,
            password: None,
            to: None,
        }
    }
}
