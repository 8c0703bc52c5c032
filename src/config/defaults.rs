use std::path::PathBuf;

pub fn default_version() -> u32 {
    super::CONFIG_VERSION
}

pub fn default_report_dir() -> PathBuf {
    PathBuf::from("reports")
}

pub fn default_timeout_sec() -> u64 {
    30
}

pub fn default_project_id() -> u64 {
    16
}

pub fn default_active_columns() -> Vec<String> {
    ["work in progress", "dev", "qc", "uat", "staging", "production"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

pub fn default_endpoint() -> String {
    "https://router.huggingface.co/v1/chat/completions".to_string()
}

pub fn default_model() -> String {
    "meta-llama/Meta-Llama-3-8B-Instruct".to_string()
}

pub fn default_max_tokens() -> u32 {
    350
}

pub fn default_temperature() -> f32 {
    0.4
}

pub fn default_smtp_host() -> String {
    "ttc-prod.smtps.jp".to_string()
}

pub fn default_smtp_port() -> u16 {
    587
}
