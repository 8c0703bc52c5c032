use crate::error::OutputError;
use crate::summarize::SummaryOutcome;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

const SUMMARY_HEADER: &str = "===== HF Summary =====";
const RAW_HEADER: &str = "===== Kanboard Raw Report =====";

pub fn report_file_name<Tz>(generated_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("kanboard_report_{}.txt", generated_at.format("%Y%m%d_%H%M%S"))
}

/// Write the run's report file and return its path.
///
/// A generated summary is written ahead of the raw report; an unavailable
/// summary is left out of the file entirely. Existing files are never
/// overwritten.
pub fn persist_report<Tz>(
    report_dir: &Path,
    generated_at: &DateTime<Tz>,
    report: &str,
    summary: &SummaryOutcome,
) -> Result<PathBuf, OutputError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fs::create_dir_all(report_dir).map_err(OutputError::CreateDir)?;
    let path = report_dir.join(report_file_name(generated_at));

    let mut content = String::new();
    if let Some(text) = summary.generated() {
        content.push_str(SUMMARY_HEADER);
        content.push('\n');
        content.push_str(text);
        content.push_str("\n\n");
    }
    content.push_str(RAW_HEADER);
    content.push('\n');
    content.push_str(report);

    let write_err = |source| OutputError::WriteReport {
        path: path.clone(),
        source,
    };
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(write_err)?;
    file.write_all(content.as_bytes()).map_err(write_err)?;

    info!("Report saved locally: {}", path.display());
    Ok(path)
}

/// What a dry run prints: the raw report, then the summary or its placeholder
pub fn stdout_view(report: &str, summary: &SummaryOutcome) -> String {
    format!(
        "{}\n{}\n\n{}\n{}\n",
        RAW_HEADER,
        report,
        SUMMARY_HEADER,
        summary.display_text()
    )
}

pub fn email_subject(project_id: u64) -> String {
    format!("Kanboard Report - Project {}", project_id)
}

pub fn email_body(report: &str, summary: &SummaryOutcome) -> String {
    format!(
        "Hugging Face summary:\n\n{}\n\n---\n\n{}",
        summary.display_text(),
        report
    )
}
