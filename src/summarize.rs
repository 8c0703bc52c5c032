use crate::config::SummarizerConfig;
use crate::provider::{CompletionRequest, TextGenerator};
use tracing::{error, info, warn};

/// Result of asking the model for a narrative summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Generated(String),
    Unavailable { reason: String },
}

impl SummaryOutcome {
    /// The model's text, only when it actually produced one
    pub fn generated(&self) -> Option<&str> {
        match self {
            SummaryOutcome::Generated(text) => Some(text.as_str()),
            SummaryOutcome::Unavailable { .. } => None,
        }
    }

    /// Text for printed and emailed views, with a placeholder when unavailable
    pub fn display_text(&self) -> String {
        match self {
            SummaryOutcome::Generated(text) => text.clone(),
            SummaryOutcome::Unavailable { reason } => {
                format!("Unable to generate summary. Error: {}", reason)
            }
        }
    }
}

pub fn build_prompt(report: &str) -> String {
    format!(
        "\nYou are a project management assistant.\n\n\
         Summarize the following Kanboard report in:\n\
         1. 3 key risk points\n\
         2. 3 recommended actions\n\
         3. 2 productivity improvement tips\n\n\
         Report:\n{}\n",
        report
    )
}

/// Ask the model to summarize `report`. Provider failures and blank replies
/// are logged and folded into [`SummaryOutcome::Unavailable`]; this never fails.
pub async fn summarize(
    generator: &dyn TextGenerator,
    config: &SummarizerConfig,
    report: &str,
) -> SummaryOutcome {
    let request = CompletionRequest::new(build_prompt(report), config);

    match generator.complete(&request).await {
        Ok(text) if text.trim().is_empty() => {
            warn!("{} returned an empty summary", generator.name());
            SummaryOutcome::Unavailable {
                reason: "empty completion".to_string(),
            }
        }
        Ok(text) => {
            info!("Summary generated by {} ({})", generator.name(), config.model);
            SummaryOutcome::Generated(text)
        }
        Err(e) => {
            error!("{} summarization failed: {}", generator.name(), e);
            SummaryOutcome::Unavailable {
                reason: e.to_string(),
            }
        }
    }
}
