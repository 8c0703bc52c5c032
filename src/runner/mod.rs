use crate::classify::classify;
use crate::config::{required, Config, ENV_EMAIL_TO, ENV_EMAIL_USER};
use crate::error::RunError;
use crate::mail::{parse_recipients, MailTransport, OutgoingMail};
use crate::output::{build_report, email_body, email_subject, persist_report};
use crate::provider::TextGenerator;
use crate::summarize::{summarize, SummaryOutcome};
use crate::tracker::{fetch_tasks, TaskSource};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::path::PathBuf;
use tracing::{debug, info};

/// Everything one run produced
#[derive(Debug)]
pub struct RunReport {
    pub report: String,
    pub summary: SummaryOutcome,
    pub report_path: PathBuf,
    pub total_tasks: usize,
    pub active: usize,
    pub blocked: usize,
    pub delivered: bool,
}

/// One linear pass: fetch, classify, build, summarize, persist, deliver.
///
/// Without a mailer the run stops after persisting (dry run).
pub struct Pipeline<'a> {
    pub config: &'a Config,
    pub source: &'a dyn TaskSource,
    pub generator: &'a dyn TextGenerator,
    pub mailer: Option<&'a dyn MailTransport>,
}

impl Pipeline<'_> {
    pub async fn run<Tz>(&self, generated_at: &DateTime<Tz>) -> Result<RunReport, RunError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let project_id = self.config.kanboard.project_id;

        let tasks = fetch_tasks(self.source, project_id).await?;
        let buckets = classify(&tasks, &self.config.classification);
        debug!(
            "Classified {} of {} tasks into report buckets",
            buckets.classified(),
            tasks.len()
        );
        let report = build_report(project_id, generated_at, &buckets);

        let summary = summarize(self.generator, &self.config.summarizer, &report).await;

        // Persist before delivery so a mail failure never loses the report
        let report_path = persist_report(&self.config.report_dir, generated_at, &report, &summary)?;

        let delivered = match self.mailer {
            Some(mailer) => {
                let mail = OutgoingMail {
                    from: required(&self.config.email.user, ENV_EMAIL_USER)?.to_string(),
                    to: parse_recipients(required(&self.config.email.to, ENV_EMAIL_TO)?),
                    subject: email_subject(project_id),
                    body: email_body(&report, &summary),
                };
                mailer.send(&mail).await?;
                info!(
                    "Report sent: WIP={} Blocked={}",
                    buckets.active.len(),
                    buckets.blocked.len()
                );
                true
            }
            None => false,
        };

        Ok(RunReport {
            total_tasks: tasks.len(),
            active: buckets.active.len(),
            blocked: buckets.blocked.len(),
            report,
            summary,
            report_path,
            delivered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MailError, ProviderError, TrackerError};
    use crate::provider::CompletionRequest;
    use crate::tracker::Task;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    struct StaticSource(Vec<Task>);

    #[async_trait]
    impl TaskSource for StaticSource {
        async fn fetch_all(&self, _project_id: u64) -> Result<Vec<Task>, TrackerError> {
            Ok(self.0.clone())
        }

        async fn resolve_column(&self, _task_id: &str) -> Result<Option<String>, TrackerError> {
            Ok(Some("Dev".to_string()))
        }
    }

    struct FailingSource;

    #[async_trait]
    impl TaskSource for FailingSource {
        async fn fetch_all(&self, _project_id: u64) -> Result<Vec<Task>, TrackerError> {
            Err(TrackerError::Status {
                status: 500,
                body: "down".to_string(),
            })
        }

        async fn resolve_column(&self, _task_id: &str) -> Result<Option<String>, TrackerError> {
            Ok(None)
        }
    }

    struct Generator(Option<&'static str>);

    #[async_trait]
    impl TextGenerator for Generator {
        fn name(&self) -> &'static str {
            "test"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<String, ProviderError> {
            self.0
                .map(|s| s.to_string())
                .ok_or_else(|| ProviderError::MalformedResponse("no choices".to_string()))
        }
    }

    #[derive(Default)]
    struct Outbox {
        sent: Mutex<Vec<OutgoingMail>>,
        fail: bool,
    }

    #[async_trait]
    impl MailTransport for Outbox {
        async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
            if self.fail {
                return Err(MailError::NoRecipients);
            }
            self.sent.lock().unwrap().push(mail.clone());
            Ok(())
        }
    }

    fn task(id: &str, column: Option<&str>) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            column_name: column.map(|c| c.to_string()),
            date_due: None,
        }
    }

    fn config(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.report_dir = dir.path().join("reports");
        config.classification.active_columns = vec!["dev".to_string(), "uat".to_string()];
        config.email.user = Some("bot@example.com".to_string());
        config.email.to = Some("a@example.com, b@example.com".to_string());
        config
    }

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 6, 0, 0).unwrap()
    }

    fn scenario() -> StaticSource {
        StaticSource(vec![
            task("1", Some("Dev")),
            task("2", Some("UAT")),
            task("3", Some("Blocked")),
        ])
    }

    /// Collects formatted log output for assertions
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[tokio::test]
    async fn test_live_run_persists_then_delivers() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        let outbox = Outbox::default();
        let pipeline = Pipeline {
            config: &config,
            source: &scenario(),
            generator: &Generator(Some("All good")),
            mailer: Some(&outbox),
        };

        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let run = pipeline.run(&generated_at()).await.unwrap();

        assert!(logs.contents().contains("Report sent: WIP=2 Blocked=0"));

        assert_eq!((run.total_tasks, run.active, run.blocked), (3, 2, 0));
        assert!(run.delivered);
        assert!(run.report.contains("Summary counts: InProgress=2, Blocked=0"));

        let saved = std::fs::read_to_string(&run.report_path).unwrap();
        assert!(saved.starts_with("===== HF Summary =====\nAll good\n\n"));

        let sent = outbox.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, "bot@example.com");
        assert_eq!(sent[0].to, vec!["a@example.com", "b@example.com"]);
        assert_eq!(sent[0].subject, "Kanboard Report - Project 16");
        assert!(sent[0].body.starts_with("Hugging Face summary:\n\nAll good\n\n---\n\n"));
    }

    #[tokio::test]
    async fn test_summary_failure_still_persists_raw_report() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        let outbox = Outbox::default();
        let pipeline = Pipeline {
            config: &config,
            source: &scenario(),
            generator: &Generator(None),
            mailer: Some(&outbox),
        };

        let run = pipeline.run(&generated_at()).await.unwrap();

        assert!(matches!(run.summary, SummaryOutcome::Unavailable { .. }));
        let saved = std::fs::read_to_string(&run.report_path).unwrap();
        assert!(saved.starts_with("===== Kanboard Raw Report =====\n"));
        assert!(!saved.contains("HF Summary"));

        let sent = outbox.sent.lock().unwrap();
        assert!(sent[0].body.contains("Unable to generate summary. Error: "));
    }

    #[tokio::test]
    async fn test_empty_summary_is_left_out_of_saved_report() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        let outbox = Outbox::default();
        let pipeline = Pipeline {
            config: &config,
            source: &scenario(),
            generator: &Generator(Some("")),
            mailer: Some(&outbox),
        };

        let run = pipeline.run(&generated_at()).await.unwrap();

        assert_eq!(run.summary.generated(), None);
        let saved = std::fs::read_to_string(&run.report_path).unwrap();
        assert!(saved.starts_with("===== Kanboard Raw Report =====\n"));
        assert!(!saved.contains("HF Summary"));

        let sent = outbox.sent.lock().unwrap();
        assert!(sent[0]
            .body
            .starts_with("Hugging Face summary:\n\nUnable to generate summary. Error: empty completion\n\n---\n\n"));
        assert!(sent[0].body.ends_with(&run.report));
    }

    #[tokio::test]
    async fn test_dry_run_does_not_deliver() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        let pipeline = Pipeline {
            config: &config,
            source: &StaticSource(vec![task("9", None)]),
            generator: &Generator(Some("ok")),
            mailer: None,
        };

        let run = pipeline.run(&generated_at()).await.unwrap();

        assert!(!run.delivered);
        assert_eq!(run.active, 1);
        assert!(run.report_path.exists());
    }

    #[tokio::test]
    async fn test_mail_failure_is_fatal_after_persisting() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        let outbox = Outbox {
            fail: true,
            ..Outbox::default()
        };
        let pipeline = Pipeline {
            config: &config,
            source: &scenario(),
            generator: &Generator(Some("ok")),
            mailer: Some(&outbox),
        };

        let err = pipeline.run(&generated_at()).await.unwrap_err();

        assert!(matches!(err, RunError::Mail(_)));
        let saved = config.report_dir.join("kanboard_report_20261016_060000.txt");
        assert!(saved.exists());
    }

    #[tokio::test]
    async fn test_tracker_failure_produces_no_report() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        let pipeline = Pipeline {
            config: &config,
            source: &FailingSource,
            generator: &Generator(Some("ok")),
            mailer: None,
        };

        let err = pipeline.run(&generated_at()).await.unwrap_err();

        assert!(matches!(err, RunError::Tracker(_)));
        assert!(!config.report_dir.exists());
    }
}
