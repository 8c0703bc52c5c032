use crate::cli::RunArgs;
use crate::config::{
    required, Config, ENV_EMAIL_PASS, ENV_EMAIL_USER, ENV_HF_API_KEY, ENV_KB_TOKEN, ENV_KB_URL,
    ENV_KB_USER,
};
use crate::mail::{MailTransport, SmtpMailer};
use crate::output::stdout_view;
use crate::provider::HuggingFaceClient;
use crate::runner::Pipeline;
use crate::tracker::KanboardClient;
use chrono::Local;
use tracing::{debug, info};

pub async fn execute(args: RunArgs) -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables take precedence
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded environment from {:?}", path);
    }

    let mut config = Config::discover(args.config.as_deref())?;
    config.apply_env(|key| std::env::var(key).ok())?;

    // Apply CLI overrides
    if let Some(project_id) = args.project_id {
        config.kanboard.project_id = project_id;
    }
    if let Some(report_dir) = args.report_dir {
        config.report_dir = report_dir;
    }

    // Validate before any network or filesystem work
    config.validate()?;

    let timeout = config.timeout();
    let source = KanboardClient::new(
        required(&config.kanboard.url, ENV_KB_URL)?,
        required(&config.kanboard.user, ENV_KB_USER)?,
        required(&config.kanboard.token, ENV_KB_TOKEN)?,
        timeout,
    )?;
    let generator = HuggingFaceClient::new(
        config.summarizer.endpoint.clone(),
        required(&config.summarizer.api_key, ENV_HF_API_KEY)?,
        timeout,
    )?;
    let mailer = if args.dry_run {
        None
    } else {
        Some(SmtpMailer::new(
            &config.email.smtp_host,
            config.email.smtp_port,
            required(&config.email.user, ENV_EMAIL_USER)?,
            required(&config.email.password, ENV_EMAIL_PASS)?,
            timeout,
        )?)
    };

    info!(
        "Building report for project {} ({})",
        config.kanboard.project_id,
        if args.dry_run { "dry run" } else { "live" }
    );

    let pipeline = Pipeline {
        config: &config,
        source: &source,
        generator: &generator,
        mailer: mailer.as_ref().map(|m| m as &dyn MailTransport),
    };
    let run = pipeline.run(&Local::now()).await?;

    if args.dry_run {
        print!("{}", stdout_view(&run.report, &run.summary));
    }

    info!(
        "Run complete: {} tasks, {} in progress, {} blocked, saved to {}, emailed: {}",
        run.total_tasks,
        run.active,
        run.blocked,
        run.report_path.display(),
        run.delivered
    );

    Ok(())
}
