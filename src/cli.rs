use crate::{
    config::Config,
    mailer::Mailer,
    queue::TsQueue,
    report::{self, Report},
    snapshot,
    util::{ensure_dir, local_hostname, now_rfc3339},
};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "ts-notify")]
#[command(about = "Emails a report when a task-spooler job finishes")]
pub struct Args {
    /// Job id, as passed by the queue tool's finish hook.
    #[arg(required_unless_present = "dry_run")]
    pub job_id: Option<String>,

    /// Exit code of the finished job.
    #[arg(required_unless_present = "dry_run")]
    pub exit_code: Option<String>,

    /// Job output file reported by the queue tool (logged, otherwise unused).
    #[arg(required_unless_present = "dry_run")]
    pub outfile: Option<PathBuf>,

    /// Original command line, possibly containing `:::` groups.
    #[arg(required_unless_present = "dry_run")]
    pub command: Option<String>,

    /// Send a placeholder email without consulting the queue tool.
    #[arg(long)]
    pub dry_run: bool,

    /// Path to config TOML. If omitted, uses ./ts-notify.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

/// The four positional finish-hook parameters, unwrapped.
pub struct JobArgs {
    pub job_id: String,
    pub exit_code: String,
    pub outfile: PathBuf,
    pub command: String,
}

impl JobArgs {
    fn from_cli(args: &Args) -> Result<Self> {
        Ok(Self {
            job_id: args.job_id.clone().ok_or_else(|| anyhow!("missing job id"))?,
            exit_code: args
                .exit_code
                .clone()
                .ok_or_else(|| anyhow!("missing exit code"))?,
            outfile: args
                .outfile
                .clone()
                .ok_or_else(|| anyhow!("missing output file"))?,
            command: args
                .command
                .clone()
                .ok_or_else(|| anyhow!("missing command"))?,
        })
    }
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg_path = resolve_config_path(args.config.as_deref())?;
    let cfg = Config::load(&cfg_path)?;
    let _guard = init_logging(&args, &cfg)?;

    if args.dry_run {
        return dry_run(&cfg);
    }

    let job = JobArgs::from_cli(&args)?;
    notify(&cfg, &job)
}

fn resolve_config_path(user: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = user {
        return Ok(p.to_path_buf());
    }
    let default = PathBuf::from("ts-notify.toml");
    if default.exists() {
        Ok(default)
    } else {
        Ok(PathBuf::from("ts-notify.example.toml"))
    }
}

fn init_logging(args: &Args, cfg: &Config) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = resolve_log_path(cfg) {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        // Append: the log is an audit record across invocations.
        let file = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .with_context(|| format!("open log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn resolve_log_path(cfg: &Config) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }
    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }
    Some(PathBuf::from("ts-notify.log"))
}

fn notify(cfg: &Config, job: &JobArgs) -> Result<()> {
    info!(
        "job {} finished with exit {} (output: {})",
        job.job_id,
        job.exit_code,
        job.outfile.display()
    );

    let queue = TsQueue::new(cfg);
    let snap = snapshot::collect(&queue, &job.job_id);

    let hostname = local_hostname();
    let finished_at = now_rfc3339();
    let rendered = report::build(&report::ReportInput {
        job_id: &job.job_id,
        exit_code: &job.exit_code,
        command: &job.command,
        info: &snap.info,
        queued: snap.queued,
        hostname: &hostname,
        finished_at: &finished_at,
    });

    info!("subject: {}", rendered.subject);
    info!("body:\n{}", rendered.body);

    Mailer::new(&cfg.mail).send(&rendered)?;

    if cfg.global.print_summary {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "job_id": job.job_id,
                "subject": rendered.subject,
                "queued": snap.queued,
                "status": "sent",
            }))?
        );
    }

    Ok(())
}

fn dry_run(cfg: &Config) -> Result<()> {
    let hostname = local_hostname();
    let rendered = Report {
        subject: format!("[TS] dry run - {hostname}"),
        body: format!(
            "Mail delivery test from {hostname} at {}.\n\
             The queue tool was not consulted.\n\
             \n\
             {}\n",
            now_rfc3339(),
            report::SIGNATURE
        ),
    };

    info!("subject: {}", rendered.subject);
    debug!("body:\n{}", rendered.body);

    Mailer::new(&cfg.mail).send(&rendered)?;

    if cfg.global.print_summary {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "subject": rendered.subject,
                "status": "sent",
            }))?
        );
    }

    Ok(())
}
