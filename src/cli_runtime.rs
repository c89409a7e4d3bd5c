use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser};

use taskjson::commands::TaskConfig;
use taskjson::expansions::Expansions;
use taskjson::remote::{RetryPolicy, TaskClient, TaskContext};

use crate::Commands;

#[derive(Parser)]
#[command(name = "taskjson")]
#[command(about = "Send and fetch structured task result data", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    task: TaskArgs,

    #[command(subcommand)]
    command: Commands,
}

/// The task context the CI harness provides.
#[derive(Args)]
pub(crate) struct TaskArgs {
    /// Base URL of the taskjson server
    #[arg(long, env = "TASKJSON_URL", default_value = "http://127.0.0.1:8080", global = true)]
    url: String,

    /// Id of the task this command runs in
    #[arg(long, env = "TASKJSON_TASK_ID", default_value = "", global = true)]
    task_id: String,

    /// Secret of the task, if the server requires one
    #[arg(long, env = "TASKJSON_TASK_SECRET", global = true)]
    task_secret: Option<String>,

    /// Task working directory (defaults to the current directory)
    #[arg(long, env = "TASKJSON_WORK_DIR", global = true)]
    work_dir: Option<PathBuf>,

    /// JSON file of expansion values
    #[arg(long, global = true)]
    expansions: Option<PathBuf>,

    /// Extra expansion value (key=value); may be repeated
    #[arg(short = 'e', long = "expand", value_name = "KEY=VALUE", global = true)]
    expand: Vec<String>,

    /// Attempts per request before giving up
    #[arg(long, default_value_t = 10, global = true)]
    retry_attempts: usize,

    /// Delay between attempts in milliseconds
    #[arg(long, default_value_t = 3000, global = true)]
    retry_delay_ms: u64,
}

pub(crate) struct Session {
    pub(crate) client: TaskClient,
    pub(crate) conf: TaskConfig,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    let session = build_session(cli.task)?;
    crate::cli_exec::handle_command(cli.command, &session)
}

fn build_session(args: TaskArgs) -> Result<Session> {
    if args.task_id.is_empty() {
        anyhow::bail!("no task id (pass --task-id or set TASKJSON_TASK_ID)");
    }
    if args.retry_attempts == 0 {
        anyhow::bail!("--retry-attempts must be at least 1");
    }

    let mut expansions = match &args.expansions {
        Some(path) => Expansions::from_file(path)?,
        None => Expansions::new(),
    };
    for pair in &args.expand {
        expansions.put_pair(pair)?;
    }

    let work_dir = match args.work_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("get current dir")?,
    };

    let client = TaskClient::new(
        TaskContext {
            base_url: args.url,
            task_id: args.task_id,
            secret: args.task_secret,
        },
        RetryPolicy {
            attempts: args.retry_attempts,
            delay: Duration::from_millis(args.retry_delay_ms),
        },
    )?;

    Ok(Session {
        client,
        conf: TaskConfig {
            work_dir,
            expansions,
        },
    })
}
