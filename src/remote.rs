//! HTTP client used by the in-task commands to reach the task API.

use std::time::Duration;

use anyhow::{Context, Result};

mod http_client;
pub use self::http_client::{AttemptError, RetryPolicy, with_retries};

/// Header naming the task a request acts for.
pub const TASK_ID_HEADER: &str = "Task-Id";
/// Header carrying the task's secret, when the task has one.
pub const TASK_SECRET_HEADER: &str = "Task-Secret";

#[derive(Clone, Debug)]
pub struct TaskContext {
    pub base_url: String,
    pub task_id: String,
    pub secret: Option<String>,
}

#[derive(Clone)]
pub struct TaskClient {
    context: TaskContext,
    policy: RetryPolicy,
    client: reqwest::blocking::Client,
}

impl TaskClient {
    pub fn new(context: TaskContext, policy: RetryPolicy) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("taskjson")
            .timeout(Duration::from_secs(60))
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            context,
            policy,
            client,
        })
    }

    pub fn context(&self) -> &TaskContext {
        &self.context
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }
}
