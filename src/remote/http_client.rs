use std::time::Duration;

use anyhow::anyhow;
use reqwest::Url;
use reqwest::blocking::{RequestBuilder, Response};

use super::*;

/// Fixed-delay retry budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: usize,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 10,
            delay: Duration::from_secs(3),
        }
    }
}

#[derive(Debug)]
pub enum AttemptError {
    /// Worth trying again after the delay.
    Retriable(anyhow::Error),
    /// Stop immediately and report.
    Fatal(anyhow::Error),
}

/// Run `f` until it succeeds, fails fatally, or the attempt budget runs out.
///
/// `f` receives the 1-based attempt number. The last error is returned with
/// `label` as context.
pub fn with_retries<T>(
    label: &str,
    policy: RetryPolicy,
    mut f: impl FnMut(usize) -> std::result::Result<T, AttemptError>,
) -> Result<T> {
    let mut last: Option<anyhow::Error> = None;
    for attempt in 1..=policy.attempts {
        match f(attempt) {
            Ok(v) => return Ok(v),
            Err(AttemptError::Fatal(err)) => return Err(err.context(label.to_string())),
            Err(AttemptError::Retriable(err)) => {
                tracing::warn!(attempt, attempts = policy.attempts, "{}: {:#}", label, err);
                last = Some(err);
                if attempt < policy.attempts {
                    std::thread::sleep(policy.delay);
                }
            }
        }
    }
    Err(last
        .unwrap_or_else(|| anyhow!("no attempts made"))
        .context(format!("{} (gave up after {} attempts)", label, policy.attempts)))
}

impl TaskClient {
    /// `{base}/api/json/<segments...>`, each segment percent-encoded.
    pub(crate) fn url<S: AsRef<str>>(&self, segments: &[S]) -> Result<Url> {
        let mut url = Url::parse(&self.context.base_url)
            .with_context(|| format!("parse server url {}", self.context.base_url))?;
        url.path_segments_mut()
            .map_err(|()| anyhow!("server url {} cannot take a path", self.context.base_url))?
            .pop_if_empty()
            .extend(["api", "json"])
            .extend(segments.iter().map(AsRef::as_ref));
        Ok(url)
    }

    fn with_task_headers(&self, req: RequestBuilder) -> RequestBuilder {
        let req = req.header(TASK_ID_HEADER, &self.context.task_id);
        match &self.context.secret {
            Some(secret) => req.header(TASK_SECRET_HEADER, secret),
            None => req,
        }
    }

    pub fn post_json(&self, url: Url, body: &serde_json::Value) -> reqwest::Result<Response> {
        self.with_task_headers(self.client.post(url))
            .json(body)
            .send()
    }

    pub fn get(&self, url: Url) -> reqwest::Result<Response> {
        self.with_task_headers(self.client.get(url)).send()
    }
}

#[cfg(test)]
#[path = "../tests/remote/http_client_tests.rs"]
mod tests;
