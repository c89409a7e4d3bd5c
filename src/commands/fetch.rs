use reqwest::StatusCode;

use super::*;

/// Download one dataset of a task in the current version into `file`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct GetCommand {
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub task: String,
    /// Read from this build variant's task instead of the current build.
    #[serde(default)]
    pub variant: String,
}

impl GetCommand {
    pub const NAME: &'static str = "get";

    pub fn expand(&self, expansions: &Expansions) -> Result<Self> {
        Ok(Self {
            file: expansions.expand(&self.file)?,
            name: expansions.expand(&self.name)?,
            task: expansions.expand(&self.task)?,
            variant: expansions.expand(&self.variant)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        require("file", &self.file)?;
        require("name", &self.name)?;
        require("task", &self.task)
    }

    /// Path segments under the task API, unencoded.
    pub fn endpoint(&self) -> Vec<&str> {
        let mut segments = vec!["data", self.task.as_str(), self.name.as_str()];
        if !self.variant.is_empty() {
            segments.push(self.variant.as_str());
        }
        segments
    }

    pub fn execute(&self, client: &TaskClient, conf: &TaskConfig) -> Result<Completion> {
        let cmd = self.expand(&conf.expansions)?;
        cmd.validate()?;
        fetch_to_file(client, &cmd.endpoint(), &conf.resolve_path(&cmd.file))?;
        Ok(Completion::Finished)
    }
}

/// Download the ordered history (or the tagged records) of a dataset into `file`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct HistoryCommand {
    #[serde(default)]
    pub tags: bool,
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub task: String,
}

impl HistoryCommand {
    pub const NAME: &'static str = "get_history";

    pub fn expand(&self, expansions: &Expansions) -> Result<Self> {
        Ok(Self {
            tags: self.tags,
            file: expansions.expand(&self.file)?,
            name: expansions.expand(&self.name)?,
            task: expansions.expand(&self.task)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        require("file", &self.file)?;
        require("name", &self.name)?;
        require("task", &self.task)
    }

    pub fn endpoint(&self) -> Vec<&str> {
        let kind = if self.tags { "tags" } else { "history" };
        vec![kind, self.task.as_str(), self.name.as_str()]
    }

    pub fn execute(&self, client: &TaskClient, conf: &TaskConfig) -> Result<Completion> {
        let cmd = self.expand(&conf.expansions)?;
        cmd.validate()?;
        fetch_to_file(client, &cmd.endpoint(), &conf.resolve_path(&cmd.file))?;
        Ok(Completion::Finished)
    }
}

/// GET `endpoint` with retries and write the body verbatim to `target`.
///
/// 404 is final; other non-200 statuses and connection errors are retried.
pub(crate) fn fetch_to_file(client: &TaskClient, endpoint: &[&str], target: &Path) -> Result<()> {
    let url = client.url(endpoint)?;
    with_retries("get json data", client.policy(), |attempt| {
        tracing::info!(attempt, url = %url, "fetching json");
        let resp = client.get(url.clone()).map_err(|e| {
            AttemptError::Retriable(anyhow::Error::new(e).context("connect to API server"))
        })?;
        match resp.status() {
            StatusCode::OK => {
                let bytes = resp
                    .bytes()
                    .map_err(|e| AttemptError::Fatal(anyhow::Error::new(e).context("read body")))?;
                std::fs::write(target, &bytes)
                    .with_context(|| format!("write {}", target.display()))
                    .map_err(AttemptError::Fatal)
            }
            StatusCode::NOT_FOUND => Err(AttemptError::Fatal(anyhow!("no JSON data found"))),
            status => Err(AttemptError::Retriable(anyhow!(
                "unexpected status code {}",
                status
            ))),
        }
    })
}
