use reqwest::StatusCode;
use serde_json::{Map, Value};

use super::*;

/// Upload a JSON file as dataset `name` of the current task.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SendCommand {
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub name: String,
}

impl SendCommand {
    pub const NAME: &'static str = "send";

    pub fn expand(&self, expansions: &Expansions) -> Result<Self> {
        Ok(Self {
            file: expansions.expand(&self.file)?,
            name: expansions.expand(&self.name)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        require("file", &self.file)?;
        require("name", &self.name)
    }

    /// Read, parse and post the file on a background thread.
    ///
    /// An abort through `task`'s canceller returns [`Completion::Aborted`]
    /// without error and without waiting for the in-flight attempt.
    pub fn execute(
        &self,
        client: &TaskClient,
        conf: &TaskConfig,
        task: CancellableTask,
    ) -> Result<Completion> {
        let cmd = self.expand(&conf.expansions)?;
        cmd.validate()?;

        let path = conf.resolve_path(&cmd.file);
        let client = client.clone();
        let name = cmd.name;
        let outcome = task.run(move || {
            let data = read_json_object(&path)?;
            post_data(&client, &name, data)
        });

        match &outcome {
            Ok(Completion::Aborted) => tracing::info!("send aborted before completion"),
            Ok(Completion::Finished) => tracing::info!("sent json data"),
            Err(err) => tracing::error!("sending json data failed: {:#}", err),
        }
        outcome
    }
}

pub(crate) fn read_json_object(path: &Path) -> Result<Map<String, Value>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("open json file {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("file {} contained invalid json", path.display()))
}

fn post_data(client: &TaskClient, name: &str, data: Map<String, Value>) -> Result<()> {
    let body = Value::Object(data);
    let url = client.url(&["data", name])?;
    with_retries("post json data", client.policy(), |attempt| {
        tracing::info!(attempt, dataset = name, "posting json");
        let resp = client
            .post_json(url.clone(), &body)
            .map_err(|e| AttemptError::Retriable(anyhow::Error::new(e).context("post data")))?;
        if resp.status() != StatusCode::OK {
            return Err(AttemptError::Retriable(anyhow!(
                "unexpected status code {}",
                resp.status()
            )));
        }
        Ok(())
    })
}
