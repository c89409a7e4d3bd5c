//! Commands run inside a task's sandbox: `send`, `get` and `get_history`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::cancel::{CancellableTask, Completion};
use crate::expansions::Expansions;
use crate::remote::{AttemptError, TaskClient, with_retries};

mod fetch;
mod registry;
mod send;

pub use self::fetch::{GetCommand, HistoryCommand};
pub use self::registry::PluginCommand;
pub use self::send::SendCommand;

/// What the task harness hands to every command.
#[derive(Clone, Debug, Default)]
pub struct TaskConfig {
    pub work_dir: PathBuf,
    pub expansions: Expansions,
}

impl TaskConfig {
    /// `file` relative to the work dir, or as-is when absolute.
    pub fn resolve_path(&self, file: &str) -> PathBuf {
        let path = Path::new(file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.work_dir.join(path)
        }
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(anyhow!("'{}' param must not be blank", field));
    }
    Ok(())
}
