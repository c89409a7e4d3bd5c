use std::path::PathBuf;

use clap::Args;

#[derive(Args)]
pub(crate) struct SendArgs {
    /// JSON file to upload (relative to the work dir)
    #[arg(long)]
    pub(crate) file: String,
    /// Dataset name
    #[arg(long)]
    pub(crate) name: String,
}

#[derive(Args)]
pub(crate) struct GetArgs {
    /// Where to write the response (relative to the work dir)
    #[arg(long)]
    pub(crate) file: String,
    /// Dataset name
    #[arg(long)]
    pub(crate) name: String,
    /// Display name of the task that uploaded the dataset
    #[arg(long)]
    pub(crate) task: String,
    /// Read from this build variant instead of the current build
    #[arg(long)]
    pub(crate) variant: Option<String>,
}

#[derive(Args)]
pub(crate) struct HistoryArgs {
    /// Where to write the response (relative to the work dir)
    #[arg(long)]
    pub(crate) file: String,
    /// Dataset name
    #[arg(long)]
    pub(crate) name: String,
    /// Display name of the task that uploaded the dataset
    #[arg(long)]
    pub(crate) task: String,
    /// Fetch tagged records instead of the ordered history
    #[arg(long)]
    pub(crate) tags: bool,
}

#[derive(Args)]
pub(crate) struct ExecArgs {
    /// Registered command name (send, get, get_history)
    pub(crate) command: String,
    /// JSON file holding the command's params object
    #[arg(long)]
    pub(crate) params: Option<PathBuf>,
}
