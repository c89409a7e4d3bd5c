use clap::Subcommand;

pub(crate) mod data;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Upload a JSON file as a dataset of the current task
    Send(data::SendArgs),

    /// Download a dataset of a task in the current version
    Get(data::GetArgs),

    /// Download the ordered history (or tagged records) of a dataset
    History(data::HistoryArgs),

    /// Run a registered command with a JSON params file
    Exec(data::ExecArgs),
}
