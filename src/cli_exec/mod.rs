use anyhow::{Context, Result};

use taskjson::cancel::{CancellableTask, Completion, abort_on_signal};
use taskjson::commands::{GetCommand, HistoryCommand, PluginCommand, SendCommand};

use crate::Commands;
use crate::cli_runtime::Session;

mod data;
mod dispatch;

pub(super) fn handle_command(command: Commands, session: &Session) -> Result<()> {
    dispatch::handle_command(command, session)
}
