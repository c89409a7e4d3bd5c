use std::path::PathBuf;

use super::*;

pub(super) fn handle_send_command(session: &Session, file: String, name: String) -> Result<()> {
    run_plugin_command(session, PluginCommand::Send(SendCommand { file, name }))
}

pub(super) fn handle_get_command(
    session: &Session,
    file: String,
    name: String,
    task: String,
    variant: Option<String>,
) -> Result<()> {
    run_plugin_command(
        session,
        PluginCommand::Get(GetCommand {
            file,
            name,
            task,
            variant: variant.unwrap_or_default(),
        }),
    )
}

pub(super) fn handle_history_command(
    session: &Session,
    file: String,
    name: String,
    task: String,
    tags: bool,
) -> Result<()> {
    run_plugin_command(
        session,
        PluginCommand::History(HistoryCommand {
            tags,
            file,
            name,
            task,
        }),
    )
}

pub(super) fn handle_exec_command(
    session: &Session,
    name: &str,
    params: Option<PathBuf>,
) -> Result<()> {
    let params = match params {
        Some(path) => {
            let bytes =
                std::fs::read(&path).with_context(|| format!("read params {}", path.display()))?;
            serde_json::from_slice(&bytes)
                .with_context(|| format!("parse params {}", path.display()))?
        }
        None => serde_json::Value::Null,
    };
    let command = PluginCommand::from_params(name, params)?;
    run_plugin_command(session, command)
}

fn run_plugin_command(session: &Session, command: PluginCommand) -> Result<()> {
    let task = CancellableTask::new();
    if matches!(command, PluginCommand::Send(_)) {
        abort_on_signal(task.canceller());
    }
    match command.execute(&session.client, &session.conf, task)? {
        Completion::Finished => {}
        Completion::Aborted => eprintln!("{}: aborted", command.name()),
    }
    Ok(())
}
