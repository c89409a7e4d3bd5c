use super::data::{
    handle_exec_command, handle_get_command, handle_history_command, handle_send_command,
};
use super::*;

pub(super) fn handle_command(command: Commands, session: &Session) -> Result<()> {
    match command {
        Commands::Send(args) => handle_send_command(session, args.file, args.name)?,
        Commands::Get(args) => {
            handle_get_command(session, args.file, args.name, args.task, args.variant)?
        }
        Commands::History(args) => {
            handle_history_command(session, args.file, args.name, args.task, args.tags)?
        }
        Commands::Exec(args) => handle_exec_command(session, &args.command, args.params)?,
    }

    Ok(())
}
