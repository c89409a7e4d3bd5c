use serde_json::Value;

use super::*;

/// A command resolved from its registered name and a params object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PluginCommand {
    Send(SendCommand),
    Get(GetCommand),
    History(HistoryCommand),
}

type Constructor = fn(Value) -> Result<PluginCommand>;

const REGISTRY: &[(&str, Constructor)] = &[
    (SendCommand::NAME, new_send),
    (GetCommand::NAME, new_get),
    (HistoryCommand::NAME, new_history),
    ("history", new_history),
];

fn parse_params<T: for<'de> Deserialize<'de>>(name: &str, params: Value) -> Result<T> {
    serde_json::from_value(params).with_context(|| format!("error decoding '{}' params", name))
}

fn new_send(params: Value) -> Result<PluginCommand> {
    parse_params(SendCommand::NAME, params).map(PluginCommand::Send)
}

fn new_get(params: Value) -> Result<PluginCommand> {
    parse_params(GetCommand::NAME, params).map(PluginCommand::Get)
}

fn new_history(params: Value) -> Result<PluginCommand> {
    parse_params(HistoryCommand::NAME, params).map(PluginCommand::History)
}

impl PluginCommand {
    /// Registered command names, in registration order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        REGISTRY.iter().map(|(name, _)| *name)
    }

    /// Look up `name` (an optional `json.` prefix is accepted) and parse `params`.
    pub fn from_params(name: &str, params: Value) -> Result<Self> {
        let short = name.strip_prefix("json.").unwrap_or(name);
        let (_, constructor) = REGISTRY
            .iter()
            .find(|(n, _)| *n == short)
            .ok_or_else(|| anyhow!("unknown command '{}'", name))?;
        let params = if params.is_null() {
            Value::Object(Default::default())
        } else {
            params
        };
        constructor(params)
    }

    pub fn name(&self) -> &'static str {
        match self {
            PluginCommand::Send(_) => SendCommand::NAME,
            PluginCommand::Get(_) => GetCommand::NAME,
            PluginCommand::History(_) => HistoryCommand::NAME,
        }
    }

    /// Only `send` honours the abort signal; the fetches run to completion.
    pub fn execute(
        &self,
        client: &TaskClient,
        conf: &TaskConfig,
        task: CancellableTask,
    ) -> Result<Completion> {
        match self {
            PluginCommand::Send(cmd) => cmd.execute(client, conf, task),
            PluginCommand::Get(cmd) => cmd.execute(client, conf),
            PluginCommand::History(cmd) => cmd.execute(client, conf),
        }
    }
}

#[cfg(test)]
#[path = "../tests/commands/registry_tests.rs"]
mod tests;
