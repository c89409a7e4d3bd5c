//! Structured task result data for CI builds: ingestion, lookup, tagging,
//! ordered history and in-task send/get commands.

pub mod cancel;
pub mod commands;
pub mod expansions;
pub mod history;
pub mod logging;
pub mod model;
pub mod remote;
pub mod store;
pub mod versions;
