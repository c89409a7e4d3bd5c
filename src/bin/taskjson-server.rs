use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use taskjson::model::{Task, TaskJson, Version};
use taskjson::store::{RecordQuery, RecordStore, Sort};

#[path = "taskjson_server/types.rs"]
mod types;
use self::types::*;
#[path = "taskjson_server/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "taskjson_server/validators.rs"]
mod validators;
use self::validators::*;
#[path = "taskjson_server/task_context.rs"]
mod task_context;
use self::task_context::*;
#[path = "taskjson_server/handlers_data.rs"]
mod handlers_data;
use self::handlers_data::*;
#[path = "taskjson_server/handlers_history.rs"]
mod handlers_history;
use self::handlers_history::*;
#[path = "taskjson_server/handlers_tags.rs"]
mod handlers_tags;
use self::handlers_tags::*;
#[path = "taskjson_server/handlers_versions.rs"]
mod handlers_versions;
use self::handlers_versions::*;
#[path = "taskjson_server/handlers_host.rs"]
mod handlers_host;
use self::handlers_host::*;
#[path = "taskjson_server/routes.rs"]
mod routes;
use self::routes::*;
#[path = "taskjson_server/runtime/mod.rs"]
mod runtime;

#[tokio::main]
async fn main() {
    taskjson::logging::init("info");
    if let Err(err) = runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
