use std::collections::BTreeMap;

use axum::body::Bytes;
use taskjson::model::VersionData;
use taskjson::versions::{BranchProjects, latest_versions, tasks_for_version};

use super::*;

pub(super) async fn plugin_version() -> Json<&'static str> {
    Json("1")
}

pub(super) async fn version_records(
    State(state): State<Arc<AppState>>,
    Path((version_id, name)): Path<(String, String)>,
) -> Result<Json<Vec<TaskJson>>, Response> {
    let store = state.store.read().await;
    let records = tasks_for_version(&store, &version_id, &name).ok_or_else(not_found)?;
    Ok(Json(records))
}

pub(super) async fn latest_version_records(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<BTreeMap<String, Vec<VersionData>>>, Response> {
    let branches: BranchProjects = parse_json_body(&body)?;
    let store = state.store.read().await;
    let latest = latest_versions(&store, &branches, &name).ok_or_else(not_found)?;
    Ok(Json(latest))
}
