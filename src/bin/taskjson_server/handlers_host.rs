use axum::body::Bytes;

use super::*;

pub(super) async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"ok": true}))
}

pub(super) async fn put_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<String>,
    body: Bytes,
) -> Result<Json<Task>, Response> {
    validate_doc_id("task id", &task_id).map_err(bad_request)?;
    let task: Task = parse_json_body(&body)?;
    if task.id != task_id {
        return Err(bad_request(anyhow::anyhow!(
            "task id mismatch (path {}, body {})",
            task_id,
            task.id
        )));
    }
    validate_timestamp("create_time", &task.create_time).map_err(bad_request)?;

    let doc = task.clone();
    state
        .write_store(move |store| store.upsert_task(doc))
        .await
        .map_err(internal_error)?;
    Ok(Json(task))
}

pub(super) async fn put_version(
    State(state): State<Arc<AppState>>,
    Path(version_id): Path<String>,
    body: Bytes,
) -> Result<Json<Version>, Response> {
    validate_doc_id("version id", &version_id).map_err(bad_request)?;
    let version: Version = parse_json_body(&body)?;
    if version.id != version_id {
        return Err(bad_request(anyhow::anyhow!(
            "version id mismatch (path {}, body {})",
            version_id,
            version.id
        )));
    }
    validate_timestamp("create_time", &version.create_time).map_err(bad_request)?;

    let doc = version.clone();
    state
        .write_store(move |store| store.upsert_version(doc))
        .await
        .map_err(internal_error)?;
    Ok(Json(version))
}
