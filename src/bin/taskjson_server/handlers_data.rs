use axum::body::Bytes;
use serde_json::{Map, Value};

use super::*;

pub(super) async fn ingest_data(
    State(state): State<Arc<AppState>>,
    Extension(task): Extension<Task>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<&'static str>, Response> {
    let data: Map<String, Value> = parse_json_body(&body)?;
    let record = TaskJson::from_task(&task, &name, data);

    state
        .write_store(move |store| store.upsert(record))
        .await
        .map_err(internal_error)?;
    tracing::debug!(task_id = %task.id, %name, "stored task json");
    Ok(Json("ok"))
}

/// Dataset of a task in the caller's build.
pub(super) async fn get_data(
    State(state): State<Arc<AppState>>,
    Extension(task): Extension<Task>,
    Path((task_name, name)): Path<(String, String)>,
    Query(q): Query<FullQuery>,
) -> Result<Response, Response> {
    let store = state.store.read().await;
    let record = store
        .find_one(
            &RecordQuery::new()
                .version(&task.version)
                .build(&task.build_id)
                .task_name(&task_name)
                .name(&name),
        )
        .ok_or_else(not_found)?;
    Ok(record_response(record, q.wants_full()))
}

/// Dataset of a task on another variant of the caller's version.
pub(super) async fn get_variant_data(
    State(state): State<Arc<AppState>>,
    Extension(task): Extension<Task>,
    Path((task_name, name, variant)): Path<(String, String, String)>,
    Query(q): Query<FullQuery>,
) -> Result<Response, Response> {
    let store = state.store.read().await;
    let other = store
        .find_variant_task(&task.version, &variant, &task_name)
        .ok_or_else(not_found)?;
    let record = store
        .find_one(&RecordQuery::new().task_id(&other.id).name(&name))
        .ok_or_else(not_found)?;
    Ok(record_response(record, q.wants_full()))
}

pub(super) async fn get_task_record(
    State(state): State<Arc<AppState>>,
    Path((task_id, name)): Path<(String, String)>,
) -> Result<Json<TaskJson>, Response> {
    let store = state.store.read().await;
    let record = store
        .find_one(&RecordQuery::new().task_id(&task_id).name(&name))
        .ok_or_else(not_found)?;
    Ok(Json(record))
}

fn record_response(record: TaskJson, full: bool) -> Response {
    if full {
        Json(record).into_response()
    } else {
        Json(record.data).into_response()
    }
}
