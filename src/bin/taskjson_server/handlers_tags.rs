use axum::body::Bytes;

use super::*;

#[derive(Debug, Deserialize)]
struct TagRequest {
    tag: String,
}

#[derive(Debug, Serialize)]
pub(super) struct TagEntry {
    tag: String,
}

#[derive(Debug, Serialize)]
pub(super) struct TagUpdate {
    updated: usize,
}

/// Tagged records of a task name in the caller's project and variant.
pub(super) async fn tagged_records(
    State(state): State<Arc<AppState>>,
    Extension(task): Extension<Task>,
    Path((task_name, name)): Path<(String, String)>,
) -> Result<Json<Vec<TaskJson>>, Response> {
    let store = state.store.read().await;
    let records = store.find_all(
        &RecordQuery::new()
            .project(&task.project)
            .variant(&task.build_variant)
            .task_name(&task_name)
            .name(&name)
            .tagged(),
    );
    Ok(Json(records))
}

pub(super) async fn get_task_tag(
    State(state): State<Arc<AppState>>,
    Path((task_id, name)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, Response> {
    let store = state.store.read().await;
    store.find_task(&task_id).ok_or_else(not_found)?;
    let record = store
        .find_one(&RecordQuery::new().task_id(&task_id).name(&name))
        .ok_or_else(not_found)?;
    Ok(Json(serde_json::json!({"tag": record.tag})))
}

/// Tag every record of the task's version under `name`.
pub(super) async fn set_task_tag(
    State(state): State<Arc<AppState>>,
    Path((task_id, name)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<TagUpdate>, Response> {
    let req: TagRequest = parse_json_body(&body)?;
    if req.tag.trim().is_empty() {
        return Err(bad_request(anyhow::anyhow!("tag must not be blank")));
    }

    let tag = req.tag.clone();
    let dataset = name.clone();
    let tagged = state
        .write_store(move |store| {
            let Some(task) = store.find_task(&task_id) else {
                return Ok(None);
            };
            let updated = store.set_tag(&task.version, &dataset, &tag)?;
            Ok(Some((task.version, updated)))
        })
        .await
        .map_err(internal_error)?;
    let (version, updated) = tagged.ok_or_else(not_found)?;
    tracing::info!(%version, %name, tag = %req.tag, updated, "tagged records");
    Ok(Json(TagUpdate { updated }))
}

pub(super) async fn clear_task_tag(
    State(state): State<Arc<AppState>>,
    Path((task_id, name)): Path<(String, String)>,
) -> Result<Json<TagUpdate>, Response> {
    let dataset = name.clone();
    let cleared = state
        .write_store(move |store| {
            let Some(task) = store.find_task(&task_id) else {
                return Ok(None);
            };
            let updated = store.clear_tag(&task.version, &dataset)?;
            Ok(Some((task.version, updated)))
        })
        .await
        .map_err(internal_error)?;
    let (version, updated) = cleared.ok_or_else(not_found)?;
    tracing::info!(%version, %name, updated, "cleared tags");
    Ok(Json(TagUpdate { updated }))
}

pub(super) async fn list_project_tags(
    State(state): State<Arc<AppState>>,
    Path((task_id, _name)): Path<(String, String)>,
) -> Result<Json<Vec<TagEntry>>, Response> {
    let store = state.store.read().await;
    let task = store.find_task(&task_id).ok_or_else(not_found)?;
    let tags = store
        .distinct_tags(&task.project)
        .into_iter()
        .map(|tag| TagEntry { tag })
        .collect();
    Ok(Json(tags))
}

pub(super) async fn record_by_tag(
    State(state): State<Arc<AppState>>,
    Path((project_id, tag, variant, task_name, name)): Path<(
        String,
        String,
        String,
        String,
        String,
    )>,
) -> Result<Json<TaskJson>, Response> {
    let store = state.store.read().await;
    let record = store
        .find_one(
            &RecordQuery::new()
                .project(&project_id)
                .tag(&tag)
                .variant(&variant)
                .task_name(&task_name)
                .name(&name),
        )
        .ok_or_else(not_found)?;
    Ok(Json(record))
}

/// Mainline record at a commit, matched by revision prefix.
pub(super) async fn record_by_commit(
    State(state): State<Arc<AppState>>,
    Path((project_id, revision, variant, task_name, name)): Path<(
        String,
        String,
        String,
        String,
        String,
    )>,
) -> Result<Json<TaskJson>, Response> {
    let store = state.store.read().await;
    let record = store
        .find_one(
            &RecordQuery::new()
                .project(&project_id)
                .revision_prefix(&revision)
                .variant(&variant)
                .task_name(&task_name)
                .name(&name)
                .mainline_only()
                .sort(Sort::OrderDescending),
        )
        .ok_or_else(not_found)?;
    Ok(Json(record))
}
