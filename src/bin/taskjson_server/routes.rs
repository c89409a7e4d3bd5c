use super::*;

/// Routes called from inside a running task; every request carries `Task-Id`.
pub(super) fn api_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/data/:name", post(ingest_data))
        .route("/data/:name/:dataset", get(get_data))
        .route("/data/:name/:dataset/:variant", get(get_variant_data))
        .route("/history/:task_name/:name", get(task_history))
        .route("/tags/:task_name/:name", get(tagged_records))
        .layer(middleware::from_fn_with_state(state, require_task))
}

pub(super) fn ui_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/version", get(plugin_version))
        .route("/version/:version_id/:name", get(version_records))
        .route("/version/:version_id/:name/", get(version_records))
        .route("/latest/:name", post(latest_version_records))
        .route("/task/:task_id/:name", get(get_task_record))
        .route("/task/:task_id/:name/", get(get_task_record))
        .route(
            "/task/:task_id/:name/tag",
            get(get_task_tag).post(set_task_tag).delete(clear_task_tag),
        )
        .route("/task/:task_id/:name/tags", get(list_project_tags))
        .route(
            "/tag/:project_id/:tag/:variant/:task_name/:name",
            get(record_by_tag),
        )
        .route(
            "/commit/:project_id/:revision/:variant/:task_name/:name",
            get(record_by_commit),
        )
        .route("/history/:task_id/:name", get(ui_task_history))
}

/// Stand-in for the CI host's own task and version collections.
pub(super) fn host_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks/:task_id", put(put_task))
        .route("/versions/:version_id", put(put_version))
}
