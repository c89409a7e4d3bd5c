use taskjson::history::assemble_history;

use super::*;

pub(super) async fn task_history(
    State(state): State<Arc<AppState>>,
    Extension(task): Extension<Task>,
    Path((task_name, name)): Path<(String, String)>,
) -> Result<Json<Vec<TaskJson>>, Response> {
    let store = state.store.read().await;
    let history = assemble_history(&store, &task, &task_name, &name)
        .map_err(internal_error)?
        .ok_or_else(not_found)?;
    Ok(Json(history))
}

/// History around a task looked up by id, under its own display name.
pub(super) async fn ui_task_history(
    State(state): State<Arc<AppState>>,
    Path((task_id, name)): Path<(String, String)>,
) -> Result<Json<Vec<TaskJson>>, Response> {
    let store = state.store.read().await;
    let task = store.find_task(&task_id).ok_or_else(not_found)?;
    let history = assemble_history(&store, &task, &task.display_name, &name)
        .map_err(internal_error)?
        .ok_or_else(not_found)?;
    Ok(Json(history))
}
