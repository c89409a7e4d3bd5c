use taskjson::remote::{TASK_ID_HEADER, TASK_SECRET_HEADER};

use super::*;

/// Resolve the task named by the `Task-Id` header and attach it to the request.
pub(super) async fn require_task(
    State(state): State<Arc<AppState>>,
    mut req: axum::extract::Request,
    next: Next,
) -> Response {
    let Some(task_id) = header_value(&req, TASK_ID_HEADER) else {
        return unauthorized();
    };

    let task = state.store.read().await.find_task(&task_id);
    let Some(task) = task else {
        return not_found();
    };

    if let Some(secret) = &task.secret
        && header_value(&req, TASK_SECRET_HEADER).as_deref() != Some(secret.as_str())
    {
        return unauthorized();
    }

    req.extensions_mut().insert(task);
    next.run(req).await
}

fn header_value(req: &axum::extract::Request, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub(super) async fn trace_request(req: axum::extract::Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().path().to_string();
    let resp = next.run(req).await;
    tracing::debug!(%method, %uri, status = resp.status().as_u16(), "handled request");
    resp
}
