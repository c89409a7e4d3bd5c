use std::sync::Arc;

use axum::Router;
use axum::middleware;
use axum::routing::get;
use taskjson::store::RecordStore;
use tokio::sync::RwLock;

use super::super::{
    AppState, api_router, healthz, host_router, trace_request, ui_router,
};

pub(super) fn build_state(store: RecordStore) -> Arc<AppState> {
    Arc::new(AppState {
        store: Arc::new(RwLock::new(store)),
    })
}

pub(super) fn build_app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api/json", api_router(state.clone()))
        .nest("/ui/json", ui_router())
        .nest("/host", host_router())
        .layer(middleware::from_fn(trace_request))
        .with_state(state)
}
