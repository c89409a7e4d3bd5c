use super::*;

#[derive(Clone)]
pub(crate) struct AppState {
    // Opened at startup and closed after the listener drains.
    pub(crate) store: Arc<RwLock<RecordStore>>,
}

impl AppState {
    /// Run a store mutation on the blocking pool; document writes hit the disk.
    pub(crate) async fn write_store<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut RecordStore) -> Result<T> + Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || op(&mut *store.blocking_write()))
            .await
            .context("store writer task")?
    }
}

/// `?full=1` asks for the whole record instead of just its `data`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FullQuery {
    #[serde(default)]
    full: Option<String>,
}

impl FullQuery {
    pub(crate) fn wants_full(&self) -> bool {
        self.full.as_deref().is_some_and(|v| !v.is_empty())
    }
}
