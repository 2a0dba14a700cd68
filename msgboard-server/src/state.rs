//! Application state shared across handlers

use std::sync::Arc;

use crate::db::MessageStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn MessageStore>,
}

impl AppState {
    pub fn new(store: impl MessageStore) -> Self {
        Self::from_shared(Arc::new(store))
    }

    pub fn from_shared(store: Arc<dyn MessageStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    pub fn store(&self) -> &dyn MessageStore {
        self.inner.store.as_ref()
    }
}
