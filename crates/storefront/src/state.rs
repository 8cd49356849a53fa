//! Application state shared across handlers.

use std::sync::Arc;

use vietlong_storage::DynBackend;

use crate::assistant::AssistantClient;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; owns the configuration, the storage backend
/// handle, and the optional assistant client. All mutable shop state lives
/// behind the storage backend - there are no ambient singletons.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: DynBackend,
    assistant: Option<AssistantClient>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, store: DynBackend) -> Self {
        let assistant = config.assistant.as_ref().map(AssistantClient::new);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                assistant,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the storage backend.
    #[must_use]
    pub fn store(&self) -> &DynBackend {
        &self.inner.store
    }

    /// Get the assistant client, if configured.
    #[must_use]
    pub fn assistant(&self) -> Option<&AssistantClient> {
        self.inner.assistant.as_ref()
    }
}
