//! Provider: the set of connected backends.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::backend::QuicBackend;
use crate::config::BackendConfig;
use crate::error::{HalError, HalResult};
use crate::transport::ExecutionTransport;

/// Holds connected backends and hands them out by name.
#[derive(Debug, Default)]
pub struct Provider {
    backends: FxHashMap<String, Arc<QuicBackend>>,
    /// Names in connection order.
    order: Vec<String>,
}

impl Provider {
    /// Create a provider with no backends.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend. A backend with the same name is replaced.
    pub fn add_backend(&mut self, backend: QuicBackend) -> Arc<QuicBackend> {
        let name = backend.name().to_string();
        let backend = Arc::new(backend);
        if self.backends.insert(name.clone(), Arc::clone(&backend)).is_some() {
            warn!(backend = %name, "Replacing backend with the same name");
        } else {
            debug!(backend = %name, "Registering backend");
            self.order.push(name);
        }
        backend
    }

    /// Connect to an endpoint and register the resulting backend.
    pub async fn connect(
        &mut self,
        transport: Arc<dyn ExecutionTransport>,
        config: BackendConfig,
    ) -> HalResult<Arc<QuicBackend>> {
        let backend = QuicBackend::connect(transport, config).await?;
        Ok(self.add_backend(backend))
    }

    /// Get a backend by name.
    pub fn get_backend(&self, name: &str) -> HalResult<Arc<QuicBackend>> {
        self.backends
            .get(name)
            .cloned()
            .ok_or_else(|| HalError::BackendNotFound(name.to_string()))
    }

    /// Backends in connection order, optionally only the one named
    /// `name_filter`.
    pub fn backends(&self, name_filter: Option<&str>) -> Vec<Arc<QuicBackend>> {
        self.order
            .iter()
            .filter(|name| name_filter.is_none_or(|filter| filter == name.as_str()))
            .filter_map(|name| self.backends.get(name).cloned())
            .collect()
    }

    /// Names of all backends, in connection order.
    pub fn backend_names(&self) -> &[String] {
        &self.order
    }

    /// Number of backends.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no backend is connected.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
