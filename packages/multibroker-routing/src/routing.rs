//! The routing connection factory: one factory surface, many brokers.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use multibroker_core::{BrokerError, Connection, ConnectionFactory};
use tracing::debug;

use crate::context::RoutingContext;
use crate::registry::BrokerRegistry;

/// Presents a single [`ConnectionFactory`] while transparently dispatching
/// every call to the broker selected by the active routing key.
///
/// Resolution happens on every operation, never cached across calls: the
/// active key can change between calls on the same logical client. An
/// unknown key falls back to the default broker by design, so callers can
/// route by best-effort tags.
pub struct RoutingConnectionFactory {
    registry: Arc<BrokerRegistry>,
}

impl RoutingConnectionFactory {
    /// Creates a routing factory over the given registry.
    #[must_use]
    pub fn new(registry: Arc<BrokerRegistry>) -> Self {
        Self { registry }
    }

    /// The registry this factory dispatches over.
    #[must_use]
    pub fn registry(&self) -> &Arc<BrokerRegistry> {
        &self.registry
    }

    /// Resolves the connection factory targeted by the current routing key.
    ///
    /// Reads [`RoutingContext::active_key`]; a present, known key selects
    /// that entry's factory, anything else selects the registry default.
    ///
    /// # Errors
    ///
    /// [`BrokerError::NoRouteAvailable`] if the registry has no default —
    /// unreachable after a successful build, kept as a defensive check.
    pub fn resolve_target(&self) -> Result<Arc<dyn ConnectionFactory>, BrokerError> {
        if let Some(key) = RoutingContext::active_key() {
            if let Some(entry) = self.registry.lookup(&key) {
                return Ok(entry.connection_factory.clone());
            }
            debug!(key = %key, "no broker registered for routing key; using default");
        }
        self.registry
            .default_factory()
            .ok_or(BrokerError::NoRouteAvailable)
    }
}

#[async_trait]
impl ConnectionFactory for RoutingConnectionFactory {
    async fn create_connection(&self) -> anyhow::Result<Arc<dyn Connection>> {
        let target = self.resolve_target()?;
        target.create_connection().await
    }
}

impl fmt::Debug for RoutingConnectionFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingConnectionFactory")
            .field("registry", &self.registry)
            .finish()
    }
}
