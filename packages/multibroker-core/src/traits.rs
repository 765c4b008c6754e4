//! Collaborator trait seams between the routing core and the broker client.
//!
//! The routing core never speaks a wire protocol itself. Everything that
//! touches a real broker — opening connections, building per-broker listener
//! executors, declaring topology — sits behind these traits and is supplied
//! by the embedding host.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;

use crate::params::BrokerParams;

/// Opaque handle to one live broker connection. The `Any` bound lets hosts
/// downcast back to their concrete connection type.
pub trait Connection: Send + Sync + Any {}

/// Creates connections to one specific broker.
///
/// The routing layer's own connection factory implements this same trait, so
/// it can stand in wherever a single-broker factory was expected.
#[async_trait]
pub trait ConnectionFactory: Send + Sync {
    /// Opens (or checks out) a connection to this factory's broker.
    async fn create_connection(&self) -> anyhow::Result<Arc<dyn Connection>>;
}

/// Per-broker operation executor that external listener dispatch binds to.
/// Opaque to the routing core beyond being registered for discovery.
pub trait OperationExecutor: Send + Sync + Any {}

/// Per-broker administrative handle used for topology and schema management.
#[async_trait]
pub trait AdminHandle: Send + Sync + Any {
    /// One-time initialization: bind to the live application context and
    /// signal readiness. The builder calls this exactly once per registry
    /// entry, before the entry becomes reachable by routing.
    async fn initialize(&self) -> anyhow::Result<()>;
}

/// The external broker-client collaborator.
///
/// Implementations own all I/O, retry, and redelivery concerns. Instantiation
/// failures are fatal to startup: the builder wraps them in
/// [`BrokerError::Instantiation`](crate::BrokerError::Instantiation) and
/// never retries.
#[async_trait]
pub trait BrokerClient: Send + Sync {
    /// Instantiates a connection factory for the broker named `name` using
    /// the given parameters.
    async fn connection_factory(
        &self,
        name: &str,
        params: &BrokerParams,
    ) -> anyhow::Result<Arc<dyn ConnectionFactory>>;

    /// Builds the per-broker operation executor bound to `factory`.
    fn operation_executor(&self, factory: Arc<dyn ConnectionFactory>) -> Arc<dyn OperationExecutor>;

    /// Builds the administrative handle for the broker named `name`, bound
    /// to `factory`.
    fn admin_handle(&self, name: &str, factory: Arc<dyn ConnectionFactory>)
        -> Arc<dyn AdminHandle>;
}
