//! Immutable name → broker registry produced by the builder.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use multibroker_core::{AdminHandle, ConnectionFactory, OperationExecutor};

/// One aggregated broker: its connection factory plus the per-broker
/// executor and admin handle bound to it.
#[derive(Clone)]
pub struct RegistryEntry {
    /// Broker name, unique within the registry.
    pub name: String,
    /// Connection factory for this broker.
    pub connection_factory: Arc<dyn ConnectionFactory>,
    /// Per-broker operation executor, registered for discovery under the
    /// broker's name.
    pub operation_executor: Arc<dyn OperationExecutor>,
    /// Administrative handle, registered for discovery under
    /// `<name>-admin`, initialized exactly once before the entry is routable.
    pub admin_handle: Arc<dyn AdminHandle>,
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The aggregated, queryable table of brokers plus one designated default
/// connection factory.
///
/// Built once, single-threaded, at startup; immutable afterwards and safe
/// for unsynchronized concurrent reads.
pub struct BrokerRegistry {
    entries: HashMap<String, RegistryEntry>,
    default_factory: Option<Arc<dyn ConnectionFactory>>,
}

impl BrokerRegistry {
    pub(crate) fn new(
        entries: HashMap<String, RegistryEntry>,
        default_factory: Option<Arc<dyn ConnectionFactory>>,
    ) -> Self {
        Self {
            entries,
            default_factory,
        }
    }

    /// Looks up the entry registered under `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.get(name)
    }

    /// The default connection factory, used when no routing key is active or
    /// the active key is unknown. Always present after a successful build:
    /// either one of the named entries' factories or the fallback factory.
    #[must_use]
    pub fn default_factory(&self) -> Option<Arc<dyn ConnectionFactory>> {
        self.default_factory.clone()
    }

    /// Number of named entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no named entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All broker names, sorted, for diagnostics.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for BrokerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrokerRegistry")
            .field("brokers", &self.names())
            .field("has_default", &self.default_factory.is_some())
            .finish()
    }
}
