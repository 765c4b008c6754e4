//! Discovery registration of per-broker components.
//!
//! The builder hands every aggregated broker's operation executor and admin
//! handle to a [`ComponentRegistry`] under deterministic names (`<broker>`
//! and `<broker>-admin`). The trait is the explicit, testable seam towards
//! the host's own component/discovery machinery; [`InMemoryComponentRegistry`]
//! is the bundled implementation for hosts without one.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use multibroker_core::{AdminHandle, OperationExecutor};

/// A per-broker component handed over for discovery.
#[derive(Clone)]
pub enum BrokerComponent {
    /// The broker's operation executor, consumed by external listener
    /// dispatch.
    Executor(Arc<dyn OperationExecutor>),
    /// The broker's administrative handle, consumed by external
    /// topology/schema management.
    Admin(Arc<dyn AdminHandle>),
}

impl BrokerComponent {
    /// Short component kind tag for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            BrokerComponent::Executor(_) => "executor",
            BrokerComponent::Admin(_) => "admin",
        }
    }
}

impl fmt::Debug for BrokerComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// Host seam for making broker components independently discoverable.
///
/// Registration names are part of the observable contract: `<broker>` for
/// the executor, `<broker>-admin` for the admin handle.
pub trait ComponentRegistry: Send + Sync {
    /// Registers `component` under `name`. Re-registration under the same
    /// name replaces the previous component.
    fn register(&self, name: String, component: BrokerComponent);
}

/// Concurrent in-memory [`ComponentRegistry`].
#[derive(Default)]
pub struct InMemoryComponentRegistry {
    components: DashMap<String, BrokerComponent>,
}

impl InMemoryComponentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The component registered under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<BrokerComponent> {
        self.components.get(name).map(|entry| entry.value().clone())
    }

    /// Whether a component is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Number of registered components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// All registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.components.iter().map(|e| e.key().clone()).collect();
        names.sort_unstable();
        names
    }
}

impl ComponentRegistry for InMemoryComponentRegistry {
    fn register(&self, name: String, component: BrokerComponent) {
        self.components.insert(name, component);
    }
}

impl fmt::Debug for InMemoryComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryComponentRegistry")
            .field("names", &self.names())
            .finish()
    }
}
