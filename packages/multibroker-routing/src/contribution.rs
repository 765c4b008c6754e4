//! Mutable collector of broker entries, and the merge between the
//! configuration-built aggregate and an externally contributed one.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use multibroker_core::{AdminHandle, ConnectionFactory, OperationExecutor};
use tracing::warn;

use crate::registry::{BrokerRegistry, RegistryEntry};

/// Report of a default-connection clash between a configuration-declared
/// default and an externally contributed one. Not an error: the external
/// default wins and execution continues, but the clash is surfaced to the
/// caller and logged exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultConflict {
    /// Configuration key whose definition claimed `default_connection` and
    /// was overridden by the external default.
    pub configured_broker: String,
}

/// A set of pre-built broker entries plus an optional default connection
/// factory, contributed either from configuration (by the builder) or
/// programmatically by embedding code.
///
/// This is the seam by which a host adds brokers without going through
/// textual configuration: entries are taken verbatim and never
/// re-instantiated. Adding a duplicate name overwrites the previous entry
/// (last write wins).
#[derive(Default, Clone)]
pub struct BrokerContribution {
    entries: HashMap<String, RegistryEntry>,
    default_factory: Option<Arc<dyn ConnectionFactory>>,
    /// Configuration key that supplied `default_factory`, when the
    /// contribution was built from configuration. Lets merge report default
    /// conflicts by name.
    default_declared_by: Option<String>,
}

impl BrokerContribution {
    /// Creates an empty contribution.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one pre-built broker entry under `name`. A duplicate name
    /// overwrites the previous entry.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        connection_factory: Arc<dyn ConnectionFactory>,
        operation_executor: Arc<dyn OperationExecutor>,
        admin_handle: Arc<dyn AdminHandle>,
    ) {
        let name = name.into();
        self.entries.insert(
            name.clone(),
            RegistryEntry {
                name,
                connection_factory,
                operation_executor,
                admin_handle,
            },
        );
    }

    /// Sets the default connection factory for this contribution.
    pub fn set_default(&mut self, factory: Arc<dyn ConnectionFactory>) {
        self.default_factory = Some(factory);
        self.default_declared_by = None;
    }

    /// Sets the default connection factory as declared by the configuration
    /// entry `key`, so a later merge can name it on conflict.
    pub(crate) fn set_default_from(&mut self, key: &str, factory: Arc<dyn ConnectionFactory>) {
        self.default_factory = Some(factory);
        self.default_declared_by = Some(key.to_string());
    }

    /// Connection factory of the entry registered under `name`, if any.
    #[must_use]
    pub fn factory(&self, name: &str) -> Option<Arc<dyn ConnectionFactory>> {
        self.entries.get(name).map(|e| e.connection_factory.clone())
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the contribution has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges `external` into this contribution.
    ///
    /// External entries are added verbatim; name collisions overwrite (last
    /// write wins). If `external` carries a default it overrides this
    /// contribution's default in all cases; when the overridden default came
    /// from a named configuration entry, the clash is logged once and
    /// returned as a [`DefaultConflict`].
    pub fn merge(&mut self, external: BrokerContribution) -> Option<DefaultConflict> {
        for (name, entry) in external.entries {
            self.entries.insert(name, entry);
        }

        let Some(external_default) = external.default_factory else {
            return None;
        };

        let conflict = self.default_declared_by.take().map(|configured_broker| {
            warn!(
                configured_broker = %configured_broker,
                "two default connections declared: broker `{configured_broker}` from \
                 configuration and an externally contributed default; the external \
                 default wins"
            );
            DefaultConflict { configured_broker }
        });

        self.default_factory = Some(external_default);
        conflict
    }

    /// Finalizes the contribution into an immutable registry.
    #[must_use]
    pub(crate) fn into_registry(self) -> BrokerRegistry {
        BrokerRegistry::new(self.entries, self.default_factory)
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }
}

impl fmt::Debug for BrokerContribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("BrokerContribution")
            .field("brokers", &names)
            .field("has_default", &self.default_factory.is_some())
            .finish()
    }
}
