//! Builds the aggregated [`BrokerRegistry`] from configuration plus an
//! external contribution.

use std::sync::Arc;

use multibroker_core::{BrokerClient, BrokerError};
use tracing::{debug, info};

use crate::config::MultiBrokerConfig;
use crate::contribution::BrokerContribution;
use crate::discovery::{BrokerComponent, ComponentRegistry};
use crate::registry::BrokerRegistry;

/// Suffix appended to a broker's name when registering its admin handle for
/// discovery. External code is allowed to depend on this convention.
pub const ADMIN_SUFFIX: &str = "-admin";

/// Diagnostic name under which instantiation failures of the fallback
/// default connection are reported. Not a routable broker name.
pub const FALLBACK_NAME: &str = "<fallback>";

/// Turns named broker definitions plus a fallback single-broker definition
/// into an immutable [`BrokerRegistry`].
///
/// One connection factory is instantiated per definition through the
/// injected [`BrokerClient`]; instantiation failures abort the build with
/// [`BrokerError::Instantiation`] and are never retried, since a
/// misconfigured broker must stop startup.
pub struct BrokerRegistryBuilder {
    client: Arc<dyn BrokerClient>,
    components: Arc<dyn ComponentRegistry>,
}

impl BrokerRegistryBuilder {
    /// Creates a builder over the given broker client and discovery registry.
    #[must_use]
    pub fn new(client: Arc<dyn BrokerClient>, components: Arc<dyn ComponentRegistry>) -> Self {
        Self { client, components }
    }

    /// Builds the registry.
    ///
    /// 1. Instantiates a connection factory, operation executor, and admin
    ///    handle for every named definition.
    /// 2. Resolves the default: the first definition (by name) claiming
    ///    `default_connection`, else a factory built from the fallback
    ///    parameters.
    /// 3. Merges `external` (external entries win on name collision; an
    ///    external default overrides, with a logged conflict when it
    ///    displaces a configuration-declared one).
    /// 4. Initializes every entry's admin handle exactly once, then
    ///    registers `<name>` (executor) and `<name>-admin` (admin handle)
    ///    for discovery.
    ///
    /// # Errors
    ///
    /// [`BrokerError::Instantiation`] if the broker client fails to build any
    /// connection factory; [`BrokerError::AdminInitialization`] if an admin
    /// handle fails to initialize. Both are fatal to startup.
    pub async fn build(
        &self,
        config: &MultiBrokerConfig,
        external: BrokerContribution,
    ) -> Result<BrokerRegistry, BrokerError> {
        let mut aggregate = self.from_config(config).await?;
        // merge() logs the conflict itself; nothing more to do here.
        let _conflict = aggregate.merge(external);

        for entry in aggregate.entries() {
            entry.admin_handle.initialize().await.map_err(|source| {
                BrokerError::AdminInitialization {
                    broker: entry.name.clone(),
                    source,
                }
            })?;
            self.components.register(
                entry.name.clone(),
                BrokerComponent::Executor(entry.operation_executor.clone()),
            );
            self.components.register(
                format!("{}{ADMIN_SUFFIX}", entry.name),
                BrokerComponent::Admin(entry.admin_handle.clone()),
            );
            debug!(broker = %entry.name, "registered broker components for discovery");
        }

        let registry = aggregate.into_registry();
        info!(
            brokers = ?registry.names(),
            "multi-broker registry built"
        );
        Ok(registry)
    }

    /// Instantiates one entry per named definition and resolves the
    /// configuration-side default.
    async fn from_config(
        &self,
        config: &MultiBrokerConfig,
    ) -> Result<BrokerContribution, BrokerError> {
        let mut contribution = BrokerContribution::new();

        for (name, def) in &config.brokers {
            let factory = self
                .client
                .connection_factory(name, &def.params)
                .await
                .map_err(|source| BrokerError::Instantiation {
                    broker: name.clone(),
                    source,
                })?;
            let executor = self.client.operation_executor(factory.clone());
            let admin = self.client.admin_handle(name, factory.clone());
            contribution.add(name.clone(), factory, executor, admin);
        }

        let mut claimants = config.default_claimants();
        if let Some(chosen) = claimants.next() {
            let ignored: Vec<&str> = claimants.collect();
            if !ignored.is_empty() {
                info!(
                    chosen = %chosen,
                    ignored = ?ignored,
                    "multiple brokers claim default_connection; first by name wins"
                );
            }
            let factory = contribution
                .factory(chosen)
                .unwrap_or_else(|| unreachable!("claimant comes from the instantiated mapping"));
            contribution.set_default_from(chosen, factory);
        } else {
            let fallback = self
                .client
                .connection_factory(FALLBACK_NAME, &config.fallback)
                .await
                .map_err(|source| BrokerError::Instantiation {
                    broker: FALLBACK_NAME.to_string(),
                    source,
                })?;
            contribution.set_default(fallback);
        }

        Ok(contribution)
    }
}
