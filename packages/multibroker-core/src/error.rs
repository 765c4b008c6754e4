//! Error taxonomy for the routing core.

/// Errors produced by registry construction and routing resolution.
#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    /// Instantiating the underlying connection factory for a broker failed
    /// (bad credentials, unreachable host at eager-connect time, malformed
    /// parameters). Fatal: propagates out of startup and is never retried —
    /// a misconfigured broker must stop initialization.
    #[error("failed to instantiate connection factory for broker `{broker}`")]
    Instantiation {
        /// Name of the broker whose instantiation failed.
        broker: String,
        /// Underlying failure from the broker client.
        #[source]
        source: anyhow::Error,
    },

    /// Initializing a broker's administrative handle failed. Fatal at
    /// startup, like [`BrokerError::Instantiation`].
    #[error("failed to initialize admin handle for broker `{broker}`")]
    AdminInitialization {
        /// Name of the broker whose admin handle failed to initialize.
        broker: String,
        /// Underlying failure from the admin handle.
        #[source]
        source: anyhow::Error,
    },

    /// No routing target could be resolved: the registry has no default
    /// connection factory. Unreachable after a successful build (the builder
    /// always installs a default); observing it indicates a programming
    /// error, not a retryable condition.
    #[error("no routing target available: registry has no default connection factory")]
    NoRouteAvailable,
}
