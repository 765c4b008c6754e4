//! Configuration binding for the multi-broker registry.

use std::collections::BTreeMap;

use multibroker_core::{BrokerDefinition, BrokerParams};
use serde::Deserialize;

/// Top-level multi-broker configuration.
///
/// `brokers` maps broker names to their definitions. A `BTreeMap` keeps the
/// mapping ordered by name, which makes "first definition claiming default"
/// deterministic (lexicographic) when several definitions set
/// `default_connection`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MultiBrokerConfig {
    /// Named broker definitions. May be empty: zero entries is a valid
    /// configuration, not an error.
    #[serde(default)]
    pub brokers: BTreeMap<String, BrokerDefinition>,
    /// Single-broker parameters used as the default connection when no named
    /// definition claims `default_connection`.
    #[serde(default)]
    pub fallback: BrokerParams,
}

impl MultiBrokerConfig {
    /// Names of all definitions claiming `default_connection`, in map
    /// (lexicographic) order.
    pub(crate) fn default_claimants(&self) -> impl Iterator<Item = &str> {
        self.brokers
            .iter()
            .filter(|(_, def)| def.default_connection)
            .map(|(name, _)| name.as_str())
    }
}
