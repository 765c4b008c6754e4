//! Broker connection parameter records bound from host configuration.

use std::fmt;

use serde::Deserialize;

/// Connection parameters for one broker.
///
/// Opaque to the routing core: only the [`BrokerClient`](crate::BrokerClient)
/// collaborator interprets them when instantiating a connection factory.
/// All fields default to the conventional localhost broker so a host can
/// configure only what differs.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BrokerParams {
    /// Broker hostname or IP address.
    pub host: String,
    /// Broker port.
    pub port: u16,
    /// Username for authentication.
    pub username: String,
    /// Password for authentication. Redacted from `Debug` output.
    pub password: String,
    /// Virtual host (namespace) within the broker.
    pub virtual_host: String,
    /// Optional human-readable name reported to the broker for this connection.
    pub connection_name: Option<String>,
}

impl Default for BrokerParams {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5672,
            username: "guest".to_string(),
            password: "guest".to_string(),
            virtual_host: "/".to_string(),
            connection_name: None,
        }
    }
}

impl fmt::Debug for BrokerParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrokerParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("virtual_host", &self.virtual_host)
            .field("connection_name", &self.connection_name)
            .finish()
    }
}

/// One named broker definition from the configuration mapping.
///
/// The broker's name is the key under which the definition appears in the
/// configuration map, so the record itself carries only the connection
/// parameters and the default-connection claim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BrokerDefinition {
    /// Connection parameters, flattened so a configuration entry reads as a
    /// single record.
    #[serde(flatten)]
    pub params: BrokerParams,
    /// Whether this broker claims to be the default connection. At most one
    /// definition should claim it; extra claimants are resolved first-by-name.
    #[serde(default)]
    pub default_connection: bool,
}

impl BrokerDefinition {
    /// Creates a non-default definition from the given parameters.
    #[must_use]
    pub fn new(params: BrokerParams) -> Self {
        Self {
            params,
            default_connection: false,
        }
    }

    /// Marks this definition as the default connection.
    #[must_use]
    pub fn default_connection(mut self) -> Self {
        self.default_connection = true;
        self
    }
}
