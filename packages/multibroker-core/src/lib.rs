//! Multibroker Core — broker connection parameters, collaborator trait seams,
//! and the error taxonomy shared by the routing layer and embedding hosts.

pub mod error;
pub mod params;
pub mod traits;

pub use error::BrokerError;
pub use params::{BrokerDefinition, BrokerParams};
pub use traits::{AdminHandle, BrokerClient, Connection, ConnectionFactory, OperationExecutor};
