//! Multibroker Routing — one connection-factory surface over many brokers.
//!
//! A single process holds connections to multiple independent message-broker
//! clusters and routes each outbound or administrative operation to the right
//! one by a string key:
//!
//! - [`config::MultiBrokerConfig`] binds named broker definitions plus a
//!   fallback single-broker record from host configuration.
//! - [`builder::BrokerRegistryBuilder`] instantiates one connection factory
//!   per definition, resolves exactly one default, merges an externally
//!   contributed [`contribution::BrokerContribution`], and registers each
//!   broker's executor and admin handle for discovery.
//! - [`registry::BrokerRegistry`] is the immutable name → entry table.
//! - [`routing::RoutingConnectionFactory`] dispatches every call to the entry
//!   selected by the active routing key, falling back to the default.
//! - [`context::RoutingContext`] scopes the active key to a unit of work,
//!   task-locally and with guaranteed restoration.

pub mod builder;
pub mod config;
pub mod context;
pub mod contribution;
pub mod discovery;
pub mod registry;
pub mod routing;

#[cfg(test)]
pub(crate) mod stubs;

pub use builder::{BrokerRegistryBuilder, ADMIN_SUFFIX, FALLBACK_NAME};
pub use config::MultiBrokerConfig;
pub use context::RoutingContext;
pub use contribution::{BrokerContribution, DefaultConflict};
pub use discovery::{BrokerComponent, ComponentRegistry, InMemoryComponentRegistry};
pub use registry::{BrokerRegistry, RegistryEntry};
pub use routing::RoutingConnectionFactory;
