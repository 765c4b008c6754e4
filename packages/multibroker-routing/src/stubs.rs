//! Test stubs for the broker-client collaborator seams.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use multibroker_core::{
    AdminHandle, BrokerClient, BrokerParams, Connection, ConnectionFactory, OperationExecutor,
};
use parking_lot::Mutex;

/// Connection stub that remembers which broker's factory created it.
pub(crate) struct StubConnection {
    pub broker: String,
}

impl Connection for StubConnection {}

/// Factory stub bound to one broker name.
pub(crate) struct StubConnectionFactory {
    pub broker: String,
}

#[async_trait]
impl ConnectionFactory for StubConnectionFactory {
    async fn create_connection(&self) -> anyhow::Result<Arc<dyn Connection>> {
        Ok(Arc::new(StubConnection {
            broker: self.broker.clone(),
        }))
    }
}

pub(crate) struct StubExecutor {
    #[allow(dead_code)]
    pub broker: String,
}

impl OperationExecutor for StubExecutor {}

/// Admin stub counting `initialize` calls.
pub(crate) struct StubAdmin {
    pub broker: String,
    pub init_count: AtomicU32,
}

#[async_trait]
impl AdminHandle for StubAdmin {
    async fn initialize(&self) -> anyhow::Result<()> {
        self.init_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// One pre-built (factory, executor, admin) triple for `name`.
pub(crate) fn stub_entry(
    name: &str,
) -> (
    Arc<dyn ConnectionFactory>,
    Arc<dyn OperationExecutor>,
    Arc<dyn AdminHandle>,
) {
    (
        Arc::new(StubConnectionFactory {
            broker: name.to_string(),
        }),
        Arc::new(StubExecutor {
            broker: name.to_string(),
        }),
        Arc::new(StubAdmin {
            broker: name.to_string(),
            init_count: AtomicU32::new(0),
        }),
    )
}

/// Broker client stub recording instantiations and created admins, with an
/// optional broker name whose instantiation fails.
#[derive(Default)]
pub(crate) struct StubBrokerClient {
    fail_for: Option<String>,
    instantiated: Mutex<Vec<String>>,
    admins: Mutex<Vec<Arc<StubAdmin>>>,
}

impl StubBrokerClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes instantiation fail for the broker named `broker`.
    pub fn failing_for(mut self, broker: &str) -> Self {
        self.fail_for = Some(broker.to_string());
        self
    }

    /// Broker names whose connection factories were instantiated, in order.
    pub fn instantiated(&self) -> Vec<String> {
        self.instantiated.lock().clone()
    }

    /// `(broker, initialize-call-count)` for every admin handle this client
    /// has built.
    pub fn admin_init_counts(&self) -> Vec<(String, u32)> {
        self.admins
            .lock()
            .iter()
            .map(|admin| (admin.broker.clone(), admin.init_count.load(Ordering::SeqCst)))
            .collect()
    }
}

#[async_trait]
impl BrokerClient for StubBrokerClient {
    async fn connection_factory(
        &self,
        name: &str,
        _params: &BrokerParams,
    ) -> anyhow::Result<Arc<dyn ConnectionFactory>> {
        if self.fail_for.as_deref() == Some(name) {
            anyhow::bail!("connection refused");
        }
        self.instantiated.lock().push(name.to_string());
        Ok(Arc::new(StubConnectionFactory {
            broker: name.to_string(),
        }))
    }

    fn operation_executor(
        &self,
        _factory: Arc<dyn ConnectionFactory>,
    ) -> Arc<dyn OperationExecutor> {
        Arc::new(StubExecutor {
            broker: String::new(),
        })
    }

    fn admin_handle(
        &self,
        name: &str,
        _factory: Arc<dyn ConnectionFactory>,
    ) -> Arc<dyn AdminHandle> {
        let admin = Arc::new(StubAdmin {
            broker: name.to_string(),
            init_count: AtomicU32::new(0),
        });
        self.admins.lock().push(admin.clone());
        admin
    }
}
