pub mod auth;
pub mod catalog;
pub mod config;
pub mod envelope;
pub mod error;
pub mod fixture;
pub mod latency;
pub mod query;
pub mod repository;
pub mod store;

use crate::auth::{AuthMock, SessionStore};
use crate::config::MockConfig;
use crate::query::chain::QueryChain;
use crate::store::RecordStore;
use compact_str::CompactString;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// The local stand-in for the hosted backend client.
///
/// Hosts a set of named record stores and one simulated auth surface, and
/// hands out [`QueryChain`]s that speak the same `{ data, error }` contract
/// as the real client. Which client a process uses (this mock or the real
/// one) is decided once at startup by whoever holds the service URL and
/// access key; this type only guarantees it can stand behind the same
/// interface.
#[derive(Debug, Clone)]
pub struct MockClient {
    config: MockConfig,
    tables: HashMap<CompactString, Arc<RecordStore>>,
    auth: AuthMock,
}

impl MockClient {
    pub fn new(config: MockConfig) -> Self {
        debug!(latency_ms = config.latency.as_millis() as u64, "mock client initialized");
        let auth = AuthMock::new(Arc::new(SessionStore::new()), config.latency);
        Self {
            config,
            tables: HashMap::new(),
            auth,
        }
    }

    pub fn with_table(mut self, name: impl Into<CompactString>, store: RecordStore) -> Self {
        self.tables.insert(name.into(), Arc::new(store));
        self
    }

    /// Registers an externally held store, letting tests inspect or mutate
    /// it alongside the chains that resolve against it.
    pub fn with_shared_table(
        mut self,
        name: impl Into<CompactString>,
        store: Arc<RecordStore>,
    ) -> Self {
        self.tables.insert(name.into(), store);
        self
    }

    /// Swaps in an externally held session store so auth state can be shared
    /// or torn down explicitly between test runs.
    pub fn with_session_store(mut self, sessions: Arc<SessionStore>) -> Self {
        self.auth = AuthMock::new(sessions, self.config.latency);
        self
    }

    /// Obtains a chain over the named table. A name this client does not
    /// host still returns a chain; the fault surfaces when the chain's
    /// terminal is awaited.
    pub fn from(&self, table: &str) -> QueryChain {
        match self.tables.get(table) {
            Some(store) => QueryChain::new(table, Arc::clone(store), self.config.latency),
            None => QueryChain::unknown_table(table, self.config.latency),
        }
    }

    pub fn auth(&self) -> &AuthMock {
        &self.auth
    }

    pub fn table(&self, name: &str) -> Option<&Arc<RecordStore>> {
        self.tables.get(name)
    }
}
