//! Database facade
//!
//! [`Database`] turns collections, graphs, AQL queries, AQL functions and
//! transactions into local calls. Each call is one round trip through the
//! injected [`Transport`]; every status code outside the endpoint's success
//! set becomes the matching [`ArangoError`] variant carrying the response.
//!
//! Collection and graph proxies are cached by name. Lookups that miss, and
//! every successful add/remove/rename, reconcile the cache against the
//! server's full name list.

mod collections;
mod functions;
mod graphs;
mod queries;
mod transactions;

use std::sync::Arc;

use crate::batch::{Batch, BatchExecutor, SequentialBatchExecutor};
use crate::cache::ProxyCache;
use crate::collection::Collection;
use crate::config::ClientConfig;
use crate::cursor::{CursorFactory, ServerCursorFactory};
use crate::error::{ArangoError, ArangoResult};
use crate::graph::Graph;
use crate::models::DatabaseProperties;
use crate::transport::{HttpTransport, Transport};

/// Client-side view of one ArangoDB database
pub struct Database {
    name: String,
    transport: Arc<dyn Transport>,
    cursor_factory: Arc<dyn CursorFactory>,
    batch_executor: Arc<dyn BatchExecutor>,
    collection_cache: ProxyCache<Collection>,
    graph_cache: ProxyCache<Graph>,
}

impl Database {
    /// Create a facade over `transport` with the default cursor factory and
    /// batch executor
    pub fn new(name: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            name: name.into(),
            cursor_factory: Arc::new(ServerCursorFactory::new(Arc::clone(&transport))),
            batch_executor: Arc::new(SequentialBatchExecutor::new(Arc::clone(&transport))),
            transport,
            collection_cache: ProxyCache::new(),
            graph_cache: ProxyCache::new(),
        }
    }

    /// Connect over HTTP using `config`
    pub fn connect(config: &ClientConfig) -> ArangoResult<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(config.database.clone(), Arc::new(transport)))
    }

    pub fn with_cursor_factory(mut self, cursor_factory: Arc<dyn CursorFactory>) -> Self {
        self.cursor_factory = cursor_factory;
        self
    }

    pub fn with_batch_executor(mut self, batch_executor: Arc<dyn BatchExecutor>) -> Self {
        self.batch_executor = batch_executor;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Start a new request batch
    pub fn batch(&self) -> Batch {
        Batch::new(Arc::clone(&self.batch_executor))
    }

    /// Fetch the database's properties (one round trip per call)
    pub async fn properties(&self) -> ArangoResult<DatabaseProperties> {
        let response = self
            .transport
            .get("/_api/database/current")
            .await?
            .expect_status(&[200], ArangoError::DatabaseProperties)?;
        Ok(serde_json::from_value(response.field("result")?.clone())?)
    }

    pub async fn id(&self) -> ArangoResult<String> {
        Ok(self.properties().await?.id)
    }

    pub async fn path(&self) -> ArangoResult<String> {
        Ok(self.properties().await?.path)
    }

    pub async fn is_system(&self) -> ArangoResult<bool> {
        Ok(self.properties().await?.is_system)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").field("name", &self.name).finish()
    }
}

/// Check that `name` can identify a collection or graph.
///
/// Names start with a letter or underscore and contain only ASCII letters,
/// digits, `_` and `-`.
pub(crate) fn validate_name(kind: &str, name: &str) -> ArangoResult<()> {
    let mut chars = name.chars();
    let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        Ok(())
    } else {
        Err(ArangoError::InvalidArgument(format!(
            "'{}' is not a valid {} name",
            name, kind
        )))
    }
}
