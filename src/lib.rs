//! ArangoDB client — a local facade over a database's HTTP API
//!
//! [`Database`] exposes collections, graphs, AQL queries, AQL functions and
//! JavaScript transactions as async methods. Each method is one request and
//! response round trip through a [`Transport`]; any status code outside the
//! endpoint's success set becomes a typed [`ArangoError`] carrying the raw
//! [`Response`].
//!
//! Collection and graph proxies are cached by name and reconciled lazily
//! against the server's name list, so repeated lookups of an unchanged
//! resource return the same `Arc`.
//!
//! # Quick Start
//!
//! ```no_run
//! use arangodb_client::{ClientConfig, CollectionCreateSpec, Database, QueryRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), arangodb_client::ArangoError> {
//!     let db = Database::connect(&ClientConfig::default())?;
//!
//!     let users = db.add_collection(CollectionCreateSpec::new("users")).await?;
//!     println!("Created {}", users.name());
//!
//!     let cursor = db
//!         .execute_query(&QueryRequest::new("FOR u IN users RETURN u").batch_size(100))
//!         .await?;
//!     println!("Found {} documents", cursor.collect_all().await?.len());
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod cache;
pub mod collection;
pub mod config;
pub mod cursor;
pub mod database;
pub mod error;
pub mod graph;
pub mod models;
pub mod query;
pub mod transport;

#[cfg(test)]
mod testing;

pub use batch::{Batch, BatchExecutor, SequentialBatchExecutor};
pub use cache::{reconcile, ProxyCache, ReconcileReport};
pub use collection::{Collection, CollectionCreateSpec, CollectionList, KeyGenerator};
pub use config::ClientConfig;
pub use cursor::{Cursor, CursorFactory, ServerCursorFactory};
pub use database::Database;
pub use error::{ArangoError, ArangoResult};
pub use graph::{EdgeDefinition, Graph, GraphSpec};
pub use models::{DatabaseProperties, TransactionSpec};
pub use query::{ExplainOptions, ExplainResult, QueryRequest};
pub use transport::{HttpTransport, Method, Request, Response, Transport};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
