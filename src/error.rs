//! Error types for the ArangoDB client
//!
//! Every server-side failure carries the raw [`Response`] that caused it, so
//! callers can inspect the status code and the server's error body.

use thiserror::Error;

use crate::transport::Response;

/// Errors that can occur when talking to an ArangoDB database
#[derive(Error, Debug)]
pub enum ArangoError {
    /// `GET /_api/database/current` failed
    #[error("Failed to fetch database properties: {0}")]
    DatabaseProperties(Response),

    /// `POST /_api/explain` failed
    #[error("Failed to explain query: {0}")]
    QueryExplain(Response),

    /// `POST /_api/query` failed
    #[error("Failed to validate query: {0}")]
    QueryValidate(Response),

    /// `POST /_api/cursor` failed
    #[error("Failed to execute query: {0}")]
    QueryExecute(Response),

    /// Fetching the next cursor batch failed
    #[error("Failed to fetch next cursor batch: {0}")]
    CursorNext(Response),

    /// Deleting a server-side cursor failed
    #[error("Failed to delete cursor: {0}")]
    CursorDelete(Response),

    #[error("Failed to list collections: {0}")]
    CollectionList(Response),

    #[error("Failed to add collection: {0}")]
    CollectionAdd(Response),

    #[error("Failed to remove collection: {0}")]
    CollectionRemove(Response),

    #[error("Failed to rename collection: {0}")]
    CollectionRename(Response),

    /// The collection is absent from the server's collection list
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Failed to list AQL functions: {0}")]
    AqlFunctionList(Response),

    #[error("Failed to add AQL function: {0}")]
    AqlFunctionAdd(Response),

    #[error("Failed to remove AQL function: {0}")]
    AqlFunctionRemove(Response),

    #[error("Failed to execute transaction: {0}")]
    TransactionExecute(Response),

    #[error("Failed to list graphs: {0}")]
    GraphList(Response),

    #[error("Failed to add graph: {0}")]
    GraphAdd(Response),

    #[error("Failed to remove graph: {0}")]
    GraphRemove(Response),

    /// The graph is absent from the server's graph list
    #[error("Graph not found: {0}")]
    GraphNotFound(String),

    /// Caller misuse detected locally, before any request was sent
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A success status whose body is missing an expected field
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Client configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ArangoError {
    /// The server response carried by this error, if it came from one
    pub fn response(&self) -> Option<&Response> {
        match self {
            ArangoError::DatabaseProperties(r)
            | ArangoError::QueryExplain(r)
            | ArangoError::QueryValidate(r)
            | ArangoError::QueryExecute(r)
            | ArangoError::CursorNext(r)
            | ArangoError::CursorDelete(r)
            | ArangoError::CollectionList(r)
            | ArangoError::CollectionAdd(r)
            | ArangoError::CollectionRemove(r)
            | ArangoError::CollectionRename(r)
            | ArangoError::AqlFunctionList(r)
            | ArangoError::AqlFunctionAdd(r)
            | ArangoError::AqlFunctionRemove(r)
            | ArangoError::TransactionExecute(r)
            | ArangoError::GraphList(r)
            | ArangoError::GraphAdd(r)
            | ArangoError::GraphRemove(r) => Some(r),
            _ => None,
        }
    }

    /// HTTP status code of the carried response
    pub fn status_code(&self) -> Option<u16> {
        self.response().map(|r| r.status_code)
    }
}

pub type ArangoResult<T> = Result<T, ArangoError>;
