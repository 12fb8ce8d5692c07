//! Query cursors
//!
//! A cursor starts out holding the first batch from the creation response.
//! Later batches are pulled lazily with `PUT /_api/cursor/{id}`. Cursors are
//! forward-only; to start over, execute the query again.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ArangoError, ArangoResult};
use crate::transport::{path_segment, Method, Request, Response, Transport};

/// Builds a [`Cursor`] from a successful `POST /_api/cursor` response
pub trait CursorFactory: Send + Sync {
    fn create(&self, response: Response) -> ArangoResult<Cursor>;
}

/// Default factory: cursors page through the given transport
pub struct ServerCursorFactory {
    transport: Arc<dyn Transport>,
}

impl ServerCursorFactory {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

impl CursorFactory for ServerCursorFactory {
    fn create(&self, response: Response) -> ArangoResult<Cursor> {
        Cursor::from_response(Arc::clone(&self.transport), response)
    }
}

/// Local representative of a server-side query result set
pub struct Cursor {
    transport: Arc<dyn Transport>,
    id: Option<String>,
    batch: VecDeque<Value>,
    has_more: bool,
    count: Option<u64>,
    extra: Value,
}

impl Cursor {
    /// Parse the cursor creation (or continuation) body
    pub fn from_response(transport: Arc<dyn Transport>, response: Response) -> ArangoResult<Self> {
        let mut cursor = Self {
            transport,
            id: None,
            batch: VecDeque::new(),
            has_more: false,
            count: None,
            extra: Value::Null,
        };
        cursor.absorb(&response)?;
        Ok(cursor)
    }

    fn absorb(&mut self, response: &Response) -> ArangoResult<()> {
        let result = response.field("result")?.as_array().ok_or_else(|| {
            ArangoError::UnexpectedResponse("cursor 'result' is not an array".to_string())
        })?;
        self.batch.extend(result.iter().cloned());
        self.has_more = response
            .body
            .get("hasMore")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if let Some(id) = response.body.get("id").and_then(Value::as_str) {
            self.id = Some(id.to_string());
        }
        if let Some(count) = response.body.get("count").and_then(Value::as_u64) {
            self.count = Some(count);
        }
        if let Some(extra) = response.body.get("extra") {
            self.extra = extra.clone();
        }
        Ok(())
    }

    /// Server-side cursor id; absent when the whole result fit in one batch
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Total result count, when the query asked for it
    pub fn count(&self) -> Option<u64> {
        self.count
    }

    /// Matches before the last LIMIT, when `full_count` was requested
    pub fn full_count(&self) -> Option<u64> {
        self.extra
            .get("stats")
            .and_then(|stats| stats.get("fullCount"))
            .and_then(Value::as_u64)
    }

    /// Query statistics and warnings
    pub fn extra(&self) -> &Value {
        &self.extra
    }

    /// Whether the server holds more batches
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Documents buffered locally and not yet returned by [`next`](Self::next)
    pub fn batch(&self) -> &VecDeque<Value> {
        &self.batch
    }

    /// Next document, fetching a new batch from the server when needed
    pub async fn next(&mut self) -> ArangoResult<Option<Value>> {
        while self.batch.is_empty() && self.has_more {
            self.fetch_next_batch().await?;
        }
        Ok(self.batch.pop_front())
    }

    /// Drain every remaining document
    pub async fn collect_all(mut self) -> ArangoResult<Vec<Value>> {
        let mut documents = Vec::new();
        while let Some(document) = self.next().await? {
            documents.push(document);
        }
        Ok(documents)
    }

    async fn fetch_next_batch(&mut self) -> ArangoResult<()> {
        let id = self.id.clone().ok_or_else(|| {
            ArangoError::UnexpectedResponse("cursor reports more results but has no id".to_string())
        })?;
        let response = self
            .transport
            .send(Request::new(Method::Put, format!("/_api/cursor/{}", path_segment(&id))))
            .await?
            .expect_status(&[200], ArangoError::CursorNext)?;
        debug!("Fetched next batch for cursor {}", id);
        self.absorb(&response)
    }

    /// Release the server-side cursor.
    ///
    /// Returns `false` if the server no longer knew the cursor (it was
    /// exhausted or expired), `true` if it was deleted.
    pub async fn close(&mut self) -> ArangoResult<bool> {
        let Some(id) = self.id.clone() else {
            return Ok(false);
        };
        let response = self
            .transport
            .delete(&format!("/_api/cursor/{}", path_segment(&id)))
            .await?
            .expect_status(&[202, 404], ArangoError::CursorDelete)?;
        self.has_more = false;
        self.batch.clear();
        Ok(response.status_code == 202)
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("id", &self.id)
            .field("buffered", &self.batch.len())
            .field("has_more", &self.has_more)
            .field("count", &self.count)
            .finish()
    }
}

impl Drop for Cursor {
    fn drop(&mut self) {
        if self.has_more {
            if let Some(id) = &self.id {
                warn!(
                    "Cursor {} dropped before exhaustion; server state kept until its ttl expires",
                    id
                );
            }
        }
    }
}
