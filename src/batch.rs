//! Deferred request batches
//!
//! A [`Batch`] collects requests and hands them to a [`BatchExecutor`] on
//! [`commit`](Batch::commit). The executor decides how they reach the
//! server; the facade does not interpret the replies.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::ArangoResult;
use crate::transport::{Request, Response, Transport};

#[async_trait]
pub trait BatchExecutor: Send + Sync {
    /// Run `requests` and return one response per request, in order
    async fn execute(&self, requests: Vec<Request>) -> ArangoResult<Vec<Response>>;
}

/// Sends each request in turn, stopping at the first transport failure
pub struct SequentialBatchExecutor {
    transport: Arc<dyn Transport>,
}

impl SequentialBatchExecutor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl BatchExecutor for SequentialBatchExecutor {
    async fn execute(&self, requests: Vec<Request>) -> ArangoResult<Vec<Response>> {
        let mut responses = Vec::with_capacity(requests.len());
        for request in requests {
            responses.push(self.transport.send(request).await?);
        }
        Ok(responses)
    }
}

/// Queue of requests awaiting submission
pub struct Batch {
    executor: Arc<dyn BatchExecutor>,
    requests: Vec<Request>,
}

impl Batch {
    pub fn new(executor: Arc<dyn BatchExecutor>) -> Self {
        Self {
            executor,
            requests: Vec::new(),
        }
    }

    pub fn add(&mut self, request: Request) -> &mut Self {
        self.requests.push(request);
        self
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Submit every queued request and empty the queue
    pub async fn commit(&mut self) -> ArangoResult<Vec<Response>> {
        let requests = std::mem::take(&mut self.requests);
        debug!("Committing batch of {} requests", requests.len());
        self.executor.execute(requests).await
    }
}
