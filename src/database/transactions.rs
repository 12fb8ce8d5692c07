use serde_json::Value;
use tracing::debug;

use super::Database;
use crate::error::{ArangoError, ArangoResult};
use crate::models::TransactionSpec;

impl Database {
    /// Run a JavaScript transaction on the server and return its result.
    ///
    /// Atomicity is the server's job; nothing is coordinated or retried
    /// locally. The declared collections must exist, which the server checks.
    pub async fn execute_transaction(&self, spec: &TransactionSpec) -> ArangoResult<Value> {
        if spec.action.trim().is_empty() {
            return Err(ArangoError::InvalidArgument("transaction action is empty".to_string()));
        }
        let body = serde_json::to_value(spec.to_body())?;
        let response = self
            .transport
            .post("/_api/transaction", body)
            .await?
            .expect_status(&[200], ArangoError::TransactionExecute)?;
        debug!(
            "Transaction committed (read: {:?}, write: {:?})",
            spec.read, spec.write
        );
        Ok(response.field("result")?.clone())
    }
}
