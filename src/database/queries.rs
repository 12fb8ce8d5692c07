use serde_json::{json, Value};

use super::Database;
use crate::cursor::Cursor;
use crate::error::{ArangoError, ArangoResult};
use crate::query::{ExplainOptions, ExplainResult, QueryRequest};

impl Database {
    /// Ask the optimizer for the query's execution plan(s) without running it
    pub async fn explain_query(
        &self,
        query: &str,
        options: &ExplainOptions,
    ) -> ArangoResult<ExplainResult> {
        require_query(query)?;
        let body = json!({
            "query": query,
            "options": serde_json::to_value(options.to_body())?,
        });
        let response = self
            .transport
            .post("/_api/explain", body)
            .await?
            .expect_status(&[200], ArangoError::QueryExplain)?;

        if let Some(plan) = response.body.get("plan") {
            return Ok(ExplainResult::Plan(plan.clone()));
        }
        match response.field("plans")? {
            Value::Array(plans) => Ok(ExplainResult::Plans(plans.clone())),
            _ => Err(ArangoError::UnexpectedResponse("'plans' is not an array".to_string())),
        }
    }

    /// Parse the query on the server, without executing it
    pub async fn validate_query(&self, query: &str) -> ArangoResult<()> {
        require_query(query)?;
        self.transport
            .post("/_api/query", json!({ "query": query }))
            .await?
            .expect_status(&[200], ArangoError::QueryValidate)?;
        Ok(())
    }

    /// Run the query and return a cursor over its results
    pub async fn execute_query(&self, request: &QueryRequest) -> ArangoResult<Cursor> {
        require_query(request.query())?;
        let response = self
            .transport
            .post("/_api/cursor", serde_json::to_value(request)?)
            .await?
            .expect_status(&[201], ArangoError::QueryExecute)?;
        self.cursor_factory.create(response)
    }
}

fn require_query(query: &str) -> ArangoResult<()> {
    if query.trim().is_empty() {
        return Err(ArangoError::InvalidArgument("query text is empty".to_string()));
    }
    Ok(())
}
