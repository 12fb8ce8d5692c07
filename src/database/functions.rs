use std::collections::BTreeMap;

use serde_json::{json, Value};
use tracing::info;

use super::Database;
use crate::error::{ArangoError, ArangoResult};
use crate::transport::{path_segment, Method, Request, Response};

impl Database {
    /// Fully qualified AQL function names mapped to their code.
    ///
    /// Always fetched from the server; function bodies are never cached.
    pub async fn aql_functions(&self) -> ArangoResult<BTreeMap<String, String>> {
        let response = self
            .transport
            .get("/_api/aqlfunction")
            .await?
            .expect_status(&[200], ArangoError::AqlFunctionList)?;
        function_entries(&response)
    }

    /// Register an AQL function and return the refreshed registry
    pub async fn add_aql_function(
        &self,
        name: &str,
        code: &str,
    ) -> ArangoResult<BTreeMap<String, String>> {
        require_function_name(name)?;
        self.transport
            .post("/_api/aqlfunction", json!({ "name": name, "code": code }))
            .await?
            .expect_status(&[200, 201], ArangoError::AqlFunctionAdd)?;
        info!("Added AQL function: {}", name);

        self.aql_functions().await
    }

    /// Remove an AQL function and return the refreshed registry.
    ///
    /// With `group = Some(true)`, `name` is a namespace prefix and every
    /// function below it is removed. Otherwise `name` must be fully
    /// qualified.
    pub async fn remove_aql_function(
        &self,
        name: &str,
        group: Option<bool>,
    ) -> ArangoResult<BTreeMap<String, String>> {
        require_function_name(name)?;
        let mut request = Request::new(
            Method::Delete,
            format!("/_api/aqlfunction/{}", path_segment(name)),
        );
        if let Some(group) = group {
            request = request.with_param("group", group.to_string());
        }
        self.transport
            .send(request)
            .await?
            .expect_status(&[200], ArangoError::AqlFunctionRemove)?;
        info!("Removed AQL function(s): {}", name);

        self.aql_functions().await
    }
}

fn require_function_name(name: &str) -> ArangoResult<()> {
    if name.trim().is_empty() {
        return Err(ArangoError::InvalidArgument("AQL function name is empty".to_string()));
    }
    Ok(())
}

/// Read `[{name, code}, ...]`, either top-level or under `result`
fn function_entries(response: &Response) -> ArangoResult<BTreeMap<String, String>> {
    let list = match &response.body {
        Value::Array(list) => list,
        body => body.get("result").and_then(Value::as_array).ok_or_else(|| {
            ArangoError::UnexpectedResponse("AQL function list reply is not a list".to_string())
        })?,
    };

    let mut functions = BTreeMap::new();
    for entry in list {
        let name = entry.get("name").and_then(Value::as_str);
        let code = entry.get("code").and_then(Value::as_str);
        match (name, code) {
            (Some(name), Some(code)) => {
                functions.insert(name.to_string(), code.to_string());
            }
            _ => {
                return Err(ArangoError::UnexpectedResponse(
                    "AQL function entry without name or code".to_string(),
                ))
            }
        }
    }
    Ok(functions)
}
