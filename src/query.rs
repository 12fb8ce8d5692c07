//! AQL query request bodies
//!
//! Unset options are left out of the JSON entirely. The server treats an
//! explicit `null` as an override, so `None` must never be serialized.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
struct OptimizerRules {
    rules: Vec<String>,
}

/// Nested `options` object of a cursor request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    full_count: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_number_of_plans: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    optimizer: Option<OptimizerRules>,
}

impl QueryOptions {
    pub fn is_empty(&self) -> bool {
        self.full_count.is_none() && self.max_number_of_plans.is_none() && self.optimizer.is_none()
    }
}

/// Body of `POST /_api/cursor`
///
/// ```
/// use arangodb_client::QueryRequest;
///
/// let request = QueryRequest::new("FOR u IN users RETURN u")
///     .batch_size(100)
///     .bind_var("min", 18);
/// assert_eq!(request.query(), "FOR u IN users RETURN u");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    query: String,
    count: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    batch_size: Option<u32>,
    /// Cursor time-to-live in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bind_vars: Option<HashMap<String, Value>>,
    #[serde(skip_serializing_if = "QueryOptions::is_empty")]
    options: QueryOptions,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            count: false,
            batch_size: None,
            ttl: None,
            bind_vars: None,
            options: QueryOptions::default(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Ask the server to return the total result count
    pub fn count(mut self, count: bool) -> Self {
        self.count = count;
        self
    }

    /// Maximum number of documents per round trip
    pub fn batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn ttl(mut self, seconds: u32) -> Self {
        self.ttl = Some(seconds);
        self
    }

    pub fn bind_var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.bind_vars
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn bind_vars(mut self, bind_vars: HashMap<String, Value>) -> Self {
        self.bind_vars = Some(bind_vars);
        self
    }

    /// Include the number of matches before the last LIMIT
    pub fn full_count(mut self, full_count: bool) -> Self {
        self.options.full_count = Some(full_count);
        self
    }

    pub fn max_plans(mut self, max_plans: u32) -> Self {
        self.options.max_number_of_plans = Some(max_plans);
        self
    }

    pub fn optimizer_rules(mut self, rules: Vec<String>) -> Self {
        self.options.optimizer = Some(OptimizerRules { rules });
        self
    }
}

/// Options for [`Database::explain_query`](crate::Database::explain_query)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplainOptions {
    /// Return every plan the optimizer considered, not just the best one
    pub all_plans: bool,
    pub max_plans: Option<u32>,
    pub optimizer_rules: Option<Vec<String>>,
}

impl ExplainOptions {
    pub(crate) fn to_body(&self) -> ExplainBody {
        ExplainBody {
            all_plans: self.all_plans,
            max_number_of_plans: self.max_plans,
            optimizer: self
                .optimizer_rules
                .clone()
                .map(|rules| OptimizerRules { rules }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExplainBody {
    all_plans: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_number_of_plans: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    optimizer: Option<OptimizerRules>,
}

/// Result of explaining a query
#[derive(Debug, Clone, PartialEq)]
pub enum ExplainResult {
    /// The optimal plan
    Plan(Value),
    /// Every plan, when `all_plans` was requested
    Plans(Vec<Value>),
}

impl ExplainResult {
    pub fn plans(&self) -> Vec<&Value> {
        match self {
            ExplainResult::Plan(plan) => vec![plan],
            ExplainResult::Plans(plans) => plans.iter().collect(),
        }
    }
}
