//! Data models for database properties and transactions

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Properties of the current database, from `GET /_api/database/current`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseProperties {
    pub id: String,
    pub name: String,
    /// Filesystem path on the server
    #[serde(default)]
    pub path: String,
    pub is_system: bool,
}

/// A server-side JavaScript transaction
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionSpec {
    /// JavaScript function source executed by the server
    pub action: String,
    /// Collections read by the action
    pub read: Vec<String>,
    /// Collections written by the action
    pub write: Vec<String>,
    pub wait_for_sync: bool,
    /// Seconds to wait for collection locks
    pub lock_timeout: Option<u64>,
    /// Passed to the action as its argument
    pub params: Option<Value>,
}

impl TransactionSpec {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            read: Vec::new(),
            write: Vec::new(),
            wait_for_sync: false,
            lock_timeout: None,
            params: None,
        }
    }

    pub fn read(mut self, collections: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.read.extend(collections.into_iter().map(Into::into));
        self
    }

    pub fn write(mut self, collections: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.write.extend(collections.into_iter().map(Into::into));
        self
    }

    pub fn wait_for_sync(mut self, wait_for_sync: bool) -> Self {
        self.wait_for_sync = wait_for_sync;
        self
    }

    pub fn lock_timeout(mut self, seconds: u64) -> Self {
        self.lock_timeout = Some(seconds);
        self
    }

    pub fn params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    pub(crate) fn to_body(&self) -> TransactionBody<'_> {
        TransactionBody {
            collections: TransactionCollections {
                read: &self.read,
                write: &self.write,
            },
            action: &self.action,
            wait_for_sync: self.wait_for_sync,
            lock_timeout: self.lock_timeout,
            params: self.params.as_ref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct TransactionCollections<'a> {
    read: &'a [String],
    write: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransactionBody<'a> {
    collections: TransactionCollections<'a>,
    action: &'a str,
    wait_for_sync: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    lock_timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'a Value>,
}
