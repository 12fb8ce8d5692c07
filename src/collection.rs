//! Collection proxy and collection creation options

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::transport::Transport;

/// Handle to a named collection in a database.
///
/// Obtained from [`Database::collection`](crate::Database::collection).
pub struct Collection {
    name: String,
    transport: Arc<dyn Transport>,
}

impl Collection {
    pub fn new(name: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            name: name.into(),
            transport,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Transport this collection issues its requests through
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection").field("name", &self.name).finish()
    }
}

/// Document key generation strategy
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeyGenerator {
    #[default]
    Traditional,
    Autoincrement {
        increment: Option<u64>,
        offset: Option<u64>,
    },
}

/// Options for [`Database::add_collection`](crate::Database::add_collection)
#[derive(Debug, Clone)]
pub struct CollectionCreateSpec {
    pub name: String,
    pub wait_for_sync: bool,
    pub do_compact: bool,
    /// Maximum journal/datafile size in bytes
    pub journal_size: Option<u64>,
    pub is_system: bool,
    /// In-memory only
    pub is_volatile: bool,
    pub key_generator: KeyGenerator,
    pub allow_user_keys: bool,
    /// Edge collection instead of document collection
    pub is_edge: bool,
    pub number_of_shards: Option<u32>,
    pub shard_keys: Option<Vec<String>>,
}

impl CollectionCreateSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wait_for_sync: false,
            do_compact: true,
            journal_size: None,
            is_system: false,
            is_volatile: false,
            key_generator: KeyGenerator::Traditional,
            allow_user_keys: true,
            is_edge: false,
            number_of_shards: None,
            shard_keys: None,
        }
    }

    pub fn edge(mut self) -> Self {
        self.is_edge = true;
        self
    }

    pub fn wait_for_sync(mut self, wait_for_sync: bool) -> Self {
        self.wait_for_sync = wait_for_sync;
        self
    }

    pub fn key_generator(mut self, key_generator: KeyGenerator) -> Self {
        self.key_generator = key_generator;
        self
    }

    pub fn shards(mut self, number_of_shards: u32, shard_keys: Vec<String>) -> Self {
        self.number_of_shards = Some(number_of_shards);
        self.shard_keys = Some(shard_keys);
        self
    }

    /// Wire body for `POST /_api/collection`
    pub(crate) fn to_body(&self) -> CreateCollectionBody<'_> {
        let (kind, increment, offset) = match &self.key_generator {
            KeyGenerator::Traditional => ("traditional", None, None),
            KeyGenerator::Autoincrement { increment, offset } => {
                ("autoincrement", *increment, *offset)
            }
        };
        CreateCollectionBody {
            name: &self.name,
            wait_for_sync: self.wait_for_sync,
            do_compact: self.do_compact,
            is_system: self.is_system,
            is_volatile: self.is_volatile,
            collection_type: if self.is_edge { 3 } else { 2 },
            key_options: KeyOptions {
                kind,
                allow_user_keys: self.allow_user_keys,
                increment,
                offset,
            },
            journal_size: self.journal_size,
            number_of_shards: self.number_of_shards,
            shard_keys: self.shard_keys.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateCollectionBody<'a> {
    name: &'a str,
    wait_for_sync: bool,
    do_compact: bool,
    is_system: bool,
    is_volatile: bool,
    #[serde(rename = "type")]
    collection_type: u8,
    key_options: KeyOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    journal_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    number_of_shards: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shard_keys: Option<&'a [String]>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KeyOptions {
    #[serde(rename = "type")]
    kind: &'static str,
    allow_user_keys: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    increment: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<u64>,
}

/// Collection names split by the server's `isSystem` flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionList {
    pub user: Vec<String>,
    pub system: Vec<String>,
    /// User collections followed by system collections
    pub all: Vec<String>,
}

impl CollectionList {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, bool)>,
    {
        let mut list = CollectionList::default();
        for (name, is_system) in entries {
            if is_system {
                list.system.push(name);
            } else {
                list.user.push(name);
            }
        }
        list.all = list.user.iter().chain(list.system.iter()).cloned().collect();
        list
    }
}
