//! Graph proxy and graph definitions

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::transport::Transport;

/// Handle to a named graph in a database
pub struct Graph {
    name: String,
    transport: Arc<dyn Transport>,
}

impl Graph {
    pub fn new(name: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            name: name.into(),
            transport,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph").field("name", &self.name).finish()
    }
}

/// An edge collection and the vertex collections it may connect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDefinition {
    pub collection: String,
    pub from: Vec<String>,
    pub to: Vec<String>,
}

impl EdgeDefinition {
    pub fn new(
        collection: impl Into<String>,
        from: impl IntoIterator<Item = impl Into<String>>,
        to: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            collection: collection.into(),
            from: from.into_iter().map(Into::into).collect(),
            to: to.into_iter().map(Into::into).collect(),
        }
    }
}

/// Body of `POST /_api/gharial`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_definitions: Option<Vec<EdgeDefinition>>,
    /// Vertex collections not referenced by any edge definition yet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orphan_collections: Option<Vec<String>>,
}

impl GraphSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            edge_definitions: None,
            orphan_collections: None,
        }
    }

    pub fn edge_definition(mut self, definition: EdgeDefinition) -> Self {
        self.edge_definitions.get_or_insert_with(Vec::new).push(definition);
        self
    }

    pub fn orphan_collection(mut self, name: impl Into<String>) -> Self {
        self.orphan_collections.get_or_insert_with(Vec::new).push(name.into());
        self
    }
}
