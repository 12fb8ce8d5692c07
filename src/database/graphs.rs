use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use super::{validate_name, Database};
use crate::error::{ArangoError, ArangoResult};
use crate::graph::{Graph, GraphSpec};
use crate::transport::path_segment;

impl Database {
    /// Names of the graphs in this database
    pub async fn graphs(&self) -> ArangoResult<Vec<String>> {
        let response = self
            .transport
            .get("/_api/gharial")
            .await?
            .expect_status(&[200, 202], ArangoError::GraphList)?;
        let graphs = response.field("graphs")?.as_array().ok_or_else(|| {
            ArangoError::UnexpectedResponse("'graphs' is not an array".to_string())
        })?;

        graphs
            .iter()
            .map(|graph| -> ArangoResult<String> {
                graph
                    .get("_key")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| {
                        ArangoError::UnexpectedResponse("graph entry without a _key".to_string())
                    })
            })
            .collect()
    }

    /// Proxy for the named graph, reconciling the graph cache on a miss
    pub async fn graph(&self, name: &str) -> ArangoResult<Arc<Graph>> {
        validate_name("graph", name)?;
        if let Some(graph) = self.graph_cache.get(name).await {
            return Ok(graph);
        }
        self.refresh_graph_cache().await?;
        self.graph_cache
            .get(name)
            .await
            .ok_or_else(|| ArangoError::GraphNotFound(name.to_string()))
    }

    /// Create a graph and return its proxy
    pub async fn add_graph(&self, spec: GraphSpec) -> ArangoResult<Arc<Graph>> {
        validate_name("graph", &spec.name)?;
        self.transport
            .post("/_api/gharial", serde_json::to_value(&spec)?)
            .await?
            .expect_status(&[201], ArangoError::GraphAdd)?;
        info!("Created graph: {}", spec.name);

        self.refresh_graph_cache().await?;
        self.graph(&spec.name).await
    }

    pub async fn remove_graph(&self, name: &str) -> ArangoResult<()> {
        self.transport
            .delete(&format!("/_api/gharial/{}", path_segment(name)))
            .await?
            .expect_status(&[200], ArangoError::GraphRemove)?;
        info!("Removed graph: {}", name);

        self.refresh_graph_cache().await
    }

    /// Names currently held in the local graph cache (no I/O)
    pub async fn cached_graphs(&self) -> Vec<String> {
        self.graph_cache.names().await
    }

    async fn refresh_graph_cache(&self) -> ArangoResult<()> {
        let remote = self.graphs().await?;
        let transport = &self.transport;
        let report = self
            .graph_cache
            .reconcile(remote, |name| Graph::new(name, Arc::clone(transport)))
            .await;
        debug!(
            "Reconciled graph cache: {} added, {} removed",
            report.added.len(),
            report.removed.len()
        );
        Ok(())
    }
}
