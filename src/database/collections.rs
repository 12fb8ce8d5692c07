use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, info};

use super::{validate_name, Database};
use crate::collection::{Collection, CollectionCreateSpec, CollectionList};
use crate::error::{ArangoError, ArangoResult};
use crate::transport::{path_segment, Response};

impl Database {
    /// List collection names, split into user and system collections
    pub async fn collections(&self) -> ArangoResult<CollectionList> {
        let response = self
            .transport
            .get("/_api/collection")
            .await?
            .expect_status(&[200], ArangoError::CollectionList)?;
        Ok(CollectionList::from_entries(collection_entries(&response)?))
    }

    /// Proxy for the named collection.
    ///
    /// Served from the cache when possible; otherwise the cache is reconciled
    /// once against the server and checked again.
    pub async fn collection(&self, name: &str) -> ArangoResult<Arc<Collection>> {
        validate_name("collection", name)?;
        if let Some(collection) = self.collection_cache.get(name).await {
            return Ok(collection);
        }
        self.refresh_collection_cache().await?;
        self.collection_cache
            .get(name)
            .await
            .ok_or_else(|| ArangoError::CollectionNotFound(name.to_string()))
    }

    /// Alias for [`collection`](Self::collection)
    pub async fn col(&self, name: &str) -> ArangoResult<Arc<Collection>> {
        self.collection(name).await
    }

    /// Create a collection and return its proxy
    pub async fn add_collection(
        &self,
        spec: CollectionCreateSpec,
    ) -> ArangoResult<Arc<Collection>> {
        validate_name("collection", &spec.name)?;
        let body = serde_json::to_value(spec.to_body())?;
        self.transport
            .post("/_api/collection", body)
            .await?
            .expect_status(&[200], ArangoError::CollectionAdd)?;
        info!("Created collection: {}", spec.name);

        self.refresh_collection_cache().await?;
        self.collection(&spec.name).await
    }

    pub async fn remove_collection(&self, name: &str) -> ArangoResult<()> {
        self.transport
            .delete(&format!("/_api/collection/{}", path_segment(name)))
            .await?
            .expect_status(&[200], ArangoError::CollectionRemove)?;
        info!("Removed collection: {}", name);

        self.refresh_collection_cache().await
    }

    pub async fn rename_collection(&self, name: &str, new_name: &str) -> ArangoResult<()> {
        validate_name("collection", new_name)?;
        self.transport
            .put(
                &format!("/_api/collection/{}/rename", path_segment(name)),
                json!({ "name": new_name }),
            )
            .await?
            .expect_status(&[200], ArangoError::CollectionRename)?;
        info!("Renamed collection: {} -> {}", name, new_name);

        self.refresh_collection_cache().await
    }

    /// Names currently held in the local collection cache (no I/O)
    pub async fn cached_collections(&self) -> Vec<String> {
        self.collection_cache.names().await
    }

    async fn refresh_collection_cache(&self) -> ArangoResult<()> {
        let remote = self.collections().await?.all;
        let transport = &self.transport;
        let report = self
            .collection_cache
            .reconcile(remote, |name| Collection::new(name, Arc::clone(transport)))
            .await;
        debug!(
            "Reconciled collection cache: {} added, {} removed",
            report.added.len(),
            report.removed.len()
        );
        Ok(())
    }
}

/// `(name, isSystem)` pairs from a collection list reply
fn collection_entries(response: &Response) -> ArangoResult<Vec<(String, bool)>> {
    let list = response
        .body
        .get("collections")
        .or_else(|| response.body.get("result"))
        .and_then(Value::as_array)
        .ok_or_else(|| {
            ArangoError::UnexpectedResponse("collection list reply has no collections".to_string())
        })?;

    list.iter()
        .map(|entry| -> ArangoResult<(String, bool)> {
            let name = entry.get("name").and_then(Value::as_str).ok_or_else(|| {
                ArangoError::UnexpectedResponse("collection entry without a name".to_string())
            })?;
            let is_system = entry.get("isSystem").and_then(Value::as_bool).unwrap_or(false);
            Ok((name.to_string(), is_system))
        })
        .collect()
}
