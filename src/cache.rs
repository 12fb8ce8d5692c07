//! Name → proxy caches reconciled against the server's name list
//!
//! Caches are never pushed to. They are brought in line with an
//! authoritative name list by [`reconcile`], which removes names the server
//! no longer reports and creates proxies for names it newly reports. Entries
//! present on both sides keep their existing proxy, so a lookup of an
//! unchanged resource always yields the same `Arc`.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;

/// What a reconciliation pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl ReconcileReport {
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Diff `local` against `remote` and patch it in place.
///
/// `stale = keys(local) - remote` are dropped, `new = remote - keys(local)`
/// are built with `factory`. Duplicate names in `remote` are ignored.
pub fn reconcile<T, I, F>(
    local: &mut HashMap<String, Arc<T>>,
    remote: I,
    mut factory: F,
) -> ReconcileReport
where
    I: IntoIterator<Item = String>,
    F: FnMut(&str) -> T,
{
    let remote: HashSet<String> = remote.into_iter().collect();
    let mut report = ReconcileReport::default();

    local.retain(|name, _| {
        let keep = remote.contains(name);
        if !keep {
            report.removed.push(name.clone());
        }
        keep
    });

    for name in remote {
        if !local.contains_key(&name) {
            let proxy = Arc::new(factory(&name));
            report.added.push(name.clone());
            local.insert(name, proxy);
        }
    }

    report.added.sort();
    report.removed.sort();
    report
}

/// A reconciling cache with its own lock
#[derive(Debug)]
pub struct ProxyCache<T> {
    entries: RwLock<HashMap<String, Arc<T>>>,
}

impl<T> ProxyCache<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Cached proxy for `name`, without any I/O
    pub async fn get(&self, name: &str) -> Option<Arc<T>> {
        self.entries.read().await.get(name).cloned()
    }

    /// Bring the cache in line with `remote`
    pub async fn reconcile<I, F>(&self, remote: I, factory: F) -> ReconcileReport
    where
        I: IntoIterator<Item = String>,
        F: FnMut(&str) -> T,
    {
        let mut entries = self.entries.write().await;
        reconcile(&mut entries, remote, factory)
    }

    /// Sorted names currently cached
    pub async fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().await.keys().cloned().collect();
        names.sort();
        names
    }
}

impl<T> Default for ProxyCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
