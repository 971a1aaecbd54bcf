//! The in-memory database and its rules-bypassing maintenance surface.

use crate::app::AppHandle;
use docrules_core::{AuthToken, RulesEngine};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Seed data: collection name → document id → document body.
pub type SeedData = HashMap<String, HashMap<String, Value>>;

type Collections = HashMap<String, HashMap<String, Value>>;

/// In-memory document database with an injected rules engine.
///
/// Clones share storage and engine; handing a clone to an [`AppHandle`] is
/// cheap.
#[derive(Clone)]
pub struct Database {
    collections: Arc<RwLock<Collections>>,
    engine: Arc<dyn RulesEngine>,
}

impl Database {
    /// Create an empty database guarded by the given engine.
    #[must_use]
    pub fn new(engine: Arc<dyn RulesEngine>) -> Self {
        Self {
            collections: Arc::new(RwLock::new(HashMap::new())),
            engine,
        }
    }

    /// Load baseline documents, bypassing the rules. Existing documents with
    /// the same ids are replaced.
    pub async fn seed(&self, data: &SeedData) {
        let mut collections = self.collections.write().await;
        for (collection, docs) in data {
            let entry = collections.entry(collection.clone()).or_default();
            for (id, doc) in docs {
                entry.insert(id.clone(), doc.clone());
            }
        }
        debug!(collections = data.len(), "seeded database");
    }

    /// Drop every collection, bypassing the rules.
    pub async fn clear(&self) {
        self.collections.write().await.clear();
        debug!("cleared database");
    }

    /// Rules-bypassing snapshot of one collection, sorted by document id.
    /// For boundary assertions in tests, not for client reads.
    pub async fn raw_docs(&self, collection: &str) -> Vec<(String, Value)> {
        let collections = self.collections.read().await;
        let mut docs: Vec<(String, Value)> = collections
            .get(collection)
            .map(|docs| docs.iter().map(|(id, doc)| (id.clone(), doc.clone())).collect())
            .unwrap_or_default();
        docs.sort_by(|(a, _), (b, _)| a.cmp(b));
        docs
    }

    /// Create a client handle bound to the given caller identity
    /// (`None` for an unauthenticated caller).
    #[must_use]
    pub fn app_with(&self, auth: Option<AuthToken>) -> AppHandle {
        AppHandle::new(self.clone(), auth)
    }

    pub(crate) fn engine(&self) -> &Arc<dyn RulesEngine> {
        &self.engine
    }

    pub(crate) fn collections(&self) -> &Arc<RwLock<Collections>> {
        &self.collections
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}
