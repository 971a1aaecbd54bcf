//! The client surface: an application handle bound to one caller identity.
//!
//! Mirrors the SDK shape the rules protect: `collection(name).add(doc)`,
//! `collection(name).get()`, `collection(name).doc(id).update(fields)`,
//! `collection(name).doc(id).delete()`. Each call is one in-flight async
//! operation, evaluated against the rules engine before storage is touched.

use crate::database::Database;
use crate::error::{StoreError, StoreResult};
use docrules_core::{AccessRequest, AuthToken, Operation, TargetRef};
use serde_json::Value;
use uuid::Uuid;

/// A client handle bound to one caller identity.
#[derive(Debug, Clone)]
pub struct AppHandle {
    database: Database,
    auth: Option<AuthToken>,
}

impl AppHandle {
    pub(crate) const fn new(database: Database, auth: Option<AuthToken>) -> Self {
        Self { database, auth }
    }

    /// The caller identity this handle operates as.
    #[must_use]
    pub const fn auth(&self) -> Option<&AuthToken> {
        self.auth.as_ref()
    }

    /// Reference a collection.
    #[must_use]
    pub fn collection(&self, name: impl Into<String>) -> CollectionRef {
        CollectionRef {
            app: self.clone(),
            name: name.into(),
        }
    }

    async fn guard(&self, operation: Operation, target: TargetRef) -> StoreResult<()> {
        let request = AccessRequest::new(self.auth.clone(), operation, target);
        let decision = self.database.engine().evaluate(&request).await?;
        if decision.is_allowed() {
            Ok(())
        } else {
            Err(StoreError::denied(operation, request.target.path()))
        }
    }
}

/// Reference to a collection through one caller's handle.
#[derive(Debug, Clone)]
pub struct CollectionRef {
    app: AppHandle,
    name: String,
}

impl CollectionRef {
    /// Add a document with a generated id. Subject to the create rule.
    pub async fn add(&self, doc: Value) -> StoreResult<String> {
        self.app
            .guard(Operation::Create, TargetRef::collection(&self.name))
            .await?;
        if !doc.is_object() {
            return Err(StoreError::InvalidDocument(
                "document body must be a JSON object".to_string(),
            ));
        }
        let id = Uuid::new_v4().to_string();
        let mut collections = self.app.database.collections().write().await;
        collections
            .entry(self.name.clone())
            .or_default()
            .insert(id.clone(), doc);
        Ok(id)
    }

    /// List all documents, sorted by id. Subject to the read rule.
    pub async fn get(&self) -> StoreResult<Vec<(String, Value)>> {
        self.app
            .guard(Operation::Read, TargetRef::collection(&self.name))
            .await?;
        let collections = self.app.database.collections().read().await;
        let mut docs: Vec<(String, Value)> = collections
            .get(&self.name)
            .map(|docs| docs.iter().map(|(id, doc)| (id.clone(), doc.clone())).collect())
            .unwrap_or_default();
        docs.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(docs)
    }

    /// Reference one document by id.
    #[must_use]
    pub fn doc(&self, id: impl Into<String>) -> DocumentRef {
        DocumentRef {
            app: self.app.clone(),
            collection: self.name.clone(),
            id: id.into(),
        }
    }
}

/// Reference to one document through one caller's handle.
#[derive(Debug, Clone)]
pub struct DocumentRef {
    app: AppHandle,
    collection: String,
    id: String,
}

impl DocumentRef {
    fn target(&self) -> TargetRef {
        TargetRef::document(&self.collection, &self.id)
    }

    /// Merge fields into the document. Subject to the update rule; the
    /// document must already exist.
    pub async fn update(&self, fields: Value) -> StoreResult<()> {
        self.app.guard(Operation::Update, self.target()).await?;
        let Value::Object(fields) = fields else {
            return Err(StoreError::InvalidDocument(
                "update fields must be a JSON object".to_string(),
            ));
        };
        let mut collections = self.app.database.collections().write().await;
        let doc = collections
            .get_mut(&self.collection)
            .and_then(|docs| docs.get_mut(&self.id))
            .ok_or_else(|| StoreError::not_found(self.target().path()))?;
        if let Value::Object(existing) = doc {
            for (key, value) in fields {
                existing.insert(key, value);
            }
        } else {
            *doc = Value::Object(fields);
        }
        Ok(())
    }

    /// Remove the document. Subject to the delete rule; the document must
    /// already exist.
    pub async fn delete(&self) -> StoreResult<()> {
        self.app.guard(Operation::Delete, self.target()).await?;
        let mut collections = self.app.database.collections().write().await;
        let removed = collections
            .get_mut(&self.collection)
            .and_then(|docs| docs.remove(&self.id));
        if removed.is_none() {
            return Err(StoreError::not_found(self.target().path()));
        }
        Ok(())
    }
}
