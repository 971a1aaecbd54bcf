//! Access-request and decision types.

use crate::identity::AuthToken;
use serde::{Deserialize, Serialize};

/// Operation a caller attempts against a collection or document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Add a new document to a collection
    Create,
    /// List the documents of a collection
    Read,
    /// Modify fields of an existing document
    Update,
    /// Remove an existing document
    Delete,
}

impl Operation {
    /// All operations, in suite order.
    pub const ALL: [Self; 4] = [Self::Create, Self::Read, Self::Update, Self::Delete];

    /// Lowercase name of this operation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Outcome of evaluating an access request against the rules.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// The operation may proceed
    Allow,
    /// The operation must be rejected
    Deny,
}

impl Decision {
    /// Whether this decision permits the operation.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Target of an access request: a collection, or one document within it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetRef {
    /// Collection name
    pub collection: String,
    /// Document id, when the operation addresses a single document
    pub document: Option<String>,
}

impl TargetRef {
    /// Target an entire collection (create/read).
    #[must_use]
    pub fn collection(name: impl Into<String>) -> Self {
        Self {
            collection: name.into(),
            document: None,
        }
    }

    /// Target one document within a collection (update/delete).
    #[must_use]
    pub fn document(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            document: Some(id.into()),
        }
    }

    /// Slash-joined path for logs and error messages.
    #[must_use]
    pub fn path(&self) -> String {
        match &self.document {
            Some(id) => format!("{}/{id}", self.collection),
            None => self.collection.clone(),
        }
    }
}

/// One access request: who, what, and where.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRequest {
    /// Caller claims; `None` for an unauthenticated caller
    pub auth: Option<AuthToken>,
    /// Attempted operation
    pub operation: Operation,
    /// Collection or document the operation addresses
    pub target: TargetRef,
}

impl AccessRequest {
    /// Build a request for the given caller, operation, and target.
    #[must_use]
    pub const fn new(auth: Option<AuthToken>, operation: Operation, target: TargetRef) -> Self {
        Self {
            auth,
            operation,
            target,
        }
    }
}

/// Expected (or granted) permission per CRUD operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermissionSet {
    /// May add documents
    pub create: bool,
    /// May list documents
    pub read: bool,
    /// May modify documents
    pub update: bool,
    /// May remove documents
    pub delete: bool,
}

impl PermissionSet {
    /// No operation permitted.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            create: false,
            read: false,
            update: false,
            delete: false,
        }
    }

    /// Every operation permitted.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            create: true,
            read: true,
            update: true,
            delete: true,
        }
    }

    /// The expectation for one operation.
    #[must_use]
    pub const fn allows(&self, operation: Operation) -> bool {
        match operation {
            Operation::Create => self.create,
            Operation::Read => self.read,
            Operation::Update => self.update,
            Operation::Delete => self.delete,
        }
    }
}
