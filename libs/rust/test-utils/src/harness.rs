//! Setup/teardown harness and assertion primitives.
//!
//! Lifecycle: `uninitialized → seeded → cases run → torn down`. Setup
//! validates and seeds the baseline exactly once; any setup failure is fatal
//! to the whole suite. Teardown consumes the environment, so it cannot run
//! twice.

use docrules_core::{AuthToken, RulesEngine};
use docrules_store::{AppHandle, Database, SeedData, StoreResult};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors raised while preparing the test environment.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// A seed document is not a JSON object
    #[error("Invalid seed document {collection}/{doc}: {reason}")]
    InvalidSeed {
        /// Collection the bad document belongs to
        collection: String,
        /// Document id
        doc: String,
        /// What is wrong with it
        reason: String,
    },
}

/// A seeded test environment around one rules-checked database.
#[derive(Debug)]
pub struct TestEnv {
    database: Database,
}

impl TestEnv {
    /// Seed a fresh database guarded by the given engine.
    ///
    /// Fails fast on malformed seed data; no partial environment is ever
    /// handed out.
    pub async fn setup_with(
        engine: Arc<dyn RulesEngine>,
        seed: &SeedData,
    ) -> Result<Self, HarnessError> {
        for (collection, docs) in seed {
            for (id, doc) in docs {
                if !doc.is_object() {
                    return Err(HarnessError::InvalidSeed {
                        collection: collection.clone(),
                        doc: id.clone(),
                        reason: "document body must be a JSON object".to_string(),
                    });
                }
            }
        }

        let database = Database::new(engine);
        database.seed(seed).await;
        info!("test environment seeded");
        Ok(Self { database })
    }

    /// Client handle for the given caller identity (`None` = unauthenticated).
    #[must_use]
    pub fn app_with(&self, auth: Option<AuthToken>) -> AppHandle {
        self.database.app_with(auth)
    }

    /// The underlying database, for rules-bypassing boundary assertions.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.database
    }

    /// Tear the environment down, releasing all documents. Consumes the
    /// environment so it happens exactly once.
    pub async fn tear_down(self) {
        self.database.clear().await;
        info!("test environment torn down");
    }
}

/// Assert an operation resolved; returns its value.
///
/// # Panics
///
/// Panics when the operation was rejected.
pub fn assert_succeeds<T>(result: StoreResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("expected operation to succeed, got: {err}"),
    }
}

/// Assert an operation was rejected by the rules.
///
/// # Panics
///
/// Panics when the operation succeeded, or when it failed for a reason other
/// than a rule denial (a storage fault is not a denial).
pub fn assert_fails<T>(result: StoreResult<T>) {
    match result {
        Ok(_) => panic!("expected a rule denial, operation succeeded"),
        Err(err) if err.is_denied() => {}
        Err(err) => panic!("expected a rule denial, got a different failure: {err}"),
    }
}

/// Non-panicking expectation check used by the suite driver: `None` when the
/// outcome matches the expectation, otherwise a human-readable mismatch.
pub(crate) fn expectation_mismatch<T>(
    expected_allowed: bool,
    result: &StoreResult<T>,
) -> Option<String> {
    match (expected_allowed, result) {
        (true, Ok(_)) => None,
        (true, Err(err)) => Some(format!("expected success, operation was rejected: {err}")),
        (false, Ok(_)) => Some("expected a rule denial, operation succeeded".to_string()),
        (false, Err(err)) if err.is_denied() => None,
        (false, Err(err)) => Some(format!(
            "expected a rule denial, got a different failure: {err}"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::allowed_email_domains_seed;
    use docrules_core::{ALLOWED_EMAIL_DOMAINS_COLLECTION, Operation, RuleSet, allowed_email_domains_rules};
    use docrules_store::StoreError;
    use serde_json::json;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_setup_seeds_exactly_the_fixture() {
        let env = TestEnv::setup_with(
            Arc::new(allowed_email_domains_rules()),
            &allowed_email_domains_seed(),
        )
        .await
        .unwrap();

        let docs = env.database().raw_docs(ALLOWED_EMAIL_DOMAINS_COLLECTION).await;
        assert_eq!(docs.len(), 2);
        env.tear_down().await;
    }

    #[tokio::test]
    async fn test_setup_rejects_malformed_seed() {
        let mut docs = HashMap::new();
        docs.insert("gmail.com".to_string(), json!("not an object"));
        let mut seed = HashMap::new();
        seed.insert(ALLOWED_EMAIL_DOMAINS_COLLECTION.to_string(), docs);

        let result = TestEnv::setup_with(Arc::new(RuleSet::new()), &seed).await;
        assert!(matches!(result, Err(HarnessError::InvalidSeed { .. })));
    }

    #[tokio::test]
    async fn test_tear_down_clears_documents() {
        let env = TestEnv::setup_with(
            Arc::new(allowed_email_domains_rules()),
            &allowed_email_domains_seed(),
        )
        .await
        .unwrap();

        let database = env.database().clone();
        env.tear_down().await;
        assert!(database.raw_docs(ALLOWED_EMAIL_DOMAINS_COLLECTION).await.is_empty());
    }

    #[test]
    fn test_assert_succeeds_returns_value() {
        let value = assert_succeeds(Ok::<_, StoreError>(7));
        assert_eq!(value, 7);
    }

    #[test]
    #[should_panic(expected = "expected operation to succeed")]
    fn test_assert_succeeds_panics_on_rejection() {
        assert_succeeds(Err::<(), _>(StoreError::denied(Operation::Read, "c")));
    }

    #[test]
    fn test_assert_fails_accepts_denial() {
        assert_fails(Err::<(), _>(StoreError::denied(Operation::Create, "c")));
    }

    #[test]
    #[should_panic(expected = "expected a rule denial")]
    fn test_assert_fails_panics_on_success() {
        assert_fails(Ok::<_, StoreError>(()));
    }

    #[test]
    #[should_panic(expected = "different failure")]
    fn test_assert_fails_rejects_non_denial_failure() {
        assert_fails(Err::<(), _>(StoreError::not_found("c/d")));
    }

    #[test]
    fn test_expectation_mismatch() {
        assert!(expectation_mismatch(true, &Ok(())).is_none());
        assert!(
            expectation_mismatch(false, &Err::<(), _>(StoreError::denied(Operation::Read, "c")))
                .is_none()
        );
        assert!(expectation_mismatch(false, &Ok(())).is_some());
        assert!(
            expectation_mismatch(false, &Err::<(), _>(StoreError::not_found("c/d"))).is_some()
        );
        assert!(
            expectation_mismatch(true, &Err::<(), _>(StoreError::denied(Operation::Read, "c")))
                .is_some()
        );
    }
}
