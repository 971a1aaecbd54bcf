//! Access-matrix builder and suite driver.
//!
//! The matrix is plain data built synchronously: no async work happens while
//! the fixture table is constructed, so case registration can never race
//! suite completion. The driver then executes every case sequentially, one
//! in-flight operation at a time, awaiting each to completion.

use crate::fixtures::{allowed_email_user, denied_email_user};
use crate::harness::{TestEnv, expectation_mismatch};
use docrules_core::{AuthToken, Operation, PermissionSet, SignInProvider};
use serde_json::json;
use tracing::debug;

/// One tested caller: description, identity, and expected permissions.
#[derive(Debug, Clone)]
pub struct IdentityVariant {
    /// Human-readable description, embedded in case titles
    pub description: String,
    /// Caller identity; `None` for an unauthenticated caller
    pub auth: Option<AuthToken>,
    /// Expected outcome per operation
    pub expected: PermissionSet,
}

/// An ordered group of identity variants sharing a sign-in provider.
#[derive(Debug, Clone)]
pub struct ProviderGroup {
    /// Group title (provider name, empty for unauthenticated)
    pub title: String,
    /// Description prefix for every variant in the group
    pub description: String,
    /// Ordered variants
    pub variants: Vec<IdentityVariant>,
}

/// Outcome of one executed case.
#[derive(Debug, Clone)]
pub struct CaseResult {
    /// Self-describing case title
    pub title: String,
    /// Whether the outcome matched the expectation
    pub passed: bool,
    /// Mismatch description when the case failed
    pub detail: Option<String>,
}

fn provider_variants(provider: SignInProvider, expected: PermissionSet) -> Vec<IdentityVariant> {
    vec![
        IdentityVariant {
            description: "allowed email domain user with a verified email".to_string(),
            auth: Some(allowed_email_user(provider, true)),
            expected,
        },
        IdentityVariant {
            description: "not allowed email domain user with a verified email".to_string(),
            auth: Some(denied_email_user(provider, true)),
            expected,
        },
        IdentityVariant {
            description: "allowed email domain user with not verified email".to_string(),
            auth: Some(allowed_email_user(provider, false)),
            expected,
        },
        IdentityVariant {
            description: "not allowed email domain user with not verified email".to_string(),
            auth: Some(denied_email_user(provider, false)),
            expected,
        },
    ]
}

/// The full identity matrix for the allowed-email-domains suite: password
/// and google provider groups crossed with allow-list membership and email
/// verification, plus the unauthenticated caller. Every variant expects all
/// four operations denied.
#[must_use]
pub fn sign_in_provider_matrix() -> Vec<ProviderGroup> {
    vec![
        ProviderGroup {
            title: "password".to_string(),
            description: "Authenticated with a password and ".to_string(),
            variants: provider_variants(SignInProvider::Password, PermissionSet::none()),
        },
        ProviderGroup {
            title: "google".to_string(),
            description: "Authenticated with a google and ".to_string(),
            variants: provider_variants(SignInProvider::Google, PermissionSet::none()),
        },
        ProviderGroup {
            title: String::new(),
            description: "Unauthenticated ".to_string(),
            variants: vec![IdentityVariant {
                description: "user".to_string(),
                auth: None,
                expected: PermissionSet::none(),
            }],
        },
    ]
}

/// Title fragment for one operation, derived from the expected flag so
/// failures are self-describing.
#[must_use]
pub const fn case_title(operation: Operation, allowed: bool) -> &'static str {
    match (operation, allowed) {
        (Operation::Create, true) => "allows to create an allowed email domain",
        (Operation::Create, false) => "does not allow creating an allowed email domain",
        (Operation::Read, true) => "allows reading allowed email domains",
        (Operation::Read, false) => "does not allow reading an allowed email domains",
        (Operation::Update, true) => "allows to update an allowed email domain",
        (Operation::Update, false) => "does not allow updating an allowed email domain",
        (Operation::Delete, true) => "allows to delete an allowed email domain",
        (Operation::Delete, false) => "does not allow deleting an allowed email domain",
    }
}

/// Run the four CRUD cases for every variant in the matrix against the given
/// collection.
///
/// Cases execute sequentially with a single in-flight operation each and no
/// retries. A mismatch fails that case only; sibling cases still run. The
/// update and delete cases address the fixed `gmail.com` document.
pub async fn run_access_matrix(
    env: &TestEnv,
    collection: &str,
    groups: &[ProviderGroup],
) -> Vec<CaseResult> {
    let mut results = Vec::new();

    for group in groups {
        for variant in &group.variants {
            let description = format!("{}{}", group.description, variant.description);
            let app = env.app_with(variant.auth.clone());
            let target = app.collection(collection);

            for operation in Operation::ALL {
                let allowed = variant.expected.allows(operation);
                let title = format!("{description} {}", case_title(operation, allowed));
                debug!(case = %title, "running case");

                let detail = match operation {
                    Operation::Create => expectation_mismatch(
                        allowed,
                        &target.add(json!({ "test.com": {} })).await,
                    ),
                    Operation::Read => expectation_mismatch(allowed, &target.get().await),
                    Operation::Update => expectation_mismatch(
                        allowed,
                        &target.doc("gmail.com").update(json!({ "test": "updated" })).await,
                    ),
                    Operation::Delete => {
                        expectation_mismatch(allowed, &target.doc("gmail.com").delete().await)
                    }
                };

                results.push(CaseResult {
                    title,
                    passed: detail.is_none(),
                    detail,
                });
            }
        }
    }

    results
}
