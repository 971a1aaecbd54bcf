//! Rules-evaluation capability and the static rule-set engine.
//!
//! The backend evaluates declarative security rules server-side, per request.
//! That capability is abstracted here as [`RulesEngine`] so the access suite
//! can run against an in-process engine, and [`RuleSet`] provides the
//! engine used in tests: typed per-(collection, operation) grant conditions
//! with deny-by-default semantics for everything not granted.

use crate::access::{AccessRequest, Decision, Operation};
use crate::error::{RulesError, RulesResult};
use crate::identity::{AuthToken, SignInProvider};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Capability to decide whether one access request may proceed.
#[async_trait]
pub trait RulesEngine: Send + Sync {
    /// Evaluate the request and return the decision.
    async fn evaluate(&self, request: &AccessRequest) -> RulesResult<Decision>;
}

/// Condition a caller must satisfy for a grant to apply.
///
/// Conditions are typed values, not a parsed rule language. Every condition
/// other than [`Condition::Always`] denies an unauthenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Grant unconditionally, including to unauthenticated callers
    Always,
    /// Never grant; an explicit backend-only marker
    Never,
    /// Caller must be authenticated
    SignedIn,
    /// Caller must have a verified email address
    EmailVerified,
    /// Caller must have signed in with the given provider
    Provider(SignInProvider),
    /// Caller's email domain must be one of the given domains
    EmailDomainIn(BTreeSet<String>),
    /// Every sub-condition must hold
    All(Vec<Condition>),
    /// At least one sub-condition must hold
    Any(Vec<Condition>),
}

impl Condition {
    /// Build an email-domain condition from an iterator of domains.
    pub fn email_domain_in<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::EmailDomainIn(domains.into_iter().map(Into::into).collect())
    }

    fn holds(&self, auth: Option<&AuthToken>) -> RulesResult<bool> {
        match self {
            Self::Always => Ok(true),
            Self::Never => Ok(false),
            Self::SignedIn => Ok(auth.is_some()),
            Self::EmailVerified => Ok(auth.is_some_and(|token| token.email_verified)),
            Self::Provider(provider) => {
                Ok(auth.is_some_and(|token| token.sign_in_provider == *provider))
            }
            Self::EmailDomainIn(domains) => {
                if domains.is_empty() {
                    return Err(RulesError::invalid_condition(
                        "<condition>",
                        "<any>",
                        "empty email-domain set can never match",
                    ));
                }
                Ok(auth
                    .and_then(AuthToken::email_domain)
                    .is_some_and(|domain| domains.contains(domain)))
            }
            Self::All(conditions) => {
                for condition in conditions {
                    if !condition.holds(auth)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::Any(conditions) => {
                for condition in conditions {
                    if condition.holds(auth)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

/// Static rule set: per-(collection, operation) grant conditions.
///
/// A request is allowed only when a grant exists for its collection and
/// operation and the grant's condition holds for the caller. Everything else
/// is denied.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    grants: HashMap<(String, Operation), Condition>,
}

impl RuleSet {
    /// Create an empty rule set (denies every request).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a grant for one operation on a collection.
    #[must_use]
    pub fn grant(
        mut self,
        collection: impl Into<String>,
        operation: Operation,
        condition: Condition,
    ) -> Self {
        self.grants.insert((collection.into(), operation), condition);
        self
    }

    /// Mark a collection backend-only: explicit `Never` grants for all
    /// operations, so intent is visible rather than implied by absence.
    #[must_use]
    pub fn backend_only(mut self, collection: impl Into<String>) -> Self {
        let collection = collection.into();
        for operation in Operation::ALL {
            self.grants
                .insert((collection.clone(), operation), Condition::Never);
        }
        self
    }

    /// Number of configured grants.
    #[must_use]
    pub fn grant_count(&self) -> usize {
        self.grants.len()
    }

    fn decide(&self, request: &AccessRequest) -> RulesResult<Decision> {
        let key = (request.target.collection.clone(), request.operation);
        let Some(condition) = self.grants.get(&key) else {
            return Ok(Decision::Deny);
        };
        let holds = match condition.holds(request.auth.as_ref()) {
            Ok(holds) => holds,
            Err(RulesError::InvalidCondition { reason, .. }) => {
                return Err(RulesError::invalid_condition(
                    &request.target.collection,
                    request.operation.as_str(),
                    reason,
                ));
            }
            Err(err) => return Err(err),
        };
        Ok(if holds { Decision::Allow } else { Decision::Deny })
    }
}

#[async_trait]
impl RulesEngine for RuleSet {
    async fn evaluate(&self, request: &AccessRequest) -> RulesResult<Decision> {
        let decision = self.decide(request)?;
        debug!(
            path = %request.target.path(),
            operation = request.operation.as_str(),
            authenticated = request.auth.is_some(),
            decision = ?decision,
            "evaluated access request"
        );
        Ok(decision)
    }
}

/// Production-equivalent rules for the `allowed_email_domains` collection.
///
/// The allow-list is managed by the backend; clients never create, read,
/// update, or delete its documents directly, regardless of sign-in provider,
/// allow-list membership, or verification status.
#[must_use]
pub fn allowed_email_domains_rules() -> RuleSet {
    RuleSet::new().backend_only(crate::ALLOWED_EMAIL_DOMAINS_COLLECTION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::TargetRef;

    fn request(auth: Option<AuthToken>, operation: Operation) -> AccessRequest {
        AccessRequest::new(
            auth,
            operation,
            TargetRef::collection(crate::ALLOWED_EMAIL_DOMAINS_COLLECTION),
        )
    }

    fn verified_user() -> AuthToken {
        AuthToken::new("user@gmail.com", SignInProvider::Password, true)
    }

    #[tokio::test]
    async fn test_empty_rule_set_denies() {
        let engine = RuleSet::new();
        let decision = engine
            .evaluate(&request(Some(verified_user()), Operation::Read))
            .await
            .unwrap();
        assert_eq!(decision, Decision::Deny);
    }

    #[tokio::test]
    async fn test_backend_only_denies_every_operation() {
        let engine = allowed_email_domains_rules();
        assert_eq!(engine.grant_count(), Operation::ALL.len());
        for operation in Operation::ALL {
            let decision = engine
                .evaluate(&request(Some(verified_user()), operation))
                .await
                .unwrap();
            assert_eq!(decision, Decision::Deny, "operation {}", operation.as_str());
        }
    }

    #[tokio::test]
    async fn test_grant_allows_matching_caller() {
        let engine = RuleSet::new().grant(
            "profiles",
            Operation::Read,
            Condition::All(vec![
                Condition::EmailVerified,
                Condition::email_domain_in(["gmail.com"]),
            ]),
        );

        let allowed = AccessRequest::new(
            Some(verified_user()),
            Operation::Read,
            TargetRef::collection("profiles"),
        );
        assert_eq!(engine.evaluate(&allowed).await.unwrap(), Decision::Allow);

        let unverified = AuthToken::new("user@gmail.com", SignInProvider::Password, false);
        let denied = AccessRequest::new(Some(unverified), Operation::Read, TargetRef::collection("profiles"));
        assert_eq!(engine.evaluate(&denied).await.unwrap(), Decision::Deny);
    }

    #[tokio::test]
    async fn test_grant_is_operation_scoped() {
        let engine = RuleSet::new().grant("profiles", Operation::Read, Condition::SignedIn);
        let write = AccessRequest::new(
            Some(verified_user()),
            Operation::Create,
            TargetRef::collection("profiles"),
        );
        assert_eq!(engine.evaluate(&write).await.unwrap(), Decision::Deny);
    }

    #[tokio::test]
    async fn test_always_allows_unauthenticated() {
        let engine = RuleSet::new().grant("public", Operation::Read, Condition::Always);
        let anonymous = AccessRequest::new(None, Operation::Read, TargetRef::collection("public"));
        assert_eq!(engine.evaluate(&anonymous).await.unwrap(), Decision::Allow);
    }

    #[tokio::test]
    async fn test_conditions_deny_unauthenticated() {
        for condition in [
            Condition::SignedIn,
            Condition::EmailVerified,
            Condition::Provider(SignInProvider::Google),
            Condition::email_domain_in(["gmail.com"]),
        ] {
            let engine = RuleSet::new().grant("public", Operation::Read, condition);
            let anonymous =
                AccessRequest::new(None, Operation::Read, TargetRef::collection("public"));
            assert_eq!(engine.evaluate(&anonymous).await.unwrap(), Decision::Deny);
        }
    }

    #[tokio::test]
    async fn test_empty_domain_set_is_invalid() {
        let engine = RuleSet::new().grant(
            "profiles",
            Operation::Read,
            Condition::EmailDomainIn(BTreeSet::new()),
        );
        let result = engine
            .evaluate(&AccessRequest::new(
                Some(verified_user()),
                Operation::Read,
                TargetRef::collection("profiles"),
            ))
            .await;
        assert!(matches!(result, Err(RulesError::InvalidCondition { .. })));
    }

    #[tokio::test]
    async fn test_any_combinator() {
        let engine = RuleSet::new().grant(
            "profiles",
            Operation::Read,
            Condition::Any(vec![
                Condition::Provider(SignInProvider::Google),
                Condition::Provider(SignInProvider::Password),
            ]),
        );
        let google = AuthToken::new("user@gmail.com", SignInProvider::Google, false);
        let req = AccessRequest::new(Some(google), Operation::Read, TargetRef::collection("profiles"));
        assert_eq!(engine.evaluate(&req).await.unwrap(), Decision::Allow);
    }
}
