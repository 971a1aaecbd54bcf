//! Domain model for document-database security-rules verification.
//!
//! This crate provides:
//! - Caller identity types (sign-in provider, auth-token claims)
//! - Access-request types (operation, target, decision, permission sets)
//! - The `RulesEngine` capability trait and a static rule-set engine
//! - The production-equivalent rule set for `allowed_email_domains`

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod access;
pub mod engine;
pub mod error;
pub mod identity;
pub mod telemetry;

pub use access::{AccessRequest, Decision, Operation, PermissionSet, TargetRef};
pub use engine::{Condition, RuleSet, RulesEngine, allowed_email_domains_rules};
pub use error::{RulesError, RulesResult};
pub use identity::{AuthToken, SignInProvider};

/// Collection restricted to backend writes; the subject of the access suite.
pub const ALLOWED_EMAIL_DOMAINS_COLLECTION: &str = "allowed_email_domains";
