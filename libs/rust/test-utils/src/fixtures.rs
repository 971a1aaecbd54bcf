//! Test fixtures: identity factories and seed data.
//!
//! This module provides the identity descriptors and baseline documents the
//! access suite runs against.

use docrules_core::{AuthToken, SignInProvider};
use docrules_store::SeedData;
use serde_json::json;
use std::collections::HashMap;

/// Wire identifier of the password sign-in provider.
pub const PASSWORD_SIGN_IN_PROVIDER_ID: &str = "password";

/// Wire identifier of the federated Google sign-in provider.
pub const GOOGLE_SIGN_IN_PROVIDER_ID: &str = "google.com";

/// Email domain present on the allow list.
pub const ALLOWED_EMAIL_DOMAIN: &str = "gmail.com";

/// Email domain absent from the allow list.
pub const DENIED_EMAIL_DOMAIN: &str = "denied.example.com";

/// A caller whose email domain is on the allow list.
#[must_use]
pub fn allowed_email_user(provider: SignInProvider, verified: bool) -> AuthToken {
    AuthToken::new(
        format!("user@{ALLOWED_EMAIL_DOMAIN}"),
        provider,
        verified,
    )
}

/// A caller whose email domain is not on the allow list.
#[must_use]
pub fn denied_email_user(provider: SignInProvider, verified: bool) -> AuthToken {
    AuthToken::new(format!("user@{DENIED_EMAIL_DOMAIN}"), provider, verified)
}

/// Baseline documents for the `allowed_email_domains` collection.
///
/// The `gmail.com` document is the fixed target of the suite's update and
/// delete cases.
#[must_use]
pub fn allowed_email_domains_seed() -> SeedData {
    let mut docs = HashMap::new();
    docs.insert(ALLOWED_EMAIL_DOMAIN.to_string(), json!({}));
    docs.insert("outlook.com".to_string(), json!({}));

    let mut data = HashMap::new();
    data.insert(
        docrules_core::ALLOWED_EMAIL_DOMAINS_COLLECTION.to_string(),
        docs,
    );
    data
}
