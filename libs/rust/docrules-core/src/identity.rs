//! Caller identity types.
//!
//! An authenticated caller is described by an [`AuthToken`]: the claims the
//! backend would attach to a request after verifying the caller's session.
//! An unauthenticated caller is simply the absence of a token
//! (`Option<AuthToken>` = `None`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sign-in provider used to establish a caller's identity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SignInProvider {
    /// Email/password authentication
    Password,
    /// Federated Google sign-in
    Google,
}

impl SignInProvider {
    /// Get the wire identifier for this provider.
    #[must_use]
    pub const fn provider_id(&self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Google => "google.com",
        }
    }

    /// Resolve a provider from its wire identifier.
    #[must_use]
    pub fn from_provider_id(id: &str) -> Option<Self> {
        match id {
            "password" => Some(Self::Password),
            "google.com" => Some(Self::Google),
            _ => None,
        }
    }
}

/// Claims describing one authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthToken {
    /// Stable caller identifier
    pub uid: String,
    /// Email address the caller signed in with
    pub email: String,
    /// Whether the email address has been verified
    pub email_verified: bool,
    /// Provider that established this identity
    pub sign_in_provider: SignInProvider,
    /// When the token was issued
    pub issued_at: DateTime<Utc>,
}

impl AuthToken {
    /// Create a token for the given email and provider.
    #[must_use]
    pub fn new(email: impl Into<String>, provider: SignInProvider, verified: bool) -> Self {
        Self {
            uid: Uuid::new_v4().to_string(),
            email: email.into(),
            email_verified: verified,
            sign_in_provider: provider,
            issued_at: Utc::now(),
        }
    }

    /// Domain part of the caller's email address, if present.
    #[must_use]
    pub fn email_domain(&self) -> Option<&str> {
        self.email.rsplit_once('@').map(|(_, domain)| domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id_round_trip() {
        for provider in [SignInProvider::Password, SignInProvider::Google] {
            assert_eq!(
                SignInProvider::from_provider_id(provider.provider_id()),
                Some(provider)
            );
        }
    }

    #[test]
    fn test_unknown_provider_id() {
        assert_eq!(SignInProvider::from_provider_id("facebook.com"), None);
    }

    #[test]
    fn test_email_domain() {
        let token = AuthToken::new("user@gmail.com", SignInProvider::Password, true);
        assert_eq!(token.email_domain(), Some("gmail.com"));
    }

    #[test]
    fn test_email_domain_missing_at() {
        let token = AuthToken::new("not-an-email", SignInProvider::Password, true);
        assert_eq!(token.email_domain(), None);
    }

    #[test]
    fn test_token_serialization() {
        let token = AuthToken::new("user@gmail.com", SignInProvider::Google, false);
        let json = serde_json::to_string(&token).unwrap();
        let parsed: AuthToken = serde_json::from_str(&json).unwrap();
        assert_eq!(token, parsed);
    }
}
