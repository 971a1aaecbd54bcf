//! Shared proptest generators for rules-verification tests.

use docrules_core::{AuthToken, Operation, PermissionSet, SignInProvider};
use proptest::prelude::*;

/// Generate sign-in providers.
pub fn sign_in_provider_strategy() -> impl Strategy<Value = SignInProvider> {
    prop_oneof![Just(SignInProvider::Password), Just(SignInProvider::Google)]
}

/// Generate lowercase email domains.
pub fn email_domain_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9-]{1,12}\\.[a-z]{2,4}"
}

/// Generate email addresses.
pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-z0-9._%+-]{1,16}", email_domain_strategy())
        .prop_map(|(local, domain)| format!("{local}@{domain}"))
}

/// Generate authenticated-caller tokens.
pub fn auth_token_strategy() -> impl Strategy<Value = AuthToken> {
    (email_strategy(), sign_in_provider_strategy(), any::<bool>())
        .prop_map(|(email, provider, verified)| AuthToken::new(email, provider, verified))
}

/// Generate callers, including the unauthenticated one.
pub fn caller_strategy() -> impl Strategy<Value = Option<AuthToken>> {
    prop_oneof![Just(None), auth_token_strategy().prop_map(Some)]
}

/// Generate CRUD operations.
pub fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Create),
        Just(Operation::Read),
        Just(Operation::Update),
        Just(Operation::Delete),
    ]
}

/// Generate expected-permission sets.
pub fn permission_set_strategy() -> impl Strategy<Value = PermissionSet> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(create, read, update, delete)| PermissionSet {
            create,
            read,
            update,
            delete,
        },
    )
}
