//! Shared test utilities for rules verification.
//!
//! This crate provides:
//! - Identity factories and seed data for the tested collection
//! - A setup/teardown harness around the rules-checked store
//! - The access-matrix builder and suite driver
//! - Assertion primitives and proptest generators

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod harness;
pub mod matrix;

pub use fixtures::{
    ALLOWED_EMAIL_DOMAIN, DENIED_EMAIL_DOMAIN, GOOGLE_SIGN_IN_PROVIDER_ID,
    PASSWORD_SIGN_IN_PROVIDER_ID, allowed_email_domains_seed, allowed_email_user,
    denied_email_user,
};
pub use harness::{HarnessError, TestEnv, assert_fails, assert_succeeds};
pub use matrix::{
    CaseResult, IdentityVariant, ProviderGroup, case_title, run_access_matrix,
    sign_in_provider_matrix,
};
