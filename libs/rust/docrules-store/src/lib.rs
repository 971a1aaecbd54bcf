//! Rules-enforced in-memory document store.
//!
//! A test double for the document database the security rules protect:
//! documents live in process memory, and every client operation is evaluated
//! against an injected [`docrules_core::RulesEngine`] before it touches
//! storage. Seeding and teardown bypass the rules, the way backend test
//! utilities do.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod app;
pub mod database;
pub mod error;

pub use app::{AppHandle, CollectionRef, DocumentRef};
pub use database::{Database, SeedData};
pub use error::{StoreError, StoreResult};
