//! Integration-test crate for the docrules verification platform.
//!
//! The suites live under `tests/`; this library target only exists so cargo
//! has a package target to attach them to.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
