//! Widget operator core library
//!
//! This crate is the control-plane client core consumed by the Widget
//! operator process and by its integration tests. It owns two pieces:
//!
//! - Registration of the Widget CustomResourceDefinition: an embedded CRD
//!   manifest is decoded and submitted for creation, with repeated or
//!   concurrent installation attempts collapsing into success.
//! - A fluent assertion chain over remotely stored Widget state, used by
//!   integration tests to verify that a Widget looks the way it should.
//!
//! # Modules
//!
//! - [`crd`] - The Widget Custom Resource Definition (spec, status, conditions)
//! - [`client`] - Classified resource-client boundary over the Kubernetes API
//! - [`registrar`] - Idempotent installation of the Widget CRD
//! - [`testing`] - Fluent state assertions for integration tests
//! - [`error`] - Error types for the operator core

#![deny(missing_docs)]

pub mod client;
pub mod crd;
pub mod error;
pub mod registrar;
pub mod testing;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;
