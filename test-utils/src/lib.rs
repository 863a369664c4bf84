//! Shared test utilities for the vault-client workspace.
//!
//! This crate provides:
//! - A blocking-friendly harness around a wiremock Vault server
//! - A capturing error callback
//! - A tracing layer that records events for assertions
//! - Proptest generators for paths, tokens, namespaces and parameters
//! - JSON fixtures shaped like Vault responses

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod capture;
pub mod fixtures;
pub mod generators;
pub mod mocks;

pub use capture::{CapturedEvent, EventCapture};
pub use generators::*;
pub use mocks::{ErrorLog, MockVault, unused_local_port};
