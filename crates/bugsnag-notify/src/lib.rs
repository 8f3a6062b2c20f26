// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bugsnag error notifier for Rust applications.
//!
//! Each notify call produces exactly one `POST` to the ingestion endpoint,
//! or none when the configured release stage is filtered out.
//!
//! # Quick Start
//!
//! ```ignore
//! use bugsnag_notify::{create_client, Configuration, Metadata, User};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Configuration::builder()
//!         .token("your_api_key")
//!         .code_version(env!("CARGO_PKG_VERSION"))
//!         .context("checkout")
//!         .release_stage("production")
//!         .notify_release_stages(["production", "staging"])
//!         .user(User::new("42", "Leeroy Jenkins", "support@bugsnag.com"))
//!         .build()?;
//!
//!     let bugsnag = create_client(config)?;
//!
//!     // Severity-bound helpers
//!     bugsnag
//!         .error("Auth failed", Metadata::new().insert("accountType", "premium"))
//!         .await?;
//!
//!     // Attach application state rendered at call time
//!     let cart = vec!["apple", "pear"];
//!     bugsnag
//!         .warning_with_model("Checkout slow", Metadata::new(), || format!("{cart:?}"))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! - Release-stage filtering is not an error: the call returns
//!   [`Delivery::Suppressed`] and logs the skipped event.
//! - Metadata that cannot be serialized fails before any network access.
//! - Transport failures return [`NotifyError::SendFailed`]; nothing is retried.
//!
//! # Logging
//!
//! Diagnostics go through `tracing`. The API key is never logged.

mod client;
mod error;
pub mod http;
mod transport;

pub use client::{create_client, notify, Delivery, Notifier};
pub use error::{NotifyError, Result, TransportError};
pub use transport::{
	HttpTransport, NotifyRequest, Transport, API_KEY_HEADER, PAYLOAD_VERSION_HEADER,
};

// Re-export core types for convenience
pub use bugsnag_notify_core::{
	build_payload, ApiKey, Configuration, ConfigurationBuilder, CoreError, Event, Metadata,
	Payload, Severity, User, DEFAULT_ENDPOINT, MODEL_KEY, PAYLOAD_VERSION,
};
