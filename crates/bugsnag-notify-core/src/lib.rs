// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for the Bugsnag notifier.
//!
//! This crate holds everything needed to turn a notification into a request
//! body, without any I/O:
//! - [`Configuration`]: API key, release metadata and optional [`User`]
//! - [`Severity`], [`Metadata`] and [`Event`]: one notification
//! - [`Payload`]: the payload-version 5 document sent to the ingestion API
//!
//! The HTTP side lives in `bugsnag-notify`.

pub mod api_key;
pub mod config;
pub mod error;
pub mod event;
pub mod metadata;
pub mod payload;
pub mod severity;
pub mod user;

pub use api_key::{ApiKey, REDACTED};
pub use config::{Configuration, ConfigurationBuilder, DEFAULT_ENDPOINT};
pub use error::{CoreError, Result};
pub use event::{Event, MODEL_KEY};
pub use metadata::Metadata;
pub use payload::{
	build_payload, Payload, APP_TYPE, NOTIFIER_NAME, NOTIFIER_URL, NOTIFIER_VERSION,
	PAYLOAD_VERSION,
};
pub use severity::Severity;
pub use user::User;
