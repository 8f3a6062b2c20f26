// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the notifier.

use bugsnag_notify_core::CoreError;
use thiserror::Error;

/// Result type alias for notifier operations.
pub type Result<T> = std::result::Result<T, NotifyError>;

/// Errors that can occur while notifying.
#[derive(Debug, Error)]
pub enum NotifyError {
	/// Configuration or payload construction failed.
	#[error(transparent)]
	Core(#[from] CoreError),

	/// The HTTP client could not be constructed.
	#[error("failed to build HTTP client: {0}")]
	HttpClient(#[source] reqwest::Error),

	/// The event could not be delivered.
	///
	/// The message is deliberately generic; the source carries the transport
	/// detail.
	#[error("failed to send event")]
	SendFailed(#[from] TransportError),
}

/// Failure reported by a [`Transport`](crate::Transport).
#[derive(Debug, Error)]
pub enum TransportError {
	/// Connection, DNS, TLS or body error.
	#[error("request failed: {0}")]
	Request(#[from] reqwest::Error),

	/// The endpoint answered with a non-success status.
	#[error("unexpected status {0}")]
	Status(u16),

	/// Failure from a non-HTTP transport.
	#[error("{0}")]
	Other(String),
}
