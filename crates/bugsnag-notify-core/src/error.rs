// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for configuration and payload construction.

use thiserror::Error;

/// Errors that can occur while building a configuration or a payload.
#[derive(Debug, Error)]
pub enum CoreError {
	#[error("missing required configuration field: {0}")]
	MissingField(&'static str),

	#[error("invalid severity: {0}")]
	InvalidSeverity(String),

	#[error("invalid metadata: expected a JSON object, got {0}")]
	InvalidMetadata(&'static str),

	#[error("serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

/// Result type for configuration and payload operations.
pub type Result<T> = std::result::Result<T, CoreError>;
